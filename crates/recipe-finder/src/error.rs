#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("unknown recipe id: {0}")]
    UnknownRecipe(String),

    #[error(transparent)]
    Common(#[from] recipe_core::error::CommonError),
}
