/// Error types shared by the recipe pipeline.
///
/// Every variant describes the failure of one unit of work (a single translation, a single
/// catalog request, a single record). The engine and explorer absorb these per unit and
/// report them as issues; they never abort a whole search.

#[derive(Debug, Clone, thiserror::Error)]
pub enum CommonError {
    #[error("translation failed: {0}")]
    Translation(String),

    #[error("recipe catalog unavailable: {0}")]
    SourceUnavailable(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("http client error: {0}")]
    Http(String),
}

impl CommonError {
    pub fn kind(&self) -> &'static str {
        match self {
            CommonError::Translation(_) => "translation",
            CommonError::SourceUnavailable(_) => "source_unavailable",
            CommonError::MalformedRecord(_) => "malformed_record",
            CommonError::Http(_) => "http",
        }
    }
}
