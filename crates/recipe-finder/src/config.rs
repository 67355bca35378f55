use recipe_core::catalog::CatalogConfig;
use recipe_core::engine::EngineConfig;
use recipe_core::translate::TranslatorConfig;

use crate::error::AppError;

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub translator: TranslatorConfig,
    pub engine: EngineConfig,
    /// Serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Nothing is required; see `CatalogConfig::from_env`, `TranslatorConfig::from_env`
    /// and `EngineConfig::from_env` for the variables and their defaults.
    ///
    /// Optional:
    /// - `MCP_TCP_LISTEN_ADDR`: serve on TCP (for example "0.0.0.0:8090") instead of stdio
    pub fn from_env() -> Result<Self, AppError> {
        let config = Self {
            catalog: CatalogConfig::from_env(),
            translator: TranslatorConfig::from_env(),
            engine: EngineConfig::from_env(),
            tcp_listen_addr: std::env::var("MCP_TCP_LISTEN_ADDR")
                .ok()
                .filter(|addr| !addr.trim().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        let engine = &self.engine;
        if engine.user_locale.trim().is_empty() || engine.catalog_locale.trim().is_empty() {
            return Err(AppError::Config(
                "USER_LOCALE and CATALOG_LOCALE must not be empty".to_string(),
            ));
        }
        if engine.max_candidates == 0 {
            return Err(AppError::Config("RECIPE_MAX_CANDIDATES must be at least 1".to_string()));
        }
        if engine.default_limit == 0 || engine.region_browse_limit == 0 {
            return Err(AppError::Config(
                "RECIPE_DEFAULT_LIMIT and REGION_BROWSE_LIMIT must be at least 1".to_string(),
            ));
        }
        if engine.concurrency == 0 {
            return Err(AppError::Config("RECIPE_CONCURRENCY must be at least 1".to_string()));
        }
        if engine.all_regions_label.trim().is_empty() {
            return Err(AppError::Config("ALL_REGIONS_LABEL must not be empty".to_string()));
        }
        for (name, url) in [
            ("MEALDB_BASE_URL", &self.catalog.base_url),
            ("TRANSLATE_BASE_URL", &self.translator.base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::Config(format!("{name} must be an http(s) URL, got {url}")));
            }
        }
        Ok(())
    }
}
