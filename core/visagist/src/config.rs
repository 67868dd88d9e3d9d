use crate::catalog::DEFAULT_CATALOG_URL;
use crate::error::VisagistError;

/// API credentials and endpoints, loaded from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// OpenAI API key (`OPENAI_API_KEY`).
    pub openai_api_key: String,
    /// YouTube Data API key (`YOUTUBE_API_KEY`).
    pub youtube_api_key: String,
    /// Makeup catalog endpoint (`MAKEUP_API_URL`, optional).
    pub catalog_url: String,
}

impl ApiConfig {
    /// Load configuration from the environment.
    ///
    /// Reads a `.env` file first when one exists. The two API keys are
    /// required; the catalog URL falls back to the public makeup API.
    pub fn from_env() -> Result<Self, VisagistError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            openai_api_key: require("OPENAI_API_KEY")?,
            youtube_api_key: require("YOUTUBE_API_KEY")?,
            catalog_url: std::env::var("MAKEUP_API_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string()),
        })
    }
}

fn require(key: &'static str) -> Result<String, VisagistError> {
    std::env::var(key).map_err(|_| VisagistError::MissingConfig(key))
}
