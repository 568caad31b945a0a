use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// The run fails at startup if the API credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub resource_file: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            resource_file: std::env::var("RESOURCE_FILE")
                .unwrap_or_else(|_| "merged_data_with_resources.csv".to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_missing_is_error() {
        let result = require_env("CLI_TEST_DEFINITELY_UNSET_VAR");
        assert!(result.is_err());
        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("CLI_TEST_DEFINITELY_UNSET_VAR"));
    }
}
