use anyhow::{Context, Result};

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Application configuration loaded from environment variables.
///
/// Nothing is strictly required: without `GEMINI_API_KEY` the service runs
/// with its local fallbacks only.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub llm_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_api_base: DEFAULT_API_BASE.to_string(),
            llm_timeout_secs: 30,
            max_upload_bytes: 10 * 1024 * 1024,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gemini_model: env_or("GEMINI_MODEL", defaults.gemini_model),
            gemini_api_base: env_or("GEMINI_API_BASE", defaults.gemini_api_base),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", defaults.llm_timeout_secs)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            port: parse_env("PORT", defaults.port)?,
            rust_log: env_or("RUST_LOG", defaults.rust_log),
        })
    }

    pub fn ai_enabled(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_without_api_key() {
        let config = Config::default();
        assert!(!config.ai_enabled());
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUMIND_TEST_PORT", "not-a-port");
        let result = parse_env::<u16>("RESUMIND_TEST_PORT", 8080);
        assert!(result.is_err());
        std::env::remove_var("RESUMIND_TEST_PORT");
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value = parse_env::<u64>("RESUMIND_TEST_UNSET_TIMEOUT", 30).unwrap();
        assert_eq!(value, 30);
    }
}
