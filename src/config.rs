use std::{env, time::Duration};

use anyhow::Context;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// empty when unset; the service rejects such calls
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("NEXT_PUBLIC_GEMINI_API_KEY"))
            .unwrap_or_default();
        if api_key.is_empty() {
            log::warn!("GEMINI_API_KEY is not set, the generation service will reject requests");
        }

        let timeout = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.trim()
                    .parse::<u64>()
                    .context(format!(
                        "GEMINI_TIMEOUT_SECS must be a whole number, got '{}'",
                        secs
                    ))?,
            ),
            None => defaults.timeout,
        };

        Ok(Self {
            api_key,
            model: lookup("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: lookup("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout,
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(
        vars: &'a HashMap<&'static str, &'static str>,
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let vars = HashMap::new();
        let config = GeminiConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config, GeminiConfig::default());
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let vars = HashMap::from([
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-test"),
            ("GEMINI_BASE_URL", "http://localhost:8080/v1/"),
            ("GEMINI_TIMEOUT_SECS", "5"),
        ]);
        let config = GeminiConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1/models/gemini-test:generateContent?key=secret"
        );
    }

    #[test]
    fn falls_back_to_public_key_name() {
        let vars = HashMap::from([("NEXT_PUBLIC_GEMINI_API_KEY", "public")]);
        let config = GeminiConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.api_key, "public");
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let vars = HashMap::from([("GEMINI_TIMEOUT_SECS", "soon")]);
        assert!(GeminiConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn default_endpoint_targets_generate_content() {
        let config = GeminiConfig::new("k");
        assert_eq!(
            config.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-05-20:generateContent?key=k"
        );
    }
}
