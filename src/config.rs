// src/config.rs
use std::{path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing GEMINI_API_KEY (or GOOGLE_API_KEY). Add it to .env, e.g. GEMINI_API_KEY=your_key_here.")]
    MissingApiKey,

    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Settings for the outbound generation API.
#[derive(Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

// Keep the key out of logs.
impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub knowledge_base_path: PathBuf,
    pub static_dir: PathBuf,
    pub gemini: GeminiSettings,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("GEMINI_API_KEY")
            .or_else(|| get("GOOGLE_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let gemini = GeminiSettings {
            api_key,
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: get("GEMINI_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            temperature: parse_or(get("GEMINI_TEMPERATURE"), "GEMINI_TEMPERATURE", 0.2)?,
            max_output_tokens: parse_or(
                get("GEMINI_MAX_OUTPUT_TOKENS"),
                "GEMINI_MAX_OUTPUT_TOKENS",
                300,
            )?,
            timeout: Duration::from_secs(parse_or(
                get("REQUEST_TIMEOUT_SECS"),
                "REQUEST_TIMEOUT_SECS",
                30,
            )?),
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(get("PORT"), "PORT", 8000)?,
            knowledge_base_path: get("KNOWLEDGE_BASE_PATH")
                .unwrap_or_else(|| "knowledge_base.json".to_string())
                .into(),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "static".to_string()).into(),
            gemini,
        })
    }

    /// Bind the listening socket. Host names such as `localhost` are resolved.
    pub async fn bind(&self) -> std::io::Result<tokio::net::TcpListener> {
        tokio::net::TcpListener::bind((self.host.as_str(), self.port)).await
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => {
            let parsed: Result<T, _> = value.trim().parse();
            parsed.map_err(|_| ConfigError::Invalid { key, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let cfg = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "abc")])).unwrap();
        assert_eq!(cfg.gemini.api_key, "abc");
        assert_eq!(cfg.gemini.model, DEFAULT_MODEL);
        assert_eq!(cfg.gemini.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.gemini.max_output_tokens, 300);
        assert!((cfg.gemini.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(cfg.gemini.timeout, Duration::from_secs(30));
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.knowledge_base_path, PathBuf::from("knowledge_base.json"));
        assert_eq!(cfg.static_dir, PathBuf::from("static"));
        assert_eq!(cfg.host, "0.0.0.0");
    }

    #[test]
    fn google_api_key_is_a_fallback() {
        let cfg = Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "g"), ("GEMINI_API_KEY", "")]))
            .unwrap();
        assert_eq!(cfg.gemini.api_key, "g");
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "9000")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn bad_port_is_reported() {
        let err = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "k"), ("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn host_names_are_kept_verbatim() {
        let cfg = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "k"), ("HOST", "localhost")]))
            .unwrap();
        assert_eq!(cfg.host, "localhost");
    }

    #[tokio::test]
    async fn binds_to_a_host_name() {
        let cfg = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("HOST", "localhost"),
            ("PORT", "0"),
        ]))
        .unwrap();
        let listener = cfg.bind().await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[test]
    fn api_base_trailing_slash_is_dropped() {
        let cfg = Config::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_API_BASE", "http://localhost:9999/v1beta/"),
        ]))
        .unwrap();
        assert_eq!(cfg.gemini.api_base, "http://localhost:9999/v1beta");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let cfg = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "super-secret")])).unwrap();
        assert!(!format!("{:?}", cfg).contains("super-secret"));
    }
}
