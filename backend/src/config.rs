//! Proxy configuration: built-in defaults, an optional TOML file, then
//! environment variables.
//!
//! # Environment Variables
//! - `POWERUP_CONFIG` (optional): path to a TOML file with the keys below
//! - `ESKOM_API_KEY` (optional): upstream token; calls fail without it
//! - `HOST` (optional, default: 0.0.0.0)
//! - `PORT` (optional, default: 5000)
//! - `ESKOM_API_BASE` (optional): upstream base URL
//! - `CORS_ORIGINS` (optional): comma-separated exact origins
//! - `CORS_ORIGIN_SUFFIXES` (optional): comma-separated host suffixes, e.g. `.vercel.app`

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://developer.sepush.co.za/business/2.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{key} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Runtime configuration of the proxy.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub upstream_base_url: String,
    /// Origins accepted verbatim.
    pub allowed_origins: Vec<String>,
    /// Origins ending with one of these suffixes are accepted too. The whole
    /// origin is compared, so an explicit port never matches.
    pub allowed_origin_suffixes: Vec<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            api_key: None,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "https://powerup-sa.vercel.app".to_string(),
            ],
            allowed_origin_suffixes: vec![".vercel.app".to_string()],
        }
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key_configured", &self.api_key_configured())
            .field("upstream_base_url", &self.upstream_base_url)
            .field("allowed_origins", &self.allowed_origins)
            .field("allowed_origin_suffixes", &self.allowed_origin_suffixes)
            .finish()
    }
}

impl ProxyConfig {
    /// Load configuration from `POWERUP_CONFIG` (if set) and the process
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match env::var("POWERUP_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path)?,
            _ => Self::default(),
        };
        base.with_env_overrides(|key| env::var(key).ok())
    }

    /// Read a TOML config file. Missing keys fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.api_key = normalize_key(config.api_key);
        Ok(config)
    }

    /// Apply overrides from a variable lookup. Taking the lookup as a
    /// closure lets tests avoid mutating the process environment.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("ESKOM_API_KEY") {
            self.api_key = normalize_key(Some(key));
        }
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                expected: "port number",
                value: port.clone(),
            })?;
        }
        if let Some(base) = lookup("ESKOM_API_BASE") {
            self.upstream_base_url = base;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.allowed_origins = split_list(&origins);
        }
        if let Some(suffixes) = lookup("CORS_ORIGIN_SUFFIXES") {
            self.allowed_origin_suffixes = split_list(&suffixes);
        }
        Ok(self)
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether a browser origin may call the proxy.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.allowed_origins.iter().any(|o| o == origin) {
            return true;
        }
        let Some(authority) = origin
            .strip_prefix("https://")
            .or_else(|| origin.strip_prefix("http://"))
        else {
            return false;
        };
        self.allowed_origin_suffixes
            .iter()
            .any(|suffix| authority.ends_with(suffix.as_str()) && authority.len() > suffix.len())
    }
}

fn normalize_key(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert!(!config.api_key_configured());
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_env_overrides() {
        let config = ProxyConfig::default()
            .with_env_overrides(lookup(&[
                ("ESKOM_API_KEY", "secret"),
                ("PORT", "8081"),
                ("CORS_ORIGINS", "http://a.test, http://b.test ,"),
            ]))
            .unwrap();

        assert!(config.api_key_configured());
        assert_eq!(config.port, 8081);
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_blank_key_is_absent() {
        let config = ProxyConfig::default()
            .with_env_overrides(lookup(&[("ESKOM_API_KEY", "   ")]))
            .unwrap();
        assert!(!config.api_key_configured());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = ProxyConfig::default()
            .with_env_overrides(lookup(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_debug_hides_key() {
        let config = ProxyConfig {
            api_key: Some("super-secret".to_string()),
            ..ProxyConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("api_key_configured: true"));
    }

    #[test]
    fn test_origin_matching() {
        let config = ProxyConfig::default();
        assert!(config.is_origin_allowed("http://localhost:3000"));
        assert!(config.is_origin_allowed("https://powerup-sa.vercel.app"));
        assert!(config.is_origin_allowed("https://powerup-sa-git-feature.vercel.app"));
        assert!(!config.is_origin_allowed("http://localhost:4000"));
        assert!(!config.is_origin_allowed("https://vercel.app.evil.test"));
        assert!(!config.is_origin_allowed("https://.vercel.app"));
        assert!(!config.is_origin_allowed("null"));
    }

    #[test]
    fn test_origin_suffix_rejects_ports() {
        let config = ProxyConfig::default();
        assert!(config.is_origin_allowed("https://x.vercel.app"));
        assert!(!config.is_origin_allowed("https://attacker.vercel.app:8443"));
        assert!(!config.is_origin_allowed("http://x.vercel.app:80"));
        assert!(!config.is_origin_allowed("ftp://x.vercel.app"));
    }

    #[test]
    fn test_from_file_with_partial_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 6000").unwrap();
        writeln!(file, "api_key = \"from-file\"").unwrap();

        let config = ProxyConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, 6000);
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_from_file_missing() {
        let err = ProxyConfig::from_file("/nonexistent/powerup.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
