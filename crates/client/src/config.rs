//! Submitter configuration.
//!
//! Everything the handler needs from the surrounding page (the two URLs and
//! the anti-forgery token) is passed in here instead of being read from
//! global state.

use std::time::Duration;

use reqwest::header::HeaderName;
use shopadmin_core::CsrfToken;
use shopadmin_products::FieldNames;
use thiserror::Error;
use url::Url;

pub const ENV_BASE_URL: &str = "SHOPADMIN_BASE_URL";
pub const ENV_CREATE_PATH: &str = "SHOPADMIN_CREATE_PATH";
pub const ENV_REDIRECT_PATH: &str = "SHOPADMIN_REDIRECT_PATH";
pub const ENV_CSRF_TOKEN: &str = "SHOPADMIN_CSRF_TOKEN";
pub const ENV_CSRF_HEADER: &str = "SHOPADMIN_CSRF_HEADER";
pub const ENV_TIMEOUT_SECS: &str = "SHOPADMIN_TIMEOUT_SECS";
pub const ENV_FIELD_NAMES: &str = "SHOPADMIN_FIELD_NAMES";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CREATE_PATH: &str = "/api/products/create/";
pub const DEFAULT_REDIRECT_PATH: &str = "/admin-panel/products/";
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid URL in {key}: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// User-facing alert texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Shown when name or category is blank.
    pub required_fields: String,
    /// Shown when the server gives no usable error message, or the request
    /// never completed.
    pub creation_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required_fields: "please supply all required information".to_string(),
            creation_failed: "product creation failed".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    pub create_endpoint: Url,
    pub success_redirect: Url,
    pub csrf_token: CsrfToken,
    pub csrf_header: String,
    pub field_names: FieldNames,
    pub messages: Messages,
    /// No timeout unless set; a hung request leaves the form waiting.
    pub timeout: Option<Duration>,
}

impl SubmitterConfig {
    pub fn new(create_endpoint: Url, success_redirect: Url, csrf_token: CsrfToken) -> Self {
        Self {
            create_endpoint,
            success_redirect,
            csrf_token,
            csrf_header: DEFAULT_CSRF_HEADER.to_string(),
            field_names: FieldNames::default(),
            messages: Messages::default(),
            timeout: None,
        }
    }

    pub fn with_csrf_header(mut self, header: impl Into<String>) -> Self {
        self.csrf_header = header.into();
        self
    }

    pub fn with_field_names(mut self, field_names: FieldNames) -> Self {
        self.field_names = field_names;
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load from `SHOPADMIN_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key/value source.
    ///
    /// The create and redirect paths are resolved against the base URL, so
    /// either relative paths or absolute URLs work.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_raw = get(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base = Url::parse(base_raw.trim()).map_err(|source| ConfigError::InvalidUrl {
            key: ENV_BASE_URL,
            source,
        })?;

        let create_path = get(ENV_CREATE_PATH).unwrap_or_else(|| DEFAULT_CREATE_PATH.to_string());
        let create_endpoint = base
            .join(create_path.trim())
            .map_err(|source| ConfigError::InvalidUrl {
                key: ENV_CREATE_PATH,
                source,
            })?;

        let redirect_path =
            get(ENV_REDIRECT_PATH).unwrap_or_else(|| DEFAULT_REDIRECT_PATH.to_string());
        let success_redirect =
            base.join(redirect_path.trim())
                .map_err(|source| ConfigError::InvalidUrl {
                    key: ENV_REDIRECT_PATH,
                    source,
                })?;

        let token = get(ENV_CSRF_TOKEN).ok_or(ConfigError::Missing(ENV_CSRF_TOKEN))?;
        let csrf_token = CsrfToken::new(token.trim()).map_err(|e| ConfigError::Invalid {
            key: ENV_CSRF_TOKEN,
            message: e.to_string(),
        })?;

        let mut config = Self::new(create_endpoint, success_redirect, csrf_token);

        if let Some(header) = get(ENV_CSRF_HEADER) {
            let header = header.trim().to_string();
            HeaderName::from_bytes(header.as_bytes()).map_err(|e| ConfigError::Invalid {
                key: ENV_CSRF_HEADER,
                message: e.to_string(),
            })?;
            config = config.with_csrf_header(header);
        }

        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|e| ConfigError::Invalid {
                key: ENV_TIMEOUT_SECS,
                message: format!("{e}"),
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key: ENV_TIMEOUT_SECS,
                    message: "must be a positive number of seconds".to_string(),
                });
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        if let Some(raw) = get(ENV_FIELD_NAMES) {
            let names: FieldNames =
                serde_json::from_str(&raw).map_err(|e| ConfigError::Invalid {
                    key: ENV_FIELD_NAMES,
                    message: e.to_string(),
                })?;
            config = config.with_field_names(names);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<SubmitterConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SubmitterConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_resolve_against_local_server() {
        let config = load(&[(ENV_CSRF_TOKEN, "tok")]).unwrap();

        assert_eq!(
            config.create_endpoint.as_str(),
            "http://localhost:8000/api/products/create/"
        );
        assert_eq!(
            config.success_redirect.as_str(),
            "http://localhost:8000/admin-panel/products/"
        );
        assert_eq!(config.csrf_token.expose(), "tok");
        assert_eq!(config.csrf_header, DEFAULT_CSRF_HEADER);
        assert_eq!(config.field_names, FieldNames::default());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn paths_are_joined_onto_base_url() {
        let config = load(&[
            (ENV_BASE_URL, "https://shop.example.com/"),
            (ENV_CREATE_PATH, "/v2/products"),
            (ENV_REDIRECT_PATH, "https://admin.example.com/products"),
            (ENV_CSRF_TOKEN, "tok"),
        ])
        .unwrap();

        assert_eq!(config.create_endpoint.as_str(), "https://shop.example.com/v2/products");
        assert_eq!(config.success_redirect.as_str(), "https://admin.example.com/products");
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_CSRF_TOKEN)));

        let err = load(&[(ENV_CSRF_TOKEN, "   ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_CSRF_TOKEN)));
    }

    #[test]
    fn invalid_base_url_is_reported_with_its_key() {
        let err = load(&[(ENV_BASE_URL, "not a url"), (ENV_CSRF_TOKEN, "tok")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { key: ENV_BASE_URL, .. }));
    }

    #[test]
    fn optional_settings_are_applied() {
        let config = load(&[
            (ENV_CSRF_TOKEN, "tok"),
            (ENV_CSRF_HEADER, "X-XSRF-Token"),
            (ENV_TIMEOUT_SECS, "15"),
            (ENV_FIELD_NAMES, r#"{"name":"ten_san_pham","price":"gia"}"#),
        ])
        .unwrap();

        assert_eq!(config.csrf_header, "X-XSRF-Token");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.field_names.name, "ten_san_pham");
        assert_eq!(config.field_names.price, "gia");
        assert_eq!(config.field_names.image, "image");
    }

    #[test]
    fn bad_optional_settings_are_rejected() {
        for (key, value) in [
            (ENV_CSRF_HEADER, "bad header"),
            (ENV_TIMEOUT_SECS, "0"),
            (ENV_TIMEOUT_SECS, "soon"),
            (ENV_FIELD_NAMES, "{not json"),
        ] {
            let err = load(&[(ENV_CSRF_TOKEN, "tok"), (key, value)]).unwrap_err();
            match err {
                ConfigError::Invalid { key: k, .. } => assert_eq!(k, key),
                other => panic!("expected Invalid for {key}, got {other:?}"),
            }
        }
    }
}
