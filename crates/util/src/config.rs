//! Site configuration for the Groundwork client.
//!
//! Values are resolved from, in order:
//!
//! - the runtime environment (`GROUNDWORK_*` variables)
//! - values injected when the binary was built (`option_env!`)
//! - built-in defaults
//!
//! Base URLs are validated before use: `localhost` and `127.0.0.1` accept any
//! scheme, every other host must be served over HTTPS.

use std::env;

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::i18n::Locale;

pub const SERVER_URL_ENV: &str = "GROUNDWORK_SERVER_URL";
pub const GEOCODER_URL_ENV: &str = "GROUNDWORK_GEOCODER_URL";
pub const CONTACT_PHONE_ENV: &str = "GROUNDWORK_CONTACT_PHONE";
pub const CONTACT_EMAIL_ENV: &str = "GROUNDWORK_CONTACT_EMAIL";
pub const FACEBOOK_ENV: &str = "GROUNDWORK_FACEBOOK";
pub const INSTAGRAM_ENV: &str = "GROUNDWORK_INSTAGRAM";
pub const LINKEDIN_ENV: &str = "GROUNDWORK_LINKEDIN";
pub const LOCALE_ENV: &str = "GROUNDWORK_LOCALE";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Error surfaced when configuration values cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL '{value}' for {name}: {reason}")]
    InvalidUrl { name: &'static str, value: String, reason: String },
    #[error("{name} must use https for non-localhost hosts; got '{scheme}://'")]
    InsecureScheme { name: &'static str, scheme: String },
    #[error("unsupported locale '{0}'; expected 'en' or 'es'")]
    UnsupportedLocale(String),
}

/// Social media handles shown on the informational screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialHandles {
    pub facebook: String,
    pub instagram: String,
    pub linkedin: String,
}

/// Process-wide constants for talking to the backend and presenting the
/// business's contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Base URL of the prospect API, without a trailing slash.
    pub server_url: String,
    /// Base URL of the geocoding provider, without a trailing slash.
    pub geocoder_url: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub social: SocialHandles,
    pub locale: Locale,
}

impl SiteConfig {
    /// Resolve the configuration from the environment and build-time values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_url = resolve(SERVER_URL_ENV, option_env!("GROUNDWORK_SERVER_URL"), DEFAULT_SERVER_URL);
        let geocoder_url = resolve(GEOCODER_URL_ENV, option_env!("GROUNDWORK_GEOCODER_URL"), DEFAULT_GEOCODER_URL);
        let locale = resolve(LOCALE_ENV, option_env!("GROUNDWORK_LOCALE"), "en");

        let config = Self {
            server_url: normalize_base_url(SERVER_URL_ENV, &server_url)?,
            geocoder_url: normalize_base_url(GEOCODER_URL_ENV, &geocoder_url)?,
            contact_phone: resolve(CONTACT_PHONE_ENV, option_env!("GROUNDWORK_CONTACT_PHONE"), ""),
            contact_email: resolve(CONTACT_EMAIL_ENV, option_env!("GROUNDWORK_CONTACT_EMAIL"), ""),
            social: SocialHandles {
                facebook: resolve(FACEBOOK_ENV, option_env!("GROUNDWORK_FACEBOOK"), ""),
                instagram: resolve(INSTAGRAM_ENV, option_env!("GROUNDWORK_INSTAGRAM"), ""),
                linkedin: resolve(LINKEDIN_ENV, option_env!("GROUNDWORK_LINKEDIN"), ""),
            },
            locale: locale.parse()?,
        };
        debug!(server_url = %config.server_url, geocoder_url = %config.geocoder_url, "resolved site configuration");
        Ok(config)
    }

    /// Replace the server URL, validating it first.
    pub fn with_server_url(mut self, server_url: &str) -> Result<Self, ConfigError> {
        self.server_url = normalize_base_url(SERVER_URL_ENV, server_url)?;
        Ok(self)
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            contact_phone: String::new(),
            contact_email: String::new(),
            social: SocialHandles::default(),
            locale: Locale::default(),
        }
    }
}

fn resolve(env_name: &str, build_time: Option<&'static str>, default: &str) -> String {
    env::var(env_name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| build_time.map(str::to_string))
        .unwrap_or_else(|| default.to_string())
}

/// Validate a base URL and strip any trailing slash.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
pub fn normalize_base_url(name: &'static str, base: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(base).map_err(|error| ConfigError::InvalidUrl {
        name,
        value: base.to_string(),
        reason: error.to_string(),
    })?;

    let host_name = parsed.host_str().ok_or_else(|| ConfigError::InvalidUrl {
        name,
        value: base.to_string(),
        reason: "missing host".to_string(),
    })?;

    let is_local = LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed));
    if !is_local && parsed.scheme() != "https" {
        return Err(ConfigError::InsecureScheme {
            name,
            scheme: parsed.scheme().to_string(),
        });
    }

    Ok(base.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_accepts_plain_http() {
        assert_eq!(
            normalize_base_url(SERVER_URL_ENV, "http://localhost:8080/"),
            Ok("http://localhost:8080".to_string())
        );
        assert!(normalize_base_url(SERVER_URL_ENV, "http://127.0.0.1:3000").is_ok());
    }

    #[test]
    fn remote_hosts_require_https() {
        let error = normalize_base_url(SERVER_URL_ENV, "http://api.example.com").unwrap_err();
        assert!(matches!(error, ConfigError::InsecureScheme { .. }));
        assert!(normalize_base_url(SERVER_URL_ENV, "https://api.example.com").is_ok());
    }

    #[test]
    fn garbage_is_rejected() {
        let error = normalize_base_url(SERVER_URL_ENV, "not a url").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn environment_overrides_defaults() {
        temp_env::with_vars(
            [
                (SERVER_URL_ENV, Some("https://leads.example.com/")),
                (CONTACT_PHONE_ENV, Some(" 555-0100 ")),
                (LOCALE_ENV, Some("es")),
            ],
            || {
                let config = SiteConfig::from_env().unwrap();
                assert_eq!(config.server_url, "https://leads.example.com");
                assert_eq!(config.contact_phone, "555-0100");
                assert_eq!(config.locale, Locale::Es);
            },
        );
    }

    #[test]
    fn blank_environment_values_fall_back() {
        temp_env::with_vars([(SERVER_URL_ENV, Some("   ")), (LOCALE_ENV, None::<&str>)], || {
            let config = SiteConfig::from_env().unwrap();
            assert_eq!(config.server_url, option_env!("GROUNDWORK_SERVER_URL").unwrap_or(DEFAULT_SERVER_URL).trim_end_matches('/'));
        });
    }
}
