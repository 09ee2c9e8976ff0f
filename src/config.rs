// src/config.rs

use crate::error::{OneIdError, Result};
use url::Url;

/// Lifetime of an issued id_token when none is configured, in seconds.
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 5 * 60;

/// Upper bound accepted by [`SignerOptions::token_lifetime`], in seconds.
pub const MAX_TOKEN_LIFETIME_SECS: u64 = 5 * 60;

/// Query parameter that carries the token in a login URL.
pub const DEFAULT_TOKEN_QUERY_PARAM: &str = "id_token";

/// Placeholder in the login base URL replaced by the target app type.
pub const APP_TYPE_PLACEHOLDER: &str = "{app_type}";

/// Optional settings for a [`Signer`](crate::signer::Signer).
///
/// Setters only record values; everything is checked, in declaration order,
/// when the signer is built, and the first invalid value aborts construction.
#[derive(Debug, Clone)]
pub struct SignerOptions {
    token_lifetime: Option<u64>,
    token_query_param: Option<String>,
    audience: Option<String>,
    require_name: bool,
}

impl Default for SignerOptions {
    fn default() -> Self {
        Self {
            token_lifetime: None,
            token_query_param: None,
            audience: None,
            require_name: true,
        }
    }
}

impl SignerOptions {
    /// Creates a new `SignerOptions` with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the id_token lifetime in seconds. Must not exceed
    /// [`MAX_TOKEN_LIFETIME_SECS`].
    pub fn token_lifetime(mut self, secs: u64) -> Self {
        self.token_lifetime = Some(secs);
        self
    }

    /// Sets the query parameter name the token is written to.
    /// Defaults to `id_token`.
    pub fn token_query_param(mut self, name: impl Into<String>) -> Self {
        self.token_query_param = Some(name.into());
        self
    }

    /// Stamps a fixed `aud` claim on every issued token.
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Whether a display name is mandatory on every identity. Defaults to `true`.
    pub fn require_name(mut self, required: bool) -> Self {
        self.require_name = required;
        self
    }
}

/// The validated, immutable configuration of a signer.
#[derive(Debug, Clone)]
pub struct SignerConfig {
    /// Placed in the `iss` claim.
    pub issuer: String,
    /// Login URL template containing [`APP_TYPE_PLACEHOLDER`].
    pub login_base_url: String,
    pub token_lifetime_secs: u64,
    pub token_query_param: String,
    /// Placed in the `aud` claim when set.
    pub audience: Option<String>,
    pub require_name: bool,
}

impl SignerConfig {
    /// Trims and checks the base URL and issuer, then applies `options`.
    pub fn new(issuer: &str, login_base_url: &str, options: SignerOptions) -> Result<Self> {
        let login_base_url = login_base_url.trim();
        if login_base_url.is_empty() {
            return Err(OneIdError::config("login base url MUST NOT be empty"));
        }
        Url::parse(login_base_url).map_err(|e| {
            OneIdError::Config(format!("login base url is invalid: {}", e))
        })?;

        let issuer = issuer.trim();
        if issuer.is_empty() {
            return Err(OneIdError::config("issuer MUST NOT be empty"));
        }

        let mut config = Self {
            issuer: issuer.to_string(),
            login_base_url: login_base_url.to_string(),
            token_lifetime_secs: DEFAULT_TOKEN_LIFETIME_SECS,
            token_query_param: DEFAULT_TOKEN_QUERY_PARAM.to_string(),
            audience: None,
            require_name: options.require_name,
        };

        if let Some(secs) = options.token_lifetime {
            if secs > MAX_TOKEN_LIFETIME_SECS {
                return Err(OneIdError::Config(format!(
                    "tokenLifetime must less or equal than {} second",
                    MAX_TOKEN_LIFETIME_SECS
                )));
            }
            config.token_lifetime_secs = secs;
        }

        if let Some(name) = options.token_query_param {
            let name = name.trim();
            if name.is_empty() {
                return Err(OneIdError::config("token query param MUST NOT be empty"));
            }
            config.token_query_param = name.to_string();
        }

        if let Some(audience) = options.audience {
            let audience = audience.trim();
            if audience.is_empty() {
                return Err(OneIdError::config("audience MUST NOT be empty"));
            }
            config.audience = Some(audience.to_string());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "https://sso.example.com/v1/kit/{app_type}";

    #[test]
    fn defaults_apply() {
        let config = SignerConfig::new(" https://issuer ", BASE_URL, SignerOptions::new()).unwrap();
        assert_eq!(config.issuer, "https://issuer");
        assert_eq!(config.token_lifetime_secs, DEFAULT_TOKEN_LIFETIME_SECS);
        assert_eq!(config.token_query_param, DEFAULT_TOKEN_QUERY_PARAM);
        assert!(config.audience.is_none());
        assert!(config.require_name);
    }

    #[test]
    fn lifetime_bounds() {
        let ok = SignerConfig::new("iss", BASE_URL, SignerOptions::new().token_lifetime(0)).unwrap();
        assert_eq!(ok.token_lifetime_secs, 0);

        let max = SignerOptions::new().token_lifetime(MAX_TOKEN_LIFETIME_SECS);
        assert!(SignerConfig::new("iss", BASE_URL, max).is_ok());

        let over = SignerOptions::new().token_lifetime(MAX_TOKEN_LIFETIME_SECS + 1);
        assert!(matches!(
            SignerConfig::new("iss", BASE_URL, over),
            Err(OneIdError::Config(_))
        ));
    }

    #[test]
    fn first_failing_option_wins() {
        let options = SignerOptions::new()
            .token_lifetime(3600)
            .token_query_param("  ");
        let err = SignerConfig::new("iss", BASE_URL, options).unwrap_err();
        assert!(err.to_string().contains("tokenLifetime"));
    }

    #[test]
    fn base_url_checked_before_issuer() {
        let err = SignerConfig::new("", "", SignerOptions::new()).unwrap_err();
        assert_eq!(err.to_string(), "login base url MUST NOT be empty");
    }
}
