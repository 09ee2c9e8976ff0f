// src/signer.rs

use crate::config::{SignerConfig, SignerOptions, APP_TYPE_PLACEHOLDER};
use crate::error::{OneIdError, Result};
use crate::key::{parse_private_key, SigningKey};
use crate::userinfo::Userinfo;
use jsonwebtoken::{encode, Algorithm, Header};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;
use uuid::Uuid;

/// Issues RS256 id_tokens and single-sign-on login URLs.
///
/// A `Signer` is immutable once built and can be shared between threads;
/// every call reads the clock and draws a fresh `jti` on its own.
#[derive(Clone)]
pub struct Signer {
    config: SignerConfig,
    key: SigningKey,
}

impl Signer {
    /// Creates a new `Signer` from private key text (PKCS#8 PEM or OpenSSH).
    ///
    /// The key is parsed first, then the login base URL and issuer are checked,
    /// then `options` are applied. The first failure is returned.
    pub fn new(
        private_key: &str,
        issuer: &str,
        login_base_url: &str,
        options: SignerOptions,
    ) -> Result<Self> {
        let key = parse_private_key(private_key)?;
        let config = SignerConfig::new(issuer, login_base_url, options)?;

        tracing::debug!(
            issuer = %config.issuer,
            kid = %key.kid(),
            token_lifetime_secs = config.token_lifetime_secs,
            "Signer initialized."
        );

        Ok(Self { config, key })
    }

    /// Like [`Signer::new`], reading the private key from `key_file`.
    pub fn from_key_file(
        key_file: impl AsRef<Path>,
        issuer: &str,
        login_base_url: &str,
        options: SignerOptions,
    ) -> Result<Self> {
        let pem = std::fs::read_to_string(key_file)?;
        Self::new(&pem, issuer, login_base_url, options)
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.key
    }

    /// Validates `user` and issues an id_token carrying its claims.
    pub fn new_token(&self, user: &Userinfo) -> Result<String> {
        user.validate(self.config.require_name)?;
        self.new_token_with_claims(user.to_claims())
    }

    /// Issues an id_token from caller-supplied claims.
    ///
    /// `iss`, `iat`, `exp`, `jti` (and `aud` when configured) are always
    /// stamped by the signer and replace any caller value.
    pub fn new_token_with_claims(&self, mut claims: Map<String, Value>) -> Result<String> {
        if claims.is_empty() {
            return Err(OneIdError::validation("claims MUST NOT be empty"));
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| OneIdError::Signing(format!("system clock is before UNIX epoch: {}", e)))?
            .as_secs();
        let exp = now + self.config.token_lifetime_secs;
        let jti = Uuid::new_v4().simple().to_string();

        claims.insert("iss".to_string(), json!(self.config.issuer));
        claims.insert("iat".to_string(), json!(now));
        claims.insert("exp".to_string(), json!(exp));
        claims.insert("jti".to_string(), json!(jti));
        if let Some(audience) = &self.config.audience {
            claims.insert("aud".to_string(), json!(audience));
        }

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.key.kid().to_string());

        let token = encode(&header, &claims, self.key.encoding_key())?;
        tracing::debug!(jti = %jti, exp = exp, "Issued id_token.");

        Ok(token)
    }

    /// Builds the login URL that signs `user` in to the application `app`.
    ///
    /// `params` are extra query parameters given as alternating keys and
    /// values. An odd-length list is ignored entirely, as is any pair with an
    /// empty key or value.
    pub fn new_login_url(&self, user: &Userinfo, app: &str, params: &[&str]) -> Result<String> {
        let token = self.new_token(user)?;
        self.new_login_url_with_token(&token, app, params)
    }

    /// Builds a login URL around an already issued token.
    ///
    /// The token parameter is written last and cannot be overridden through
    /// `params`. Query parameters are emitted sorted by key.
    pub fn new_login_url_with_token(&self, token: &str, app: &str, params: &[&str]) -> Result<String> {
        if token.is_empty() {
            return Err(OneIdError::validation("token MUST NOT be empty"));
        }

        let raw = self.config.login_base_url.replace(APP_TYPE_PLACEHOLDER, app);
        let mut url = Url::parse(&raw)
            .map_err(|e| OneIdError::Validation(format!("login url is invalid: {}", e)))?;

        let mut query: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (k, v) in url.query_pairs() {
            query.entry(k.into_owned()).or_default().push(v.into_owned());
        }

        if params.len() % 2 == 0 {
            for pair in params.chunks_exact(2) {
                let (k, v) = (pair[0], pair[1]);
                if !k.is_empty() && !v.is_empty() {
                    query.insert(k.to_string(), vec![v.to_string()]);
                }
            }
        } else {
            tracing::debug!(count = params.len(), "Ignoring odd number of extra login url params.");
        }

        query.insert(self.config.token_query_param.clone(), vec![token.to_string()]);

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (k, values) in &query {
                for v in values {
                    pairs.append_pair(k, v);
                }
            }
        }

        tracing::debug!(app = %app, host = ?url.host_str(), "Built login url.");
        Ok(url.to_string())
    }

    /// Returns the public JWKS for the signing key, for publishing to the
    /// applications that verify the issued tokens.
    pub fn public_jwks(&self) -> Value {
        json!({ "keys": [self.key.public_jwk()] })
    }
}
