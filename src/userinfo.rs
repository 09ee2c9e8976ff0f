// src/userinfo.rs

use crate::error::{OneIdError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The user being signed in to a downstream application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Userinfo {
    /// Required. Unique, stable user identifier; becomes `sub`.
    pub id: String,
    /// Display name; becomes `name`. Required unless the signer was built
    /// with `require_name(false)`.
    pub name: String,
    /// Login name; becomes `preferred_username`.
    /// At least one of username, email and mobile must be set.
    pub username: String,
    /// Becomes `email`.
    pub email: String,
    /// Becomes `phone_number`.
    pub mobile: String,
    /// Extra claims copied into the token as-is. Standard claims win on conflict.
    pub extension: Map<String, Value>,
}

impl Userinfo {
    /// Checks the identity, reporting the first violated rule.
    pub fn validate(&self, require_name: bool) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(OneIdError::validation("id MUST NOT be empty"));
        }

        if require_name && self.name.trim().is_empty() {
            return Err(OneIdError::validation("name MUST NOT be empty"));
        }

        if self.username.trim().is_empty()
            && self.email.trim().is_empty()
            && self.mobile.trim().is_empty()
        {
            return Err(OneIdError::validation(
                "username/email/mobile MUST NOT all empty",
            ));
        }

        Ok(())
    }

    /// Maps the identity onto OpenID Connect claim names. Blank fields are omitted.
    pub fn to_claims(&self) -> Map<String, Value> {
        let mut claims = self.extension.clone();

        let standard = [
            ("sub", &self.id),
            ("name", &self.name),
            ("preferred_username", &self.username),
            ("email", &self.email),
            ("phone_number", &self.mobile),
        ];
        for (key, value) in standard {
            let value = value.trim();
            if !value.is_empty() {
                claims.insert(key.to_string(), Value::String(value.to_string()));
            }
        }

        claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(user: &Userinfo) -> String {
        user.validate(true).unwrap_err().to_string()
    }

    #[test]
    fn missing_id() {
        let user = Userinfo {
            name: "test".into(),
            ..Default::default()
        };
        assert_eq!(message(&user), "id MUST NOT be empty");
    }

    #[test]
    fn blank_id() {
        let user = Userinfo {
            id: " ".into(),
            name: "test".into(),
            ..Default::default()
        };
        assert_eq!(message(&user), "id MUST NOT be empty");
    }

    #[test]
    fn missing_name() {
        let user = Userinfo {
            id: "id".into(),
            email: "a@example.com".into(),
            ..Default::default()
        };
        assert_eq!(message(&user), "name MUST NOT be empty");
    }

    #[test]
    fn name_optional_when_not_required() {
        let user = Userinfo {
            id: "id".into(),
            email: "a@example.com".into(),
            ..Default::default()
        };
        assert!(user.validate(false).is_ok());
    }

    #[test]
    fn missing_username_email_and_mobile() {
        let user = Userinfo {
            id: "id".into(),
            name: "test".into(),
            username: "  ".into(),
            ..Default::default()
        };
        assert_eq!(message(&user), "username/email/mobile MUST NOT all empty");
    }

    #[test]
    fn first_violation_wins() {
        assert_eq!(message(&Userinfo::default()), "id MUST NOT be empty");

        let user = Userinfo {
            id: "id".into(),
            name: " ".into(),
            ..Default::default()
        };
        assert_eq!(message(&user), "name MUST NOT be empty");
    }

    #[test]
    fn claims_skip_blank_fields_and_override_extension() {
        let mut extension = Map::new();
        extension.insert("picture".into(), json!("https://www.example.com/a.png"));
        extension.insert("sub".into(), json!("spoofed"));

        let user = Userinfo {
            id: " u1 ".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            mobile: "   ".into(),
            extension,
            ..Default::default()
        };
        let claims = user.to_claims();

        assert_eq!(claims["sub"], json!("u1"));
        assert_eq!(claims["name"], json!("Alice"));
        assert_eq!(claims["email"], json!("alice@example.com"));
        assert_eq!(claims["picture"], json!("https://www.example.com/a.png"));
        assert!(!claims.contains_key("preferred_username"));
        assert!(!claims.contains_key("phone_number"));
    }
}
