//! Validation of the identity provider's HS256 tokens.
//!
//! Identity and password management live with the external provider; this
//! module only verifies its signatures and reads the claims.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id as assigned by the identity provider.
    pub sub: Uuid,
    /// Role memberships, e.g. `["admin"]`.
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

pub fn validate_token(token: &str, key: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(key.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

/// Mint a token the way the identity provider would. Used by tests and
/// local tooling; production tokens come from the provider itself.
pub fn issue_token(
    user_id: Uuid,
    roles: &[&str],
    key: &str,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "unit-test-key";

    #[test]
    fn round_trips_subject_and_roles() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, &["admin"], KEY, Duration::minutes(15)).unwrap();

        let claims = validate_token(&token, KEY).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.roles, vec!["admin".to_string()]);
    }

    #[test]
    fn rejects_expired_token() {
        let token =
            issue_token(Uuid::new_v4(), &[], KEY, Duration::seconds(-100)).unwrap();
        assert!(validate_token(&token, KEY).is_err());
    }

    #[test]
    fn rejects_wrong_key() {
        let token = issue_token(Uuid::new_v4(), &[], KEY, Duration::minutes(15)).unwrap();
        assert!(validate_token(&token, "other-key").is_err());
    }
}
