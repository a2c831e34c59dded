use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::SecurityConfig;

pub mod cookie;

/// Token payload: the caller-supplied identity plus issue and expiry times.
/// Identity fields other than `email` ride along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn from_identity(mut identity: Map<String, Value>, expiry_hours: u64) -> Result<Self, JwtError> {
        let email = match identity.remove("email") {
            Some(Value::String(email)) if !email.is_empty() => email,
            _ => return Err(JwtError::MissingEmail),
        };
        identity.remove("iat");
        identity.remove("exp");

        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Ok(Self {
            email,
            iat: now.timestamp(),
            exp,
            extra: identity,
        })
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("Identity payload must contain an email")]
    MissingEmail,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
}

/// Signs and verifies access tokens with the server secret (HS256)
#[derive(Clone)]
pub struct TokenService {
    keys: Option<(EncodingKey, DecodingKey)>,
    expiry_hours: u64,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        let keys = if secret.is_empty() {
            None
        } else {
            Some((EncodingKey::from_secret(secret.as_bytes()), DecodingKey::from_secret(secret.as_bytes())))
        };
        Self { keys, expiry_hours }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.access_token_secret, security.token_expiry_hours)
    }

    pub fn is_configured(&self) -> bool {
        self.keys.is_some()
    }

    pub fn expiry_hours(&self) -> u64 {
        self.expiry_hours
    }

    /// Sign a token for the identity payload as given
    pub fn issue(&self, identity: Map<String, Value>) -> Result<String, JwtError> {
        let claims = Claims::from_identity(identity, self.expiry_hours)?;
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        let (encoding_key, _) = self.keys.as_ref().ok_or(JwtError::InvalidSecret)?;
        encode(&Header::default(), claims, encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Check signature and expiry, then hand back the claims
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let (_, decoding_key) = self.keys.as_ref().ok_or(JwtError::InvalidSecret)?;
        let token_data = decode::<Claims>(token, decoding_key, &Validation::default())
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identity(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("identity must be an object"),
        }
    }

    #[test]
    fn issues_and_verifies_round_trip() {
        let service = TokenService::new("test-secret", 1);
        let token = service.issue(identity(json!({ "email": "a@x.com", "name": "Ann" }))).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.extra.get("name"), Some(&json!("Ann")));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn rejects_foreign_signature() {
        let token = TokenService::new("one", 1).issue(identity(json!({ "email": "a@x.com" }))).unwrap();
        assert!(matches!(TokenService::new("two", 1).verify(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let service = TokenService::new("test-secret", 1);
        let now = Utc::now().timestamp();
        let claims = Claims { email: "a@x.com".into(), iat: now - 7200, exp: now - 3600, extra: Map::new() };
        let token = service.sign(&claims).unwrap();
        assert!(matches!(service.verify(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn requires_email_and_secret() {
        let service = TokenService::new("test-secret", 1);
        assert!(matches!(service.issue(identity(json!({ "name": "Ann" }))), Err(JwtError::MissingEmail)));

        let unconfigured = TokenService::new("", 1);
        assert!(!unconfigured.is_configured());
        assert!(matches!(
            unconfigured.issue(identity(json!({ "email": "a@x.com" }))),
            Err(JwtError::InvalidSecret)
        ));
        assert!(matches!(unconfigured.verify("abc"), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn rejects_garbage() {
        let service = TokenService::new("test-secret", 1);
        assert!(service.verify("not.a.jwt").is_err());
    }
}
