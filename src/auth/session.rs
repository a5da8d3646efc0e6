//! Signed session tokens.
//!
//! Tokens use the JWT compact layout (`header.claims.signature`, base64url
//! without padding) with an HS256 signature, so they can be inspected with
//! ordinary JWT tooling.

use base64::Engine;
use ring::hmac;
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::storage::models::UserRecord;

/// Session lifetime in seconds (7 days)
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin email
    pub sub: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

/// HMAC key used to sign and verify session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    key: hmac::Key,
}

impl SessionKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret),
        }
    }

    /// Issue a token for a user, valid from now for [`SESSION_TTL_SECS`].
    pub fn issue(&self, user: &UserRecord) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp();
        self.sign(&Claims {
            sub: user.email.clone(),
            name: user.name.clone(),
            iat: now,
            exp: now + SESSION_TTL_SECS,
        })
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let header = base64_url_encode(&serde_json::to_vec(&serde_json::json!({
            "alg": "HS256",
            "typ": "JWT"
        }))?);
        let payload = base64_url_encode(&serde_json::to_vec(claims)?);
        let unsigned = format!("{header}.{payload}");

        let tag = hmac::sign(&self.key, unsigned.as_bytes());
        Ok(format!("{unsigned}.{}", base64_url_encode(tag.as_ref())))
    }

    /// Check the signature and expiry of a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    fn verify_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        let (unsigned, signature) = token.rsplit_once('.').ok_or(AuthError::InvalidToken)?;
        let (_header, payload) = unsigned.split_once('.').ok_or(AuthError::InvalidToken)?;

        let signature = base64_url_decode(signature)?;
        hmac::verify(&self.key, unsigned.as_bytes(), &signature)
            .map_err(|_| AuthError::InvalidToken)?;

        let claims: Claims =
            serde_json::from_slice(&base64_url_decode(payload)?).map_err(|_| AuthError::InvalidToken)?;

        if claims.exp <= now {
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }
}

fn base64_url_encode(data: &[u8]) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(data)
}

fn base64_url_decode(data: &str) -> Result<Vec<u8>, AuthError> {
    base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(data)
        .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: i64) -> Claims {
        Claims {
            sub: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            iat: 0,
            exp,
        }
    }

    #[test]
    fn signed_token_verifies() {
        let keys = SessionKeys::new(b"0123456789abcdef0123456789abcdef");
        let token = keys.sign(&claims(1_000)).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let verified = keys.verify_at(&token, 999).unwrap();
        assert_eq!(verified.sub, "admin@example.com");
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = SessionKeys::new(b"0123456789abcdef0123456789abcdef");
        let token = keys.sign(&claims(1_000)).unwrap();
        assert!(matches!(keys.verify_at(&token, 1_000), Err(AuthError::Expired)));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let ours = SessionKeys::new(b"0123456789abcdef0123456789abcdef");
        let theirs = SessionKeys::new(b"fedcba9876543210fedcba9876543210");
        let token = theirs.sign(&claims(i64::MAX)).unwrap();
        assert!(matches!(ours.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let keys = SessionKeys::new(b"0123456789abcdef0123456789abcdef");
        let token = keys.sign(&claims(i64::MAX)).unwrap();

        let forged = base64_url_encode(br#"{"sub":"evil@example.com","name":"x","iat":0,"exp":9999999999}"#);
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = &forged;
        let forged_token = parts.join(".");

        assert!(matches!(keys.verify(&forged_token), Err(AuthError::InvalidToken)));
        assert!(matches!(keys.verify("garbage"), Err(AuthError::InvalidToken)));
    }
}
