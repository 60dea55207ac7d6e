use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Token lifetime {0} is out of range")]
    Lifetime(TimeDelta),

    #[error("Token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    exp: i64,
}

/// Password hashing and HS256 bearer tokens keyed by the server secret
pub struct CredentialService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: TimeDelta,
}

impl CredentialService {
    pub fn new(secret: &str, default_ttl: TimeDelta) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by hand so that `exp == now` already counts as expired
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            default_ttl,
        }
    }

    /// Salted Argon2id hash in PHC string format
    pub fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
            .map_err(|e| CredentialError::Hash(e.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Hash(e.to_string()))
    }

    /// A malformed stored hash never verifies
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Signs `{sub, exp}` expiring `ttl` from now, or after the configured
    /// lifetime when `ttl` is `None`
    pub fn issue_token(
        &self,
        subject: &str,
        ttl: Option<TimeDelta>,
    ) -> Result<String, CredentialError> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or(CredentialError::Lifetime(ttl))?;
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: expires_at.timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Returns the token's subject
    pub fn validate_token(&self, token: &str) -> Result<String, CredentialError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => CredentialError::ExpiredToken,
                    _ => CredentialError::InvalidToken,
                }
            })?;

        if data.claims.exp <= Utc::now().timestamp() {
            return Err(CredentialError::ExpiredToken);
        }

        data.claims.sub.ok_or(CredentialError::InvalidToken)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn service() -> CredentialService {
        CredentialService::new("unit-test-secret", TimeDelta::minutes(15))
    }

    #[test]
    fn test_hash_and_verify() {
        let credentials = service();
        let hash = credentials.hash("123456").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(credentials.verify("123456", &hash));
        assert!(!credentials.verify("654321", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let credentials = service();
        assert_ne!(
            credentials.hash("123456").unwrap(),
            credentials.hash("123456").unwrap()
        );
    }

    #[test]
    fn test_malformed_hash_does_not_verify() {
        assert!(!service().verify("123456", "plaintext"));
        assert!(!service().verify("123456", ""));
    }

    #[test]
    fn test_token_round_trip() {
        let credentials = service();
        let token = credentials.issue_token("lecturer", None).unwrap();

        assert_eq!(credentials.validate_token(&token).unwrap(), "lecturer");
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let credentials = service();
        let token = credentials
            .issue_token("lecturer", Some(TimeDelta::zero()))
            .unwrap();

        assert!(matches!(
            credentials.validate_token(&token),
            Err(CredentialError::ExpiredToken)
        ));
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let credentials = service();
        let token = credentials
            .issue_token("lecturer", Some(TimeDelta::minutes(-5)))
            .unwrap();

        assert!(matches!(
            credentials.validate_token(&token),
            Err(CredentialError::ExpiredToken)
        ));
    }

    #[test]
    fn test_unrepresentable_ttl_is_an_error() {
        let credentials = CredentialService::new("unit-test-secret", TimeDelta::MAX);

        assert!(matches!(
            credentials.issue_token("lecturer", None),
            Err(CredentialError::Lifetime(_))
        ));
        assert!(matches!(
            service().issue_token("lecturer", Some(TimeDelta::minutes(200_000_000_000))),
            Err(CredentialError::Lifetime(_))
        ));
    }

    #[test]
    fn test_foreign_signature_is_invalid() {
        let other = CredentialService::new("another-secret", TimeDelta::minutes(15));
        let token = other.issue_token("lecturer", None).unwrap();

        assert!(matches!(
            service().validate_token(&token),
            Err(CredentialError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(
            service().validate_token("not.a.token"),
            Err(CredentialError::InvalidToken)
        ));
    }

    #[test]
    fn test_missing_subject_is_invalid() {
        let exp = (Utc::now() + TimeDelta::minutes(5)).timestamp();
        let token = encode(
            &Header::default(),
            &json!({ "exp": exp }),
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        assert!(matches!(
            service().validate_token(&token),
            Err(CredentialError::InvalidToken)
        ));
    }
}
