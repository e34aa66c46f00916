use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Mints and verifies signed, time-bound bearer tokens.
///
/// Holds only the process-wide key material and validity window, both fixed
/// at construction. Never mutated afterwards, so instances can be shared
/// across tasks without synchronization.
/// Uses HS256 (HMAC with SHA-256) as the signing algorithm.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity_ms: i64,
}

impl TokenCodec {
    /// Create a new token codec.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `validity_ms` - Duration in milliseconds a minted token is accepted for
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load secrets from configuration or a vault, never hard-code them
    pub fn new(secret: &[u8], validity_ms: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validity_ms,
        }
    }

    /// Mint a token for the given subject.
    ///
    /// Issuance time is the current instant; expiry is issuance plus the
    /// configured validity window.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn mint(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp_millis();
        let claims = Claims::new(subject, now, now + self.validity_ms);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Check that a token parses, its signature matches, and it has not expired.
    ///
    /// Every failure collapses into `false`: callers never learn whether a
    /// rejected token was malformed, forged, or merely expired.
    pub fn verify(&self, token: &str) -> bool {
        match self.decode(token) {
            Ok(claims) => !claims.is_expired(Utc::now().timestamp_millis()),
            Err(_) => false,
        }
    }

    /// Extract the subject from a token.
    ///
    /// Meaningful only after [`verify`](Self::verify) returned true for the
    /// same token; an invalid token yields a decoding error here as well.
    ///
    /// # Errors
    /// * `DecodingFailed` - Token is malformed or the signature does not match
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.decode(token).map(|claims| claims.sub)
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // exp is in milliseconds; expiry is checked by hand in verify()
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::DecodingFailed(e.to_string()))
    }
}
