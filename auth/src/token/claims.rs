use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a minted token.
///
/// Timestamps are Unix milliseconds. The signature covers all three fields;
/// nothing else about the subject is embedded in the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Issued at (Unix milliseconds)
    pub iat: i64,

    /// Expiration time (Unix milliseconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject with explicit issuance and expiry instants.
    pub fn new(subject: impl ToString, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: expires_at,
        }
    }

    /// Check whether the token is expired at the given instant.
    ///
    /// A token is accepted strictly before its expiry: at `exp` itself it is
    /// already expired.
    pub fn is_expired(&self, current_millis: i64) -> bool {
        self.exp <= current_millis
    }
}
