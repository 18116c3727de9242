use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by an account session token.
///
/// `sub`, `iat` and `exp` follow RFC 7519; `name`, `email` and `role`
/// describe the authenticated account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Display name
    pub name: String,

    pub email: String,

    /// Role name used for route authorization
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims valid from `issued_at` for `lifetime`.
    pub fn new(
        sub: impl ToString,
        name: impl ToString,
        email: impl ToString,
        role: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: sub.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
