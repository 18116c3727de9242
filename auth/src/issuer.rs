use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Default session token lifetime.
pub const DEFAULT_TOKEN_LIFETIME_DAYS: i64 = 7;

/// Mints and validates signed session tokens for authenticated accounts.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    lifetime: Duration,
}

/// Who a token is being issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

/// Result of a successful token issuance.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// JWT access token
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenIssuer {
    /// Create an issuer with the default seven day lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_lifetime(jwt_secret, Duration::days(DEFAULT_TOKEN_LIFETIME_DAYS))
    }

    pub fn with_lifetime(jwt_secret: &[u8], lifetime: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(jwt_secret),
            lifetime,
        }
    }

    /// Issue a token that expires one lifetime from now.
    ///
    /// # Errors
    /// * `MissingClaim` - Identity has no role
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, JwtError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        identity: &Identity,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let role = identity
            .role
            .as_deref()
            .ok_or_else(|| JwtError::MissingClaim("role".to_string()))?;

        let claims = Claims::new(
            &identity.subject,
            &identity.name,
            &identity.email,
            role,
            issued_at,
            self.lifetime,
        );
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            expires_at: issued_at + self.lifetime,
        })
    }

    /// Validate and decode a session token.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
