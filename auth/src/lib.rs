//! Authentication utilities library
//!
//! Provides the credential and token building blocks used by the account service:
//! - Password hashing (HMAC-SHA512 keyed by a random 128-byte salt)
//! - JWT token generation and validation
//! - Session token issuance for authenticated accounts
//!
//! Nothing in here knows about users or storage; the service adapts these
//! implementations to its own domain types.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let credential = hasher.derive("my_password").unwrap();
//! let is_valid = hasher
//!     .verify("my_password", &credential.hash, &credential.salt)
//!     .unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Identity, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let identity = Identity {
//!     subject: "1".to_string(),
//!     name: "Alice".to_string(),
//!     email: "alice@example.com".to_string(),
//!     role: Some("Administrator".to_string()),
//! };
//! let issued = issuer.issue(&identity).unwrap();
//! let claims = issuer.validate(&issued.access_token).unwrap();
//! assert_eq!(claims.role, "Administrator");
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use issuer::Identity;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordCredential;
pub use password::PasswordError;
pub use password::PasswordHasher;
