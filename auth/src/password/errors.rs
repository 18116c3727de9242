use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password cannot be empty or whitespace only")]
    InvalidInput,

    #[error(
        "Malformed stored credential: expected {expected_hash}-byte hash and {expected_salt}-byte salt, got {hash_length} and {salt_length}"
    )]
    MalformedCredential {
        hash_length: usize,
        salt_length: usize,
        expected_hash: usize,
        expected_salt: usize,
    },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
