use super::errors::PasswordError;

/// Length in bytes of an HMAC-SHA512 digest.
pub const HASH_LENGTH: usize = 64;

/// Length in bytes of the per-credential MAC key.
pub const SALT_LENGTH: usize = 128;

/// Stored password material: the MAC of the password and the key it was computed with.
///
/// Hash and salt always travel together. Lengths are only checked on
/// verification, so a value read back from storage may still be malformed.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredential {
    pub hash: Vec<u8>,
    pub salt: Vec<u8>,
}

impl PasswordCredential {
    pub fn new(hash: Vec<u8>, salt: Vec<u8>) -> Self {
        Self { hash, salt }
    }

    /// Rebuild a credential from two nullable storage columns.
    ///
    /// # Returns
    /// * `Ok(Some(_))` - both columns present
    /// * `Ok(None)` - both columns absent
    ///
    /// # Errors
    /// * `MalformedCredential` - only one of the two is present
    pub fn from_columns(
        hash: Option<Vec<u8>>,
        salt: Option<Vec<u8>>,
    ) -> Result<Option<Self>, PasswordError> {
        match (hash, salt) {
            (Some(hash), Some(salt)) => Ok(Some(Self { hash, salt })),
            (None, None) => Ok(None),
            (hash, salt) => Err(PasswordError::MalformedCredential {
                hash_length: hash.map_or(0, |h| h.len()),
                salt_length: salt.map_or(0, |s| s.len()),
                expected_hash: HASH_LENGTH,
                expected_salt: SALT_LENGTH,
            }),
        }
    }

    /// True when both parts have the lengths produced by the hasher.
    pub fn is_well_formed(&self) -> bool {
        self.hash.len() == HASH_LENGTH && self.salt.len() == SALT_LENGTH
    }
}

// Never print key material.
impl std::fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredential")
            .field("hash", &format_args!("<{} bytes>", self.hash.len()))
            .field("salt", &format_args!("<{} bytes>", self.salt.len()))
            .finish()
    }
}
