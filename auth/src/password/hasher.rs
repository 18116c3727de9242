use hmac::Hmac;
use hmac::Mac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;

use super::credential::PasswordCredential;
use super::credential::HASH_LENGTH;
use super::credential::SALT_LENGTH;
use super::errors::PasswordError;

type HmacSha512 = Hmac<Sha512>;

/// Password hashing implementation.
///
/// The salt is a random 128-byte HMAC-SHA512 key and the stored hash is the
/// MAC of the UTF-8 password under that key.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Derive a fresh credential for a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// 64-byte hash and 128-byte salt
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty or whitespace only
    /// * `HashingFailed` - MAC could not be keyed
    pub fn derive(&self, password: &str) -> Result<PasswordCredential, PasswordError> {
        ensure_not_blank(password)?;

        let mut salt = vec![0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut salt);

        let hash = Self::keyed_mac(&salt, password)?.finalize().into_bytes().to_vec();

        Ok(PasswordCredential::new(hash, salt))
    }

    /// Verify a password against a stored hash and salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored 64-byte hash
    /// * `salt` - Stored 128-byte salt
    ///
    /// # Returns
    /// True if every byte of the recomputed MAC matches the stored hash
    ///
    /// # Errors
    /// * `InvalidInput` - Password is empty or whitespace only
    /// * `MalformedCredential` - Hash or salt has the wrong length
    pub fn verify(&self, password: &str, hash: &[u8], salt: &[u8]) -> Result<bool, PasswordError> {
        ensure_not_blank(password)?;

        if hash.len() != HASH_LENGTH || salt.len() != SALT_LENGTH {
            return Err(PasswordError::MalformedCredential {
                hash_length: hash.len(),
                salt_length: salt.len(),
                expected_hash: HASH_LENGTH,
                expected_salt: SALT_LENGTH,
            });
        }

        // verify_slice compares in constant time
        Ok(Self::keyed_mac(salt, password)?.verify_slice(hash).is_ok())
    }

    /// Verify a password against a stored credential.
    pub fn verify_credential(
        &self,
        password: &str,
        credential: &PasswordCredential,
    ) -> Result<bool, PasswordError> {
        self.verify(password, &credential.hash, &credential.salt)
    }

    fn keyed_mac(key: &[u8], password: &str) -> Result<HmacSha512, PasswordError> {
        let mut mac = HmacSha512::new_from_slice(key)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        mac.update(password.as_bytes());
        Ok(mac)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_not_blank(password: &str) -> Result<(), PasswordError> {
    if password.trim().is_empty() {
        Err(PasswordError::InvalidInput)
    } else {
        Ok(())
    }
}
