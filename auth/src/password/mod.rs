pub mod credential;
pub mod errors;
pub mod hasher;

pub use credential::PasswordCredential;
pub use credential::HASH_LENGTH;
pub use credential::SALT_LENGTH;
pub use errors::PasswordError;
pub use hasher::PasswordHasher;
