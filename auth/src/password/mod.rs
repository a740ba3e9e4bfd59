pub mod errors;
pub mod sha256;

pub use errors::PasswordError;
pub use sha256::Credentials;
pub use sha256::PasswordDigest;
pub use sha256::PasswordHasher;
pub use sha256::Salt;
pub use sha256::HASH_LENGTH;
pub use sha256::SALT_LENGTH;
