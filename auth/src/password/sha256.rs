use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Digest;
use sha2::Sha256;

use super::errors::PasswordError;

/// Length in bytes of a per-user salt.
pub const SALT_LENGTH: usize = 16;

/// Length in bytes of a SHA-256 password digest.
pub const HASH_LENGTH: usize = 32;

/// Random per-user salt mixed into the password before hashing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_LENGTH]);

impl Salt {
    /// Get salt bytes.
    pub fn as_bytes(&self) -> &[u8; SALT_LENGTH] {
        &self.0
    }
}

impl From<[u8; SALT_LENGTH]> for Salt {
    fn from(bytes: [u8; SALT_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Salt {
    type Error = PasswordError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; SALT_LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| PasswordError::InvalidLength {
                kind: "salt",
                expected: SALT_LENGTH,
                actual: bytes.len(),
            })
    }
}

// Salts are not secret, but there is no reason to print them either.
impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Salt(..)")
    }
}

/// SHA-256 digest of a salted password.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PasswordDigest([u8; HASH_LENGTH]);

impl PasswordDigest {
    /// Get digest bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }
}

impl From<[u8; HASH_LENGTH]> for PasswordDigest {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PasswordDigest {
    type Error = PasswordError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; HASH_LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| PasswordError::InvalidLength {
                kind: "hash",
                expected: HASH_LENGTH,
                actual: bytes.len(),
            })
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Salt and digest pair stored for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    pub salt: Salt,
    pub hash: PasswordDigest,
}

/// Salted SHA-256 password hashing.
///
/// The digest is `SHA-256(password || salt)`, compared in constant time.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh salt from the operating system CSPRNG.
    pub fn generate_salt(&self) -> Salt {
        let mut bytes = [0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Salt(bytes)
    }

    /// Hash a plaintext password with the given salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    /// * `salt` - Salt appended after the password bytes
    ///
    /// # Returns
    /// 32-byte SHA-256 digest
    pub fn hash(&self, password: &str, salt: &Salt) -> PasswordDigest {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(salt.as_bytes());

        let mut digest = [0u8; HASH_LENGTH];
        digest.copy_from_slice(&hasher.finalize());
        PasswordDigest(digest)
    }

    /// Generate a fresh salt and hash the password with it.
    pub fn new_credentials(&self, password: &str) -> Credentials {
        let salt = self.generate_salt();
        let hash = self.hash(password, &salt);
        Credentials { salt, hash }
    }

    /// Verify a password against a stored salt and digest.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, salt: &Salt, expected: &PasswordDigest) -> bool {
        let candidate = self.hash(password, salt);
        constant_time_eq(candidate.as_bytes(), expected.as_bytes())
    }
}

/// Compare two digests without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8; HASH_LENGTH], b: &[u8; HASH_LENGTH]) -> bool {
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    std::hint::black_box(diff) == 0
}
