use std::fs;
use std::path::Path;
use std::path::PathBuf;

use super::errors::KeyError;

/// File name of the PEM encoded RSA private signing key.
pub const PRIVATE_KEY_FILE: &str = "private.pem";

/// File name of the PEM encoded RSA public verification key.
pub const PUBLIC_KEY_FILE: &str = "public.pem";

/// Asymmetric signing keypair loaded once at startup.
///
/// The public key is available to anyone; the private key is only read by
/// the token issuer inside this crate.
#[derive(Clone)]
pub struct KeyMaterial {
    pub(crate) private_key: String,
    public_key: String,
}

impl KeyMaterial {
    /// Load the keypair from a directory.
    ///
    /// # Arguments
    /// * `directory` - Directory containing `private.pem` and `public.pem`
    ///
    /// # Returns
    /// Loaded key material
    ///
    /// # Errors
    /// * `Missing` - A key file is absent or not a regular file
    /// * `Unreadable` - A key file exists but could not be read
    pub fn load(directory: impl AsRef<Path>) -> Result<Self, KeyError> {
        let directory = directory.as_ref();
        let private_key = read_key_file(directory.join(PRIVATE_KEY_FILE))?;
        let public_key = read_key_file(directory.join(PUBLIC_KEY_FILE))?;

        tracing::debug!(directory = %directory.display(), "Key material loaded");

        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Build key material from PEM strings already in memory.
    pub fn from_pem(private_key: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            public_key: public_key.into(),
        }
    }

    /// Get the PEM encoded public key exactly as loaded.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

fn read_key_file(path: PathBuf) -> Result<String, KeyError> {
    match fs::metadata(&path) {
        Ok(metadata) if metadata.is_file() => {}
        _ => return Err(KeyError::Missing { path }),
    }

    fs::read_to_string(&path).map_err(|e| KeyError::Unreadable {
        reason: e.to_string(),
        path,
    })
}
