use std::path::PathBuf;

use thiserror::Error;

/// Error type for signing key loading.
#[derive(Debug, Clone, Error)]
pub enum KeyError {
    #[error("Key material missing: {} is not a regular file", path.display())]
    Missing { path: PathBuf },

    #[error("Failed to read key material from {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
}
