//! Authentication utilities library
//!
//! Provides the credential primitives behind the credential service:
//! - Salted SHA-256 password hashing with constant-time verification
//! - RSA signing keypair loading
//! - RS256 token issuing and verification
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let credentials = hasher.new_credentials("my_password");
//! assert!(hasher.verify("my_password", &credentials.salt, &credentials.hash));
//! ```
//!
//! ## Complete Authentication Flow
//! ```no_run
//! use auth::{Authenticator, KeyMaterial, TokenVerifier};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let keys = KeyMaterial::load("keys")?;
//! let auth = Authenticator::new(&keys)?;
//!
//! // Register: salt and hash password
//! let credentials = auth.new_credentials("password123");
//!
//! // Login: verify and sign a token for the username
//! let token = auth.authenticate("password123", &credentials, "alice").await?;
//!
//! // Relying parties verify with the public key
//! let claims = TokenVerifier::new(auth.public_key())?.verify(&token)?;
//! assert_eq!(claims.sub, "alice");
//! # Ok(())
//! # }
//! ```

pub mod authenticator;
pub mod jwt;
pub mod keys;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use keys::KeyError;
pub use keys::KeyMaterial;
pub use password::Credentials;
pub use password::PasswordDigest;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::Salt;
