use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::keys::KeyMaterial;
use crate::password::Credentials;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token signing.
///
/// Holds the process-wide key material; the private key never leaves the
/// token issuer.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    public_key: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `keys` - Signing keypair loaded at startup
    ///
    /// # Errors
    /// * `InvalidKey` - Private key could not be parsed
    pub fn new(keys: &KeyMaterial) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(keys)?,
            public_key: keys.public_key().to_string(),
        })
    }

    /// Salt and hash a password for storage.
    pub fn new_credentials(&self, password: &str) -> Credentials {
        self.password_hasher.new_credentials(password)
    }

    /// Check a password against stored credentials.
    pub fn verify_password(&self, password: &str, credentials: &Credentials) -> bool {
        self.password_hasher
            .verify(password, &credentials.salt, &credentials.hash)
    }

    /// Verify credentials and sign a token for the subject.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `credentials` - Stored salt and hash
    /// * `subject` - Username asserted by the token
    ///
    /// # Returns
    /// Signed token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token signing failed
    pub async fn authenticate(
        &self,
        password: &str,
        credentials: &Credentials,
        subject: &str,
    ) -> Result<String, AuthenticationError> {
        if !self.verify_password(password, credentials) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_issuer.issue(subject).await?)
    }

    /// Get the PEM encoded public verification key.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::TokenVerifier;

    const PRIVATE_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../fixtures/rsa_private.pem"
    ));
    const PUBLIC_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../fixtures/rsa_public.pem"
    ));

    fn authenticator() -> Authenticator {
        Authenticator::new(&KeyMaterial::from_pem(PRIVATE_PEM, PUBLIC_PEM))
            .expect("Failed to create authenticator")
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let credentials = authenticator.new_credentials(password);

        let token = authenticator
            .authenticate(password, &credentials, "user123")
            .await
            .expect("Authentication failed");

        assert!(!token.is_empty());

        let decoded = TokenVerifier::new(authenticator.public_key())
            .unwrap()
            .verify(&token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "user123");
    }

    #[tokio::test]
    async fn test_authenticate_invalid_password() {
        let authenticator = authenticator();
        let credentials = authenticator.new_credentials("my_password");

        let result = authenticator
            .authenticate("wrong_password", &credentials, "user123")
            .await;
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_public_key_is_verbatim() {
        assert_eq!(authenticator().public_key(), PUBLIC_PEM);
    }

    #[test]
    fn test_new_with_invalid_key() {
        let keys = KeyMaterial::from_pem("-----BEGIN NOTHING-----", PUBLIC_PEM);
        assert!(Authenticator::new(&keys).is_err());
    }
}
