use std::sync::Arc;

use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;
use crate::keys::KeyMaterial;

/// RS256 token issuer.
///
/// Stateless: tokens are neither cached nor tracked after signing.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: Arc<EncodingKey>,
}

impl TokenIssuer {
    /// Create a new issuer from loaded key material.
    ///
    /// # Arguments
    /// * `keys` - Keypair whose private half signs tokens
    ///
    /// # Errors
    /// * `InvalidKey` - Private key is not a valid PEM encoded RSA key
    pub fn new(keys: &KeyMaterial) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(keys.private_key.as_bytes())
            .map_err(|e| JwtError::InvalidKey(e.to_string()))?;

        Ok(Self {
            encoding_key: Arc::new(encoding_key),
        })
    }

    /// Sign a token asserting the given subject.
    ///
    /// RSA signing runs on the blocking thread pool; callers await the result.
    /// A single attempt is made.
    ///
    /// # Arguments
    /// * `subject` - Username placed in the `sub` claim
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `SigningFailed` - Signing primitive failed or the signing task died
    /// * `EmptyToken` - Signing reported success without output
    pub async fn issue(&self, subject: &str) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject);
        let encoding_key = Arc::clone(&self.encoding_key);

        let token = tokio::task::spawn_blocking(move || {
            encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        })
        .await
        .map_err(|e| JwtError::SigningFailed(e.to_string()))?
        .map_err(|e| JwtError::SigningFailed(e.to_string()))?;

        ensure_non_empty(token)
    }
}

fn ensure_non_empty(token: String) -> Result<String, JwtError> {
    if token.is_empty() {
        return Err(JwtError::EmptyToken);
    }
    Ok(token)
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

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&KeyMaterial::from_pem(PRIVATE_PEM, PUBLIC_PEM))
            .expect("Failed to create issuer")
    }

    #[tokio::test]
    async fn test_issue_rs256_token() {
        let token = issuer().issue("alice").await.expect("Failed to sign");

        assert_eq!(token.split('.').count(), 3);

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);

        let verifier = TokenVerifier::new(PUBLIC_PEM).unwrap();
        let claims = verifier.verify(&token).expect("Failed to verify");
        assert_eq!(claims, Claims::for_subject("alice"));
    }

    #[tokio::test]
    async fn test_issue_is_deterministic_for_same_subject() {
        // RS256 with PKCS#1 v1.5 padding has no randomness
        let issuer = issuer();
        let first = issuer.issue("bob").await.unwrap();
        let second = issuer.issue("bob").await.unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_new_rejects_invalid_private_key() {
        let keys = KeyMaterial::from_pem("not a key", PUBLIC_PEM);
        let result = TokenIssuer::new(&keys);

        assert!(matches!(result, Err(JwtError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_issue_with_public_key_fails_to_sign() {
        let keys = KeyMaterial::from_pem(PUBLIC_PEM, PUBLIC_PEM);
        let issuer = TokenIssuer::new(&keys).expect("PEM parses as an RSA key");

        let result = issuer.issue("alice").await;
        assert!(matches!(result, Err(JwtError::SigningFailed(_))));
    }

    #[test]
    fn test_empty_token_is_an_error() {
        assert!(matches!(
            ensure_non_empty(String::new()),
            Err(JwtError::EmptyToken)
        ));
        assert_eq!(ensure_non_empty("a.b.c".to_string()).unwrap(), "a.b.c");
    }
}
