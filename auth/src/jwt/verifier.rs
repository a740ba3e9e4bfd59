use jsonwebtoken::decode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// RS256 token verifier for holders of the public key.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier from a PEM encoded RSA public key.
    ///
    /// # Errors
    /// * `InvalidKey` - Public key is not a valid PEM encoded RSA key
    pub fn new(public_key: &str) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key.as_bytes())
            .map_err(|e| JwtError::InvalidKey(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        // Issued tokens carry no 'exp' claim
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify a token signature and decode its claims.
    ///
    /// # Errors
    /// * `DecodingFailed` - Token is malformed or the signature does not match
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::DecodingFailed(e.to_string()))
    }
}
