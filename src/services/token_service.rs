use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::utils::error::ApiError;

/// JWT claims. The subject is the user id; no expiry claim is set, so a token
/// stays valid for as long as the signing secret does.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
}

/// Issues and verifies bearer tokens. Keys are derived once from the startup
/// secret and shared by clone; nothing here reads the environment.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry no exp claim
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, user_id: &str) -> Result<String, ApiError> {
        let claims = Claims {
            sub: user_id.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            log::error!("❌ Failed to sign token: {}", e);
            ApiError::Server(format!("token signing failed: {}", e))
        })
    }

    /// Validates the signature and returns the embedded claims. Signature
    /// mismatch, malformed structure, and wrong algorithm all collapse into
    /// `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::InvalidToken)
    }
}
