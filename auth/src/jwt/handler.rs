use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Signs with HS256 using a single process-wide secret. The keys are derived
/// once in `new` and never change afterwards; a different secret would make
/// every outstanding token unverifiable.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (at least 32 bytes for HS256)
    /// * `issuer` - Expected `iss` claim; tokens from other issuers are rejected
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: issuer.into(),
        }
    }

    /// Encode claims into a signed JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT.
    ///
    /// Rejects tokens whose header names a different algorithm, whose
    /// signature does not match, whose issuer differs, or whose `exp` is in
    /// the past. No clock leeway is granted.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidToken` - Signature, algorithm or issuer mismatch
    /// * `DecodingFailed` - Token is malformed
    pub fn decode(&self, token: &str) -> Result<TokenClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.set_issuer(&[self.issuer.as_str()]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidIssuer => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::DecodingFailed(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn access_claims(ttl: Duration) -> TokenClaims {
        TokenClaims::access(
            1,
            "alice",
            vec!["user".to_string()],
            "catbase-api",
            Utc::now(),
            ttl,
        )
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET, "catbase-api");
        let claims = access_claims(Duration::minutes(15));

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(SECRET, "catbase-api");

        let result = handler.decode("invalid.token.here");
        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!", "catbase-api");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!", "catbase-api");

        let token = handler1
            .encode(&access_claims(Duration::minutes(15)))
            .expect("Failed to encode token");

        let result = handler2.decode(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(SECRET, "catbase-api");
        let claims = TokenClaims::access(
            1,
            "alice",
            vec![],
            "catbase-api",
            Utc::now() - Duration::hours(1),
            Duration::minutes(15),
        );

        let token = handler.encode(&claims).unwrap();
        assert_eq!(handler.decode(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_decode_foreign_issuer() {
        let foreign = JwtHandler::new(SECRET, "someone-else");
        let handler = JwtHandler::new(SECRET, "catbase-api");

        let claims = TokenClaims::access(
            1,
            "alice",
            vec![],
            "someone-else",
            Utc::now(),
            Duration::minutes(15),
        );
        let token = foreign.encode(&claims).unwrap();

        assert!(matches!(handler.decode(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_rejects_other_algorithm_family() {
        let handler = JwtHandler::new(SECRET, "catbase-api");
        let claims = access_claims(Duration::minutes(15));
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(handler.decode(&token), Err(JwtError::InvalidToken(_))));
    }
}
