use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::crypto;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::config::AuthConfig;
use crate::identity::Identity;

/// Issues and validates stateless identity tokens.
///
/// Tokens are HS256 JWTs (`header.claims.signature`, each segment base64url).
/// Validity depends only on the signature and the embedded expiry; nothing is
/// recorded server side.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    config: AuthConfig,
}

impl TokenService {
    /// Create a token service from the process configuration.
    pub fn new(config: AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.signing_secret()),
            decoding_key: DecodingKey::from_secret(config.signing_secret()),
            algorithm: Algorithm::HS256,
            config,
        }
    }

    /// Issue a token for `identity` valid from now for the configured expiry.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::for_identity(identity, now, self.config.token_expiry());

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token against the signing secret and the current time.
    ///
    /// # Returns
    /// The identity embedded at issuance
    ///
    /// # Errors
    /// * `MalformedToken` - Not three base64url segments, or undecodable
    /// * `BadSignature` - MAC does not match the signing secret
    /// * `Expired` - Current time is at or past `exp`
    pub fn validate(&self, token: &str) -> Result<Identity, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        let (message, signature) = split_token(token)?;

        // MAC first: any altered byte in a well-shaped token is a signature
        // failure, never a decoding one.
        let verified = crypto::verify(
            signature,
            message.as_bytes(),
            &self.decoding_key,
            self.algorithm,
        )
        .map_err(|e| TokenError::MalformedToken(e.to_string()))?;

        if !verified {
            return Err(TokenError::BadSignature);
        }

        let claims = self.decode_claims(token)?;

        if claims.is_expired(now.timestamp(), self.config.leeway().num_seconds()) {
            return Err(TokenError::Expired);
        }

        Ok(claims.identity())
    }

    // Signature is already checked; jsonwebtoken only parses here.
    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::MalformedToken(e.to_string()))
    }
}

/// Split `header.claims.signature` into the signed message and the signature.
fn split_token(token: &str) -> Result<(&str, &str), TokenError> {
    let segments: Vec<&str> = token.split('.').collect();

    if segments.len() != 3 {
        return Err(TokenError::MalformedToken(format!(
            "expected 3 segments, got {}",
            segments.len()
        )));
    }

    if segments.iter().any(|s| s.is_empty() || !is_base64url(s)) {
        return Err(TokenError::MalformedToken(
            "segment is not base64url".to_string(),
        ));
    }

    let signature_start = segments[0].len() + 1 + segments[1].len();
    Ok((&token[..signature_start], segments[2]))
}

fn is_base64url(segment: &str) -> bool {
    segment
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn service() -> TokenService {
        TokenService::new(AuthConfig::new(SECRET, Duration::hours(24)))
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let service = service();
        let identity = Identity::new(42, "a@x.com");

        let token = service.issue(&identity).expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let validated = service.validate(&token).expect("Failed to validate token");
        assert_eq!(validated, identity);
    }

    #[test]
    fn test_expiry_boundary() {
        let service = service();
        let identity = Identity::new(1, "a@x.com");
        let issued = 1_700_000_000;
        let expiry = 24 * 60 * 60;

        let token = service.issue_at(&identity, at(issued)).unwrap();

        assert_eq!(service.validate_at(&token, at(issued)), Ok(identity.clone()));
        assert_eq!(
            service.validate_at(&token, at(issued + expiry - 1)),
            Ok(identity)
        );
        assert_eq!(
            service.validate_at(&token, at(issued + expiry)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            service.validate_at(&token, at(issued + expiry + 3600)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_leeway_extends_validity() {
        let config =
            AuthConfig::new(SECRET, Duration::seconds(60)).with_leeway(Duration::seconds(5));
        let service = TokenService::new(config);
        let identity = Identity::new(1, "a@x.com");

        let token = service.issue_at(&identity, at(1000)).unwrap();

        assert!(service.validate_at(&token, at(1064)).is_ok());
        assert_eq!(service.validate_at(&token, at(1065)), Err(TokenError::Expired));
    }

    #[test]
    fn test_flipped_byte_is_bad_signature() {
        let service = service();
        let token = service.issue(&Identity::new(9, "z@x.com")).unwrap();

        for index in 0..token.len() {
            let original = token.as_bytes()[index];
            if original == b'.' {
                continue;
            }
            let replacement = if original == b'A' { b'B' } else { b'A' };

            let mut bytes = token.clone().into_bytes();
            bytes[index] = replacement;
            let tampered = String::from_utf8(bytes).unwrap();

            assert_eq!(
                service.validate(&tampered),
                Err(TokenError::BadSignature),
                "byte {} flipped",
                index
            );
        }
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let issuer = TokenService::new(AuthConfig::new(
            b"secret1_at_least_32_bytes_long_key!".to_vec(),
            Duration::hours(1),
        ));
        let validator = TokenService::new(AuthConfig::new(
            b"secret2_at_least_32_bytes_long_key!".to_vec(),
            Duration::hours(1),
        ));

        let token = issuer.issue(&Identity::new(1, "a@x.com")).unwrap();

        assert_eq!(validator.validate(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_malformed_tokens() {
        let service = service();

        for token in ["", "abc", "a.b", "a.b.c.d", "a..c", "a.b.c d", "a.b.c=", "Bearer"] {
            assert!(
                matches!(service.validate(token), Err(TokenError::MalformedToken(_))),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_validly_signed_garbage_is_malformed() {
        let service = service();
        let message = "bm90LWpzb24.bm90LWpzb24";
        let signature = crypto::sign(
            message.as_bytes(),
            &EncodingKey::from_secret(SECRET),
            Algorithm::HS256,
        )
        .unwrap();

        let token = format!("{}.{}", message, signature);

        assert!(matches!(
            service.validate(&token),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_expired_token_with_tampering_reports_signature_first() {
        let service = service();
        let token = service.issue_at(&Identity::new(1, "a@x.com"), at(1000)).unwrap();
        let last = if token.ends_with('x') { 'y' } else { 'x' };
        let tampered = format!("{}{}", &token[..token.len() - 1], last);

        assert_eq!(
            service.validate_at(&tampered, at(1_000_000_000)),
            Err(TokenError::BadSignature)
        );
    }
}
