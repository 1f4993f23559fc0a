use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::IdentityClaims;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Lifetime of tokens minted by [`mint_access_token`].
pub const ACCESS_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Identity fields to sign into a token.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub name: &'a str,
}

/// Mint a HS256 token for `subject`, valid for [`ACCESS_TOKEN_TTL_SECS`] from `now`.
pub fn mint_access_token(
    subject: TokenSubject<'_>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let secret = security
        .jwt_secret()
        .ok_or_else(AppError::server_misconfigured)?;

    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::verification_failed("system clock before unix epoch"))?
        .as_secs() as i64;

    let claims = IdentityClaims {
        id: subject.id.to_string(),
        email: subject.email.to_string(),
        role: subject.role.to_string(),
        name: subject.name.to_string(),
        iat,
        exp: iat + ACCESS_TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AppError::verification_failed(format!("failed to encode token: {e}")))
}

/// Verify signature and expiry of `token` and return its claims.
///
/// Errors:
/// - no secret configured → `AppError::ServerMisconfigured`
/// - `exp` at or before now → `AppError::TokenExpired`
/// - bad signature, malformed token, or claims that do not decode → `AppError::TokenInvalid`
/// - codec failures unrelated to the token itself → `AppError::VerificationFailed`
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<IdentityClaims, AppError> {
    let secret = security
        .jwt_secret()
        .ok_or_else(AppError::server_misconfigured)?;

    // Shared-secret HMAC family only; exp is checked with no clock tolerance.
    let mut validation = Validation::new(security.algorithm);
    validation.algorithms = HMAC_ALGORITHMS.to_vec();
    validation.validate_exp = true;
    validation.leeway = 0;

    let claims = decode::<IdentityClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| classify_decode_error(&e))?;

    // jsonwebtoken only rejects once `exp < now`; a token is dead from its exp second on.
    if claims.exp <= unix_now()? {
        return Err(AppError::TokenExpired);
    }

    Ok(claims)
}

/// Algorithms accepted on verification. Minting uses `SecurityConfig::algorithm`.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

fn unix_now() -> Result<i64, AppError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|_| AppError::verification_failed("system clock before unix epoch"))
}

fn classify_decode_error(e: &jsonwebtoken::errors::Error) -> AppError {
    match e.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        ErrorKind::MissingAlgorithm | ErrorKind::RsaFailedSigning => {
            AppError::verification_failed(e.to_string())
        }
        _ => AppError::TokenInvalid,
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;

    use super::{mint_access_token, verify_access_token, TokenSubject, ACCESS_TOKEN_TTL_SECS};
    use crate::auth::claims::IdentityClaims;
    use crate::state::security_config::SecurityConfig;
    use crate::AppError;

    const SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

    fn subject() -> TokenSubject<'static> {
        TokenSubject {
            id: "652f1c2e9a1b2c3d4e5f6a7b",
            email: "ada@example.com",
            role: "admin",
            name: "Ada",
        }
    }

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let security = SecurityConfig::new(SECRET);
        let now = SystemTime::now();

        let token = mint_access_token(subject(), now, &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.id, "652f1c2e9a1b2c3d4e5f6a7b");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.name, "Ada");
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(claims.exp, claims.iat + ACCESS_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_verify_is_repeatable() {
        let security = SecurityConfig::new(SECRET);
        let token = mint_access_token(subject(), SystemTime::now(), &security).unwrap();

        let first = verify_access_token(&token, &security).unwrap();
        let second = verify_access_token(&token, &security).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_expired_token() {
        let security = SecurityConfig::new(SECRET);
        let issued = SystemTime::now() - Duration::from_secs(ACCESS_TOKEN_TTL_SECS as u64 + 60);

        let token = mint_access_token(subject(), issued, &security).unwrap();
        let result = verify_access_token(&token, &security);

        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_token_expiring_this_second_is_expired() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        let claims = IdentityClaims {
            id: "652f1c2e9a1b2c3d4e5f6a7b".to_string(),
            email: "ada@example.com".to_string(),
            role: "admin".to_string(),
            name: "Ada".to_string(),
            iat: now - 10,
            exp: now,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();

        let result = verify_access_token(&token, &SecurityConfig::new(SECRET));
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_accepts_other_hmac_algorithms() {
        let security = SecurityConfig::new(SECRET);
        let token = mint_access_token(subject(), SystemTime::now(), &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        for alg in [Algorithm::HS384, Algorithm::HS512] {
            let token = encode(&Header::new(alg), &claims, &EncodingKey::from_secret(SECRET)).unwrap();
            let verified = verify_access_token(&token, &security).unwrap();
            assert_eq!(verified, claims);
        }
    }

    #[test]
    fn test_bad_signature() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let token = mint_access_token(subject(), SystemTime::now(), &security_a).unwrap();

        let security_b = SecurityConfig::new("secret-B".as_bytes());
        let result = verify_access_token(&token, &security_b);

        assert!(matches!(result, Err(AppError::TokenInvalid)));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let security = SecurityConfig::new(SECRET);
        for token in ["not-a-real-token", "a.b.c", ""] {
            let result = verify_access_token(token, &security);
            assert!(
                matches!(result, Err(AppError::TokenInvalid)),
                "token {token:?} should be invalid"
            );
        }
    }

    #[test]
    fn test_claims_missing_fields_are_invalid() {
        #[derive(Serialize)]
        struct Partial {
            id: String,
            exp: i64,
        }

        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
            + 600;
        let token = encode(
            &Header::default(),
            &Partial {
                id: "abc".to_string(),
                exp,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = verify_access_token(&token, &SecurityConfig::new(SECRET));
        assert!(matches!(result, Err(AppError::TokenInvalid)));
    }

    #[test]
    fn test_missing_secret() {
        let security = SecurityConfig::without_secret();

        let verify = verify_access_token("a.b.c", &security);
        assert!(matches!(verify, Err(AppError::ServerMisconfigured)));

        let mint = mint_access_token(subject(), SystemTime::now(), &security);
        assert!(matches!(mint, Err(AppError::ServerMisconfigured)));
    }
}
