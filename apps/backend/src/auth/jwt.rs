use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::state::security_config::JwtConfig;

/// Claims carried by access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username of the token holder
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch); absent when expiry is disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Sign an access token for `sub` as of `now`.
pub fn mint_access_token(sub: &str, now: SystemTime, jwt: &JwtConfig) -> Result<String, DomainError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| {
            DomainError::infra(
                InfraErrorKind::Other("Clock".into()),
                "System clock is before the Unix epoch",
            )
        })?
        .as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        iat,
        exp: jwt
            .access_token_expire_minutes()
            .map(|minutes| iat + i64::from(minutes) * 60),
    };

    encode(
        &Header::new(jwt.algorithm().into()),
        &claims,
        &EncodingKey::from_secret(jwt.secret()),
    )
    .map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Jwt".into()),
            format!("Failed to encode JWT: {e}"),
        )
    })
}

/// Verify signature, algorithm and expiry, returning the claims.
///
/// Every failure collapses to `InvalidCredentials`; the cause is only logged.
pub fn verify_access_token(token: &str, jwt: &JwtConfig) -> Result<Claims, DomainError> {
    let mut validation = Validation::new(jwt.algorithm().into());
    if jwt.access_token_expire_minutes().is_some() {
        validation.set_required_spec_claims(&["sub", "exp"]);
    } else {
        validation.set_required_spec_claims(&["sub"]);
        validation.validate_exp = false;
    }

    decode::<Claims>(token, &DecodingKey::from_secret(jwt.secret()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => "token_expired",
                ErrorKind::InvalidSignature => "invalid_signature",
                ErrorKind::MissingRequiredClaim(_) => "missing_claim",
                _ => "invalid_token",
            };
            debug!(reason, "access token rejected");
            DomainError::invalid_credentials()
        })
}
