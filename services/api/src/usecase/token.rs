use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::PollServiceError;

/// Access-token lifetime in seconds (30 minutes).
pub const ACCESS_TOKEN_EXP: u64 = 30 * 60;

/// JWT claims for access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: u64,
}

/// Identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: i32,
    pub access_token_exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

pub fn issue_access_token(user_id: i32, secret: &str) -> Result<(String, u64), PollServiceError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = TokenClaims {
        sub: user_id.to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| PollServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

/// Validate an access token and return the caller's identity.
///
/// Bad signature, expiry, and malformed tokens all collapse to
/// `InvalidToken` — the caller learns nothing about which check failed.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, PollServiceError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| PollServiceError::InvalidToken)?;

    let user_id = data
        .claims
        .sub
        .parse::<i32>()
        .map_err(|_| PollServiceError::InvalidToken)?;

    Ok(TokenInfo {
        user_id,
        access_token_exp: data.claims.exp,
    })
}
