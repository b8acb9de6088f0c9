//! Bearer-token identity extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::PollServiceError;
use crate::state::AppState;
use crate::usecase::token::validate_access_token;

/// Caller identity resolved from the `Authorization: Bearer` header.
///
/// Rejects with `InvalidToken` (401) when the header is absent, not a
/// bearer credential, or the JWT fails validation — all before any
/// handler or store code runs.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i32,
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = PollServiceError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_owned);
        let secret = state.jwt_secret.clone();

        async move {
            let token = token.ok_or(PollServiceError::InvalidToken)?;
            let info = validate_access_token(&token, &secret)?;
            Ok(Self {
                user_id: info.user_id,
            })
        }
    }
}
