use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Poll service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum PollServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("poll not found")]
    PollNotFound,
    #[error("option not found in this poll")]
    OptionNotFound,
    #[error("username already registered")]
    UsernameTaken,
    #[error("already voted on this poll")]
    AlreadyVoted,
    #[error("missing data")]
    MissingData,
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error("a poll needs at least two options")]
    TooFewOptions,
    #[error("option text must not be empty")]
    EmptyOption,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PollServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PollNotFound => "POLL_NOT_FOUND",
            Self::OptionNotFound => "OPTION_NOT_FOUND",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::MissingData => "MISSING_DATA",
            Self::EmptyQuestion => "EMPTY_QUESTION",
            Self::TooFewOptions => "TOO_FEW_OPTIONS",
            Self::EmptyOption => "EMPTY_OPTION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for PollServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::PollNotFound | Self::OptionNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::UsernameTaken | Self::AlreadyVoted => StatusCode::CONFLICT,
            Self::MissingData => StatusCode::BAD_REQUEST,
            Self::EmptyQuestion | Self::TooFewOptions | Self::EmptyOption => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::InvalidCredentials | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
