use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use polly_core::pagination::ListWindow;

use crate::domain::types::{Poll, PollResults};
use crate::error::PollServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::poll::{
    CreatePollInput, CreatePollUseCase, DeletePollUseCase, GetPollUseCase, GetResultsUseCase,
    ListPollsUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct OptionResponse {
    pub id: i32,
    pub text: String,
}

#[derive(Serialize)]
pub struct PollResponse {
    pub id: i32,
    pub question: String,
    pub created_by: i32,
    #[serde(serialize_with = "polly_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub options: Vec<OptionResponse>,
}

impl From<Poll> for PollResponse {
    fn from(poll: Poll) -> Self {
        Self {
            id: poll.id,
            question: poll.question,
            created_by: poll.created_by,
            created_at: poll.created_at,
            options: poll
                .options
                .into_iter()
                .map(|option| OptionResponse {
                    id: option.id,
                    text: option.text,
                })
                .collect(),
        }
    }
}

// ── POST /polls ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
}

pub async fn create_poll(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreatePollRequest>,
) -> Result<(StatusCode, Json<PollResponse>), PollServiceError> {
    let usecase = CreatePollUseCase {
        polls: state.poll_repo(),
        users: state.user_repo(),
    };
    let poll = usecase
        .execute(CreatePollInput {
            question: body.question,
            options: body.options,
            created_by: identity.user_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(poll.into())))
}

// ── GET /polls ───────────────────────────────────────────────────────────────

pub async fn list_polls(
    State(state): State<AppState>,
    Query(window): Query<ListWindow>,
) -> Result<Json<Vec<PollResponse>>, PollServiceError> {
    let usecase = ListPollsUseCase {
        polls: state.poll_repo(),
    };
    let polls = usecase.execute(window).await?;
    Ok(Json(polls.into_iter().map(PollResponse::from).collect()))
}

// ── GET /polls/{poll_id} ─────────────────────────────────────────────────────

pub async fn get_poll(
    State(state): State<AppState>,
    Path(poll_id): Path<i32>,
) -> Result<Json<PollResponse>, PollServiceError> {
    let usecase = GetPollUseCase {
        polls: state.poll_repo(),
    };
    let poll = usecase.execute(poll_id).await?;
    Ok(Json(poll.into()))
}

// ── DELETE /polls/{poll_id} ──────────────────────────────────────────────────

pub async fn delete_poll(
    identity: Identity,
    State(state): State<AppState>,
    Path(poll_id): Path<i32>,
) -> Result<StatusCode, PollServiceError> {
    let usecase = DeletePollUseCase {
        polls: state.poll_repo(),
    };
    usecase.execute(poll_id, identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /polls/{poll_id}/results ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct TallyResponse {
    pub option_id: i32,
    pub text: String,
    pub vote_count: u64,
}

#[derive(Serialize)]
pub struct ResultsResponse {
    pub poll_id: i32,
    pub question: String,
    pub results: Vec<TallyResponse>,
}

impl From<PollResults> for ResultsResponse {
    fn from(results: PollResults) -> Self {
        Self {
            poll_id: results.poll_id,
            question: results.question,
            results: results
                .results
                .into_iter()
                .map(|tally| TallyResponse {
                    option_id: tally.option_id,
                    text: tally.text,
                    vote_count: tally.vote_count,
                })
                .collect(),
        }
    }
}

pub async fn get_results(
    State(state): State<AppState>,
    Path(poll_id): Path<i32>,
) -> Result<Json<ResultsResponse>, PollServiceError> {
    let usecase = GetResultsUseCase {
        polls: state.poll_repo(),
        votes: state.vote_repo(),
    };
    let results = usecase.execute(poll_id).await?;
    Ok(Json(results.into()))
}
