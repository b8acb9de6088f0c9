use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::error::PollServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::vote::{CastVoteInput, CastVoteUseCase};

// ── POST /polls/{poll_id}/vote ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VoteRequest {
    pub option_id: i32,
}

#[derive(Serialize)]
pub struct VoteResponse {
    pub id: i32,
    pub poll_id: i32,
    pub option_id: i32,
    pub user_id: i32,
    #[serde(serialize_with = "polly_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn cast_vote(
    identity: Identity,
    State(state): State<AppState>,
    Path(poll_id): Path<i32>,
    Json(body): Json<VoteRequest>,
) -> Result<(StatusCode, Json<VoteResponse>), PollServiceError> {
    let usecase = CastVoteUseCase {
        polls: state.poll_repo(),
        votes: state.vote_repo(),
    };
    let vote = usecase
        .execute(CastVoteInput {
            poll_id,
            option_id: body.option_id,
            voter_id: identity.user_id,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(VoteResponse {
            id: vote.id,
            poll_id: vote.poll_id,
            option_id: vote.option_id,
            user_id: vote.user_id,
            created_at: vote.created_at,
        }),
    ))
}
