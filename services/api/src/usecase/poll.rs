use std::collections::HashMap;

use polly_core::pagination::ListWindow;

use crate::domain::repository::{PollRepository, UserRepository, VoteRepository};
use crate::domain::types::{OptionTally, Poll, PollResults};
use crate::error::PollServiceError;

// ── CreatePoll ───────────────────────────────────────────────────────────────

pub struct CreatePollInput {
    pub question: String,
    pub options: Vec<String>,
    pub created_by: i32,
}

pub struct CreatePollUseCase<P: PollRepository, U: UserRepository> {
    pub polls: P,
    pub users: U,
}

impl<P: PollRepository, U: UserRepository> CreatePollUseCase<P, U> {
    /// Validation happens before any insert, so a rejected poll leaves
    /// nothing behind — no poll row without options.
    pub async fn execute(&self, input: CreatePollInput) -> Result<Poll, PollServiceError> {
        let question = input.question.trim();
        if question.is_empty() {
            return Err(PollServiceError::EmptyQuestion);
        }
        if input.options.len() < 2 {
            return Err(PollServiceError::TooFewOptions);
        }
        if input.options.iter().any(|o| o.trim().is_empty()) {
            return Err(PollServiceError::EmptyOption);
        }
        if self.users.find_by_id(input.created_by).await?.is_none() {
            return Err(PollServiceError::UserNotFound);
        }
        self.polls
            .create(question, &input.options, input.created_by)
            .await
    }
}

// ── ListPolls ────────────────────────────────────────────────────────────────

pub struct ListPollsUseCase<P: PollRepository> {
    pub polls: P,
}

impl<P: PollRepository> ListPollsUseCase<P> {
    pub async fn execute(&self, window: ListWindow) -> Result<Vec<Poll>, PollServiceError> {
        self.polls.list(window.clamped()).await
    }
}

// ── GetPoll ──────────────────────────────────────────────────────────────────

pub struct GetPollUseCase<P: PollRepository> {
    pub polls: P,
}

impl<P: PollRepository> GetPollUseCase<P> {
    pub async fn execute(&self, poll_id: i32) -> Result<Poll, PollServiceError> {
        self.polls
            .find_by_id(poll_id)
            .await?
            .ok_or(PollServiceError::PollNotFound)
    }
}

// ── DeletePoll ───────────────────────────────────────────────────────────────

pub struct DeletePollUseCase<P: PollRepository> {
    pub polls: P,
}

impl<P: PollRepository> DeletePollUseCase<P> {
    /// Owner-only: a valid token is not enough, the requester must have
    /// created the poll.
    pub async fn execute(&self, poll_id: i32, requester_id: i32) -> Result<(), PollServiceError> {
        let poll = self
            .polls
            .find_by_id(poll_id)
            .await?
            .ok_or(PollServiceError::PollNotFound)?;

        if poll.created_by != requester_id {
            return Err(PollServiceError::Forbidden);
        }

        // A concurrent delete may have won the race after our lookup.
        if !self.polls.delete(poll_id).await? {
            return Err(PollServiceError::PollNotFound);
        }
        Ok(())
    }
}

// ── GetResults ───────────────────────────────────────────────────────────────

pub struct GetResultsUseCase<P: PollRepository, V: VoteRepository> {
    pub polls: P,
    pub votes: V,
}

impl<P: PollRepository, V: VoteRepository> GetResultsUseCase<P, V> {
    /// Recomputed from the store on every call — results always reflect
    /// the latest committed votes.
    pub async fn execute(&self, poll_id: i32) -> Result<PollResults, PollServiceError> {
        let poll = self
            .polls
            .find_by_id(poll_id)
            .await?
            .ok_or(PollServiceError::PollNotFound)?;

        let counts: HashMap<i32, u64> = self
            .votes
            .count_per_option(poll_id)
            .await?
            .into_iter()
            .collect();

        let results = poll
            .options
            .iter()
            .map(|option| OptionTally {
                option_id: option.id,
                text: option.text.clone(),
                vote_count: counts.get(&option.id).copied().unwrap_or(0),
            })
            .collect();

        Ok(PollResults {
            poll_id: poll.id,
            question: poll.question,
            results,
        })
    }
}
