#![allow(async_fn_in_trait)]

use polly_core::pagination::ListWindow;

use crate::domain::types::{Poll, User, Vote};
use crate::error::PollServiceError;

/// Repository for registered accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, PollServiceError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, PollServiceError>;

    /// Insert a new account. Fails with `UsernameTaken` when the username
    /// already exists (backed by the unique constraint).
    async fn create(&self, username: &str, password_hash: &str)
    -> Result<User, PollServiceError>;
}

/// Repository for polls and their options.
pub trait PollRepository: Send + Sync {
    /// Insert one poll row and its option rows atomically. The caller has
    /// already validated the option texts.
    async fn create(
        &self,
        question: &str,
        option_texts: &[String],
        created_by: i32,
    ) -> Result<Poll, PollServiceError>;

    /// Polls in insertion order, options included.
    async fn list(&self, window: ListWindow) -> Result<Vec<Poll>, PollServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Poll>, PollServiceError>;

    /// Delete a poll; options and votes go with it via cascade.
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, PollServiceError>;
}

/// Repository for votes.
pub trait VoteRepository: Send + Sync {
    async fn find_by_poll_and_user(
        &self,
        poll_id: i32,
        user_id: i32,
    ) -> Result<Option<Vote>, PollServiceError>;

    /// Insert a vote. Fails with `AlreadyVoted` when the `(poll_id, user_id)`
    /// unique index rejects the row, so concurrent duplicates resolve to
    /// exactly one stored vote.
    async fn create(
        &self,
        poll_id: i32,
        option_id: i32,
        user_id: i32,
    ) -> Result<Vote, PollServiceError>;

    /// `(option_id, vote_count)` pairs for one poll, computed by a GROUP BY
    /// aggregate. Options with no votes are absent from the result.
    async fn count_per_option(&self, poll_id: i32) -> Result<Vec<(i32, u64)>, PollServiceError>;
}
