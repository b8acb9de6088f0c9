use crate::domain::repository::{PollRepository, VoteRepository};
use crate::domain::types::Vote;
use crate::error::PollServiceError;

pub struct CastVoteInput {
    pub poll_id: i32,
    pub option_id: i32,
    pub voter_id: i32,
}

pub struct CastVoteUseCase<P: PollRepository, V: VoteRepository> {
    pub polls: P,
    pub votes: V,
}

impl<P: PollRepository, V: VoteRepository> CastVoteUseCase<P, V> {
    /// One vote per user per poll, reject policy: a second attempt fails
    /// with `AlreadyVoted` and the first vote stands. The pre-check here
    /// gives the common case a clean error; the unique index behind
    /// `VoteRepository::create` settles concurrent races.
    pub async fn execute(&self, input: CastVoteInput) -> Result<Vote, PollServiceError> {
        let poll = self
            .polls
            .find_by_id(input.poll_id)
            .await?
            .ok_or(PollServiceError::PollNotFound)?;

        if !poll.has_option(input.option_id) {
            return Err(PollServiceError::OptionNotFound);
        }

        if self
            .votes
            .find_by_poll_and_user(input.poll_id, input.voter_id)
            .await?
            .is_some()
        {
            return Err(PollServiceError::AlreadyVoted);
        }

        self.votes
            .create(input.poll_id, input.option_id, input.voter_id)
            .await
    }
}
