use polly_api::error::PollServiceError;
use polly_api::usecase::vote::{CastVoteInput, CastVoteUseCase};

use crate::helpers::{seed_poll, MemRepo};

#[tokio::test]
async fn should_keep_first_vote_when_user_votes_twice() {
    let repo = MemRepo::new();
    let (_owner, poll) = seed_poll(&repo, &["spring", "autumn"]).await;
    let voter = repo.seed_user("bob");
    let cast = CastVoteUseCase {
        polls: repo.clone(),
        votes: repo.clone(),
    };

    let first = cast
        .execute(CastVoteInput {
            poll_id: poll.id,
            option_id: poll.options[0].id,
            voter_id: voter.id,
        })
        .await
        .unwrap();

    // A second vote is rejected, even for a different option.
    let result = cast
        .execute(CastVoteInput {
            poll_id: poll.id,
            option_id: poll.options[1].id,
            voter_id: voter.id,
        })
        .await;
    assert!(matches!(result, Err(PollServiceError::AlreadyVoted)));

    let votes = repo.0.votes.lock().unwrap();
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].option_id, first.option_id);
}

#[tokio::test]
async fn should_let_same_user_vote_on_different_polls() {
    let repo = MemRepo::new();
    let (_o1, first_poll) = seed_poll(&repo, &["a", "b"]).await;
    let (_o2, second_poll) = seed_poll(&repo, &["c", "d"]).await;
    let voter = repo.seed_user("bob");
    let cast = CastVoteUseCase {
        polls: repo.clone(),
        votes: repo.clone(),
    };

    cast.execute(CastVoteInput {
        poll_id: first_poll.id,
        option_id: first_poll.options[0].id,
        voter_id: voter.id,
    })
    .await
    .unwrap();

    cast.execute(CastVoteInput {
        poll_id: second_poll.id,
        option_id: second_poll.options[1].id,
        voter_id: voter.id,
    })
    .await
    .unwrap();

    assert_eq!(repo.vote_count(), 2);
}

#[tokio::test]
async fn should_reject_option_belonging_to_another_poll() {
    let repo = MemRepo::new();
    let (_o1, first_poll) = seed_poll(&repo, &["a", "b"]).await;
    let (_o2, second_poll) = seed_poll(&repo, &["c", "d"]).await;
    let voter = repo.seed_user("bob");

    let result = CastVoteUseCase {
        polls: repo.clone(),
        votes: repo.clone(),
    }
    .execute(CastVoteInput {
        poll_id: first_poll.id,
        option_id: second_poll.options[0].id,
        voter_id: voter.id,
    })
    .await;
    assert!(matches!(result, Err(PollServiceError::OptionNotFound)));
    assert_eq!(repo.vote_count(), 0);
}

#[tokio::test]
async fn should_reject_vote_on_missing_poll() {
    let repo = MemRepo::new();
    let voter = repo.seed_user("bob");

    let result = CastVoteUseCase {
        polls: repo.clone(),
        votes: repo.clone(),
    }
    .execute(CastVoteInput {
        poll_id: 99,
        option_id: 1,
        voter_id: voter.id,
    })
    .await;
    assert!(matches!(result, Err(PollServiceError::PollNotFound)));
}
