use polly_api::error::PollServiceError;
use polly_api::usecase::poll::{
    CreatePollInput, CreatePollUseCase, DeletePollUseCase, GetResultsUseCase, ListPollsUseCase,
};
use polly_api::usecase::vote::{CastVoteInput, CastVoteUseCase};
use polly_core::pagination::ListWindow;

use crate::helpers::{seed_poll, MemRepo};

#[tokio::test]
async fn should_leave_nothing_behind_when_validation_fails() {
    let repo = MemRepo::new();
    let user = repo.seed_user("alice");
    let usecase = CreatePollUseCase {
        polls: repo.clone(),
        users: repo.clone(),
    };

    let result = usecase
        .execute(CreatePollInput {
            question: "   ".into(),
            options: vec!["a".into(), "b".into()],
            created_by: user.id,
        })
        .await;
    assert!(matches!(result, Err(PollServiceError::EmptyQuestion)));

    let result = usecase
        .execute(CreatePollInput {
            question: "only one?".into(),
            options: vec!["a".into()],
            created_by: user.id,
        })
        .await;
    assert!(matches!(result, Err(PollServiceError::TooFewOptions)));

    let result = usecase
        .execute(CreatePollInput {
            question: "blank option?".into(),
            options: vec!["a".into(), "  ".into()],
            created_by: user.id,
        })
        .await;
    assert!(matches!(result, Err(PollServiceError::EmptyOption)));

    assert_eq!(repo.poll_count(), 0);
}

#[tokio::test]
async fn should_reject_poll_from_unknown_user() {
    let repo = MemRepo::new();
    let result = CreatePollUseCase {
        polls: repo.clone(),
        users: repo.clone(),
    }
    .execute(CreatePollInput {
        question: "who made this?".into(),
        options: vec!["a".into(), "b".into()],
        created_by: 999,
    })
    .await;
    assert!(matches!(result, Err(PollServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_page_polls_with_disjoint_windows() {
    let repo = MemRepo::new();
    let user = repo.seed_user("alice");
    let create = CreatePollUseCase {
        polls: repo.clone(),
        users: repo.clone(),
    };
    for i in 0..5 {
        create
            .execute(CreatePollInput {
                question: format!("poll {i}?"),
                options: vec!["yes".into(), "no".into()],
                created_by: user.id,
            })
            .await
            .unwrap();
    }

    let list = ListPollsUseCase { polls: repo.clone() };
    let first = list.execute(ListWindow { skip: 0, limit: 2 }).await.unwrap();
    let second = list.execute(ListWindow { skip: 2, limit: 2 }).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert!(first.iter().all(|p| second.iter().all(|q| q.id != p.id)));

    let past_end = list.execute(ListWindow { skip: 10, limit: 2 }).await.unwrap();
    assert!(past_end.is_empty());
}

#[tokio::test]
async fn should_only_let_the_owner_delete() {
    let repo = MemRepo::new();
    let (_owner, poll) = seed_poll(&repo, &["spring", "autumn"]).await;
    let stranger = repo.seed_user("mallory");

    let result = DeletePollUseCase { polls: repo.clone() }
        .execute(poll.id, stranger.id)
        .await;
    assert!(matches!(result, Err(PollServiceError::Forbidden)));
    assert_eq!(repo.poll_count(), 1);
}

#[tokio::test]
async fn should_report_poll_not_found_for_missing_delete_target() {
    let repo = MemRepo::new();
    let user = repo.seed_user("alice");
    let result = DeletePollUseCase { polls: repo.clone() }
        .execute(42, user.id)
        .await;
    assert!(matches!(result, Err(PollServiceError::PollNotFound)));
}

#[tokio::test]
async fn should_tally_votes_per_option_and_zero_fill() {
    let repo = MemRepo::new();
    let (_owner, poll) = seed_poll(&repo, &["red", "green", "blue"]).await;
    let cast = CastVoteUseCase {
        polls: repo.clone(),
        votes: repo.clone(),
    };

    // Two votes for "red", one for "green", none for "blue".
    for (name, option_idx) in [("u1", 0), ("u2", 0), ("u3", 1)] {
        let voter = repo.seed_user(name);
        cast.execute(CastVoteInput {
            poll_id: poll.id,
            option_id: poll.options[option_idx].id,
            voter_id: voter.id,
        })
        .await
        .unwrap();
    }

    let results = GetResultsUseCase {
        polls: repo.clone(),
        votes: repo.clone(),
    }
    .execute(poll.id)
    .await
    .unwrap();

    assert_eq!(results.poll_id, poll.id);
    assert_eq!(results.results.len(), 3);
    assert_eq!(results.results[0].vote_count, 2);
    assert_eq!(results.results[1].vote_count, 1);
    assert_eq!(results.results[2].vote_count, 0);

    let total: u64 = results.results.iter().map(|t| t.vote_count).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn should_report_results_not_found_for_missing_poll() {
    let repo = MemRepo::new();
    let result = GetResultsUseCase {
        polls: repo.clone(),
        votes: repo.clone(),
    }
    .execute(1)
    .await;
    assert!(matches!(result, Err(PollServiceError::PollNotFound)));
}
