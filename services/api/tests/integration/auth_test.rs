use polly_api::error::PollServiceError;
use polly_api::usecase::auth::{LoginInput, LoginUseCase, RegisterUserInput, RegisterUserUseCase};
use polly_api::usecase::poll::{
    CreatePollInput, CreatePollUseCase, DeletePollUseCase, GetPollUseCase, GetResultsUseCase,
};
use polly_api::usecase::token::validate_access_token;
use polly_api::usecase::vote::{CastVoteInput, CastVoteUseCase};

use crate::helpers::{MemRepo, TEST_JWT_SECRET};

#[tokio::test]
async fn should_register_login_vote_and_delete() {
    let repo = MemRepo::new();

    // Register and log in.
    let user = RegisterUserUseCase {
        users: repo.clone(),
    }
    .execute(RegisterUserInput {
        username: "alice".into(),
        password: "pw1".into(),
    })
    .await
    .unwrap();

    let login = LoginUseCase {
        users: repo.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
    .execute(LoginInput {
        username: "alice".into(),
        password: "pw1".into(),
    })
    .await
    .unwrap();

    let info = validate_access_token(&login.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);

    // Create a poll as the authenticated user.
    let poll = CreatePollUseCase {
        polls: repo.clone(),
        users: repo.clone(),
    }
    .execute(CreatePollInput {
        question: "tabs or spaces?".into(),
        options: vec!["tabs".into(), "spaces".into()],
        created_by: info.user_id,
    })
    .await
    .unwrap();
    assert_eq!(poll.options.len(), 2);

    // Vote for the first option.
    let vote = CastVoteUseCase {
        polls: repo.clone(),
        votes: repo.clone(),
    }
    .execute(CastVoteInput {
        poll_id: poll.id,
        option_id: poll.options[0].id,
        voter_id: info.user_id,
    })
    .await
    .unwrap();
    assert_eq!(vote.option_id, poll.options[0].id);

    // Results tally the vote and zero-fill the other option.
    let results = GetResultsUseCase {
        polls: repo.clone(),
        votes: repo.clone(),
    }
    .execute(poll.id)
    .await
    .unwrap();
    assert_eq!(results.results.len(), 2);
    assert_eq!(results.results[0].vote_count, 1);
    assert_eq!(results.results[1].vote_count, 0);

    // Delete as the owner, then the poll and its votes are gone.
    DeletePollUseCase { polls: repo.clone() }
        .execute(poll.id, info.user_id)
        .await
        .unwrap();
    assert_eq!(repo.poll_count(), 0);
    assert_eq!(repo.vote_count(), 0);

    let result = GetPollUseCase { polls: repo.clone() }.execute(poll.id).await;
    assert!(matches!(result, Err(PollServiceError::PollNotFound)));
}

#[tokio::test]
async fn should_reject_second_registration_of_same_username() {
    let repo = MemRepo::new();
    let usecase = RegisterUserUseCase {
        users: repo.clone(),
    };

    usecase
        .execute(RegisterUserInput {
            username: "alice".into(),
            password: "pw1".into(),
        })
        .await
        .unwrap();

    let result = usecase
        .execute(RegisterUserInput {
            username: "alice".into(),
            password: "other".into(),
        })
        .await;
    assert!(matches!(result, Err(PollServiceError::UsernameTaken)));
}

#[tokio::test]
async fn should_reject_tampered_token() {
    let repo = MemRepo::new();
    RegisterUserUseCase {
        users: repo.clone(),
    }
    .execute(RegisterUserInput {
        username: "alice".into(),
        password: "pw1".into(),
    })
    .await
    .unwrap();

    let login = LoginUseCase {
        users: repo.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
    .execute(LoginInput {
        username: "alice".into(),
        password: "pw1".into(),
    })
    .await
    .unwrap();

    // Signed with a different secret, the token must not validate.
    let result = validate_access_token(&login.access_token, "some-other-secret");
    assert!(matches!(result, Err(PollServiceError::InvalidToken)));

    let mut tampered = login.access_token.clone();
    tampered.push('x');
    let result = validate_access_token(&tampered, TEST_JWT_SECRET);
    assert!(matches!(result, Err(PollServiceError::InvalidToken)));
}
