use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};

use polly_core::pagination::ListWindow;
use polly_schema::{poll_options, polls, users, votes};

use crate::domain::repository::{PollRepository, UserRepository, VoteRepository};
use crate::domain::types::{Poll, PollOption, User, Vote};
use crate::error::PollServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, PollServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, PollServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, PollServiceError> {
        let model = users::ActiveModel {
            username: Set(username.to_owned()),
            password_hash: Set(password_hash.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => PollServiceError::UsernameTaken,
            _ => anyhow::Error::new(e).context("create user").into(),
        })?;
        Ok(user_from_model(model))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

// ── Poll repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPollRepository {
    pub db: DatabaseConnection,
}

impl PollRepository for DbPollRepository {
    async fn create(
        &self,
        question: &str,
        option_texts: &[String],
        created_by: i32,
    ) -> Result<Poll, PollServiceError> {
        let question = question.to_owned();
        let option_texts = option_texts.to_vec();

        let (poll, options) = self
            .db
            .transaction::<_, (polls::Model, Vec<poll_options::Model>), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    let poll = polls::ActiveModel {
                        question: Set(question),
                        created_by: Set(created_by),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    let mut options = Vec::with_capacity(option_texts.len());
                    for text in option_texts {
                        let option = poll_options::ActiveModel {
                            poll_id: Set(poll.id),
                            text: Set(text.trim().to_owned()),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;
                        options.push(option);
                    }
                    Ok((poll, options))
                })
            })
            .await
            .context("create poll with options")?;

        Ok(poll_from_models(poll, options))
    }

    async fn list(&self, window: ListWindow) -> Result<Vec<Poll>, PollServiceError> {
        let poll_models = polls::Entity::find()
            .order_by_asc(polls::Column::Id)
            .offset(window.skip)
            .limit(window.limit)
            .all(&self.db)
            .await
            .context("list polls")?;

        let mut results = Vec::with_capacity(poll_models.len());
        for model in poll_models {
            let options = self.options_for(model.id).await?;
            results.push(poll_from_models(model, options));
        }
        Ok(results)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Poll>, PollServiceError> {
        let model = polls::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find poll by id")?;

        match model {
            Some(model) => {
                let options = self.options_for(model.id).await?;
                Ok(Some(poll_from_models(model, options)))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, PollServiceError> {
        // Options and votes fall with the poll via ON DELETE CASCADE, so
        // this single statement is the whole atomic unit.
        let result = polls::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete poll")?;
        Ok(result.rows_affected > 0)
    }
}

impl DbPollRepository {
    async fn options_for(&self, poll_id: i32) -> Result<Vec<poll_options::Model>, PollServiceError> {
        let options = poll_options::Entity::find()
            .filter(poll_options::Column::PollId.eq(poll_id))
            .order_by_asc(poll_options::Column::Id)
            .all(&self.db)
            .await
            .context("list poll options")?;
        Ok(options)
    }
}

fn poll_from_models(poll: polls::Model, options: Vec<poll_options::Model>) -> Poll {
    Poll {
        id: poll.id,
        question: poll.question,
        created_by: poll.created_by,
        created_at: poll.created_at,
        options: options
            .into_iter()
            .map(|option| PollOption {
                id: option.id,
                poll_id: option.poll_id,
                text: option.text,
            })
            .collect(),
    }
}

// ── Vote repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVoteRepository {
    pub db: DatabaseConnection,
}

impl VoteRepository for DbVoteRepository {
    async fn find_by_poll_and_user(
        &self,
        poll_id: i32,
        user_id: i32,
    ) -> Result<Option<Vote>, PollServiceError> {
        let model = votes::Entity::find()
            .filter(votes::Column::PollId.eq(poll_id))
            .filter(votes::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find vote by poll and user")?;
        Ok(model.map(vote_from_model))
    }

    async fn create(
        &self,
        poll_id: i32,
        option_id: i32,
        user_id: i32,
    ) -> Result<Vote, PollServiceError> {
        let model = votes::ActiveModel {
            poll_id: Set(poll_id),
            option_id: Set(option_id),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            // The (poll_id, user_id) unique index caught a concurrent
            // duplicate — the earlier vote stands.
            Some(SqlErr::UniqueConstraintViolation(_)) => PollServiceError::AlreadyVoted,
            _ => anyhow::Error::new(e).context("create vote").into(),
        })?;
        Ok(vote_from_model(model))
    }

    async fn count_per_option(&self, poll_id: i32) -> Result<Vec<(i32, u64)>, PollServiceError> {
        let rows: Vec<(i32, i64)> = votes::Entity::find()
            .select_only()
            .column(votes::Column::OptionId)
            .column_as(votes::Column::Id.count(), "vote_count")
            .filter(votes::Column::PollId.eq(poll_id))
            .group_by(votes::Column::OptionId)
            .into_tuple()
            .all(&self.db)
            .await
            .context("count votes per option")?;

        Ok(rows.into_iter().map(|(id, n)| (id, n as u64)).collect())
    }
}

fn vote_from_model(model: votes::Model) -> Vote {
    Vote {
        id: model.id,
        poll_id: model.poll_id,
        option_id: model.option_id,
        user_id: model.user_id,
        created_at: model.created_at,
    }
}
