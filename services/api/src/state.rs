use sea_orm::DatabaseConnection;

use crate::infra::db::{DbPollRepository, DbUserRepository, DbVoteRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn poll_repo(&self) -> DbPollRepository {
        DbPollRepository {
            db: self.db.clone(),
        }
    }

    pub fn vote_repo(&self) -> DbVoteRepository {
        DbVoteRepository {
            db: self.db.clone(),
        }
    }
}
