use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::PollServiceError;
use crate::usecase::token::issue_access_token;

/// Hash a password with Argon2id and a fresh random salt, returning the
/// PHC string. The plaintext is never stored.
pub fn hash_password(password: &str) -> Result<String, PollServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PollServiceError::Internal(anyhow::anyhow!("hash password: {e}")))
}

/// Verify a password against a stored PHC string. An unparseable hash
/// counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub username: String,
    pub password: String,
}

pub struct RegisterUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUserUseCase<U> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, PollServiceError> {
        let username = input.username.trim();
        if username.is_empty() || input.password.is_empty() {
            return Err(PollServiceError::MissingData);
        }
        if self.users.find_by_username(username).await?.is_some() {
            return Err(PollServiceError::UsernameTaken);
        }
        let password_hash = hash_password(&input.password)?;
        self.users.create(username, &password_hash).await
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, PollServiceError> {
        let user = self
            .users
            .find_by_username(input.username.trim())
            .await?
            .ok_or(PollServiceError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(PollServiceError::InvalidCredentials);
        }

        let (access_token, access_token_exp) = issue_access_token(user.id, &self.jwt_secret)?;
        Ok(LoginOutput {
            access_token,
            access_token_exp,
        })
    }
}
