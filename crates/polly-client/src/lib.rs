//! HTTP client for the poll service.
//!
//! Wraps the REST surface in typed methods: register, login, create and
//! browse polls, vote, fetch results, delete. Error responses are decoded
//! into [`ClientError::Api`] with the service's `kind` and `message`.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service answered with an error status and a decoded body.
    #[error("{kind}: {message} (status {status})")]
    Api {
        status: StatusCode,
        kind: String,
        message: String,
    },

    /// The service answered with an error status and an undecodable body.
    #[error("unexpected response (status {status}): {body}")]
    Unexpected { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct ApiErrorBody {
    kind: String,
    message: String,
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct UserOut {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenOut {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollOptionOut {
    pub id: i32,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollOut {
    pub id: i32,
    pub question: String,
    pub created_by: i32,
    pub created_at: String,
    pub options: Vec<PollOptionOut>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteOut {
    pub id: i32,
    pub poll_id: i32,
    pub option_id: i32,
    pub user_id: i32,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionTallyOut {
    pub option_id: i32,
    pub text: String,
    pub vote_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultsOut {
    pub poll_id: i32,
    pub question: String,
    pub results: Vec<OptionTallyOut>,
}

// ── Client ───────────────────────────────────────────────────────────────────

pub struct PollyClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl PollyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: None,
        }
    }

    /// Attach a bearer token to all subsequent requests. [`Self::login`]
    /// calls this for you.
    pub fn set_access_token(&mut self, token: String) {
        self.access_token = Some(token);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }
        let body = resp.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => Err(ClientError::Api {
                status,
                kind: err.kind,
                message: err.message,
            }),
            Err(_) => Err(ClientError::Unexpected { status, body }),
        }
    }

    async fn expect_no_content(resp: reqwest::Response) -> Result<(), ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => Err(ClientError::Api {
                status,
                kind: err.kind,
                message: err.message,
            }),
            Err(_) => Err(ClientError::Unexpected { status, body }),
        }
    }

    // ── Accounts ─────────────────────────────────────────────────────────────

    pub async fn register(&self, username: &str, password: &str) -> Result<UserOut, ClientError> {
        debug!(username, "register");
        let resp = self
            .client
            .post(self.url("/register"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Log in with form-encoded credentials and keep the returned token
    /// for later calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<TokenOut, ClientError> {
        debug!(username, "login");
        let resp = self
            .client
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        let token: TokenOut = Self::decode(resp).await?;
        self.access_token = Some(token.access_token.clone());
        Ok(token)
    }

    // ── Polls ────────────────────────────────────────────────────────────────

    pub async fn create_poll(
        &self,
        question: &str,
        options: &[&str],
    ) -> Result<PollOut, ClientError> {
        let resp = self
            .authed(self.client.post(self.url("/polls")))
            .json(&json!({ "question": question, "options": options }))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn list_polls(&self, skip: u64, limit: u64) -> Result<Vec<PollOut>, ClientError> {
        let resp = self
            .client
            .get(self.url("/polls"))
            .query(&[("skip", skip), ("limit", limit)])
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn get_poll(&self, poll_id: i32) -> Result<PollOut, ClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/polls/{poll_id}")))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn delete_poll(&self, poll_id: i32) -> Result<(), ClientError> {
        let resp = self
            .authed(self.client.delete(self.url(&format!("/polls/{poll_id}"))))
            .send()
            .await?;
        Self::expect_no_content(resp).await
    }

    // ── Votes ────────────────────────────────────────────────────────────────

    pub async fn vote(&self, poll_id: i32, option_id: i32) -> Result<VoteOut, ClientError> {
        let resp = self
            .authed(self.client.post(self.url(&format!("/polls/{poll_id}/vote"))))
            .json(&json!({ "option_id": option_id }))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn results(&self, poll_id: i32) -> Result<ResultsOut, ClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/polls/{poll_id}/results")))
            .send()
            .await?;
        Self::decode(resp).await
    }
}
