use chrono::{DateTime, Utc};

/// Registered account. `password_hash` is an Argon2id PHC string.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A poll with its fixed option set. Options are created together with
/// the poll and never edited or removed independently.
#[derive(Debug, Clone)]
pub struct Poll {
    pub id: i32,
    pub question: String,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub options: Vec<PollOption>,
}

impl Poll {
    /// Whether `option_id` belongs to this poll's option set.
    pub fn has_option(&self, option_id: i32) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }
}

/// One selectable choice belonging to exactly one poll.
#[derive(Debug, Clone)]
pub struct PollOption {
    pub id: i32,
    pub poll_id: i32,
    pub text: String,
}

/// A single user's recorded choice within one poll.
#[derive(Debug, Clone)]
pub struct Vote {
    pub id: i32,
    pub poll_id: i32,
    pub option_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Vote count for one option, part of a poll's aggregated results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTally {
    pub option_id: i32,
    pub text: String,
    pub vote_count: u64,
}

/// Aggregated results for one poll, one tally per option in option
/// creation order. Zero-vote options are included with count 0.
#[derive(Debug, Clone)]
pub struct PollResults {
    pub poll_id: i32,
    pub question: String,
    pub results: Vec<OptionTally>,
}
