pub mod auth;
pub mod poll;
pub mod token;
pub mod vote;
