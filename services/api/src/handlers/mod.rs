pub mod auth;
pub mod poll;
pub mod vote;
