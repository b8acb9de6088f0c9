
mod auth_test;
mod poll_test;
mod vote_test;
