//! Sea-ORM entities for the poll service.

pub mod poll_options;
pub mod polls;
pub mod users;
pub mod votes;
