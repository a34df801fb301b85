//! Error type for the planner.
//!
//! Planning difficulties (unreachable windows, missing matrix entries,
//! provider outages) are not errors; they degrade to warnings on the
//! response. Only malformed input and setup problems end up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("stop {id:?} is invalid: {reason}")]
    InvalidStop { id: String, reason: String },

    #[error("stop id {0:?} appears more than once")]
    DuplicateStopId(String),

    #[error("invalid {field}: {reason}")]
    InvalidRequest { field: &'static str, reason: String },

    #[error("invalid configuration {key}={value:?}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
