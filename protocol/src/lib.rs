use thiserror::Error;

pub mod client;
pub mod error;
pub mod server;
mod stat;

pub use client::{ClientCommand, TurnAction};
pub use error::{DuelError, ErrorCategory, ErrorKind};
pub use server::{CreatureSummary, Reply, ServerResponse, parse_reply, reply_to_wire};
pub use stat::Stat;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} expects {expected} argument(s), got {got}")]
    WrongArity {
        command: String,
        expected: usize,
        got: usize,
    },

    #[error("Empty message")]
    EmptyMessage,
}
