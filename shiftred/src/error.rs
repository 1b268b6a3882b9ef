
use std::fmt;

use thiserror::Error;

use crate::table::Symbol;

pub type Result<T> = std::result::Result<T, Error>;

/// The shape of a conflict the solver could not break.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictKind {
    ShiftShift,
    ShiftReduce,
    ReduceReduce,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::ShiftShift => write!(f, "shift/shift"),
            ConflictKind::ShiftReduce => write!(f, "shift/reduce"),
            ConflictKind::ReduceReduce => write!(f, "reduce/reduce"),
        }
    }
}

#[derive(Clone, Debug, Error)]
pub enum Error {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("ambiguous grammar: {kind} conflict on \"{symbol}\" between {}", .rules.join(" | "))]
    Ambiguous {
        symbol: Symbol,
        kind: ConflictKind,
        rules: Vec<String>,
    },

    #[error("no elements found for symbol \"{symbol}\" at position {position}")]
    NoElements { symbol: Symbol, position: usize },

    #[error("unexpected token at position {position}: expected \"{expected}\", found {}", found_name(.found))]
    UnexpectedToken {
        expected: Symbol,
        found: Option<Symbol>,
        position: usize,
    },

    #[error("input ended at position {position} without being accepted")]
    NoAccept { position: usize },

    #[error("cycle detected: token \"{symbol}\" at position {position} is reachable twice")]
    Cycle { symbol: Symbol, position: usize },

    #[error("more than {limit} parse branches are active at once")]
    BranchLimit { limit: usize },

    #[error("parse did not settle within {limit} steps")]
    StepLimit { limit: usize },
}

fn found_name(found: &Option<Symbol>) -> String {
    match found {
        Some(symbol) => format!("\"{}\"", symbol),
        None => "nothing".to_string(),
    }
}

impl Error {
    pub(crate) fn invalid<S: Into<String>>(reason: S) -> Self {
        Error::InvalidInput {reason: reason.into()}
    }

    /// Input position the error refers to, for errors raised while parsing.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::NoElements {position, ..}
            | Error::UnexpectedToken {position, ..}
            | Error::NoAccept {position}
            | Error::Cycle {position, ..} => Some(*position),
            _ => None,
        }
    }
}
