
//! Shift-reduce decision tables and a forking parser.
//!
//! A [`Grammar`] is turned into a [`DecisionTable`] whose actions are
//! keyed on the symbol at the top of the parse stack. The [`Parser`]
//! runs that table against a token stream, exploring every action the
//! table leaves open, and returns a [`Forest`] of every accepted tree.

pub mod config;
pub mod error;
pub mod runtime;
pub mod table;

pub use config::Config;
pub use error::{ConflictKind, Error, Result};
pub use runtime::{stream, CurrentEval, EvalState, Parser, TxStack};
pub use runtime::{Forest, NodeId, Token, TokenData, TokenTree, TreeNode};
pub use table::{Action, DecisionTable, Grammar, Helper, Item, Overlap, Production, Symbol};
