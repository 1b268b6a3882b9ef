
mod action;
mod api;
mod builder;
mod grammar;
mod items;
mod printing;
mod types;

pub use action::{Action, Helper};
pub use api::{DecisionTable, Overlap};
pub use grammar::Grammar;
pub use items::Item;
pub use types::{Production, Symbol};
