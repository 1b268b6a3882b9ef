
mod eval;
mod parser;
mod stack;
mod token;
mod tree;

pub use eval::{CurrentEval, EvalState};
pub use parser::Parser;
pub use stack::TxStack;
pub use token::{stream, Token, TokenData};
pub use tree::{Forest, NodeId, TokenTree, TreeNode};
