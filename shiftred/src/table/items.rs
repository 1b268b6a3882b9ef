
use std::fmt;

use super::types::*;

/// A position inside the right-hand side of a production:
/// "the stack top is the symbol at `pos`".
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Item {
    production: Production,
    pos: usize,
    is_reduce: bool,
    rule_index: usize,
}

impl Item {
    /*
     * Returns None when `pos` does not point inside the production
     * (which is always the case for epsilon productions).
     */
    pub fn new(production: &Production, pos: usize, rule_index: usize) -> Option<Item> {
        if pos >= production.len() {
            return None
        }

        Some(Item {
            production: production.clone(),
            pos,
            is_reduce: pos + 1 == production.len(),
            rule_index,
        })
    }

    pub fn production(&self) -> &Production {
        &self.production
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_reduce(&self) -> bool {
        self.is_reduce
    }

    pub fn rule_index(&self) -> usize {
        self.rule_index
    }

    /// The symbol the item is keyed on.
    pub fn symbol(&self) -> &Symbol {
        &self.production.rhs()[self.pos]
    }

    /// The symbol just after the bullet, if any.
    pub fn next_symbol(&self) -> Option<&Symbol> {
        self.production.rhs().get(self.pos + 1)
    }

    /*
     * Returns the symbol `depth` positions before the item's
     * position, or None once the start of the production
     * has been passed.
     */
    pub fn symbol_before(&self, depth: usize) -> Option<&Symbol> {
        self.pos.checked_sub(depth).map(|i| &self.production.rhs()[i])
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.production.lhs())?;
        for (i, symbol) in self.production.rhs().iter().enumerate() {
            if i == self.pos {
                write!(f, " [{}]", symbol)?;
            } else {
                write!(f, " {}", symbol)?;
            }
        }
        Ok(())
    }
}
