
use super::types::*;
use super::items::Item;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Action {
    Shift {
        lookahead: Option<Symbol>,
        matched_rhs: Vec<Symbol>,
    },
    Reduce {
        lookahead: Option<Symbol>,
        matched_rhs: Vec<Symbol>,
        rule: Production,
        should_accept: bool,
    },
}

impl Action {
    pub fn shift() -> Action {
        Action::Shift {lookahead: None, matched_rhs: Vec::new()}
    }

    pub fn reduce(rule: Production, should_accept: bool) -> Action {
        Action::Reduce {lookahead: None, matched_rhs: Vec::new(), rule, should_accept}
    }

    pub fn is_shift(&self) -> bool {
        matches!(self, Action::Shift {..})
    }

    pub fn lookahead(&self) -> Option<&Symbol> {
        match self {
            Action::Shift {lookahead, ..} | Action::Reduce {lookahead, ..} => lookahead.as_ref(),
        }
    }

    /*
     * The symbols a parser pops and compares, stack top first,
     * before choosing this action over its siblings.
     */
    pub fn matched_rhs(&self) -> &[Symbol] {
        match self {
            Action::Shift {matched_rhs, ..} | Action::Reduce {matched_rhs, ..} => matched_rhs,
        }
    }

    pub fn should_accept(&self) -> bool {
        matches!(self, Action::Reduce {should_accept: true, ..})
    }

    pub(crate) fn set_lookahead(&mut self, symbol: Symbol) {
        match self {
            Action::Shift {lookahead, ..} | Action::Reduce {lookahead, ..} => *lookahead = Some(symbol),
        }
    }

    pub(crate) fn push_matched(&mut self, symbol: Symbol) {
        match self {
            Action::Shift {matched_rhs, ..} | Action::Reduce {matched_rhs, ..} => matched_rhs.push(symbol),
        }
    }
}

/// An item together with the action the parser takes for it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Helper {
    pub item: Item,
    pub action: Action,
}

impl Helper {
    pub fn new(item: Item, eof: &Symbol) -> Helper {
        let action = if item.is_reduce() {
            let should_accept = item.symbol() == eof;
            Action::reduce(item.production().clone(), should_accept)
        } else {
            Action::shift()
        };

        Helper {item, action}
    }

    /*
     * Can both matchers succeed on the same stack ? This is the case
     * when one matched suffix is a prefix of the other and the
     * lookaheads do not exclude each other.
     */
    pub fn overlaps(&self, other: &Helper) -> bool {
        let lookaheads_compatible = match (self.action.lookahead(), other.action.lookahead()) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        };

        let a = self.action.matched_rhs();
        let b = other.action.matched_rhs();
        let n = a.len().min(b.len());

        lookaheads_compatible && a[..n] == b[..n]
    }
}
