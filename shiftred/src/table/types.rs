
use std::fmt;
use std::sync::Arc;

/// A grammar symbol.
///
/// Symbols whose first character is uppercase are terminals,
/// every other symbol is a non-terminal.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Symbol {
        Symbol(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_terminal(&self) -> bool {
        self.0.chars().next().map_or(false, char::is_uppercase)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol(Arc::from(name))
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Production {
    lhs: Symbol,
    rhs: Vec<Symbol>,
}

impl Production {
    pub fn new<S: Into<Symbol> + Clone>(lhs: S, rhs: &[S]) -> Production {
        Production {
            lhs: lhs.into(),
            rhs: rhs.iter().cloned().map(Into::into).collect(),
        }
    }

    pub fn from_symbols(lhs: Symbol, rhs: Vec<Symbol>) -> Production {
        Production {lhs, rhs}
    }

    pub fn lhs(&self) -> &Symbol {
        &self.lhs
    }

    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }

    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }

    /*
     * Returns a copy of this production where the symbol at
     * `index` is replaced (None if out of bounds).
     */
    pub fn replace(&self, index: usize, symbol: Symbol) -> Option<Production> {
        self.substitute(index, &[symbol])
    }

    /*
     * Returns a copy of this production where the symbol at
     * `index` is expanded into `symbols`.
     */
    pub fn substitute(&self, index: usize, symbols: &[Symbol]) -> Option<Production> {
        if index >= self.rhs.len() {
            return None
        }

        let mut rhs = Vec::with_capacity(self.rhs.len() + symbols.len());
        rhs.extend_from_slice(&self.rhs[..index]);
        rhs.extend_from_slice(symbols);
        rhs.extend_from_slice(&self.rhs[index + 1..]);

        Some(Production {lhs: self.lhs.clone(), rhs})
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        if self.rhs.is_empty() {
            return write!(f, " ε")
        }
        for symbol in &self.rhs {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminals_follow_the_case_convention() {
        assert!(Symbol::new("WORD").is_terminal());
        assert!(Symbol::new("EOF").is_terminal());
        assert!(!Symbol::new("key").is_terminal());
        assert!(!Symbol::new("").is_terminal());
        assert!(!Symbol::new("_x").is_terminal());
    }

    #[test]
    fn substitution_copies_the_production() {
        let p = Production::new("e", &["e", "PLUS", "t"]);
        let q = p.replace(1, Symbol::new("MINUS")).unwrap();
        assert_eq!(p.to_string(), "e -> e PLUS t");
        assert_eq!(q.to_string(), "e -> e MINUS t");

        let r = p.substitute(2, &[Symbol::new("LPAR"), Symbol::new("e"), Symbol::new("RPAR")]).unwrap();
        assert_eq!(r.to_string(), "e -> e PLUS LPAR e RPAR");

        let s = p.substitute(0, &[]).unwrap();
        assert_eq!(s.rhs(), &[Symbol::new("PLUS"), Symbol::new("t")]);

        assert!(p.replace(3, Symbol::new("X")).is_none());
    }

    #[test]
    fn epsilon_productions_are_representable() {
        let p = Production::new::<&str>("nothing", &[]);
        assert!(p.is_epsilon());
        assert_eq!(p.len(), 0);
        assert_eq!(p.to_string(), "nothing -> ε");
    }

    #[test]
    fn productions_compare_element_wise() {
        assert_eq!(Production::new("a", &["X", "Y"]), Production::new("a", &["X", "Y"]));
        assert_ne!(Production::new("a", &["X", "Y"]), Production::new("b", &["X", "Y"]));
        assert_ne!(Production::new("a", &["X", "Y"]), Production::new("a", &["Y", "X"]));
    }
}
