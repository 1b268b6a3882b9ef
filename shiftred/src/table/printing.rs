
use std::fmt;

use super::types::Symbol;
use super::action::{Action, Helper};
use super::api::DecisionTable;

fn symbols(f: &mut fmt::Formatter<'_>, symbols: &[Symbol]) -> fmt::Result {
    if symbols.is_empty() {
        return write!(f, "-")
    }
    for (i, symbol) in symbols.iter().enumerate() {
        if i != 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", symbol)?;
    }
    Ok(())
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift {..} => write!(f, "shift")?,
            Action::Reduce {should_accept: true, ..} => write!(f, "accept")?,
            Action::Reduce {..} => write!(f, "reduce")?,
        }

        write!(f, " | match ")?;
        symbols(f, self.matched_rhs())?;
        write!(f, " | lookahead ")?;
        match self.lookahead() {
            Some(symbol) => write!(f, "{}", symbol),
            None => write!(f, "-"),
        }
    }
}

impl fmt::Display for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} | {}", self.item.rule_index(), self.item, self.action)
    }
}

/*
 * One block per bucket, in symbol order:
 *
 *   WORD
 *       #1 key -> [WORD] | reduce | match WORD | lookahead -
 */
impl fmt::Display for DecisionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, helpers) in self.buckets() {
            writeln!(f, "{}", symbol)?;
            for helper in helpers {
                writeln!(f, "    {}", helper)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::config::Config;
    use crate::table::{Grammar, Production};

    #[test]
    fn renders_every_bucket() {
        let grammar = Grammar::new(Config::new("s", "EOF"), vec![
            Production::new("s", &["key", "EOF"]),
            Production::new("key", &["WORD"]),
            Production::new("key", &["key", "WORD"]),
        ]).unwrap();
        let table = grammar.table().unwrap();

        assert_eq!(table.to_string(), "\
EOF
    #0 s -> key [EOF] | accept | match - | lookahead -
WORD
    #1 key -> [WORD] | reduce | match WORD | lookahead -
    #2 key -> key [WORD] | reduce | match WORD key | lookahead -
key
    #0 s -> [key] EOF | shift | match - | lookahead EOF
    #2 key -> [key] WORD | shift | match - | lookahead WORD
");
    }
}
