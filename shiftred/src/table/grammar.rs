
use std::collections::BTreeSet;

use crate::config::Config;
use crate::error::{Error, Result};
use super::types::*;
use super::api::DecisionTable;

/// A checked set of productions, ready to be turned into a table.
#[derive(Clone, Debug)]
pub struct Grammar {
    config: Config,
    symbols: BTreeSet<Symbol>,
    productions: Vec<Production>,
}

impl Grammar {
    /*
     * The symbol set is every symbol the productions mention,
     * plus the start and end-of-input symbols.
     */
    pub fn new(config: Config, productions: Vec<Production>) -> Result<Grammar> {
        let symbols = productions.iter()
            .flat_map(|p| std::iter::once(p.lhs()).chain(p.rhs().iter()))
            .chain([&config.start, &config.eof])
            .cloned()
            .collect();

        Grammar::with_symbols(config, symbols, productions)
    }

    pub fn with_symbols(
        config: Config,
        symbols: BTreeSet<Symbol>,
        productions: Vec<Production>,
    ) -> Result<Grammar> {
        validate(&symbols, &productions, &config)?;
        Ok(Grammar {config, symbols, productions})
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn symbols(&self) -> &BTreeSet<Symbol> {
        &self.symbols
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn table(&self) -> Result<DecisionTable> {
        DecisionTable::build(self.symbols.iter().cloned(), &self.productions, &self.config)
    }
}

pub(crate) fn validate(
    symbols: &BTreeSet<Symbol>,
    productions: &[Production],
    config: &Config,
) -> Result<()> {
    if productions.is_empty() {
        return Err(Error::invalid("the production list is empty"))
    }
    if symbols.is_empty() {
        return Err(Error::invalid("the symbol set is empty"))
    }

    for p in productions {
        if p.lhs().is_terminal() {
            return Err(Error::invalid(format!("terminal \"{}\" on the left of \"{}\"", p.lhs(), p)))
        }
        if let Some(s) = std::iter::once(p.lhs()).chain(p.rhs()).find(|s| !symbols.contains(*s)) {
            return Err(Error::invalid(format!("\"{}\" uses the unknown symbol \"{}\"", p, s)))
        }
    }

    if !config.eof.is_terminal() {
        return Err(Error::invalid(format!("end-of-input symbol \"{}\" is not a terminal", config.eof)))
    }
    if !symbols.contains(&config.eof) {
        return Err(Error::invalid(format!("end-of-input symbol \"{}\" is not in the grammar", config.eof)))
    }
    if !productions.iter().any(|p| p.lhs() == &config.start) {
        return Err(Error::invalid(format!("start symbol \"{}\" has no production", config.start)))
    }

    // Epsilon rules never reduce, so nothing may depend on them.
    let empty: BTreeSet<&Symbol> = productions.iter()
        .filter(|p| p.is_epsilon())
        .map(Production::lhs)
        .collect();
    let used = productions.iter()
        .flat_map(|p| p.rhs().iter().map(move |s| (p, s)))
        .find(|(_, s)| empty.contains(s));
    if let Some((p, s)) = used {
        return Err(Error::invalid(format!("\"{}\" uses \"{}\", which has an empty production", p, s)))
    }

    Ok(())
}
