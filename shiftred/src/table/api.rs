
use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use super::types::*;
use super::action::Helper;
use super::builder::Builder;
use super::grammar::validate;

/// Two helpers of one bucket that can both match the same stack.
/// The parser forks there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlap {
    pub symbol: Symbol,
    pub first: usize,
    pub second: usize,
}

/// The per-symbol decision table.
///
/// Built once, then only read: the parser looks up the helpers keyed
/// on the symbol of its stack top.
#[derive(Clone, Debug)]
pub struct DecisionTable {
    config: Config,
    productions: Vec<Production>,
    buckets: BTreeMap<Symbol, Vec<Helper>>,
}

impl DecisionTable {
    pub fn build<I>(symbols: I, productions: &[Production], config: &Config) -> Result<DecisionTable>
        where I: IntoIterator<Item = Symbol>
    {
        let symbols: BTreeSet<Symbol> = symbols.into_iter().collect();
        validate(&symbols, productions, config)?;

        let buckets = Builder::new(&symbols, productions, &config.eof).build()?;
        let table = DecisionTable {
            config: config.clone(),
            productions: productions.to_vec(),
            buckets,
        };

        for overlap in table.overlaps() {
            let bucket = table.lookup(&overlap.symbol);
            debug!(
                symbol = %overlap.symbol,
                first = %bucket[overlap.first].item,
                second = %bucket[overlap.second].item,
                "fork point"
            );
        }

        Ok(table)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Every helper keyed on `symbol` (empty for unknown symbols).
    pub fn lookup(&self, symbol: &Symbol) -> &[Helper] {
        self.buckets.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&Symbol, &[Helper])> {
        self.buckets.iter().map(|(symbol, helpers)| (symbol, helpers.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn overlaps(&self) -> Vec<Overlap> {
        self.buckets.iter().flat_map(|(symbol, helpers)| {
            (0..helpers.len()).flat_map(move |i| {
                (i + 1..helpers.len())
                    .filter(move |&j| helpers[i].overlaps(&helpers[j]))
                    .map(move |j| Overlap {symbol: symbol.clone(), first: i, second: j})
            })
        }).collect()
    }
}
