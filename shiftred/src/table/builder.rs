
use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::error::{ConflictKind, Error, Result};
use super::types::*;
use super::items::Item;
use super::action::Helper;

pub type Buckets = BTreeMap<Symbol, Vec<Helper>>;

/*
 * Turns a validated grammar into per-symbol buckets of helpers
 * and disambiguates every bucket.
 *
 * Buckets are keyed in symbol order and helpers are created in
 * (production, position) order, so two builds of the same grammar
 * always yield the same table.
 */
pub struct Builder<'a> {
    symbols: &'a BTreeSet<Symbol>,
    rules: &'a [Production],
    eof: &'a Symbol,
    buckets: Buckets,
}

impl<'a> Builder<'a> {
    pub fn new(
        symbols: &'a BTreeSet<Symbol>,
        rules: &'a [Production],
        eof: &'a Symbol,
    ) -> Builder<'a> {
        Builder {
            symbols,
            rules,
            eof,
            buckets: BTreeMap::new(),
        }
    }

    fn collect_items(&mut self) {
        for symbol in self.symbols {
            let helpers: Vec<Helper> = self.rules.iter().enumerate()
                .flat_map(|(rule_index, rule)| {
                    rule.rhs().iter().enumerate()
                        .filter(move |(_, s)| *s == symbol)
                        .filter_map(move |(pos, _)| Item::new(rule, pos, rule_index))
                })
                .map(|item| Helper::new(item, self.eof))
                .collect();

            if !helpers.is_empty() {
                self.buckets.insert(symbol.clone(), helpers);
            }
        }
    }

    /*
     * A shift whose next symbol is a terminal only makes
     * sense when that terminal comes next in the input.
     */
    fn assign_lookaheads(&mut self) {
        self.buckets.values_mut().flatten().for_each(|helper| {
            if helper.action.is_shift() {
                if let Some(next) = helper.item.next_symbol().filter(|s| s.is_terminal()) {
                    helper.action.set_lookahead(next.clone());
                }
            }
        });
    }

    fn resolve(&mut self) -> Result<()> {
        for (symbol, helpers) in self.buckets.iter_mut() {
            for (lookahead, members) in partitions(helpers) {
                if members.len() < 2 {
                    continue
                }

                trace!(
                    symbol = %symbol,
                    lookahead = ?lookahead.as_ref().map(Symbol::name),
                    conflicting = members.len(),
                    "resolving partition"
                );
                distinguish(symbol, helpers, &members, 0)?;
            }
        }
        Ok(())
    }

    /*
     * After resolution no two helpers of a bucket may be
     * selected by the same (lookahead, matched suffix) pair.
     */
    fn check(&self) -> Result<()> {
        for (symbol, helpers) in &self.buckets {
            let mut seen: BTreeMap<(Option<&Symbol>, &[Symbol]), usize> = BTreeMap::new();
            for (i, helper) in helpers.iter().enumerate() {
                let key = (helper.action.lookahead(), helper.action.matched_rhs());
                if let Some(&j) = seen.get(&key) {
                    return Err(ambiguity(symbol, helpers, &[j, i]))
                }
                seen.insert(key, i);
            }
        }
        Ok(())
    }

    pub fn build(mut self) -> Result<Buckets> {
        self.collect_items();
        self.assign_lookaheads();
        self.resolve()?;
        self.check()?;

        debug!(
            symbols = self.symbols.len(),
            rules = self.rules.len(),
            buckets = self.buckets.len(),
            helpers = self.buckets.values().map(Vec::len).sum::<usize>(),
            "decision table built"
        );

        Ok(self.buckets)
    }
}

fn partitions(helpers: &[Helper]) -> BTreeMap<Option<Symbol>, Vec<usize>> {
    let mut groups: BTreeMap<Option<Symbol>, Vec<usize>> = BTreeMap::new();
    helpers.iter().enumerate().for_each(|(i, helper)| {
        groups.entry(helper.action.lookahead().cloned()).or_default().push(i)
    });
    groups
}

/*
 * Minimum-distinguishing-suffix search.
 *
 * `group` holds helpers that are still tied after looking at
 * `depth` symbols below the stack top. Every member of a group keyed
 * by a symbol records it in its matched suffix; members that have run
 * past the start of their production can't be told apart any more.
 */
fn distinguish(symbol: &Symbol, helpers: &mut [Helper], group: &[usize], depth: usize) -> Result<()> {
    let mut keyed: BTreeMap<Option<Symbol>, Vec<usize>> = BTreeMap::new();
    for &i in group {
        let key = helpers[i].item.symbol_before(depth).cloned();
        keyed.entry(key).or_default().push(i);
    }

    for (key, members) in keyed {
        match key {
            None if members.len() > 1 => {
                return Err(ambiguity(symbol, helpers, &members))
            },
            None => {
                trace!(symbol = %symbol, depth, helper = %helpers[members[0]].item, "resolved by production start");
            },
            Some(key) => {
                for &i in &members {
                    helpers[i].action.push_matched(key.clone());
                }

                if members.len() > 1 {
                    distinguish(symbol, helpers, &members, depth + 1)?;
                } else {
                    trace!(symbol = %symbol, depth, helper = %helpers[members[0]].item, "resolved by suffix");
                }
            },
        }
    }

    Ok(())
}

fn ambiguity(symbol: &Symbol, helpers: &[Helper], members: &[usize]) -> Error {
    let shifts = members.iter().filter(|&&i| helpers[i].action.is_shift()).count();
    let kind = if shifts == members.len() {
        ConflictKind::ShiftShift
    } else if shifts == 0 {
        ConflictKind::ReduceReduce
    } else {
        ConflictKind::ShiftReduce
    };

    debug!(symbol = %symbol, %kind, "unresolvable conflict");

    Error::Ambiguous {
        symbol: symbol.clone(),
        kind,
        rules: members.iter().map(|&i| helpers[i].item.production().to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(rules: &[Production]) -> Result<Buckets> {
        let symbols = rules.iter()
            .flat_map(|p| std::iter::once(p.lhs().clone()).chain(p.rhs().iter().cloned()))
            .collect::<BTreeSet<Symbol>>();
        let eof = Symbol::new("EOF");
        Builder::new(&symbols, rules, &eof).build()
    }

    fn matched<'a>(buckets: &'a Buckets, symbol: &str) -> Vec<Vec<&'a str>> {
        buckets[&Symbol::new(symbol)].iter()
            .map(|h| h.action.matched_rhs().iter().map(Symbol::name).collect())
            .collect()
    }

    #[test]
    fn every_occurrence_becomes_a_helper() {
        let buckets = build(&[
            Production::new("s", &["e", "EOF"]),
            Production::new("e", &["e", "PLUS", "e"]),
            Production::new("e", &["NUM"]),
        ]).unwrap();

        assert_eq!(buckets[&Symbol::new("e")].len(), 3);
        assert_eq!(buckets[&Symbol::new("NUM")].len(), 1);
        assert!(!buckets.contains_key(&Symbol::new("s")));

        let accepting: Vec<_> = buckets.values().flatten()
            .filter(|h| h.action.should_accept())
            .collect();
        assert_eq!(accepting.len(), 1);
        assert_eq!(accepting[0].item.production().lhs(), "s");
    }

    #[test]
    fn shifts_get_terminal_lookaheads() {
        let buckets = build(&[
            Production::new("s", &["key", "EOF"]),
            Production::new("key", &["key", "WORD"]),
            Production::new("key", &["WORD"]),
            Production::new("pair", &["key", "value"]),
            Production::new("value", &["NUM"]),
        ]).unwrap();

        let lookaheads: Vec<_> = buckets[&Symbol::new("key")].iter()
            .map(|h| h.action.lookahead().map(Symbol::name))
            .collect();
        assert_eq!(lookaheads, vec![Some("EOF"), Some("WORD"), None]);
    }

    #[test]
    fn lookahead_alone_resolves_distinct_shifts() {
        let buckets = build(&[
            Production::new("s", &["key", "EOF"]),
            Production::new("key", &["key", "WORD"]),
            Production::new("key", &["WORD"]),
        ]).unwrap();

        assert_eq!(matched(&buckets, "key"), vec![Vec::<&str>::new(), vec![]]);
    }

    #[test]
    fn left_recursion_is_told_apart_by_suffix() {
        let buckets = build(&[
            Production::new("s", &["key", "EOF"]),
            Production::new("key", &["WORD"]),
            Production::new("key", &["key", "WORD"]),
        ]).unwrap();

        assert_eq!(matched(&buckets, "WORD"), vec![vec!["WORD"], vec!["WORD", "key"]]);
    }

    #[test]
    fn suffix_search_walks_as_deep_as_needed() {
        let buckets = build(&[
            Production::new("s", &["a", "EOF"]),
            Production::new("a", &["X", "Y", "Z"]),
            Production::new("b", &["W", "Y", "Z"]),
            Production::new("s", &["b", "EOF"]),
        ]).unwrap();

        assert_eq!(matched(&buckets, "Z"), vec![vec!["Z", "Y", "X"], vec!["Z", "Y", "W"]]);
        // The "Y" shifts have a terminal lookahead, but the same one.
        assert_eq!(matched(&buckets, "Y"), vec![vec!["Y", "X"], vec!["Y", "W"]]);
    }

    #[test]
    fn identical_right_hand_sides_are_ambiguous() {
        let err = build(&[
            Production::new("s", &["a", "EOF"]),
            Production::new("s", &["b", "EOF"]),
            Production::new("a", &["X", "Y"]),
            Production::new("b", &["X", "Y"]),
        ]).unwrap_err();

        match err {
            Error::Ambiguous {symbol, kind, rules} => {
                assert_eq!(symbol, "X");
                assert_eq!(kind, ConflictKind::ShiftShift);
                assert_eq!(rules, vec!["a -> X Y", "b -> X Y"]);
            },
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn shift_reduce_residue_is_reported() {
        // Two reduces on the same single-symbol rhs.
        let err = build(&[
            Production::new("s", &["c", "EOF"]),
            Production::new("c", &["X"]),
            Production::new("d", &["X"]),
        ]).unwrap_err();

        assert!(matches!(err, Error::Ambiguous {kind: ConflictKind::ReduceReduce, ..}));
    }

    #[test]
    fn epsilon_rules_produce_no_items() {
        let buckets = build(&[
            Production::new("s", &["X", "EOF"]),
            Production::new::<&str>("nothing", &[]),
        ]).unwrap();

        let total: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(total, 2);
    }
}
