
use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::table::{DecisionTable, Helper};
use super::eval::CurrentEval;
use super::token::Token;
use super::tree::Forest;

/// Runs a decision table against token streams.
pub struct Parser<'t> {
    table: &'t DecisionTable,
    config: Config,
}

impl<'t> Parser<'t> {
    pub fn new(table: &'t DecisionTable) -> Parser<'t> {
        Parser {
            table,
            config: table.config().clone(),
        }
    }

    /*
     * Only the search limits of `config` are used: the start and
     * end-of-input symbols are the ones the table was built with.
     */
    pub fn with_config(table: &'t DecisionTable, config: Config) -> Parser<'t> {
        Parser {
            table,
            config: Config {
                start: table.config().start.clone(),
                eof: table.config().eof.clone(),
                ..config
            },
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /*
     * Advances `eval` by one decision. Returns its successors: one
     * when the decision is forced, one per matching candidate when
     * the table leaves a choice. Failed successors carry their error.
     */
    pub fn step(&self, mut eval: CurrentEval, tokens: &[Rc<Token>]) -> Vec<CurrentEval> {
        let top = match eval.stack().peek() {
            Some(top) => top.clone(),
            None => {
                let position = tokens.first().map_or(0, |t| t.position);
                return vec!(eval.fail(Error::NoAccept {position}))
            },
        };

        match self.table.lookup(&top.id) {
            [] => {
                trace!(symbol = %top.id, position = top.position, "no candidates");
                vec!(eval.fail(Error::NoElements {symbol: top.id.clone(), position: top.position}))
            },
            [helper] => {
                trace!(helper = %helper.item, "forced");
                vec!(self.run(eval, helper, tokens))
            },
            candidates => {
                let mut matching: Vec<&Helper> = Vec::new();
                let mut rejected = None;

                for helper in candidates {
                    match eval.matches(&helper.action, tokens) {
                        Ok(()) => matching.push(helper),
                        Err(err) => {
                            rejected.get_or_insert(err);
                        },
                    }
                }

                if matching.is_empty() {
                    let err = rejected.unwrap_or(Error::NoElements {
                        symbol: top.id.clone(),
                        position: top.position,
                    });
                    trace!(symbol = %top.id, %err, "no candidate matches");
                    return vec!(eval.fail(err))
                }

                if matching.len() > 1 {
                    trace!(symbol = %top.id, branches = matching.len(), "fork");
                }

                matching.into_iter()
                    .map(|helper| self.run(eval.fork(), helper, tokens))
                    .collect()
            },
        }
    }

    fn run(&self, mut eval: CurrentEval, helper: &Helper, tokens: &[Rc<Token>]) -> CurrentEval {
        match eval.execute(&helper.action, tokens, &self.config) {
            Ok(()) => eval,
            Err(err) => {
                trace!(helper = %helper.item, %err, "branch failed");
                eval.fail(err)
            },
        }
    }

    /*
     * Breadth-first search over every branch. Fails only when no
     * branch is accepted, with the error of the branch that consumed
     * the most input. When a search limit trips, the live branches are
     * dropped and whatever was accepted so far is kept.
     */
    pub fn parse(&self, tokens: &[Token]) -> Result<Forest> {
        if tokens.is_empty() {
            return Err(Error::invalid("the token stream is empty"))
        }

        let tokens: Vec<Rc<Token>> = tokens.iter().cloned().map(Rc::new).collect();

        let mut seed = CurrentEval::new();
        seed.shift(&tokens)?;

        let mut active = vec!(seed);
        let mut accepted = Vec::new();
        let mut deepest: Option<(usize, Error)> = None;
        let mut limit = None;
        let mut steps = 0;

        while !active.is_empty() {
            if active.len() > self.config.max_branches {
                limit = Some(Error::BranchLimit {limit: self.config.max_branches});
            } else if steps == self.config.max_steps {
                limit = Some(Error::StepLimit {limit: self.config.max_steps});
            }
            if let Some(err) = &limit {
                debug!(steps, dropped = active.len(), %err, "search limit reached");
                break
            }
            steps += 1;

            let mut next = Vec::with_capacity(active.len());
            for eval in active.drain(..) {
                for branch in self.step(eval, &tokens) {
                    if branch.is_active() {
                        next.push(branch);
                    } else if branch.is_accepted() {
                        accepted.push(branch);
                    } else if let Some(err) = branch.error() {
                        let deeper = deepest.as_ref()
                            .map_or(true, |(index, _)| branch.current_index() > *index);
                        if deeper {
                            deepest = Some((branch.current_index(), err.clone()));
                        }
                    }
                }
            }
            active = next;
        }

        if accepted.is_empty() {
            let err = limit
                .or_else(|| deepest.map(|(_, err)| err))
                .unwrap_or(Error::NoAccept {position: 0});
            debug!(steps, %err, "parse failed");
            return Err(err)
        }

        debug!(steps, accepted = accepted.len(), "parse accepted");

        let mut trees = Vec::with_capacity(accepted.len());
        for eval in accepted {
            trees.extend(eval.into_trees()?);
        }
        Ok(Forest::new(trees))
    }
}
