
use std::rc::Rc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::table::{Action, Production, Symbol};
use super::stack::TxStack;
use super::token::Token;
use super::tree::TokenTree;

#[derive(Clone, Debug)]
pub enum EvalState {
    Active,
    Accepted,
    Failed(Error),
}

/*
 * One path of the branching search: a stack of parsed tokens
 * and a position in the input. Forking clones the whole state,
 * so two branches never share a mutable stack.
 */
#[derive(Clone, Debug)]
pub struct CurrentEval {
    stack: TxStack<Rc<Token>>,
    current_index: usize,
    state: EvalState,
}

impl CurrentEval {
    pub fn new() -> CurrentEval {
        CurrentEval {
            stack: TxStack::new(),
            current_index: 0,
            state: EvalState::Active,
        }
    }

    pub fn stack(&self) -> &TxStack<Rc<Token>> {
        &self.stack
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn state(&self) -> &EvalState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, EvalState::Active)
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.state, EvalState::Accepted)
    }

    pub fn error(&self) -> Option<&Error> {
        match &self.state {
            EvalState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn fork(&self) -> CurrentEval {
        self.clone()
    }

    pub fn fail(mut self, err: Error) -> CurrentEval {
        self.state = EvalState::Failed(err);
        self
    }

    /// Source offset of the next unconsumed token (or of the last one).
    fn here(&self, tokens: &[Rc<Token>]) -> usize {
        tokens.get(self.current_index)
            .or_else(|| tokens.last())
            .map_or(0, |t| t.position)
    }

    fn unexpected(&self, expected: &Symbol, found: Option<&Rc<Token>>, tokens: &[Rc<Token>]) -> Error {
        Error::UnexpectedToken {
            expected: expected.clone(),
            found: found.map(|t| t.id.clone()),
            position: found.map_or_else(|| self.here(tokens), |t| t.position),
        }
    }

    pub fn shift(&mut self, tokens: &[Rc<Token>]) -> Result<()> {
        let token = tokens.get(self.current_index)
            .ok_or_else(|| Error::NoAccept {position: self.here(tokens)})?;

        self.stack.push(token.clone());
        self.stack.commit();
        self.current_index += 1;
        Ok(())
    }

    /*
     * Pops the right-hand side of `rule` (checking every symbol) and
     * pushes the reduced token. On a mismatch the stack is left
     * exactly as it was.
     */
    pub fn reduce(&mut self, rule: &Production, tokens: &[Rc<Token>]) -> Result<Rc<Token>> {
        let mut children = Vec::with_capacity(rule.len());

        for expected in rule.rhs().iter().rev() {
            match self.stack.pop() {
                Some(token) if &token.id == expected => children.push(token),
                found => {
                    let err = self.unexpected(expected, found.as_ref(), tokens);
                    self.stack.rollback();
                    return Err(err)
                },
            }
        }

        self.stack.commit();
        children.reverse();

        let mut token = Token::node(rule.lhs().clone(), children);
        if token.children().is_empty() {
            token.position = self.here(tokens);
            token.lookahead = Some(self.current_index).filter(|&i| i < tokens.len());
        }
        let token = Rc::new(token);

        self.stack.push(token.clone());
        self.stack.commit();
        Ok(token)
    }

    /*
     * Would `action` apply to the current stack ? Checks the
     * lookahead of the stack top, then pops and compares the matched
     * suffix. The stack is always restored.
     */
    pub fn matches(&mut self, action: &Action, tokens: &[Rc<Token>]) -> Result<()> {
        let top = match self.stack.peek() {
            Some(top) => top.clone(),
            None => {
                let expected = action.matched_rhs().first().or_else(|| action.lookahead());
                return match expected {
                    Some(expected) => Err(self.unexpected(expected, None, tokens)),
                    None => Ok(()),
                }
            },
        };

        if let Some(expected) = action.lookahead() {
            let next = top.lookahead.and_then(|i| tokens.get(i));
            if next.map(|t| &t.id) != Some(expected) {
                return Err(self.unexpected(expected, next, tokens))
            }
        }

        let mut res = Ok(());
        for expected in action.matched_rhs() {
            match self.stack.pop() {
                Some(token) if &token.id == expected => (),
                found => {
                    res = Err(self.unexpected(expected, found.as_ref(), tokens));
                    break
                },
            }
        }

        self.stack.rollback();
        res
    }

    pub fn execute(&mut self, action: &Action, tokens: &[Rc<Token>], config: &Config) -> Result<()> {
        match action {
            Action::Shift {..} => self.shift(tokens),
            Action::Reduce {rule, should_accept, ..} => {
                let token = self.reduce(rule, tokens)?;

                if *should_accept {
                    let complete = self.stack.len() == 1
                        && token.id == config.start
                        && self.current_index == tokens.len();

                    if !complete {
                        return Err(Error::NoAccept {position: self.here(tokens)})
                    }
                    self.state = EvalState::Accepted;
                }

                Ok(())
            },
        }
    }

    /// Pops every token left on the stack and turns it into a tree.
    pub fn into_trees(mut self) -> Result<Vec<TokenTree>> {
        let mut trees = Vec::with_capacity(self.stack.len());
        while let Some(token) = self.stack.pop() {
            trees.push(TokenTree::build(&token)?);
        }
        trees.reverse();
        Ok(trees)
    }
}

impl Default for CurrentEval {
    fn default() -> Self {
        CurrentEval::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::token::stream;

    fn tokens(symbols: &[&str]) -> Vec<Rc<Token>> {
        let eof = Symbol::new("EOF");
        let lexemes = symbols.iter().enumerate().map(|(i, s)| (*s, s.to_lowercase(), i));
        stream(lexemes, &eof).into_iter().map(Rc::new).collect()
    }

    fn ids(eval: &CurrentEval) -> Vec<&str> {
        eval.stack().as_slice().iter().map(|t| t.id.name()).collect()
    }

    #[test]
    fn shift_consumes_the_input_in_order() {
        let input = tokens(&["X"]);
        let mut eval = CurrentEval::new();

        eval.shift(&input).unwrap();
        eval.shift(&input).unwrap();
        assert_eq!(ids(&eval), vec!["X", "EOF"]);
        assert_eq!(eval.current_index(), 2);

        assert!(matches!(eval.shift(&input), Err(Error::NoAccept {..})));
    }

    #[test]
    fn reduce_builds_a_node_from_the_popped_tokens() {
        let input = tokens(&["WORD", "WORD"]);
        let mut eval = CurrentEval::new();
        eval.shift(&input).unwrap();

        let key = eval.reduce(&Production::new("key", &["WORD"]), &input).unwrap();
        assert_eq!(key.id, "key");
        assert_eq!(key.position, 0);
        assert_eq!(key.lookahead, Some(1));
        assert_eq!(ids(&eval), vec!["key"]);

        eval.shift(&input).unwrap();
        let key = eval.reduce(&Production::new("key", &["key", "WORD"]), &input).unwrap();
        assert_eq!(key.children().len(), 2);
        assert_eq!(key.children()[0].id, "key");
        assert_eq!(key.children()[1].id, "WORD");
        assert_eq!(key.lookahead, Some(2));
    }

    #[test]
    fn empty_reductions_sit_before_the_next_token() {
        let input = tokens(&["X"]);
        let mut eval = CurrentEval::new();
        eval.shift(&input).unwrap();

        let nothing = eval.reduce(&Production::new::<&str>("nothing", &[]), &input).unwrap();
        assert!(nothing.children().is_empty());
        assert_eq!(nothing.position, 1);
        assert_eq!(nothing.lookahead, Some(1));
        assert_eq!(ids(&eval), vec!["X", "nothing"]);
    }

    #[test]
    fn failed_reduce_leaves_the_stack_untouched() {
        let input = tokens(&["A", "B"]);
        let mut eval = CurrentEval::new();
        eval.shift(&input).unwrap();
        eval.shift(&input).unwrap();

        let err = eval.reduce(&Production::new("c", &["C", "B"]), &input).unwrap_err();
        match err {
            Error::UnexpectedToken {expected, found, position} => {
                assert_eq!(expected, "C");
                assert_eq!(found, Some(Symbol::new("A")));
                assert_eq!(position, 0);
            },
            e => panic!("unexpected error {:?}", e),
        }
        assert_eq!(ids(&eval), vec!["A", "B"]);
        assert_eq!(eval.stack().pending(), 0);

        let err = eval.reduce(&Production::new("c", &["Z", "A", "B"]), &input).unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken {found: None, ..}));
        assert_eq!(ids(&eval), vec!["A", "B"]);
    }

    #[test]
    fn matching_never_changes_the_stack() {
        let input = tokens(&["WORD", "WORD"]);
        let mut eval = CurrentEval::new();
        eval.shift(&input).unwrap();

        let mut short = Action::reduce(Production::new("key", &["WORD"]), false);
        short.push_matched(Symbol::new("WORD"));
        let mut long = Action::reduce(Production::new("key", &["key", "WORD"]), false);
        long.push_matched(Symbol::new("WORD"));
        long.push_matched(Symbol::new("key"));

        assert!(eval.matches(&short, &input).is_ok());
        assert!(eval.matches(&long, &input).is_err());
        assert_eq!(ids(&eval), vec!["WORD"]);
        assert_eq!(eval.stack().pending(), 0);
    }

    #[test]
    fn matching_checks_the_lookahead() {
        let input = tokens(&["WORD", "WORD"]);
        let mut eval = CurrentEval::new();
        eval.shift(&input).unwrap();

        let mut word = Action::shift();
        word.set_lookahead(Symbol::new("WORD"));
        let mut eof = Action::shift();
        eof.set_lookahead(Symbol::new("EOF"));

        assert!(eval.matches(&word, &input).is_ok());
        match eval.matches(&eof, &input) {
            Err(Error::UnexpectedToken {expected, found, position}) => {
                assert_eq!(expected, "EOF");
                assert_eq!(found, Some(Symbol::new("WORD")));
                assert_eq!(position, 1);
            },
            res => panic!("unexpected result {:?}", res),
        }
    }

    #[test]
    fn accepting_requires_a_complete_parse() {
        let config = Config::new("s", "EOF");
        let input = tokens(&["X"]);
        let accept = Action::reduce(Production::new("s", &["X", "EOF"]), true);

        let mut eval = CurrentEval::new();
        eval.shift(&input).unwrap();
        eval.shift(&input).unwrap();
        eval.execute(&accept, &input, &config).unwrap();
        assert!(eval.is_accepted());

        let trees = eval.into_trees().unwrap();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].sexpr(), "s(X'x' EOF)");

        // Something is left below the accepted token.
        let input = tokens(&["Y", "X"]);
        let mut eval = CurrentEval::new();
        eval.shift(&input).unwrap();
        eval.shift(&input).unwrap();
        eval.shift(&input).unwrap();
        let err = eval.execute(&accept, &input, &config).unwrap_err();
        assert!(matches!(err, Error::NoAccept {..}));
        assert!(eval.is_active());
    }

    #[test]
    fn forks_do_not_alias() {
        let input = tokens(&["A", "B"]);
        let mut eval = CurrentEval::new();
        eval.shift(&input).unwrap();

        let mut fork = eval.fork();
        fork.shift(&input).unwrap();
        fork.reduce(&Production::new("ab", &["A", "B"]), &input).unwrap();

        assert_eq!(ids(&eval), vec!["A"]);
        assert_eq!(eval.current_index(), 1);
        assert_eq!(ids(&fork), vec!["ab"]);
        assert_eq!(fork.current_index(), 2);
    }
}
