
use std::rc::Rc;

use crate::table::Symbol;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenData {
    Leaf(String),
    Node(Vec<Rc<Token>>),
}

/*
 * A token of the input stream, or a reduced non-terminal.
 *
 * `lookahead` is the index (in the token stream) of the token that
 * follows this one; it never owns anything.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub id: Symbol,
    pub data: TokenData,
    pub position: usize,
    pub lookahead: Option<usize>,
}

impl Token {
    pub fn leaf<S: Into<Symbol>, T: Into<String>>(id: S, text: T, position: usize) -> Token {
        Token {
            id: id.into(),
            data: TokenData::Leaf(text.into()),
            position,
            lookahead: None,
        }
    }

    /*
     * The node starts where its first child starts, and looks
     * ahead at whatever follows its last child.
     */
    pub fn node(id: Symbol, children: Vec<Rc<Token>>) -> Token {
        let position = children.first().map_or(0, |t| t.position);
        let lookahead = children.last().and_then(|t| t.lookahead);

        Token {
            id,
            data: TokenData::Node(children),
            position,
            lookahead,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.data, TokenData::Leaf(_))
    }

    pub fn text(&self) -> Option<&str> {
        match &self.data {
            TokenData::Leaf(text) => Some(text),
            TokenData::Node(_) => None,
        }
    }

    pub fn children(&self) -> &[Rc<Token>] {
        match &self.data {
            TokenData::Leaf(_) => &[],
            TokenData::Node(children) => children,
        }
    }
}

/// Links `(symbol, text, position)` lexemes into a token stream.
///
/// Every token looks ahead at the next one, and the stream always ends
/// with an `eof` token (appended unless the lexemes already end with one).
pub fn stream<I, S, T>(lexemes: I, eof: &Symbol) -> Vec<Token>
    where I: IntoIterator<Item = (S, T, usize)>,
          S: Into<Symbol>,
          T: Into<String>,
{
    let mut tokens: Vec<Token> = lexemes.into_iter()
        .map(|(id, text, position)| Token::leaf(id, text, position))
        .collect();

    if tokens.last().map_or(true, |t| &t.id != eof) {
        let position = tokens.last().map_or(0, |t| t.position + t.text().map_or(0, str::len));
        tokens.push(Token::leaf(eof.clone(), "", position));
    }

    let len = tokens.len();
    tokens.iter_mut().enumerate().for_each(|(i, token)| {
        token.lookahead = if i + 1 < len {Some(i + 1)} else {None};
    });

    tokens
}
