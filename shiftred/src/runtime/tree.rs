
use std::collections::HashSet;
use std::fmt;
use std::ops::Index;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::table::Symbol;
use super::token::Token;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub symbol: Symbol,
    pub text: Option<String>,
    pub position: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/*
 * An explicit tree built from a reduced token. Nodes live in an
 * arena, in depth-first order, and refer to each other by index.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenTree {
    nodes: Vec<TreeNode>,
}

impl TokenTree {
    /*
     * Fails if a token is reachable twice from `root`, which can
     * only happen for token graphs assembled by hand.
     */
    pub fn build(root: &Rc<Token>) -> Result<TokenTree> {
        let mut nodes: Vec<TreeNode> = Vec::new();
        let mut visited: HashSet<*const Token> = HashSet::new();
        let mut todo: Vec<(Rc<Token>, Option<NodeId>)> = vec!((root.clone(), None));

        while let Some((token, parent)) = todo.pop() {
            if !visited.insert(Rc::as_ptr(&token)) {
                return Err(Error::Cycle {
                    symbol: token.id.clone(),
                    position: token.position,
                })
            }

            let id = NodeId(nodes.len());
            nodes.push(TreeNode {
                symbol: token.id.clone(),
                text: token.text().map(str::to_string),
                position: token.position,
                parent,
                children: Vec::new(),
            });
            if let Some(parent) = parent {
                nodes[parent.0].children.push(id);
            }

            token.children().iter().rev().for_each(|child| todo.push((child.clone(), Some(id))));
        }

        Ok(TokenTree {nodes})
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node with its depth, in depth-first order.
    pub fn depth_first(&self) -> Vec<(usize, NodeId)> {
        let mut res = Vec::with_capacity(self.nodes.len());
        let mut todo = vec!((0, self.root()));

        while let Some((depth, id)) = todo.pop() {
            res.push((depth, id));
            self[id].children.iter().rev().for_each(|child| todo.push((depth + 1, *child)));
        }

        res
    }

    /// Compact one-line rendering, such as `s(key(WORD) EOF)`.
    pub fn sexpr(&self) -> String {
        fn visit(tree: &TokenTree, id: NodeId, out: &mut String) {
            let node = &tree[id];
            out.push_str(node.symbol.name());
            match &node.text {
                Some(text) if !text.is_empty() && text != node.symbol.name() => {
                    out.push('\'');
                    out.push_str(text);
                    out.push('\'');
                },
                Some(_) => (),
                None => {
                    out.push('(');
                    for (i, child) in node.children.iter().enumerate() {
                        if i != 0 {
                            out.push(' ');
                        }
                        visit(tree, *child, out);
                    }
                    out.push(')');
                },
            }
        }

        let mut out = String::new();
        visit(self, self.root(), &mut out);
        out
    }
}

impl Index<NodeId> for TokenTree {
    type Output = TreeNode;

    fn index(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }
}

impl fmt::Display for TokenTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, id) in self.depth_first() {
            let node = &self[id];
            write!(f, "{:indent$}{}", "", node.symbol, indent = 2 * depth)?;
            if let Some(text) = &node.text {
                write!(f, " {:?}", text)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Every tree an input was accepted with, in acceptance order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Forest {
    trees: Vec<TokenTree>,
}

impl Forest {
    pub(crate) fn new(trees: Vec<TokenTree>) -> Forest {
        Forest {trees}
    }

    pub fn trees(&self) -> &[TokenTree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.trees.len() > 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenTree> {
        self.trees.iter()
    }
}

impl IntoIterator for Forest {
    type Item = TokenTree;
    type IntoIter = std::vec::IntoIter<TokenTree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.into_iter()
    }
}
