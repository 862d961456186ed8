//! Reparsing an edited word by reusing subtrees of the tree of the word it
//! was edited from.
//!
//! The old and new word share a prefix of length `x` and a suffix of length
//! `z`. The part of the old tree covering the prefix is copied as is. Then
//! the new tree is derived chunk by chunk, and after each chunk the node at
//! the current position of the new tree is compared with the node at the
//! matching position of the old tree; when they agree, the old subtree is
//! grafted in with its positions moved, and its terminals are not parsed
//! again.

use crate::grammar::Symbol;
use crate::parser::{expect_exhausted, Input, Parser, Tokens};
use crate::tree::{Frontier, NodeId, Tree};
use crate::Error;

use std::str::FromStr;

use derive_more::Display;
use log::{debug, trace};

/// How to move on after the nodes at the current positions do not match.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Display)]
pub enum Strategy {
    /// Advance both positions by one terminal.
    #[default]
    #[display(fmt = "simple")]
    Simple,
    /// Skip to the old node's right sibling, as after a match.
    #[display(fmt = "greedy")]
    Greedy,
}

#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[error("unknown strategy `{0}`, expected `simple` or `greedy`")]
pub struct UnknownStrategy(String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Strategy::Simple),
            "greedy" => Ok(Strategy::Greedy),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

fn significant(word: &str) -> Vec<char> {
    word.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Lengths of the longest common prefix and of the longest common suffix
/// that does not overlap it. Identical words share no suffix.
pub(crate) fn common_affixes(old: &[char], new: &[char]) -> (usize, usize) {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    if prefix == old.len() && prefix == new.len() {
        return (prefix, 0);
    }
    let bound = old.len().min(new.len()) - prefix;
    let suffix = old.iter().rev().zip(new.iter().rev())
        .take(bound)
        .take_while(|(a, b)| a == b)
        .count();
    (prefix, suffix)
}

/// Drops up to `count` symbols from `input`, stopping after `$`. Gives the
/// 1-based offset of that `$` among the dropped symbols, if it was reached.
fn skip(input: &mut Input<'_>, count: usize) -> Option<usize> {
    (1..=count).find(|_| input.next().map_or(true, |sym| sym.is_end_of_input()))
}

/// Positions in the old and the new word that are expected to hold the
/// same terminal.
struct Cursor {
    old: usize,
    new: usize,
}

impl Cursor {
    /// Moves to the right neighbour of `node` in the old tree.
    fn step_right(&mut self, old_tree: &Tree, node: NodeId) -> Option<NodeId> {
        let next = old_tree.right_sibling(node)?;
        let gap = old_tree[next].position()?.saturating_sub(self.old);
        self.old += gap;
        self.new += gap;
        Some(next)
    }
}

impl Parser<'_> {
    /// Builds the tree of `new_word`, reusing what it can of `old_tree`,
    /// which must be the tree of `old_word`. The result is the same tree
    /// `build_tree(new_word)` would give, except that reused nodes are
    /// marked inherited.
    pub fn reparse(&self, old_word: &str, old_tree: &Tree, new_word: &str, strategy: Strategy) -> Result<Tree, Error> {
        let old = significant(old_word);
        let new = significant(new_word);
        let (prefix, suffix) = common_affixes(&old, &new);
        debug!("reparse `{}` -> `{}`: common prefix {}, common suffix {}, {} strategy",
               old_word, new_word, prefix, suffix, strategy);

        let mut frontier = Frontier::new();
        let mut tree = if prefix == 0 {
            let tree = Tree::new(Symbol::synthetic_start());
            frontier.push_back(tree.root());
            tree
        } else {
            Tree::inherit_prefix(old_tree, prefix, &mut frontier)
        };

        let text: String = new.iter().collect();
        let mut input = Tokens::new(&text).peekable();
        skip(&mut input, prefix);
        let mut parsed = prefix;

        let mut cursor = Cursor { old: old.len() - suffix + 1, new: new.len() - suffix + 1 };
        let shift = new.len() as isize - old.len() as isize;
        let mut anchor = old_tree.find_position(cursor.old);

        while let Some(old_node) = anchor {
            let progress = self.derive(&mut tree, &mut frontier, &mut input, parsed,
                                       cursor.new.saturating_sub(parsed))?;
            parsed += progress.consumed;
            if progress.finished {
                return Ok(tree);
            }

            let span = old_tree.span(old_node);
            let candidate = tree.find_position(cursor.new)
                .filter(|&c| span > 0 && tree[c].name() == old_tree[old_node].name());
            match candidate {
                Some(candidate) => {
                    trace!("reusing {} spanning {} terminals from {} at {}",
                           old_tree[old_node].name(), span, cursor.old, cursor.new);
                    let copy = tree.graft(old_tree, old_node, shift);
                    frontier.retain(|&id| !tree.is_descendant(id, candidate));
                    tree.replace(candidate, copy);
                    if let Some(end) = skip(&mut input, span - 1) {
                        expect_exhausted(&mut input, parsed + end)?;
                        return Ok(tree);
                    }
                    parsed += span - 1;
                    anchor = cursor.step_right(old_tree, old_node);
                }
                None => match strategy {
                    Strategy::Greedy => anchor = cursor.step_right(old_tree, old_node),
                    Strategy::Simple => {
                        cursor.old += 1;
                        cursor.new += 1;
                        anchor = old_tree.find_position(cursor.old);
                    }
                },
            }
        }

        self.derive(&mut tree, &mut frontier, &mut input, parsed, usize::MAX)?;
        Ok(tree)
    }
}

#[cfg(test)]
#[path = "tests/incremental.rs"]
mod tests_for_incremental;
