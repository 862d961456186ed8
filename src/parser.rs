//! Table-driven top-down derivation.
//!
//! The derivation keeps an explicit frontier of pending nodes and can stop
//! after a given number of input terminals, so that the incremental reparser
//! can interleave derivation with splicing in old subtrees.

use crate::analysis::Analysis;
use crate::grammar::{Grammar, Symbol, SymbolKind};
use crate::table::Table;
use crate::tree::{Frontier, NodeId, Tree};
use crate::Error;

use std::iter::Peekable;
use std::str::Chars;

use log::{debug, trace};

/// The symbols of a word: one per non-whitespace character, then `$`.
pub struct Tokens<'w> {
    chars: Chars<'w>,
    ended: bool,
}

impl<'w> Tokens<'w> {
    pub fn new(word: &'w str) -> Self { Tokens { chars: word.chars(), ended: false } }
}

impl Iterator for Tokens<'_> {
    type Item = Symbol;
    fn next(&mut self) -> Option<Symbol> {
        if let Some(c) = self.chars.by_ref().find(|c| !c.is_whitespace()) {
            return Some(c.into());
        }
        if self.ended {
            return None;
        }
        self.ended = true;
        Some(Symbol::end_of_input())
    }
}

pub type Input<'w> = Peekable<Tokens<'w>>;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Progress {
    /// Terminals matched during the call.
    pub consumed: usize,
    /// Whether `$` was matched, i.e. the tree is complete.
    pub finished: bool,
}

pub struct Parser<'g> {
    grammar: &'g Grammar,
    analysis: Analysis,
    table: Table,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar) -> Result<Self, Error> {
        let analysis = Analysis::new(grammar)?;
        let table = Table::build(grammar, &analysis)?;
        debug!("grammar is LL(1), {} nonterminals", grammar.nonterminals().count());
        Ok(Parser { grammar, analysis, table })
    }

    pub fn grammar(&self) -> &Grammar { self.grammar }
    pub fn analysis(&self) -> &Analysis { &self.analysis }
    pub fn table(&self) -> &Table { &self.table }

    /// Parses `word` from scratch. Whitespace is ignored.
    pub fn build_tree(&self, word: &str) -> Result<Tree, Error> {
        let mut tree = Tree::new(Symbol::synthetic_start());
        let mut frontier = Frontier::from(vec![tree.root()]);
        let mut input = Tokens::new(word).peekable();
        self.derive(&mut tree, &mut frontier, &mut input, 0, usize::MAX)?;
        Ok(tree)
    }

    /// Expands and matches frontier nodes until `limit` terminals have been
    /// matched, the frontier runs dry, or `$` is matched. `offset` is the
    /// number of terminals of the word matched before this call.
    ///
    /// `ε` leaves that are the only child of their parent get their position
    /// from their right neighbour once the chunk is done.
    pub fn derive(&self,
                  tree: &mut Tree,
                  frontier: &mut Frontier,
                  input: &mut Input<'_>,
                  offset: usize,
                  limit: usize) -> Result<Progress, Error> {
        let mut progress = Progress::default();
        let mut deferred: Vec<NodeId> = Vec::new();

        while progress.consumed < limit {
            let Some(id) = frontier.pop_front() else { break };
            let name = tree[id].name().clone();
            let position = offset + progress.consumed + 1;
            match self.grammar.kind(&name)? {
                SymbolKind::Terminal if name.is_epsilon() => {
                    if tree.is_sole_child(id) {
                        deferred.push(id);
                    }
                }
                SymbolKind::Terminal => {
                    match input.next() {
                        Some(found) if found == name => {}
                        found => {
                            let found = found.unwrap_or_else(Symbol::end_of_input);
                            debug!("expected `{}` at {}, found `{}`", name, position, found);
                            return Err(Error::WordNotInLanguage { position, found });
                        }
                    }
                    tree.place(id, position);
                    progress.consumed += 1;
                    trace!("matched `{}` at {}", name, position);
                    if name.is_end_of_input() {
                        expect_exhausted(input, position)?;
                        progress.finished = true;
                        break;
                    }
                }
                SymbolKind::Nonterminal => {
                    let lookahead = input.peek().cloned().unwrap_or_else(Symbol::end_of_input);
                    let Some(production) = self.table.get(&name, &lookahead) else {
                        debug!("no alternative of {} starts with `{}`", name, lookahead);
                        return Err(Error::WordNotInLanguage { position, found: lookahead });
                    };
                    trace!("{} -> {} on `{}`", name, production, lookahead);
                    let children: Vec<NodeId> = production.symbols().iter()
                        .map(|sym| tree.push_child(id, sym.clone()))
                        .collect();
                    for &child in children.iter().rev() {
                        frontier.push_front(child);
                    }
                }
            }
        }

        for id in deferred {
            tree.resolve_position(id);
        }
        Ok(progress)
    }
}

/// Fails unless nothing is left after the `$` matched at `position`; a `$`
/// written in the word does not end it.
pub(crate) fn expect_exhausted(input: &mut Input<'_>, position: usize) -> Result<(), Error> {
    match input.peek() {
        None => Ok(()),
        Some(extra) => {
            debug!("`{}` after the end of input at {}", extra, position + 1);
            Err(Error::WordNotInLanguage { position: position + 1, found: extra.clone() })
        }
    }
}

#[cfg(test)]
#[path = "tests/parser.rs"]
mod tests_for_parser;
