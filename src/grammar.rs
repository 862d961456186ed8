use crate::Error;

use std::collections::BTreeSet;

use derive_more::{Display, From};
use linear_map::LinearMap;

// A grammar G is a tuple (Sigma, N, S, P), where
//   Sigma is a finite set of single-character terminals (plus `$` and `ε`),
//   N is a finite set of nonterminals,
//   S in N is the start nonterminal, and
//   P maps each nonterminal to an ordered list of alternatives.
//
// The alternatives of S always end in `$`, and an extra nonterminal S' with
// the single alternative `S' -> S` sits on top so that every derivation
// starts from the same place.

pub const EPSILON: &str = "ε";
pub const END_OF_INPUT: &str = "$";
pub const START: &str = "S";
pub const SYNTHETIC_START: &str = "S'";

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug, Display, From)]
pub struct Symbol(String);

impl Symbol {
    pub fn epsilon() -> Self { Symbol(EPSILON.into()) }
    pub fn end_of_input() -> Self { Symbol(END_OF_INPUT.into()) }
    pub fn start() -> Self { Symbol(START.into()) }
    pub fn synthetic_start() -> Self { Symbol(SYNTHETIC_START.into()) }

    pub fn is_epsilon(&self) -> bool { self.0 == EPSILON }
    pub fn is_end_of_input(&self) -> bool { self.0 == END_OF_INPUT }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl From<char> for Symbol { fn from(c: char) -> Self { Symbol(c.to_string()) } }
impl From<&str> for Symbol { fn from(s: &str) -> Self { Symbol(s.into()) } }

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SymbolKind { Terminal, Nonterminal }

/// One alternative of a nonterminal: the symbols it expands to, left to right.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Production(pub Vec<Symbol>);

impl Production {
    pub fn epsilon() -> Self { Production(vec![Symbol::epsilon()]) }

    pub fn symbols(&self) -> &[Symbol] { &self.0 }

    pub fn is_epsilon(&self) -> bool {
        matches!(&self.0[..], [only] if only.is_epsilon())
    }

    fn ends_with_end_of_input(&self) -> bool {
        self.0.last().map_or(false, Symbol::is_end_of_input)
    }
}

/// Every non-whitespace character is one symbol, so `"+TQ"` is `+ T Q`.
impl From<&str> for Production {
    fn from(s: &str) -> Self {
        Production(s.chars().filter(|c| !c.is_whitespace()).map(Symbol::from).collect())
    }
}

/// Grammar as handed over by whoever read it: declared terminals and the
/// alternatives of each nonterminal, in declaration order.
#[derive(Clone, Debug)]
pub struct GrammarInfo {
    pub terminals: BTreeSet<Symbol>,
    pub productions: LinearMap<Symbol, Vec<Production>>,
    pub start: Symbol,
}

impl Default for GrammarInfo {
    fn default() -> Self { GrammarInfo::new() }
}

impl GrammarInfo {
    pub fn new() -> Self {
        GrammarInfo {
            terminals: vec![Symbol::end_of_input(), Symbol::epsilon()].into_iter().collect(),
            productions: LinearMap::new(),
            start: Symbol::start(),
        }
    }

    /// Defines (or redefines) `nonterminal`, returning the alternatives it
    /// replaced, if any.
    pub fn define(&mut self, nonterminal: impl Into<Symbol>, alternatives: Vec<Production>) -> Option<Vec<Production>> {
        self.productions.insert(nonterminal.into(), alternatives)
    }

    /// Declares each character of `chars` as a terminal.
    pub fn with_terminals(mut self, chars: &str) -> Self {
        self.terminals.extend(chars.chars().filter(|c| !c.is_whitespace()).map(Symbol::from));
        self
    }

    pub fn with_rule(mut self, nonterminal: impl Into<Symbol>, alternatives: &[&str]) -> Self {
        self.define(nonterminal, alternatives.iter().map(|&alt| alt.into()).collect());
        self
    }

    pub fn with_start(mut self, start: impl Into<Symbol>) -> Self {
        self.start = start.into();
        self
    }
}

/// A normalized grammar, ready for analysis.
#[derive(Clone, Debug)]
pub struct Grammar { info: GrammarInfo }

impl Grammar {
    pub fn new(mut info: GrammarInfo) -> Self {
        info.terminals.insert(Symbol::end_of_input());
        info.terminals.insert(Symbol::epsilon());

        let start = info.start.clone();
        let mut productions = LinearMap::with_capacity(info.productions.len() + 1);
        productions.insert(Symbol::synthetic_start(), vec![Production(vec![start.clone()])]);
        for (nonterminal, alternatives) in info.productions {
            let alternatives: Vec<Production> = alternatives.into_iter().map(|mut alt| {
                if alt.0.is_empty() {
                    alt = Production::epsilon();
                }
                if nonterminal == start && !alt.ends_with_end_of_input() {
                    if alt.is_epsilon() {
                        alt.0.clear();
                    }
                    alt.0.push(Symbol::end_of_input());
                }
                alt
            }).collect();
            if nonterminal != Symbol::synthetic_start() {
                productions.insert(nonterminal, alternatives);
            }
        }
        info.productions = productions;
        Grammar { info }
    }

    pub fn start(&self) -> &Symbol { &self.info.start }

    pub fn terminals(&self) -> &BTreeSet<Symbol> { &self.info.terminals }

    /// Nonterminals in declaration order, starting with `S'`.
    pub fn nonterminals(&self) -> impl Iterator<Item=&Symbol> {
        self.info.productions.keys()
    }

    pub fn rules(&self) -> impl Iterator<Item=(&Symbol, &[Production])> {
        self.info.productions.iter().map(|(nt, alts)| (nt, &alts[..]))
    }

    pub fn productions(&self, nonterminal: &Symbol) -> &[Production] {
        self.info.productions.get(nonterminal).map(|alts| &alts[..]).unwrap_or(&[])
    }

    /// Classifies `symbol`; symbols that were never declared are an error
    /// the first time anybody asks about them.
    pub fn kind(&self, symbol: &Symbol) -> Result<SymbolKind, Error> {
        if self.info.terminals.contains(symbol) {
            Ok(SymbolKind::Terminal)
        } else if self.info.productions.contains_key(symbol) {
            Ok(SymbolKind::Nonterminal)
        } else {
            Err(Error::UnknownSymbol(symbol.clone()))
        }
    }
}

// This is a trick: we have the source code for our tests under a single
// `src/tests/` subdirectory, but we declare it as a module *here*, under this
// module. That way, it has access to private constructors and state that a
// sibling (or in this case, nibling) module would not have access to.
#[cfg(test)]
#[path = "tests/grammar.rs"]
mod tests_for_grammar;
