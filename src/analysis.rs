//! Nullable, FIRST and FOLLOW sets of a normalized grammar.

use crate::grammar::{Grammar, Symbol, SymbolKind};
use crate::graph::{self, Graph};
use crate::rendering::Rendered;
use crate::Error;

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

pub type SymbolSet = BTreeSet<Symbol>;

#[derive(Clone, Debug)]
pub struct Analysis {
    nullable: BTreeMap<Symbol, bool>,
    first: BTreeMap<Symbol, SymbolSet>,
    follow: BTreeMap<Symbol, SymbolSet>,
}

impl Analysis {
    pub fn new(grammar: &Grammar) -> Result<Self, Error> {
        let nullable = nullable_set(grammar)?;
        let first = first_sets(grammar, &nullable)?;
        let follow = follow_sets(grammar, &nullable, &first)?;
        for nt in grammar.nonterminals() {
            debug!("{}: nullable {}, first {}, follow {}",
                   nt,
                   is_nullable(&nullable, nt),
                   first.get(nt).rendered(),
                   follow.get(nt).rendered());
        }
        Ok(Analysis { nullable, first, follow })
    }

    pub fn nullable(&self, nonterminal: &Symbol) -> bool { is_nullable(&self.nullable, nonterminal) }

    /// FIRST set of `nonterminal`; holds `ε` exactly when it is nullable.
    pub fn first(&self, nonterminal: &Symbol) -> Option<&SymbolSet> { self.first.get(nonterminal) }

    /// FOLLOW set of `nonterminal`; never holds `ε`.
    pub fn follow(&self, nonterminal: &Symbol) -> Option<&SymbolSet> { self.follow.get(nonterminal) }

    /// FIRST set of a symbol sequence, holding `ε` when the whole sequence
    /// can derive the empty string (in particular, when it is empty).
    pub fn first_of(&self, grammar: &Grammar, symbols: &[Symbol]) -> Result<SymbolSet, Error> {
        sequence_first(grammar, &self.nullable, &self.first, symbols)
    }
}

fn is_nullable(nullable: &BTreeMap<Symbol, bool>, nt: &Symbol) -> bool {
    nullable.get(nt).copied().unwrap_or(false)
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Mark { InProgress, Done }

// Depth-first, and optimistic about cycles: a nonterminal reached again
// while it is still being visited counts as nullable. So `A -> B | x` with
// `B -> A` marks both A and B nullable.
pub(crate) fn nullable_set(grammar: &Grammar) -> Result<BTreeMap<Symbol, bool>, Error> {
    let mut nullable = BTreeMap::new();
    let mut marks = BTreeMap::new();
    for nt in grammar.nonterminals() {
        if !marks.contains_key(nt) {
            visit_nullable(grammar, nt, &mut marks, &mut nullable)?;
        }
    }
    Ok(nullable)
}

fn visit_nullable(grammar: &Grammar,
                  nt: &Symbol,
                  marks: &mut BTreeMap<Symbol, Mark>,
                  nullable: &mut BTreeMap<Symbol, bool>) -> Result<bool, Error> {
    match marks.get(nt) {
        Some(Mark::InProgress) => return Ok(true),
        Some(Mark::Done) => return Ok(is_nullable(nullable, nt)),
        None => {}
    }
    marks.insert(nt.clone(), Mark::InProgress);

    let mut result = false;
    'alternatives: for production in grammar.productions(nt) {
        for sym in production.symbols() {
            let derives_empty = match grammar.kind(sym)? {
                SymbolKind::Terminal => sym.is_epsilon(),
                SymbolKind::Nonterminal => visit_nullable(grammar, sym, marks, nullable)?,
            };
            if !derives_empty {
                continue 'alternatives;
            }
        }
        result = true;
        break;
    }

    trace!("nullable({}) = {}", nt, result);
    nullable.insert(nt.clone(), result);
    marks.insert(nt.clone(), Mark::Done);
    Ok(result)
}

pub(crate) fn first_sets(grammar: &Grammar,
                         nullable: &BTreeMap<Symbol, bool>) -> Result<BTreeMap<Symbol, SymbolSet>, Error> {
    let mut first = BTreeMap::new();
    let mut visited = BTreeSet::new();
    for nt in grammar.nonterminals() {
        visit_first(grammar, nullable, nt, &mut visited, &mut first)?;
    }
    Ok(first)
}

fn visit_first(grammar: &Grammar,
               nullable: &BTreeMap<Symbol, bool>,
               nt: &Symbol,
               visited: &mut BTreeSet<Symbol>,
               first: &mut BTreeMap<Symbol, SymbolSet>) -> Result<(), Error> {
    if !visited.insert(nt.clone()) {
        return Ok(());
    }

    let mut set = SymbolSet::new();
    if is_nullable(nullable, nt) {
        set.insert(Symbol::epsilon());
    }
    for production in grammar.productions(nt) {
        for sym in production.symbols() {
            match grammar.kind(sym)? {
                SymbolKind::Terminal if sym.is_epsilon() => continue,
                SymbolKind::Terminal => {
                    set.insert(sym.clone());
                    break;
                }
                SymbolKind::Nonterminal => {
                    visit_first(grammar, nullable, sym, visited, first)?;
                    if let Some(inner) = first.get(sym) {
                        set.extend(inner.iter().filter(|t| !t.is_epsilon()).cloned());
                    }
                    if !is_nullable(nullable, sym) {
                        break;
                    }
                }
            }
        }
    }
    first.insert(nt.clone(), set);
    Ok(())
}

fn sequence_first(grammar: &Grammar,
                  nullable: &BTreeMap<Symbol, bool>,
                  first: &BTreeMap<Symbol, SymbolSet>,
                  symbols: &[Symbol]) -> Result<SymbolSet, Error> {
    let mut set = SymbolSet::new();
    for sym in symbols {
        match grammar.kind(sym)? {
            SymbolKind::Terminal if sym.is_epsilon() => continue,
            SymbolKind::Terminal => {
                set.insert(sym.clone());
                return Ok(set);
            }
            SymbolKind::Nonterminal => {
                if let Some(inner) = first.get(sym) {
                    set.extend(inner.iter().filter(|t| !t.is_epsilon()).cloned());
                }
                if !is_nullable(nullable, sym) {
                    return Ok(set);
                }
            }
        }
    }
    set.insert(Symbol::epsilon());
    Ok(set)
}

pub(crate) fn follow_sets(grammar: &Grammar,
                          nullable: &BTreeMap<Symbol, bool>,
                          first: &BTreeMap<Symbol, SymbolSet>) -> Result<BTreeMap<Symbol, SymbolSet>, Error> {
    let mut follow: BTreeMap<Symbol, SymbolSet> =
        grammar.nonterminals().map(|nt| (nt.clone(), SymbolSet::new())).collect();
    // X -> V: everything that follows V also follows X.
    let mut dependencies: Graph<Symbol> =
        grammar.nonterminals().map(|nt| (nt.clone(), BTreeSet::new())).collect();

    for (owner, productions) in grammar.rules() {
        for production in productions {
            let symbols = production.symbols();
            for (i, sym) in symbols.iter().enumerate() {
                if grammar.kind(sym)? == SymbolKind::Terminal {
                    continue;
                }
                let mut rest = sequence_first(grammar, nullable, first, &symbols[i + 1..])?;
                let rest_nullable = rest.remove(&Symbol::epsilon());
                follow.entry(sym.clone()).or_default().extend(rest);
                if rest_nullable {
                    dependencies.entry(sym.clone()).or_default().insert(owner.clone());
                }
            }
        }
    }

    let condensed = graph::condense(&dependencies);
    let empty = BTreeSet::new();
    for c in condensed.topological_order() {
        let members = &condensed.components()[c].nodes;
        let mut merged = SymbolSet::new();
        for member in members {
            merged.extend(follow.get(member).into_iter().flatten().cloned());
            for dep in dependencies.get(member).unwrap_or(&empty) {
                merged.extend(follow.get(dep).into_iter().flatten().cloned());
            }
        }
        merged.remove(&Symbol::epsilon());
        for member in members {
            follow.insert(member.clone(), merged.clone());
        }
    }
    Ok(follow)
}

#[cfg(test)]
#[path = "tests/analysis.rs"]
mod tests_for_analysis;
