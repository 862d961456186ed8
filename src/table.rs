//! The predictive parse table: for a nonterminal on top of the frontier and
//! the next input symbol, the one alternative to expand it with.

use crate::analysis::Analysis;
use crate::grammar::{Grammar, Production, Symbol};
use crate::Error;

use linear_map::LinearMap;
use log::{debug, trace};

#[derive(Clone, Debug, Default)]
pub struct Table {
    // rows in grammar order; cells in the order they were claimed.
    pub(crate) rows: LinearMap<Symbol, LinearMap<Symbol, Production>>,
}

impl Table {
    /// Fails with `GrammarConflict` when two alternatives of one nonterminal
    /// compete for the same cell, i.e. when the grammar is not LL(1).
    pub fn build(grammar: &Grammar, analysis: &Analysis) -> Result<Self, Error> {
        let mut table = Table::default();
        let end = Symbol::end_of_input();
        for (nt, alternatives) in grammar.rules() {
            let mut row = Row { nonterminal: nt, alternatives, cells: LinearMap::new(), claims: LinearMap::new() };
            for (alt, production) in alternatives.iter().enumerate() {
                let first = analysis.first_of(grammar, production.symbols())?;
                for t in first.iter().filter(|t| !t.is_epsilon()) {
                    row.claim(t, alt, production)?;
                }
                if first.contains(&Symbol::epsilon()) {
                    for t in analysis.follow(nt).into_iter().flatten() {
                        // `$` was already claimed through FIRST above.
                        if *t == end && first.contains(&end) {
                            continue;
                        }
                        row.claim(t, alt, &Production::epsilon())?;
                    }
                }
            }
            table.rows.insert(nt.clone(), row.cells);
        }
        debug!("table has {} cells", table.len());
        Ok(table)
    }

    pub fn get(&self, nonterminal: &Symbol, terminal: &Symbol) -> Option<&Production> {
        self.rows.get(nonterminal)?.get(terminal)
    }

    pub fn row(&self, nonterminal: &Symbol) -> Option<&LinearMap<Symbol, Production>> {
        self.rows.get(nonterminal)
    }

    pub fn len(&self) -> usize { self.rows.values().map(|row| row.len()).sum() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

struct Row<'g> {
    nonterminal: &'g Symbol,
    alternatives: &'g [Production],
    cells: LinearMap<Symbol, Production>,
    // which alternative claimed each cell
    claims: LinearMap<Symbol, usize>,
}

impl<'g> Row<'g> {
    fn claim(&mut self, terminal: &Symbol, alt: usize, production: &Production) -> Result<(), Error> {
        match self.claims.get(terminal) {
            Some(&prior) if prior == alt => Ok(()),
            Some(&prior) => Err(Error::GrammarConflict {
                nonterminal: self.nonterminal.clone(),
                terminal: terminal.clone(),
                existing: self.alternatives[prior].clone(),
                proposed: self.alternatives[alt].clone(),
            }),
            None => {
                trace!("table[{}][{}] = {}", self.nonterminal, terminal, production);
                self.claims.insert(terminal.clone(), alt);
                self.cells.insert(terminal.clone(), production.clone());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/table.rs"]
mod tests_for_table;
