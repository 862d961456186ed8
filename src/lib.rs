//! LL(1) grammar analysis, predictive parsing, and incremental reparsing.
//!
//! A grammar is read ([`reader`]), normalized ([`grammar::Grammar`]),
//! analyzed for nullable, FIRST and FOLLOW sets ([`analysis`]), and turned
//! into a predictive table ([`table`]). The [`parser::Parser`] derives parse
//! trees ([`tree`]) from words, and can rebuild the tree of an edited word by
//! reusing the unchanged parts of the old one ([`incremental`]).

pub mod analysis;
pub mod grammar;
pub mod graph;
pub mod incremental;
pub mod parser;
pub mod reader;
pub mod table;
pub mod tree;

mod display;
mod rendering;

pub use analysis::Analysis;
pub use grammar::{Grammar, GrammarInfo, Production, Symbol};
pub use incremental::Strategy;
pub use parser::Parser;
pub use rendering::Rendered;
pub use table::Table;
pub use tree::{NodeId, Tree};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("grammar is not LL(1): {nonterminal}[{terminal}] is claimed by both `{existing}` and `{proposed}`")]
    GrammarConflict { nonterminal: Symbol, terminal: Symbol, existing: Production, proposed: Production },
    #[error("word is not in the language: unexpected `{found}` at position {position}")]
    WordNotInLanguage { position: usize, found: Symbol },
    #[error("symbol `{0}` is neither a declared terminal nor a defined nonterminal")]
    UnknownSymbol(Symbol),
    #[error("could not read grammar: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad grammar pattern: {0}")]
    Pattern(#[from] regex::Error),
}
