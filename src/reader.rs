//! Reads grammars from their textual form:
//!
//! ```text
//! +, *, i, (, )
//! S -> E
//! E -> TQ
//! Q -> +TQ | ε
//! ```
//!
//! The first line declares the terminals, separated by commas. Every other
//! non-blank line defines one nonterminal: a single character, `->`, and
//! alternatives separated by `|`, each character of an alternative being
//! one symbol. Alternatives are kept as written; `Grammar::new` adds the `$`
//! that ends those of `S`.
//!
//! Reading never fails on malformed lines; they are skipped (or repaired) and
//! reported as warnings.

use crate::grammar::{GrammarInfo, Production, Symbol};
use crate::Error;

use std::path::Path;

use log::warn;
use regex::Regex;

#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum Warning {
    #[error("line {line}: terminal `{token}` is not a single character")]
    MalformedTerminalDeclaration { line: usize, token: String },
    #[error("line {line}: no `->` separating nonterminal and alternatives")]
    MalformedProduction { line: usize },
    #[error("line {line}: nonterminal `{lhs}` is not a single character")]
    MalformedNonterminal { line: usize, lhs: String },
    #[error("line {line}: nonterminal `{nonterminal}` is defined again, replacing the earlier definition")]
    DuplicateNonterminalDefinition { line: usize, nonterminal: Symbol },
    #[error("line {line}: alternative {alternative} is empty, write `ε` for the empty string")]
    EmptyAlternative { line: usize, alternative: usize },
}

#[derive(Clone, Debug)]
pub struct Ingested {
    pub grammar: GrammarInfo,
    pub warnings: Vec<Warning>,
}

pub struct Reader {
    separator: Regex,
    production: Regex,
}

impl Reader {
    pub fn new() -> Result<Self, Error> {
        Ok(Reader {
            separator: Regex::new(r"\s*,\s*")?,
            production: Regex::new(r"^(?P<lhs>.*?)->(?P<rhs>.*)$")?,
        })
    }

    pub fn read(&self, text: &str) -> Ingested {
        let mut grammar = GrammarInfo::new();
        let mut warnings = Vec::new();
        let mut report = |w: Warning| {
            warn!("{}", w);
            warnings.push(w);
        };

        let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));
        if let Some((line, declaration)) = lines.next() {
            for token in self.separator.split(declaration.trim()) {
                match single_char(token) {
                    Some(c) => { grammar.terminals.insert(c.into()); }
                    None => report(Warning::MalformedTerminalDeclaration { line, token: token.to_string() }),
                }
            }
        }

        for (line, text) in lines {
            if text.trim().is_empty() {
                continue;
            }
            let Some(captures) = self.production.captures(text) else {
                report(Warning::MalformedProduction { line });
                continue;
            };
            let lhs = captures["lhs"].trim();
            let Some(nonterminal) = single_char(lhs).map(Symbol::from) else {
                report(Warning::MalformedNonterminal { line, lhs: lhs.to_string() });
                continue;
            };
            if grammar.productions.contains_key(&nonterminal) {
                report(Warning::DuplicateNonterminalDefinition { line, nonterminal: nonterminal.clone() });
            }

            let mut alternatives = Vec::new();
            for (alternative, alt) in captures["rhs"].split('|').enumerate() {
                let alt = alt.trim();
                if alt.is_empty() {
                    report(Warning::EmptyAlternative { line, alternative });
                    continue;
                }
                alternatives.push(Production::from(alt));
            }
            grammar.define(nonterminal, alternatives);
        }

        Ingested { grammar, warnings }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

pub fn read_grammar(text: &str) -> Result<Ingested, Error> {
    Ok(Reader::new()?.read(text))
}

pub fn load_grammar(path: impl AsRef<Path>) -> Result<Ingested, Error> {
    let text = fs_err::read_to_string(path.as_ref())?;
    read_grammar(&text)
}

#[cfg(test)]
#[path = "tests/reader.rs"]
mod tests_for_reader;
