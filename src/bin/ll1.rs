//! Command-line driver: reads a grammar, prints its sets and predictive
//! table, parses a word, and optionally reparses an edited word against it.
//!
//! Usage:
//!   ll1 <grammar> <old-word> [<new-word>] [--strategy simple|greedy] [--indent N] [-v...]

use clap::Parser as _;
use log::{error, info, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;

use ll1::{reader, Grammar, Parser, Rendered, Strategy};

#[derive(clap::Parser)]
#[command(name = "ll1")]
#[command(about = "LL(1) table construction and incremental reparsing")]
struct Args {
    /// Grammar file: terminals on the first line, one nonterminal per line after it
    grammar: PathBuf,
    /// Word to parse from scratch
    old_word: String,
    /// Edited word to reparse reusing the tree of the first one
    new_word: Option<String>,
    /// What to do when the nodes at the current positions differ
    #[arg(short, long, default_value_t = Strategy::Simple)]
    strategy: Strategy,
    /// Columns per level of depth when printing trees
    #[arg(long, default_value_t = 4)]
    indent: usize,
    /// More output; repeat for more (overridden by RUST_LOG)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Configure the logger.
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => { builder.parse_filters(&filters); }
        Err(_) => {
            builder.filter_level(match args.verbose {
                0 => LevelFilter::Warn,
                1 => LevelFilter::Info,
                2 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            });
        }
    }
    builder.init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ll1::Error> {
    let ingested = reader::load_grammar(&args.grammar)?;
    info!("read {} with {} warnings", args.grammar.display(), ingested.warnings.len());
    let grammar = Grammar::new(ingested.grammar);
    let parser = Parser::new(&grammar)?;

    for nt in grammar.nonterminals() {
        println!("{}: nullable {}, first {}, follow {}",
                 nt,
                 parser.analysis().nullable(nt),
                 parser.analysis().first(nt).rendered(),
                 parser.analysis().follow(nt).rendered());
    }
    println!();
    print!("{}", parser.table());
    println!();

    let old_tree = parser.build_tree(&args.old_word)?;
    print!("{}", old_tree.pretty(args.indent));

    if let Some(new_word) = &args.new_word {
        let new_tree = parser.reparse(&args.old_word, &old_tree, new_word, args.strategy)?;
        println!();
        print!("{}", new_tree.pretty(args.indent));
        let fresh = parser.build_tree(new_word)?;
        let agrees = new_tree.compact().to_string() == fresh.compact().to_string();
        println!();
        println!("agrees with a fresh parse: {}", agrees);
    }
    Ok(())
}
