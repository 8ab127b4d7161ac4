use lexicon_reader::{LexiconError, WordList};
use log::LevelFilter;
use std::env;
use std::fs;

/// Installs `env_logger`, letting `RUST_LOG` override the level chosen by `--debug`.
fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_target(false);

    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.init();
}

fn load(path: &str) -> Result<WordList, LexiconError> {
    let bytes = fs::read(path)?;
    WordList::from_bytes(&bytes)
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-lexicon> [--debug] [--check WORD]...", args[0]);
        std::process::exit(1);
    }

    let path = &args[1];
    let mut debug_enabled = false;
    let mut checks: Vec<&str> = Vec::new();
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--debug" => debug_enabled = true,
            "--check" => match rest.next() {
                Some(word) => checks.push(word),
                None => {
                    eprintln!("ERROR: --check flag requires an argument.");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("ERROR: Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
    }

    init_logger(debug_enabled);

    println!("Reading lexicon: {}", path);
    println!("{}", "=".repeat(60));

    let list = match load(path) {
        Ok(list) => list,
        Err(e) => {
            eprintln!("\nERROR: Failed to load lexicon");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("\nLexicon Information:");
    println!("  Name: {}", list.name());
    if let Some(desc) = list.description() {
        println!("  Description: {}", desc);
    }

    println!("\nStatistics:");
    println!("  Macros: {}", list.macros().len());
    println!("  Instructions: {}", list.program().len());
    println!("  Words: {} ({} distinct)", list.len(), list.distinct_len());

    println!("\nSample Words (first 10):");
    for (i, word) in list.iter().take(10).enumerate() {
        println!("  {}. {}", i + 1, word);
    }
    if list.len() > 10 {
        println!("  ... and {} more", list.len() - 10);
    }

    if !checks.is_empty() {
        println!("\nMembership:");
        for word in checks {
            let verdict = if list.has(word) { "yes" } else { "no" };
            println!("  {}: {}", word, verdict);
        }
    }
}
