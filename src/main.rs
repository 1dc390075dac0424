mod cli;
mod error_handling;
mod generator;
mod grammar;
mod parser;
mod recognizer;

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::prelude::*;

use cli::Cli;
use error_handling::Location;
use grammar::Grammar;
use parser::{InputError, InputErrorType, Session};
use recognizer::{IdentityMode, Recognizer};

fn report(errors: impl IntoIterator<Item = impl Display>) -> ExitCode {
    for error in errors {
        eprintln!("{}", error);
    }
    ExitCode::FAILURE
}

fn sample(grammar: &Grammar, amount: u32, seed: Option<u64>, max_depth: usize) -> ExitCode {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for _ in 0..amount {
        match generator::generate(grammar, &mut rng, max_depth) {
            Ok(word) => println!("{}", word),
            Err(error) => return report([error]),
        }
    }

    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = cli.input.clone().unwrap_or_else(|| PathBuf::from("<stdin>"));
    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => return report([InputError {
                location: Location::at(path, 0),
                error: InputErrorType::FileError(e)
            }]),
        },
        None => Box::new(io::stdin().lock()),
    };

    // Prompts only make sense when someone is typing
    let prompts: Box<dyn Write> = if cli.quiet || cli.input.is_some() {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };

    let mut session = Session::new(input, source, prompts);
    let grammar = match session.read_grammar() {
        Ok(grammar) => grammar,
        Err(errors) => return report(errors),
    };

    if let Some(amount) = cli.sample {
        return sample(&grammar, amount, cli.seed, cli.max_depth);
    }

    let mode = if cli.provenance_identity {
        IdentityMode::Provenance
    } else {
        IdentityMode::Canonical
    };
    let recognizer = match Recognizer::new(&grammar) {
        Ok(recognizer) => recognizer.with_identity(mode),
        Err(error) => return report([error]),
    };

    let count = match session.read_word_count() {
        Ok(count) => count,
        Err(error) => return report([error]),
    };

    for word in session.words(count) {
        let word = match word {
            Ok(word) => word,
            Err(error) => return report([error]),
        };

        if cli.trace {
            eprintln!("--- {:?}\n{}", word, recognizer.chart(&word).render(&grammar));
        }

        println!("{}", if recognizer.recognize(&word) { "Yes" } else { "No" });
    }

    ExitCode::SUCCESS
}
