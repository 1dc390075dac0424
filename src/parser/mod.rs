/*
    This module reads a recognition session: alphabets, rules, start symbol, words
*/

mod lexer;

use std::collections::HashSet;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error_handling::*;
use crate::grammar::{Grammar, GrammarError, Symbol};
use lexer::*;

#[derive(Debug)]
pub enum InputErrorType {
    // The input ended while a token was still expected
    MissingToken(&'static str),
    // A count was not a non-negative integer
    InvalidCount(String),
    // A rule token is too short to hold a symbol and the separator
    MalformedRule(String),
    // The start token is not a single symbol
    MalformedStart(String),
    // The input ended before the announced number of words (1-based)
    MissingWord(usize),
    // The grammar refused a rule or the start symbol
    Grammar(GrammarError),
    // There was an issue reading the input or writing a prompt
    FileError(std::io::Error),
}

impl ErrorType for InputErrorType {}

impl PartialEq for InputErrorType {
    fn eq(&self, other: &Self) -> bool {
        use InputErrorType::*;

        match (self, other) {
            (MissingToken(a), MissingToken(b)) => a == b,
            (InvalidCount(a), InvalidCount(b)) => a == b,
            (MalformedRule(a), MalformedRule(b)) => a == b,
            (MalformedStart(a), MalformedStart(b)) => a == b,
            (MissingWord(a), MissingWord(b)) => a == b,
            (Grammar(a), Grammar(b)) => a == b,
            (FileError(a), FileError(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

impl Display for InputErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputErrorType::MissingToken(what) => write!(f, "Input ended while expecting the {}", what),
            InputErrorType::InvalidCount(token) => write!(f, "Expected a count, found `{}`", token),
            InputErrorType::MalformedRule(token) => write!(f, "`{}` is not a rule (expected a symbol, a two character separator and a body)", token),
            InputErrorType::MalformedStart(token) => write!(f, "`{}` is not a single start symbol", token),
            InputErrorType::MissingWord(index) => write!(f, "Input ended before word {}", index),
            InputErrorType::Grammar(e) => write!(f, "{}", e),
            InputErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type InputError = Error<InputErrorType>;
pub type InputErrors = Errors<InputErrorType>;

pub type Result<T> = std::result::Result<T, InputErrorType>;
pub type LineResult<T> = std::result::Result<T, InputError>;
pub type SessionResult<T> = std::result::Result<T, InputErrors>;

/// A session read section by section, with a prompt written before each one.
pub struct Session<R, P> {
    reader: InputReader<R>,
    source: PathBuf,
    prompts: P,
}

impl<R: BufRead, P: Write> Session<R, P> {
    pub fn new(input: R, source: PathBuf, prompts: P) -> Self {
        Session {
            reader: InputReader::new(input),
            source,
            prompts,
        }
    }

    fn error_at(&self, line: usize, error: InputErrorType) -> InputError {
        InputError {
            location: Location::at(&self.source, line),
            error
        }
    }

    fn error_here(&self, error: InputErrorType) -> InputError {
        self.error_at(self.reader.line(), error)
    }

    fn prompt(&mut self, text: &str) -> LineResult<()> {
        self.prompts.write_all(text.as_bytes())
            .and_then(|_| self.prompts.flush())
            .map_err(|e| self.error_here(InputErrorType::FileError(e)))
    }

    fn token(&mut self, what: &'static str) -> LineResult<(usize, String)> {
        match self.reader.next_token() {
            Ok(Some(token)) => Ok(token),
            Ok(None) => Err(self.error_here(InputErrorType::MissingToken(what))),
            Err(e) => Err(self.error_here(InputErrorType::FileError(e))),
        }
    }

    fn count(&mut self, what: &'static str) -> LineResult<usize> {
        let (line, token) = self.token(what)?;
        token.parse().map_err(|_| self.error_at(line, InputErrorType::InvalidCount(token)))
    }

    fn alphabet(&mut self, what: &'static str) -> LineResult<HashSet<Symbol>> {
        Ok(self.token(what)?.1.chars().collect())
    }

    /// Reads everything up to and including the start symbol.
    ///
    /// Malformed rules do not stop the reader; every one of them is reported.
    pub fn read_grammar(&mut self) -> SessionResult<Grammar> {
        self.prompt("Insert amount of not-term symbols, amount of term-symbols and amount of rules in your grammar:\n")
            .map_err(|e| vec![e])?;
        // The alphabet sizes are implied by the alphabets themselves
        let _non_terminal_count = self.count("non-terminal count").map_err(|e| vec![e])?;
        let _terminal_count = self.count("terminal count").map_err(|e| vec![e])?;
        let rule_count = self.count("rule count").map_err(|e| vec![e])?;

        self.prompt("Insert non-terminal symbols:\n").map_err(|e| vec![e])?;
        let non_terminals = self.alphabet("non-terminal symbols").map_err(|e| vec![e])?;
        self.prompt("Insert terminal symbols:\n").map_err(|e| vec![e])?;
        let terminals = self.alphabet("terminal symbols").map_err(|e| vec![e])?;

        self.prompt("Insert your grammar:\n").map_err(|e| vec![e])?;
        let mut grammar = Grammar::new(terminals, non_terminals);
        let mut errors = InputErrors::new();

        for _ in 0..rule_count {
            let (line, token) = match self.token("rule") {
                Ok(token) => token,
                Err(e) => {
                    errors.push(e);
                    return Err(errors);
                }
            };

            let added = lex_rule(&token)
                .and_then(|(lhs, body)| grammar.add_rule(lhs, body).map_err(InputErrorType::Grammar));
            if let Err(error) = added {
                errors.push(self.error_at(line, error));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        self.prompt("Insert start rule:\n").map_err(|e| vec![e])?;
        self.read_start(&mut grammar).map_err(|e| vec![e])?;

        Ok(grammar)
    }

    fn read_start(&mut self, grammar: &mut Grammar) -> LineResult<()> {
        let (line, token) = self.token("start symbol")?;
        lex_start(&token)
            .and_then(|start| grammar.set_start(start).map_err(InputErrorType::Grammar))
            .map(|_| ())
            .map_err(|e| self.error_at(line, e))
    }

    /// Reads the word count; the words start on the following line.
    pub fn read_word_count(&mut self) -> LineResult<usize> {
        self.prompt("Insert amount of words:\n")?;
        let count = self.count("word count")?;
        self.reader.finish_line();
        self.prompt("Insert your words:\n")?;
        Ok(count)
    }

    fn read_word(&mut self, index: usize) -> LineResult<String> {
        match self.reader.next_line() {
            Ok(Some((_, word))) => Ok(word),
            Ok(None) => Err(self.error_here(InputErrorType::MissingWord(index + 1))),
            Err(e) => Err(self.error_here(InputErrorType::FileError(e))),
        }
    }

    /// The next `count` lines, verbatim. An empty line is the empty word.
    pub fn words(&mut self, count: usize) -> impl Iterator<Item = LineResult<String>> + '_ {
        (0..count).map(move |index| self.read_word(index))
    }
}
