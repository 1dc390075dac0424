use std::collections::VecDeque;
use std::io::BufRead;

use itertools::Itertools;

use super::{InputErrorType, Result};
use crate::grammar::Symbol;

// Reads a session either as whitespace separated tokens or as whole lines,
// keeping track of the 1-based line everything came from.
pub struct InputReader<R> {
    input: R,
    line: usize,
    pending: VecDeque<(usize, String)>,
}

impl<R: BufRead> InputReader<R> {
    pub fn new(input: R) -> Self {
        InputReader {
            input,
            line: 0,
            pending: VecDeque::new(),
        }
    }

    // Line number of the last physical line read
    pub fn line(&self) -> usize {
        self.line
    }

    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        self.line += 1;

        let trimmed = buffer.trim_end_matches('\n').trim_end_matches('\r');
        Ok(Some(trimmed.to_string()))
    }

    pub fn next_token(&mut self) -> std::io::Result<Option<(usize, String)>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            match self.read_line()? {
                None => return Ok(None),
                Some(line) => {
                    let number = self.line;
                    self.pending.extend(line.split_whitespace().map(|t| (number, t.to_string())));
                }
            }
        }
    }

    // Drops whatever is left of the current line
    pub fn finish_line(&mut self) {
        self.pending.clear();
    }

    pub fn next_line(&mut self) -> std::io::Result<Option<(usize, String)>> {
        Ok(self.read_line()?.map(|text| (self.line, text)))
    }
}

// A rule token is `lhs`, a two character separator, then the body
pub fn lex_rule(token: &str) -> Result<(Symbol, Vec<Symbol>)> {
    let mut chars = token.chars();
    let (lhs, _, _) = chars
        .next_tuple()
        .ok_or_else(|| InputErrorType::MalformedRule(token.to_string()))?;

    Ok((lhs, chars.collect()))
}

pub fn lex_start(token: &str) -> Result<Symbol> {
    token.chars()
        .exactly_one()
        .map_err(|_| InputErrorType::MalformedStart(token.to_string()))
}
