/*
    This module decides whether a word belongs to a grammar's language
*/

mod chart;
mod engine;
mod item;

pub use chart::*;
pub use engine::*;
pub use item::*;

use crate::grammar::{Grammar, Result, Symbol};

/// Earley recognizer over a closed [`Grammar`].
///
/// Holds no chart of its own: every call to [`Recognizer::recognize`] builds
/// and drops a fresh one, so a recognizer can be shared between threads.
pub struct Recognizer<'g> {
    grammar: &'g Grammar,
    start_rule: usize,
    mode: IdentityMode,
}

impl<'g> Recognizer<'g> {
    /// Fails with `StartNotSet` when the grammar was never closed.
    pub fn new(grammar: &'g Grammar) -> Result<Self> {
        Ok(Recognizer {
            grammar,
            start_rule: grammar.start_rule_index()?,
            mode: IdentityMode::default(),
        })
    }

    pub fn with_identity(mut self, mode: IdentityMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn recognize(&self, word: &str) -> bool {
        let word: Vec<Symbol> = word.chars().collect();

        // A character outside the terminal alphabet can never be scanned
        if !word.iter().all(|&c| self.grammar.is_terminal(c)) {
            return false;
        }

        self.close(&word).accepts(self.start_rule)
    }

    /// The fully closed chart for `word`, without the alphabet shortcut
    pub fn chart(&self, word: &str) -> Chart {
        let word: Vec<Symbol> = word.chars().collect();
        self.close(&word)
    }

    fn close(&self, word: &[Symbol]) -> Chart {
        let mut chart = Chart::new(word.len());
        chart.enqueue(0, Item::new(self.start_rule, 0, 0));

        Engine::new(self.grammar, self.mode).run(&mut chart, word);
        chart
    }
}
