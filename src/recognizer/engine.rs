/*
    The Predict, Scan and Complete rules and the loop that closes each column
*/

use super::{Chart, IdentityMode, Item};
use crate::grammar::{Grammar, Symbol};

pub struct Engine<'g> {
    grammar: &'g Grammar,
    mode: IdentityMode,
}

impl<'g> Engine<'g> {
    pub fn new(grammar: &'g Grammar, mode: IdentityMode) -> Self {
        Engine { grammar, mode }
    }

    /// Processes every column in order until each one is quiescent.
    pub fn run(&self, chart: &mut Chart, word: &[Symbol]) {
        for position in 0..chart.len() {
            self.close_column(chart, word, position);
        }
    }

    // Dispatches the frontier one generation at a time, settling the whole
    // generation afterwards, until nothing new shows up at `position`.
    pub fn close_column(&self, chart: &mut Chart, word: &[Symbol], position: usize) {
        loop {
            let generation = chart.frontier_snapshot(position);
            if generation.is_empty() {
                break;
            }

            for item in &generation {
                match item.next_symbol(self.grammar) {
                    None => self.complete_item(chart, position, item),
                    Some(symbol) if self.grammar.is_non_terminal(symbol) => {
                        self.predict_item(chart, position, item, symbol)
                    }
                    Some(symbol) => self.scan_item(chart, word, position, item, symbol),
                }
            }

            chart.settle(position, &generation);
        }
    }

    pub fn predict_item(&self, chart: &mut Chart, position: usize, item: &Item, symbol: Symbol) {
        for &rule in self.grammar.rules_for(symbol) {
            let predicted = Item::new(rule, 0, position).derived_from(item, self.mode);
            chart.enqueue(position, predicted);
        }
    }

    // A mismatch simply ends this derivation path
    pub fn scan_item(&self, chart: &mut Chart, word: &[Symbol], position: usize, item: &Item, symbol: Symbol) {
        if word.get(position) == Some(&symbol) {
            let scanned = item.advance().derived_from(item, self.mode);
            chart.enqueue_fresh(position + 1, scanned);
        }
    }

    pub fn complete_item(&self, chart: &mut Chart, position: usize, item: &Item) {
        let lhs = self.grammar.rule(item.rule).lhs;

        let advanced: Vec<Item> = chart.waiting_on(self.grammar, item.origin, lhs)
            .into_iter()
            .map(|waiter| waiter.advance().derived_from(item, self.mode))
            .collect();

        for new_item in advanced {
            chart.enqueue(position, new_item);
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::grammar::tests::grammar;

    fn word(text: &str) -> Vec<Symbol> {
        text.chars().collect()
    }

    #[test]
    fn predict_adds_every_rule_for_the_symbol() {
        let g = grammar("ST", "ab", &[('S', "T"), ('T', "a"), ('T', "b"), ('S', "a")], 'S');
        let engine = Engine::new(&g, IdentityMode::Canonical);
        let mut chart = Chart::new(0);

        engine.predict_item(&mut chart, 0, &Item::new(0, 0, 0), 'T');

        let pending = chart.column(0).frontier.iter().copied().sorted().collect_vec();
        assert_eq!(pending, vec![Item::new(1, 0, 0), Item::new(2, 0, 0)]);
    }

    #[test]
    fn predict_skips_settled_items() {
        let g = grammar("S", "a", &[('S', "a")], 'S');
        let engine = Engine::new(&g, IdentityMode::Canonical);
        let mut chart = Chart::new(0);

        chart.enqueue(0, Item::new(0, 0, 0));
        chart.settle(0, &[Item::new(0, 0, 0)]);
        engine.predict_item(&mut chart, 0, &Item::new(1, 0, 0), 'S');

        assert!(chart.column(0).frontier.is_empty());
    }

    #[test]
    fn scan_advances_into_next_column_only_on_match() {
        let g = grammar("S", "ab", &[('S', "ab")], 'S');
        let engine = Engine::new(&g, IdentityMode::Canonical);
        let mut chart = Chart::new(2);
        let item = Item::new(0, 0, 0);

        engine.scan_item(&mut chart, &word("ba"), 0, &item, 'a');
        assert!(chart.column(1).frontier.is_empty());

        engine.scan_item(&mut chart, &word("ab"), 0, &item, 'a');
        assert!(chart.column(1).frontier.contains(&Item::new(0, 1, 0)));
    }

    #[test]
    fn scan_past_the_end_does_nothing() {
        let g = grammar("S", "a", &[('S', "a")], 'S');
        let engine = Engine::new(&g, IdentityMode::Canonical);
        let mut chart = Chart::new(0);

        engine.scan_item(&mut chart, &word(""), 0, &Item::new(0, 0, 0), 'a');
        assert!(chart.column(0).frontier.is_empty());
    }

    #[test]
    fn complete_advances_waiters_at_origin() {
        // 0: S -> aT, 1: T -> b
        let g = grammar("ST", "ab", &[('S', "aT"), ('T', "b")], 'S');
        let engine = Engine::new(&g, IdentityMode::Canonical);
        let mut chart = Chart::new(2);

        let waiter = Item::new(0, 1, 0);
        chart.enqueue(1, waiter);
        chart.settle(1, &[waiter]);

        engine.complete_item(&mut chart, 2, &Item::new(1, 1, 1));
        assert!(chart.column(2).frontier.contains(&Item::new(0, 2, 0)));
    }

    #[test]
    fn closed_columns_are_a_fixpoint() {
        let g = grammar("SE", "+n", &[('S', "E"), ('E', "E+E"), ('E', "n")], 'S');
        let engine = Engine::new(&g, IdentityMode::Canonical);
        let input = word("n+n+n");
        let mut chart = Chart::new(input.len());
        chart.enqueue(0, Item::new(g.start_rule_index().unwrap(), 0, 0));

        engine.run(&mut chart, &input);
        let before = chart.render(&g);

        for position in 0..chart.len() {
            for item in chart.column(position).settled.clone() {
                chart.enqueue(position, item);
            }
            engine.close_column(&mut chart, &input, position);
            assert!(chart.column(position).frontier.is_empty());
        }

        assert_eq!(chart.render(&g), before);
    }
}
