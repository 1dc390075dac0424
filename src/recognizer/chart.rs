use std::collections::HashSet;

use itertools::Itertools;

use super::Item;
use crate::grammar::{Grammar, Symbol};

// Items at one input position, split into processed and pending
#[derive(Debug, Default, Clone)]
pub struct Column {
    pub settled: HashSet<Item>,
    pub frontier: HashSet<Item>,
}

/// Per-position item sets for one word. Built fresh for every word.
#[derive(Debug, Clone)]
pub struct Chart {
    columns: Vec<Column>,
}

impl Chart {
    // One column per position 0..=len
    pub fn new(len: usize) -> Self {
        Chart {
            columns: vec![Column::default(); len + 1],
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, position: usize) -> &Column {
        &self.columns[position]
    }

    /// Queues `item` at `position` unless it was already settled there
    pub fn enqueue(&mut self, position: usize, item: Item) -> bool {
        let column = &mut self.columns[position];
        if column.settled.contains(&item) {
            return false;
        }
        column.frontier.insert(item)
    }

    /// Queues `item` without looking at `settled`; used for scans into a column
    /// that has not been processed yet.
    pub fn enqueue_fresh(&mut self, position: usize, item: Item) -> bool {
        self.columns[position].frontier.insert(item)
    }

    pub fn frontier_snapshot(&self, position: usize) -> Vec<Item> {
        self.columns[position].frontier.iter().copied().collect_vec()
    }

    pub fn settle(&mut self, position: usize, items: &[Item]) {
        let column = &mut self.columns[position];
        for item in items {
            column.frontier.remove(item);
            column.settled.insert(*item);
        }
    }

    // Items at `position` (settled or pending) whose dot stands before `symbol`
    pub fn waiting_on(&self, grammar: &Grammar, position: usize, symbol: Symbol) -> Vec<Item> {
        let column = &self.columns[position];
        column.settled.iter()
            .chain(column.frontier.iter())
            .filter(|item| item.next_symbol(grammar) == Some(symbol))
            .copied()
            .collect_vec()
    }

    /// Whether the last column holds the completed augmented start item
    pub fn accepts(&self, start_rule: usize) -> bool {
        self.column(self.len() - 1).settled.iter()
            .any(|item| item.rule == start_rule && item.origin == 0 && item.dot == 1)
    }

    /// Settled items of every column in dotted-rule notation
    pub fn render(&self, grammar: &Grammar) -> String {
        let mut output = Vec::new();

        for (index, column) in self.columns.iter().enumerate() {
            output.push(format!("=== {} ===", index));
            output.extend(column.settled.iter().sorted().map(|item| item.render(grammar)));
        }

        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::tests::grammar;

    #[test]
    fn settled_items_are_not_requeued() {
        let mut chart = Chart::new(1);
        let item = Item::new(0, 0, 0);

        assert!(chart.enqueue(0, item));
        assert!(!chart.enqueue(0, item));

        chart.settle(0, &[item]);
        assert!(chart.column(0).frontier.is_empty());
        assert!(chart.column(0).settled.contains(&item));

        assert!(!chart.enqueue(0, item));
        assert!(chart.column(0).frontier.is_empty());
    }

    #[test]
    fn waiters_come_from_both_partitions() {
        let g = grammar("ST", "ab", &[('S', "aT"), ('S', "T"), ('T', "b")], 'S');
        let mut chart = Chart::new(2);

        let settled = Item::new(0, 1, 0);
        let pending = Item::new(1, 0, 0);
        chart.enqueue(0, settled);
        chart.settle(0, &[settled]);
        chart.enqueue(0, pending);
        chart.enqueue(0, Item::new(2, 0, 0));

        let waiters = chart.waiting_on(&g, 0, 'T').into_iter().sorted().collect_vec();
        assert_eq!(waiters, vec![settled, pending]);
    }

    #[test]
    fn acceptance_needs_completed_start_from_zero() {
        let g = grammar("S", "a", &[('S', "a")], 'S');
        let start = g.start_rule_index().unwrap();
        let mut chart = Chart::new(1);

        chart.enqueue_fresh(1, Item::new(start, 1, 0));
        assert!(!chart.accepts(start));

        chart.settle(1, &[Item::new(start, 1, 0)]);
        assert!(chart.accepts(start));
        assert_eq!(chart.len(), 2);
    }
}
