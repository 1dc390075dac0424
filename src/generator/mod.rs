/*
    This module samples random words from a grammar's language
*/

use std::collections::HashMap;
use std::fmt::Display;

use rand::prelude::*;

use crate::error_handling::ErrorType;
use crate::grammar::{Grammar, GrammarError, Rule, Symbol};

#[derive(Debug, PartialEq)]
pub enum GenerateError {
    // The grammar was never given a start symbol
    StartNotSet,
    // No rule for the start symbol ever bottoms out in terminals
    Unproductive(Symbol),
}

impl ErrorType for GenerateError {}

impl Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::StartNotSet => write!(f, "No start symbol has been set"),
            GenerateError::Unproductive(symbol) => write!(f, "`{}` derives no finite word", symbol),
        }
    }
}

impl From<GrammarError> for GenerateError {
    fn from(_: GrammarError) -> Self {
        GenerateError::StartNotSet
    }
}

pub type GenResult = Result<String, GenerateError>;

// Height of the shortest derivation tree for every productive non-terminal.
// Symbols that are not non-terminals are leaves of height 0.
fn derivation_heights(grammar: &Grammar) -> HashMap<Symbol, usize> {
    let mut heights = HashMap::new();
    let mut changed = true;

    while changed {
        changed = false;

        for rule in grammar.rules() {
            let Some(height) = rule_height(grammar, rule, &heights) else {
                continue;
            };

            let known = heights.get(&rule.lhs).copied();
            if known.map_or(true, |k| height < k) {
                heights.insert(rule.lhs, height);
                changed = true;
            }
        }
    }

    heights
}

// None while some body symbol is not yet known to be productive
fn rule_height(grammar: &Grammar, rule: &Rule, heights: &HashMap<Symbol, usize>) -> Option<usize> {
    rule.body.iter()
        .map(|&symbol| {
            if grammar.is_non_terminal(symbol) {
                heights.get(&symbol).copied()
            } else {
                Some(0)
            }
        })
        .try_fold(0, |tallest, height| height.map(|h| tallest.max(h)))
        .map(|tallest| tallest + 1)
}

/// Generates one word of the language, expanding at most `max_depth` levels
/// deep before falling back to the shortest derivations.
pub fn generate(grammar: &Grammar, rng: &mut impl Rng, max_depth: usize) -> GenResult {
    let start = grammar.start_symbol()?;
    let heights = derivation_heights(grammar);

    let needed = *heights.get(&start).ok_or(GenerateError::Unproductive(start))?;

    let mut word = String::new();
    generate_symbol(grammar, &heights, start, max_depth.max(needed), rng, &mut word);
    Ok(word)
}

// `budget` is always at least the height of `symbol`, so some rule fits
fn generate_symbol(
    grammar: &Grammar,
    heights: &HashMap<Symbol, usize>,
    symbol: Symbol,
    budget: usize,
    rng: &mut impl Rng,
    word: &mut String,
) {
    if !grammar.is_non_terminal(symbol) {
        word.push(symbol);
        return;
    }

    let candidates: Vec<&Rule> = grammar.rules_for(symbol).iter()
        .map(|&index| grammar.rule(index))
        .filter(|rule| rule_height(grammar, rule, heights).is_some_and(|h| h <= budget))
        .collect();

    if let Some(rule) = candidates.choose(rng) {
        for &next in &rule.body {
            generate_symbol(grammar, heights, next, budget - 1, rng, word);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;

    use super::*;
    use crate::grammar::tests::{grammar, symbols};
    use crate::recognizer::Recognizer;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn heights_of_productive_symbols() {
        let g = grammar("STU", "ab", &[('S', "aSb"), ('S', "T"), ('T', "ab"), ('U', "U")], 'S');
        let heights = derivation_heights(&g);

        assert_eq!(heights.get(&'T'), Some(&1));
        assert_eq!(heights.get(&'S'), Some(&2));
        assert_eq!(heights.get(&'U'), None);
    }

    #[test]
    fn samples_are_members() {
        let grammars = vec![
            grammar("S", "ab", &[('S', "ab"), ('S', "aSb")], 'S'),
            grammar("E", "+n", &[('E', "E+E"), ('E', "n")], 'E'),
            grammar("ST", "xy", &[('S', "TS"), ('S', "T"), ('T', "x"), ('T', "yTy")], 'S'),
        ];

        let mut rng = rng();
        for g in &grammars {
            let recognizer = Recognizer::new(g).unwrap();
            for _ in 0..50 {
                let word = generate(g, &mut rng, 6).unwrap();
                assert!(recognizer.recognize(&word), "sampled {:?} was rejected", word);
            }
        }
    }

    #[test]
    fn zero_budget_still_terminates() {
        let g = grammar("S", "ab", &[('S', "aSb"), ('S', "ab")], 'S');
        let mut rng = rng();
        for _ in 0..10 {
            assert_eq!(generate(&g, &mut rng, 0), Ok("ab".to_string()));
        }
    }

    #[test]
    fn unproductive_start_is_an_error() {
        let g = grammar("S", "ab", &[('S', "aSb")], 'S');
        assert_eq!(generate(&g, &mut rng(), 8), Err(GenerateError::Unproductive('S')));
    }

    #[test]
    fn missing_start_is_an_error() {
        let mut g = Grammar::new(symbols("a"), symbols("S"));
        g.add_rule('S', "a".chars()).unwrap();
        assert_eq!(generate(&g, &mut rng(), 8), Err(GenerateError::StartNotSet));
    }
}
