/*
    This module stores context-free grammars over single-character symbols
*/

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use crate::error_handling::ErrorType;

// Every terminal and non-terminal is a single character
pub type Symbol = char;

// Preferred spelling of the augmented start symbol
const AUGMENTED_SYMBOL: Symbol = '#';

#[derive(Debug, PartialEq, Clone)]
pub enum GrammarError {
    // A rule was given nothing to the right of the separator
    EmptyBody(Symbol),
    // A rule was added once the start rule already closed the grammar
    RuleAfterStart(Symbol),
    // `set_start` was called a second time
    StartAlreadySet,
    // Recognition or sampling was attempted before `set_start`
    StartNotSet,
}

impl ErrorType for GrammarError {}

impl Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::EmptyBody(lhs) => write!(f, "Rule for `{}` has an empty body", lhs),
            GrammarError::RuleAfterStart(lhs) => write!(f, "Rule for `{}` was added after the start symbol", lhs),
            GrammarError::StartAlreadySet => write!(f, "The start symbol was already set"),
            GrammarError::StartNotSet => write!(f, "No start symbol has been set"),
        }
    }
}

pub type Result<T> = std::result::Result<T, GrammarError>;

#[derive(Debug, PartialEq, Clone)]
pub struct Rule {
    pub lhs: Symbol,
    pub body: Vec<Symbol>,
}

impl Rule {
    pub fn len(&self) -> usize {
        self.body.len()
    }
}

/// A grammar whose rules live in one arena and are identified by index.
///
/// Rules are appended with [`Grammar::add_rule`] and the grammar is closed by
/// [`Grammar::set_start`], which synthesizes the augmented rule `# -> S`.
/// After that the grammar is only read.
#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    rules: Vec<Rule>,
    terminals: HashSet<Symbol>,
    non_terminals: HashSet<Symbol>,
    by_lhs: HashMap<Symbol, Vec<usize>>,
    start_rule: Option<usize>,
}

impl Grammar {
    pub fn new(terminals: HashSet<Symbol>, non_terminals: HashSet<Symbol>) -> Self {
        Grammar {
            rules: Vec::new(),
            terminals,
            non_terminals,
            by_lhs: HashMap::new(),
            start_rule: None,
        }
    }

    /// Appends `lhs -> body` and returns its index. Duplicate rules are fine.
    pub fn add_rule(&mut self, lhs: Symbol, body: impl IntoIterator<Item = Symbol>) -> Result<usize> {
        if self.start_rule.is_some() {
            return Err(GrammarError::RuleAfterStart(lhs));
        }

        let body: Vec<Symbol> = body.into_iter().collect();
        if body.is_empty() {
            return Err(GrammarError::EmptyBody(lhs));
        }

        Ok(self.push_rule(Rule { lhs, body }))
    }

    /// Wraps `start` in a fresh augmented rule and closes the grammar.
    pub fn set_start(&mut self, start: Symbol) -> Result<usize> {
        if self.start_rule.is_some() {
            return Err(GrammarError::StartAlreadySet);
        }

        let augmented = self.fresh_symbol();
        self.non_terminals.insert(augmented);
        let index = self.push_rule(Rule { lhs: augmented, body: vec![start] });
        self.start_rule = Some(index);

        Ok(index)
    }

    fn push_rule(&mut self, rule: Rule) -> usize {
        let index = self.rules.len();
        self.by_lhs.entry(rule.lhs).or_default().push(index);
        self.rules.push(rule);
        index
    }

    // The augmented symbol must not collide with anything the user declared
    fn fresh_symbol(&self) -> Symbol {
        let declared = |c: &Symbol| self.terminals.contains(c) || self.non_terminals.contains(c);

        std::iter::once(AUGMENTED_SYMBOL)
            .chain('\u{E000}'..='\u{F8FF}')
            .find(|c| !declared(c))
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    pub fn start_rule_index(&self) -> Result<usize> {
        self.start_rule.ok_or(GrammarError::StartNotSet)
    }

    /// The user's declared start symbol, i.e. the body of the augmented rule
    pub fn start_symbol(&self) -> Result<Symbol> {
        let index = self.start_rule_index()?;
        Ok(self.rules[index].body[0])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, index: usize) -> &Rule {
        &self.rules[index]
    }

    /// Indices of every rule whose left-hand side is `lhs`, in insertion order
    pub fn rules_for(&self, lhs: Symbol) -> &[usize] {
        self.by_lhs.get(&lhs).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The body symbol right of the dot. Only valid while `dot < body.len()`.
    pub fn rule_body_symbol_at(&self, rule_index: usize, dot: usize) -> Symbol {
        self.rules[rule_index].body[dot]
    }

    pub fn is_terminal(&self, symbol: Symbol) -> bool {
        self.terminals.contains(&symbol)
    }

    pub fn is_non_terminal(&self, symbol: Symbol) -> bool {
        self.non_terminals.contains(&symbol)
    }
}
