use std::fmt::Write;

use crate::grammar::{Grammar, Symbol};

// Which fields take part in item equality
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum IdentityMode {
    // (rule, dot, origin)
    #[default]
    Canonical,
    // (rule, dot, origin) plus the item that produced it
    Provenance,
}

// The (rule, dot, origin) of the item a new item was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Provenance {
    pub rule: usize,
    pub dot: usize,
    pub origin: usize,
}

/// One Earley item: `rule` matched up to `dot`, starting at input position `origin`.
///
/// `parent` is only ever filled in under [`IdentityMode::Provenance`]; with the
/// canonical mode it stays `None` so the derived `Eq`/`Hash` see exactly the
/// triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
    pub rule: usize,
    pub dot: usize,
    pub origin: usize,
    pub parent: Option<Provenance>,
}

impl Item {
    pub fn new(rule: usize, dot: usize, origin: usize) -> Self {
        Item {
            rule,
            dot,
            origin,
            parent: None,
        }
    }

    pub fn is_complete(&self, grammar: &Grammar) -> bool {
        self.dot == grammar.rule(self.rule).len()
    }

    pub fn next_symbol(&self, grammar: &Grammar) -> Option<Symbol> {
        if self.is_complete(grammar) {
            None
        } else {
            Some(grammar.rule_body_symbol_at(self.rule, self.dot))
        }
    }

    pub fn advance(&self) -> Self {
        Item {
            dot: self.dot + 1,
            ..*self
        }
    }

    pub fn as_provenance(&self) -> Provenance {
        Provenance {
            rule: self.rule,
            dot: self.dot,
            origin: self.origin,
        }
    }

    // Records `parent` as the producer when the mode asks for it
    pub fn derived_from(self, parent: &Item, mode: IdentityMode) -> Self {
        match mode {
            IdentityMode::Canonical => self,
            IdentityMode::Provenance => Item {
                parent: Some(parent.as_provenance()),
                ..self
            },
        }
    }

    /// Dotted-rule notation, e.g. `S -> a • S b (0)`
    pub fn render(&self, grammar: &Grammar) -> String {
        let rule = grammar.rule(self.rule);
        let mut out = format!("{} ->", rule.lhs);

        for (index, symbol) in rule.body.iter().enumerate() {
            if self.dot == index {
                out.push_str(" •");
            }
            let _ = write!(out, " {}", symbol);
        }

        if self.is_complete(grammar) {
            out.push_str(" •");
        }

        let _ = write!(out, " ({})", self.origin);
        out
    }
}
