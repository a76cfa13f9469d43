use std::fmt;

use crate::nonterminal::NT;
use crate::symbol::Sym;

/// One element of a production's body: either a terminal or a non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BodyElem {
    Terminal(Sym),
    Nonterminal(NT),
}

impl fmt::Display for BodyElem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BodyElem::Terminal(s) => write!(f, "{}", s),
            BodyElem::Nonterminal(n) => write!(f, "{}", n),
        }
    }
}

/// A single production `head -> body`. Two productions are equal iff their
/// heads and body sequences are element-wise equal (derived `PartialEq`
/// already gives us this, since `NT`/`Sym` equality is by name).
///
/// `S -> ε` is represented with `body == [Terminal(Sym::epsilon())]`: the
/// epsilon sentinel occupies the sole body slot rather than the body being
/// empty, matching the data model's "ε may appear only as the sole body
/// element of S -> ε".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    head: NT,
    body: Vec<BodyElem>,
}

impl Production {
    pub fn new(head: NT, body: Vec<BodyElem>) -> Production {
        Production { head, body }
    }

    pub fn head(&self) -> &NT {
        &self.head
    }

    pub fn body(&self) -> &[BodyElem] {
        &self.body
    }

    /// `true` for a `A -> a` production (single terminal body).
    pub fn is_terminal(&self) -> bool {
        matches!(self.body.as_slice(), [BodyElem::Terminal(s)] if !s.is_epsilon())
    }

    /// `true` for a `A -> B C` production (two non-terminal bodies).
    pub fn is_binary(&self) -> bool {
        matches!(
            self.body.as_slice(),
            [BodyElem::Nonterminal(_), BodyElem::Nonterminal(_)]
        )
    }

    /// `true` for the `S -> ε` shape.
    pub fn is_epsilon(&self) -> bool {
        matches!(self.body.as_slice(), [BodyElem::Terminal(s)] if s.is_epsilon())
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let body = self
            .body
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{} -> {}", self.head, body)
    }
}
