// Copyright (c) 2017 King's College London
// created by the Software Development Team <http://soft-dev.org/>
//
// The Universal Permissive License (UPL), Version 1.0
//
// Subject to the condition set forth below, permission is hereby granted to any person obtaining a
// copy of this software, associated documentation and/or data (collectively the "Software"), free
// of charge and under any and all copyright rights in the Software, and any and all patent rights
// owned or freely licensable by each licensor hereunder covering either (i) the unmodified
// Software as contributed to or provided by such licensor, or (ii) the Larger Works (as defined
// below), to deal in both
//
// (a) the Software, and
// (b) any piece of software and/or hardware listed in the lrgrwrks.txt file
// if one is included with the Software (each a "Larger Work" to which the Software is contributed
// by such licensors),
//
// without restriction, including without limitation the rights to copy, create derivative works
// of, display, perform, and distribute the Software and make, use, sell, offer for sale, import,
// export, have made, and have sold the Software and the Larger Work(s), and to sublicense the
// foregoing rights on either these or other terms.
//
// This license is subject to the following condition: The above copyright notice and either this
// complete permission notice or at a minimum a reference to the UPL must be included in all copies
// or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
// BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::InvalidProduction;
use crate::nonterminal::NT;
use crate::production::{BodyElem, Production};
use crate::symbol::Sym;

/// A weighted context-free grammar. Productions are additive: re-adding an
/// existing `(head, body)` pair accumulates its weight rather than
/// overwriting it. A grammar is append-only during construction; callers
/// must not mutate it once it has been handed to a `Parser` (see the
/// concurrency/resource model in the crate docs).
#[derive(Debug, Clone)]
pub struct CFG {
    sigma: HashSet<Sym>,
    v: HashSet<NT>,
    p: HashMap<Production, f64>,
    s: NT,
}

impl CFG {
    /// An empty grammar whose start non-terminal is named `"S"`.
    pub fn new() -> CFG {
        CFG::with_start(NT::new("S"))
    }

    /// An empty grammar with a caller-chosen start non-terminal.
    pub fn with_start(start: NT) -> CFG {
        let mut v = HashSet::new();
        v.insert(start.clone());
        CFG {
            sigma: HashSet::new(),
            v,
            p: HashMap::new(),
            s: start,
        }
    }

    pub fn start(&self) -> &NT {
        &self.s
    }

    pub fn sigma(&self) -> &HashSet<Sym> {
        &self.sigma
    }

    pub fn v(&self) -> &HashSet<NT> {
        &self.v
    }

    /// Additive insertion of a production. `head` must be the production's
    /// non-terminal; `body` is its ordered right-hand side (empty for none
    /// of the CNF shapes we accept other than via the epsilon sentinel, see
    /// `Production`). Re-adding an identical `(head, body)` accumulates `w`
    /// (P2 in the spec: adding the same production `k` times with weight
    /// `w` yields total weight `k*w`).
    ///
    /// `w` is conventionally non-negative but this is not enforced, matching
    /// the reference implementation.
    pub fn add(&mut self, w: f64, head: NT, body: Vec<BodyElem>) -> Result<(), InvalidProduction> {
        if let [BodyElem::Terminal(s)] = body.as_slice() {
            if s.is_epsilon() && head != self.s {
                return Err(InvalidProduction(format!(
                    "epsilon production {} -> ε: only the start non-terminal may derive ε",
                    head
                )));
            }
        }
        for elem in &body {
            if let BodyElem::Terminal(s) = elem {
                if s.is_epsilon() && body.len() != 1 {
                    return Err(InvalidProduction(format!(
                        "{} -> ...: ε may only appear as the sole body element",
                        head
                    )));
                }
            }
        }

        self.v.insert(head.clone());
        for elem in &body {
            match elem {
                BodyElem::Nonterminal(n) => {
                    self.v.insert(n.clone());
                }
                BodyElem::Terminal(s) if !s.is_epsilon() => {
                    self.sigma.insert(s.clone());
                }
                BodyElem::Terminal(_) => {} // epsilon: contributes to neither V nor Sigma
            }
        }

        let prod = Production::new(head, body);
        *self.p.entry(prod).or_insert(0.0) += w;
        Ok(())
    }

    /// Weight of a specific production, `0.0` if it was never added.
    pub fn weight(&self, prod: &Production) -> f64 {
        self.p.get(prod).copied().unwrap_or(0.0)
    }

    /// All (production, weight) pairs, in unspecified order.
    pub fn productions(&self) -> impl Iterator<Item = (&Production, f64)> {
        self.p.iter().map(|(p, w)| (p, *w))
    }

    /// `A -> a` productions.
    pub fn terminal_productions(&self) -> impl Iterator<Item = (&Production, f64)> {
        self.productions().filter(|(p, _)| p.is_terminal())
    }

    /// `A -> B C` productions.
    pub fn binary_productions(&self) -> impl Iterator<Item = (&Production, f64)> {
        self.productions().filter(|(p, _)| p.is_binary())
    }

    /// `V` as a canonical, deterministic sequence, ordered lexicographically
    /// on non-terminal name. Used as the index basis for every matrix/tensor
    /// operation in `closure` and `parser`.
    pub fn ordered_v(&self) -> Vec<NT> {
        let mut v: Vec<NT> = self.v.iter().cloned().collect();
        v.sort_by(|a, b| a.name().cmp(b.name()));
        v
    }

    /// `true` iff every production matches one of the three CNF shapes:
    /// `S -> ε`, `A -> B C` (with `B, C != S`), or `A -> a` (`a != ε`).
    pub fn in_cnf(&self) -> bool {
        for (p, _) in self.productions() {
            if p.is_epsilon() {
                if p.head() != &self.s {
                    return false;
                }
                continue;
            }
            if p.is_binary() {
                if let [BodyElem::Nonterminal(b), BodyElem::Nonterminal(c)] = p.body() {
                    if b == &self.s || c == &self.s {
                        return false;
                    }
                    continue;
                }
            }
            if p.is_terminal() {
                continue;
            }
            return false;
        }
        true
    }
}

impl Default for CFG {
    fn default() -> CFG {
        CFG::new()
    }
}

impl fmt::Display for CFG {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut prods: Vec<(&Production, f64)> = self.productions().collect();
        prods.sort_by(|(a, _), (b, _)| {
            let ka = (a.head().name().len(), a.head().name(), a.body().len());
            let kb = (b.head().name().len(), b.head().name(), b.body().len());
            ka.cmp(&kb)
        });
        for (p, w) in prods {
            writeln!(f, "{}\t{}", p, w)?;
        }
        Ok(())
    }
}
