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

//! `lripar` computes prefix and inside probabilities of a string under a
//! weighted context-free grammar (WCFG) in Chomsky Normal Form.
//!
//! Two dynamic-programming algorithms sit at the core:
//!
//!   * **Inside (CKY)** (`Parser::cky`/`Parser::cky_fast`) — for every span,
//!     the total weight of derivations yielding that exact substring.
//!   * **Left-corner prefix (LRI)** (`Parser::lri`/`Parser::lri_fast`) — for
//!     every span, the total weight of derivations yielding any string of
//!     which that substring is a prefix. The `_fast` form reduces the
//!     naive `Theta(n^3 |V|^5)` recurrence to `Theta(n^3 |V|^3)` by
//!     precomputing the left-corner closure `E = (I - P_L)^-1` once per
//!     parse (Nowak & Cotterell 2023's reformulation of Jelinek &
//!     Lafferty 1991).
//!
//! A grammar is built additively (`CFG::add`), validated with
//! `CFG::in_cnf`, then handed to a `Parser`. Grammar file parsing, CLI/
//! driver, and packaging are out of scope for the core; `text::parse`
//! is a thin adapter for the one text format this crate understands.
//!
//! Grammar construction, parse-tree extraction, Viterbi/k-best parsing,
//! non-CNF grammars, CNF normalization, streaming/Earley parsing, and
//! parallel execution beyond the optional `parallel` feature are outside
//! this crate's scope.

mod chart;
mod closure;
mod error;
mod grammar;
mod linalg;
mod nonterminal;
mod parser;
mod production;
mod symbol;
mod text;
mod vindex;

pub use chart::Chart;
pub use closure::Closure;
pub use error::{BadInput, InvalidProduction, ParseError};
pub use grammar::CFG;
pub use nonterminal::NT;
pub use parser::{Input, Output, Parser};
pub use production::{BodyElem, Production};
pub use symbol::{Sym, EPSILON_NAME};
pub use text::{parse as parse_grammar, parse_with as parse_grammar_with};
pub use vindex::VIndex;
