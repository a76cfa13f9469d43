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

use std::error::Error as StdError;
use std::fmt;

/// A production was rejected at construction time: the head was not a
/// non-terminal, or a body element was neither terminal, non-terminal, nor
/// the epsilon sentinel in its only legal position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidProduction(pub String);

impl fmt::Display for InvalidProduction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid production: {}", self.0)
    }
}

impl StdError for InvalidProduction {}

/// Failures that can occur once a grammar is handed to a `Parser`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// `cky`/`cky_fast`/`lri`/`lri_fast`/`plc` all require CNF; raised when
    /// `cfg.in_cnf()` is false.
    NotInCNF,
    /// `plc` (and anything that depends on it) requires `I - P_L` to be
    /// invertible; raised when the left-corner matrix is singular or too
    /// ill-conditioned to invert reliably.
    NonConvergentGrammar,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::NotInCNF => write!(f, "grammar is not in Chomsky Normal Form"),
            ParseError::NonConvergentGrammar => {
                write!(f, "left-corner matrix is singular: grammar does not converge")
            }
        }
    }
}

impl StdError for ParseError {}

/// A malformed line in the grammar text format (see `text::parse`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadInput {
    pub line: String,
    pub reason: String,
}

impl fmt::Display for BadInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "bad input line `{}`: {}", self.line, self.reason)
    }
}

impl StdError for BadInput {}
