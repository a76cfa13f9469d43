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

use std::rc::Rc;

use ndarray::{Array2, Array4};

use crate::chart::Chart;
use crate::closure::Closure;
use crate::error::ParseError;
use crate::grammar::CFG;
use crate::production::{BodyElem, Production};
use crate::symbol::Sym;
use crate::vindex::VIndex;

/// Either a whitespace-delimited string or an already-tokenized sequence of
/// terminals. Both forms are accepted by every `Parser` entry point.
#[derive(Debug, Clone)]
pub enum Input {
    Tokens(Vec<Sym>),
}

impl Input {
    pub fn tokens(&self) -> &[Sym] {
        let Input::Tokens(v) = self;
        v
    }
}

impl From<&str> for Input {
    fn from(s: &str) -> Input {
        Input::Tokens(s.split_whitespace().map(Sym::new).collect())
    }
}

impl From<String> for Input {
    fn from(s: String) -> Input {
        Input::from(s.as_str())
    }
}

impl From<Vec<Sym>> for Input {
    fn from(v: Vec<Sym>) -> Input {
        Input::Tokens(v)
    }
}

impl From<&[Sym]> for Input {
    fn from(v: &[Sym]) -> Input {
        Input::Tokens(v.to_vec())
    }
}

/// The result of a chart-producing operation: either the single scalar the
/// caller asked for (`chart == false`) or the full chart (`chart == true`).
#[derive(Debug, Clone)]
pub enum Output {
    Scalar(f64),
    Chart(Chart),
}

impl Output {
    /// The scalar value. Panics if this `Output` wraps a full chart; call
    /// the parser method with `chart = false` if you only want the scalar.
    pub fn scalar(&self) -> f64 {
        match self {
            Output::Scalar(s) => *s,
            Output::Chart(_) => {
                panic!("Output::scalar called on a full chart; pass chart = false instead")
            }
        }
    }

    pub fn into_chart(self) -> Chart {
        match self {
            Output::Chart(c) => c,
            Output::Scalar(_) => {
                panic!("Output::into_chart called on a scalar result; pass chart = true instead")
            }
        }
    }
}

/// The (production-index materialized) binary productions of a grammar, as
/// `(head_idx, left_idx, right_idx, weight)` triples, built once per call so
/// the DP loops below never walk a `HashMap` in their inner bodies.
struct Binaries(Vec<(usize, usize, usize, f64)>);

impl Binaries {
    fn build(cfg: &CFG, vidx: &VIndex) -> Binaries {
        let mut v = Vec::new();
        for (prod, w) in cfg.binary_productions() {
            if let [BodyElem::Nonterminal(y), BodyElem::Nonterminal(z)] = prod.body() {
                v.push((vidx.idx(prod.head()), vidx.idx(y), vidx.idx(z), w));
            }
        }
        Binaries(v)
    }
}

/// Computes inside (`cky`/`cky_fast`) and prefix (`lri`/`lri_fast`) charts
/// over a fixed grammar. A grammar is logically immutable for the lifetime
/// of any `Parser` built over it; callers must not mutate it through another
/// handle while a `Parser` is in use.
pub struct Parser<'a> {
    cfg: &'a CFG,
    vidx: Rc<VIndex>,
}

impl<'a> Parser<'a> {
    pub fn new(cfg: &'a CFG) -> Parser<'a> {
        let vidx = Rc::new(VIndex::new(cfg));
        log::debug!(
            "parser ready: {} non-terminals, {} terminals, start = {}",
            vidx.len(),
            cfg.sigma().len(),
            cfg.start()
        );
        Parser { cfg, vidx }
    }

    fn epsilon_weight(&self) -> f64 {
        let prod = Production::new(self.cfg.start().clone(), vec![BodyElem::Terminal(Sym::epsilon())]);
        self.cfg.weight(&prod)
    }

    fn to_output(&self, c: Chart, n: usize, as_chart: bool) -> Output {
        if as_chart {
            Output::Chart(c)
        } else {
            Output::Scalar(c.get(0, self.cfg.start(), n))
        }
    }

    /// Computes the inside chart. Requires CNF.
    pub fn cky(&self, input: impl Into<Input>, chart: bool) -> Result<Output, ParseError> {
        let (beta, n) = self.cky_chart(&input.into())?;
        Ok(self.to_output(beta, n, chart))
    }

    fn cky_chart(&self, input: &Input) -> Result<(Chart, usize), ParseError> {
        if !self.cfg.in_cnf() {
            return Err(ParseError::NotInCNF);
        }
        let tokens = input.tokens();
        let n = tokens.len();
        log::trace!("cky: {} non-terminals, input length {}", self.vidx.len(), n);

        let mut beta = Chart::new(self.vidx.clone());
        let s_idx = self.vidx.idx(self.cfg.start());
        let eps_w = self.epsilon_weight();
        if eps_w != 0.0 {
            beta.set_idx(0, s_idx, 0, eps_w);
        }

        for (prod, w) in self.cfg.terminal_productions() {
            let head_idx = self.vidx.idx(prod.head());
            let sym = match prod.body() {
                [BodyElem::Terminal(s)] => s,
                _ => unreachable!(),
            };
            for k in 0..n {
                if &tokens[k] == sym {
                    beta.add_idx(k, head_idx, k + 1, w);
                }
            }
        }

        let binaries = Binaries::build(self.cfg, &self.vidx);
        for l in 2..=n {
            for i in 0..=(n - l) {
                let k = i + l;
                for j in (i + 1)..k {
                    for &(x, y, z, w) in &binaries.0 {
                        let contrib = beta.get_idx(i, y, j) * beta.get_idx(j, z, k) * w;
                        if contrib != 0.0 {
                            beta.add_idx(i, x, k, contrib);
                        }
                    }
                }
            }
        }
        Ok((beta, n))
    }

    /// Dense variant of `cky`: reorders the inner loops to iterate `(Y, Z)`
    /// outside the split point and distribute through a precomputed
    /// `W[X, Y, Z]` tensor. Identical semantics; faster when the
    /// binary-production set is dense over `V^3`.
    pub fn cky_fast(&self, input: impl Into<Input>, chart: bool) -> Result<Output, ParseError> {
        let (beta, n) = self.cky_fast_chart(&input.into())?;
        Ok(self.to_output(beta, n, chart))
    }

    fn cky_fast_chart(&self, input: &Input) -> Result<(Chart, usize), ParseError> {
        if !self.cfg.in_cnf() {
            return Err(ParseError::NotInCNF);
        }
        let tokens = input.tokens();
        let n = tokens.len();
        let nv = self.vidx.len();

        let mut beta = Chart::new(self.vidx.clone());
        let s_idx = self.vidx.idx(self.cfg.start());
        let eps_w = self.epsilon_weight();
        if eps_w != 0.0 {
            beta.set_idx(0, s_idx, 0, eps_w);
        }

        let mut w_tensor = ndarray::Array3::<f64>::zeros((nv, nv, nv));
        let binaries = Binaries::build(self.cfg, &self.vidx);
        for &(x, y, z, w) in &binaries.0 {
            w_tensor[[x, y, z]] += w;
        }

        for (prod, w) in self.cfg.terminal_productions() {
            let head_idx = self.vidx.idx(prod.head());
            let sym = match prod.body() {
                [BodyElem::Terminal(s)] => s,
                _ => unreachable!(),
            };
            for k in 0..n {
                if &tokens[k] == sym {
                    beta.add_idx(k, head_idx, k + 1, w);
                }
            }
        }

        for l in 2..=n {
            for i in 0..=(n - l) {
                let k = i + l;
                for y in 0..nv {
                    for z in 0..nv {
                        let mut gamma = 0.0;
                        for j in (i + 1)..k {
                            gamma += beta.get_idx(i, y, j) * beta.get_idx(j, z, k);
                        }
                        if gamma == 0.0 {
                            continue;
                        }
                        for x in 0..nv {
                            let w = w_tensor[[x, y, z]];
                            if w != 0.0 {
                                beta.add_idx(i, x, k, gamma * w);
                            }
                        }
                    }
                }
            }
        }
        Ok((beta, n))
    }

    /// Computes `E = (I - P_L)^-1`, the closure of the one-step left-corner
    /// matrix over `ordered_v()`-indexed non-terminals. Unlike the chart
    /// operations below, `plc` does not require CNF: it only needs the
    /// binary-production structure to build `P_L`, so it is also the tool
    /// for diagnosing a non-convergent grammar (`ParseError::
    /// NonConvergentGrammar`) whose binary productions happen to violate the
    /// CNF restriction that `B, C != S`.
    pub fn plc(&self) -> Result<Array2<f64>, ParseError> {
        let closure = Closure::compute(self.cfg, &self.vidx)?;
        Ok(closure.matrix().clone())
    }

    /// The original Jelinek & Lafferty (1991) prefix recurrence: `Theta(n^3
    /// |V|^5)`. Requires CNF.
    pub fn lri(&self, input: impl Into<Input>, chart: bool) -> Result<Output, ParseError> {
        let input = input.into();
        let (ppre, n) = self.lri_chart(&input)?;
        Ok(self.to_output(ppre, n, chart))
    }

    fn lri_chart(&self, input: &Input) -> Result<(Chart, usize), ParseError> {
        if !self.cfg.in_cnf() {
            return Err(ParseError::NotInCNF);
        }
        let tokens = input.tokens();
        let n = tokens.len();
        let nv = self.vidx.len();

        let mut ppre = Chart::new(self.vidx.clone());
        for k in 0..=n {
            for x in 0..nv {
                ppre.set_idx(k, x, k, 1.0);
            }
        }

        let (beta, _) = self.cky_chart(input)?;
        let closure = Closure::compute(self.cfg, &self.vidx)?;
        let e2 = closure.e2_tensor(self.cfg, &self.vidx);

        for (prod, w) in self.cfg.terminal_productions() {
            let y = self.vidx.idx(prod.head());
            let sym = match prod.body() {
                [BodyElem::Terminal(s)] => s,
                _ => unreachable!(),
            };
            for k in 0..n {
                if &tokens[k] != sym {
                    continue;
                }
                for x in 0..nv {
                    let e_xy = closure.get(x, y);
                    if e_xy != 0.0 {
                        ppre.add_idx(k, x, k + 1, e_xy * w);
                    }
                }
            }
        }

        for l in 2..=n {
            for i in 0..=(n - l) {
                let k = i + l;
                for j in (i + 1)..k {
                    for x in 0..nv {
                        for y in 0..nv {
                            let b = beta.get_idx(i, y, j);
                            if b == 0.0 {
                                continue;
                            }
                            for z in 0..nv {
                                let coeff = e2[[x, y, z]];
                                if coeff == 0.0 {
                                    continue;
                                }
                                let p = ppre.get_idx(j, z, k);
                                if p == 0.0 {
                                    continue;
                                }
                                ppre.add_idx(i, x, k, coeff * b * p);
                            }
                        }
                    }
                }
            }
        }
        Ok((ppre, n))
    }

    /// The fast Nowak & Cotterell (2023) prefix recurrence: `Theta(n^3
    /// |V|^3)`, via precomputed `gamma`/`delta` tensors. Requires CNF.
    pub fn lri_fast(&self, input: impl Into<Input>, chart: bool) -> Result<Output, ParseError> {
        let input = input.into();
        let (ppre, n) = self.lri_fast_chart(&input)?;
        Ok(self.to_output(ppre, n, chart))
    }

    fn lri_fast_chart(&self, input: &Input) -> Result<(Chart, usize), ParseError> {
        if !self.cfg.in_cnf() {
            return Err(ParseError::NotInCNF);
        }
        let tokens = input.tokens();
        let n = tokens.len();
        let nv = self.vidx.len();

        let mut ppre = Chart::new(self.vidx.clone());
        for k in 0..=n {
            for x in 0..nv {
                ppre.set_idx(k, x, k, 1.0);
            }
        }

        let (beta, _) = self.cky_fast_chart(input)?;
        let closure = Closure::compute(self.cfg, &self.vidx)?;
        let binaries = Binaries::build(self.cfg, &self.vidx);

        // gamma[i, j, X, Z] = sum_Y w(X -> Y Z) * beta[i, Y, j]
        // delta[i, j, X, Z] = sum_Y E[X, Y] * gamma[i, j, Y, Z]
        let dim = n + 1;
        let mut gamma = Array4::<f64>::zeros((dim, dim, nv, nv));
        let mut delta = Array4::<f64>::zeros((dim, dim, nv, nv));
        for i in 0..=n {
            for j in 0..=n {
                for &(x, y, z, w) in &binaries.0 {
                    let b = beta.get_idx(i, y, j);
                    if b != 0.0 {
                        gamma[[i, j, x, z]] += w * b;
                    }
                }
                for x in 0..nv {
                    for y in 0..nv {
                        let e_xy = closure.get(x, y);
                        if e_xy == 0.0 {
                            continue;
                        }
                        for z in 0..nv {
                            let g = gamma[[i, j, y, z]];
                            if g != 0.0 {
                                delta[[i, j, x, z]] += e_xy * g;
                            }
                        }
                    }
                }
            }
        }

        for (prod, w) in self.cfg.terminal_productions() {
            let y = self.vidx.idx(prod.head());
            let sym = match prod.body() {
                [BodyElem::Terminal(s)] => s,
                _ => unreachable!(),
            };
            for i in 0..n {
                if &tokens[i] != sym {
                    continue;
                }
                for x in 0..nv {
                    let e_xy = closure.get(x, y);
                    if e_xy != 0.0 {
                        ppre.add_idx(i, x, i + 1, e_xy * w);
                    }
                }
            }
        }

        for l in 2..=n {
            for i in 0..=(n - l) {
                let k = i + l;
                for j in (i + 1)..k {
                    for x in 0..nv {
                        for z in 0..nv {
                            let d = delta[[i, j, x, z]];
                            if d == 0.0 {
                                continue;
                            }
                            let p = ppre.get_idx(j, z, k);
                            if p != 0.0 {
                                ppre.add_idx(i, x, k, d * p);
                            }
                        }
                    }
                }
            }
        }
        Ok((ppre, n))
    }
}
