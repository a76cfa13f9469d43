//! The left-corner closure: the one-step matrix `P_L` and its
//! reflexive-transitive closure `E = (I - P_L)^-1`, plus the `E2` tensor
//! built on top of it. This is the piece that turns the naive
//! `Theta(n^3 |V|^5)` prefix recurrence into the `Theta(n^3 |V|^3)` one
//! (Nowak & Cotterell 2023's reformulation of Jelinek & Lafferty 1991).

use ndarray::{Array2, Array3};

use crate::error::ParseError;
use crate::grammar::CFG;
use crate::linalg;
use crate::production::BodyElem;
use crate::vindex::VIndex;

/// `E[X, Y]`: the total weight of all left-corner derivation sequences
/// `X =>*_L Y` (zero or more left-corner steps), including the reflexive
/// `X = Y` case.
#[derive(Debug, Clone)]
pub struct Closure {
    e: Array2<f64>,
}

impl Closure {
    /// Builds `P[X, Y] = sum_Z w(X -> Y Z)` and returns `E = (I - P)^-1`.
    /// `ParseError::NonConvergentGrammar` if `I - P` is singular (the
    /// grammar's left-corner spectral radius is >= 1).
    pub fn compute(cfg: &CFG, vidx: &VIndex) -> Result<Closure, ParseError> {
        let n = vidx.len();
        let mut p = Array2::<f64>::zeros((n, n));
        for (prod, w) in cfg.binary_productions() {
            if let [BodyElem::Nonterminal(y), BodyElem::Nonterminal(_z)] = prod.body() {
                let x = vidx.idx(prod.head());
                let yi = vidx.idx(y);
                p[[x, yi]] += w;
            }
        }
        let id = Array2::<f64>::eye(n);
        let e = linalg::invert(&(&id - &p)).map_err(|_| ParseError::NonConvergentGrammar)?;
        Ok(Closure { e })
    }

    /// `E[X, Y]` addressed by canonical index.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.e[[x, y]]
    }

    /// The raw `|V| x |V|` matrix, as returned by `Parser::plc`.
    pub fn matrix(&self) -> &Array2<f64> {
        &self.e
    }

    /// `E2[X, Y, Z] = sum_{Y'} E[X, Y'] * w(Y' -> Y Z)`, built by iterating
    /// every binary production once per outer `X`.
    pub fn e2_tensor(&self, cfg: &CFG, vidx: &VIndex) -> Array3<f64> {
        let n = vidx.len();
        let mut e2 = Array3::<f64>::zeros((n, n, n));
        let binaries: Vec<(usize, usize, usize, f64)> = cfg
            .binary_productions()
            .filter_map(|(prod, w)| {
                if let [BodyElem::Nonterminal(y), BodyElem::Nonterminal(z)] = prod.body() {
                    Some((vidx.idx(prod.head()), vidx.idx(y), vidx.idx(z), w))
                } else {
                    None
                }
            })
            .collect();
        for x in 0..n {
            for &(y2, y, z, w) in &binaries {
                e2[[x, y, z]] += self.get(x, y2) * w;
            }
        }
        e2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonterminal::NT;
    use crate::production::BodyElem;
    use crate::symbol::Sym;

    fn grammar_a() -> CFG {
        // S -> Y Z (1); Y -> Z Y (0.5); Y -> a (0.5); Z -> a (1)
        let s = NT::new("S");
        let y = NT::new("Y");
        let z = NT::new("Z");
        let a = Sym::new("a");
        let mut cfg = CFG::with_start(s.clone());
        cfg.add(1.0, s, vec![BodyElem::Nonterminal(y.clone()), BodyElem::Nonterminal(z.clone())])
            .unwrap();
        cfg.add(
            0.5,
            y.clone(),
            vec![BodyElem::Nonterminal(z.clone()), BodyElem::Nonterminal(y.clone())],
        )
        .unwrap();
        cfg.add(0.5, y, vec![BodyElem::Terminal(a.clone())]).unwrap();
        cfg.add(1.0, z, vec![BodyElem::Terminal(a)]).unwrap();
        cfg
    }

    #[test]
    fn grammar_a_closure_matches_spec() {
        let cfg = grammar_a();
        let vidx = VIndex::new(&cfg);
        // ordered_v: [S, Y, Z]
        assert_eq!(vidx.nt(0).name(), "S");
        assert_eq!(vidx.nt(1).name(), "Y");
        assert_eq!(vidx.nt(2).name(), "Z");

        let closure = Closure::compute(&cfg, &vidx).unwrap();
        let expect = [
            [1.0, 1.0, 0.5],
            [0.0, 1.0, 0.5],
            [0.0, 0.0, 1.0],
        ];
        for i in 0..3 {
            for j in 0..3 {
                assert!((closure.get(i, j) - expect[i][j]).abs() < 1e-9);
            }
        }
    }
}
