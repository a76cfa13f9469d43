//! Default-zero charts keyed by `(start, non-terminal, end)`, used for both
//! the inside chart `beta` and the prefix chart `ppre`. Internally these are
//! addressed by the canonical `VIndex` so the hot DP loops in `parser` never
//! hash an `NT`; externally, `Chart::get`/`Chart::iter` present the
//! `(usize, &NT, usize)` view the external interface promises.

use std::collections::HashMap;
use std::rc::Rc;

use crate::nonterminal::NT;
use crate::vindex::VIndex;

#[derive(Debug, Clone)]
pub struct Chart {
    vidx: Rc<VIndex>,
    data: HashMap<(usize, usize, usize), f64>,
}

impl Chart {
    pub fn new(vidx: Rc<VIndex>) -> Chart {
        Chart {
            vidx,
            data: HashMap::new(),
        }
    }

    /// Read by canonical index; missing cells default to zero.
    pub fn get_idx(&self, i: usize, xi: usize, k: usize) -> f64 {
        self.data.get(&(i, xi, k)).copied().unwrap_or(0.0)
    }

    /// Accumulate (`+=`) by canonical index.
    pub fn add_idx(&mut self, i: usize, xi: usize, k: usize, val: f64) {
        *self.data.entry((i, xi, k)).or_insert(0.0) += val;
    }

    /// Overwrite by canonical index.
    pub fn set_idx(&mut self, i: usize, xi: usize, k: usize, val: f64) {
        self.data.insert((i, xi, k), val);
    }

    /// Read by `NT` reference. Returns `0.0` for any `NT` not in this
    /// chart's grammar, matching the default-zero semantics of the
    /// reference's sparse mapping.
    pub fn get(&self, i: usize, x: &NT, k: usize) -> f64 {
        match self.vidx.try_idx(x) {
            Some(xi) => self.get_idx(i, xi, k),
            None => 0.0,
        }
    }

    pub fn vindex(&self) -> &VIndex {
        &self.vidx
    }

    /// All populated (non-default) cells, as `(i, X, k, weight)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &NT, usize, f64)> + '_ {
        self.data
            .iter()
            .map(move |(&(i, xi, k), &w)| (i, self.vidx.nt(xi), k, w))
    }
}
