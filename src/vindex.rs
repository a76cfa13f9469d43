use std::collections::HashMap;

use crate::grammar::CFG;
use crate::nonterminal::NT;

/// A canonical, deterministic `NT <-> usize` index built once from
/// `cfg.ordered_v()`. Every dense tensor in `chart`, `closure`, and `parser`
/// is addressed through this index so that iteration/accumulation order is
/// fixed for a given grammar, as required by the determinism note in the
/// crate's resource model.
#[derive(Debug, Clone)]
pub struct VIndex {
    order: Vec<NT>,
    index: HashMap<NT, usize>,
}

impl VIndex {
    pub fn new(cfg: &CFG) -> VIndex {
        let order = cfg.ordered_v();
        let index = order
            .iter()
            .enumerate()
            .map(|(i, nt)| (nt.clone(), i))
            .collect();
        VIndex { order, index }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The canonical index of `nt`. Panics if `nt` is not in `V`; every
    /// caller in this crate only ever looks up non-terminals drawn from the
    /// grammar itself, so this can never legitimately miss.
    pub fn idx(&self, nt: &NT) -> usize {
        *self
            .index
            .get(nt)
            .unwrap_or_else(|| panic!("non-terminal {} is not a member of V", nt))
    }

    pub fn try_idx(&self, nt: &NT) -> Option<usize> {
        self.index.get(nt).copied()
    }

    pub fn nt(&self, i: usize) -> &NT {
        &self.order[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = &NT> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[NT] {
        &self.order
    }
}
