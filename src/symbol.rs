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

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// The name reserved for the empty-string sentinel terminal. A `Sym` with
/// this name may only ever appear as the sole body element of a `S -> ε`
/// production; `CFG::add` enforces this.
pub const EPSILON_NAME: &str = "ε";

/// A terminal symbol. Two `Sym`s are equal iff their names are equal; the
/// optional label is carried purely for diagnostics (`Display`, logging)
/// and plays no part in equality or hashing.
#[derive(Debug, Clone)]
pub struct Sym {
    name: Rc<str>,
    label: Option<Rc<str>>,
}

impl Sym {
    pub fn new(name: impl AsRef<str>) -> Sym {
        Sym {
            name: Rc::from(name.as_ref()),
            label: None,
        }
    }

    pub fn with_label(name: impl AsRef<str>, label: impl AsRef<str>) -> Sym {
        Sym {
            name: Rc::from(name.as_ref()),
            label: Some(Rc::from(label.as_ref())),
        }
    }

    /// The distinguished empty-string sentinel.
    pub fn epsilon() -> Sym {
        Sym::new(EPSILON_NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_epsilon(&self) -> bool {
        &*self.name == EPSILON_NAME
    }
}

impl PartialEq for Sym {
    fn eq(&self, other: &Sym) -> bool {
        self.name == other.name
    }
}

impl Eq for Sym {}

impl Hash for Sym {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Sym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
