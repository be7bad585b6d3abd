use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An opaque handle naming the AST node that produced a [`crate::value::Value`].
///
/// The lexer/parser and the AST itself are out of scope for this crate; a
/// front-end mints one `Origin` per node (or reuses one across re-evaluations
/// of the same node) and hands it to us. Equality is pointer identity, not
/// structural — two origins are "the same declaration site" iff they were
/// cloned from the same `Origin`, never because they happen to look alike.
#[derive(Clone)]
pub struct Origin(Arc<OriginNode>);

struct OriginNode {
    label: &'static str,
}

impl Origin {
    /// Mint a fresh origin. `label` is a short, human-readable tag (a file
    /// name, a synthetic marker like `"<system>"`) used only for `Debug`
    /// output; it never participates in equality or hashing.
    pub fn new(label: &'static str) -> Self {
        Origin(Arc::new(OriginNode { label }))
    }

    /// A synthetic origin for values this crate produces itself rather than
    /// receiving from the AST (seeded system variables, host-detection
    /// failures). Every call returns a distinct, non-null origin.
    pub fn synthetic() -> Self {
        Self::new("<system>")
    }

    fn ptr(&self) -> *const OriginNode {
        Arc::as_ptr(&self.0)
    }
}

impl PartialEq for Origin {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Origin {}

impl Hash for Origin {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.ptr() as usize).hash(state);
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Origin({}@{:p})", self.0.label, self.ptr())
    }
}
