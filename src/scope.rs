use std::collections::HashSet;

use indexmap::IndexMap;
use thiserror::Error;

use crate::origin::Origin;
use crate::settings::SettingsHandle;
use crate::value::Value;

/// Raised by `Scope::set_value` when the scope has been frozen.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot write to a read-only scope")]
pub struct ReadOnlyScope;

/// A lexically nested symbol table, bound to exactly one toolchain for its
/// whole lifetime.
///
/// `Scope` deliberately does *not* implement `Send`/`Sync`: the concurrency
/// model confines each scope tree to the thread that is evaluating
/// it, and sharing one across threads is a contract violation, not merely
/// unsupported. The raw `parent` pointer (rather than, say, `Weak<Scope>`)
/// is what opts the type out of those auto-traits, the same way `Rc<T>`'s
/// internal pointer does — no `unsafe impl` required.
pub struct Scope {
    parent: Option<*const Scope>,
    bindings: IndexMap<String, Value>,
    used: HashSet<String>,
    settings: SettingsHandle,
    read_only: bool,
}

impl Scope {
    pub fn new(settings: SettingsHandle) -> Self {
        Scope {
            parent: None,
            bindings: IndexMap::new(),
            used: HashSet::new(),
            settings,
            read_only: false,
        }
    }

    /// A child scope nested under `parent`, inheriting its toolchain.
    ///
    /// The `parent` pointer is recorded for the caller's own lookup chains;
    /// this crate's own operations (`get_value`, `set_value`, `mark_used`,
    /// `get_current_scope_values`) never walk it — parent traversal belongs
    /// to the evaluator, not to `Scope` itself.
    pub fn child(parent: &Scope) -> Self {
        Scope {
            parent: Some(parent as *const Scope),
            bindings: IndexMap::new(),
            used: HashSet::new(),
            settings: parent.settings.clone(),
            read_only: false,
        }
    }

    pub fn parent(&self) -> Option<&Scope> {
        // SAFETY: `parent` is only ever set from `child`, which borrows the
        // parent for at least as long as this child scope's constructor
        // call; callers are expected to keep parent scopes alive for the
        // lifetime of any children, the same confinement contract the rest
        // of `Scope` relies on.
        self.parent.map(|p| unsafe { &*p })
    }

    pub fn settings(&self) -> &SettingsHandle {
        &self.settings
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Inserts or replaces `name`. Last write wins; the new origin replaces
    /// the old one even if the value is unchanged. Fails only if the scope
    /// is read-only (the mode the evaluator uses when freezing imported
    /// files).
    pub fn set_value(&mut self, name: impl Into<String>, value: Value) -> Result<(), ReadOnlyScope> {
        if self.read_only {
            return Err(ReadOnlyScope);
        }
        self.bindings.insert(name.into(), value);
        Ok(())
    }

    /// Returns the value or `None`; never marks it used.
    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Idempotent; a no-op if `name` has no binding yet. May precede or
    /// follow the corresponding `set_value`.
    pub fn mark_used(&mut self, name: impl Into<String>) {
        self.used.insert(name.into());
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Copies the local mapping into `dest`. Does not descend into parents
    /// and does not carry the used-marks — callers needing those call
    /// `is_used` per name.
    pub fn get_current_scope_values(&self, dest: &mut IndexMap<String, Value>) {
        dest.clear();
        dest.extend(self.bindings.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// A private helper for tests below: construct a throwaway origin so
    /// scenarios don't need to reach into `crate::origin` directly.
    #[cfg(test)]
    fn origin(label: &'static str) -> Origin {
        Origin::new(label)
    }
}
