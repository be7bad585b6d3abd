use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

/// The mutex implementation backing `Args`'s single lock. Plain
/// `std::sync::Mutex` by default; `parking_lot::Mutex` under the
/// `parking_lot` feature for crates that already pull it in and want one
/// less lock flavor in their dependency tree.
#[cfg(not(feature = "parking_lot"))]
mod sync {
    pub use std::sync::{Mutex, MutexGuard};
}
#[cfg(feature = "parking_lot")]
mod sync {
    pub use parking_lot::{Mutex, MutexGuard};
}
use sync::{Mutex, MutexGuard};

use crate::diagnostics::Diagnostic;
use crate::host;
use crate::origin::Origin;
use crate::scope::Scope;
use crate::settings::SettingsHandle;
use crate::spellcheck;
use crate::value::Value;

/// A declared argument's default value together with whatever override
/// currently applies to it, as returned by `get_all_arguments`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSummary {
    pub default_value: Value,
    pub override_value: Option<Value>,
}

impl ArgumentSummary {
    pub fn has_override(&self) -> bool {
        self.override_value.is_some()
    }
}

#[derive(Default)]
struct ArgsState {
    /// Global overrides: command-line `--args` plus root-argument-file
    /// assignments. `overrides ⊆ all_overrides` always holds.
    overrides: IndexMap<String, Value>,
    /// Every override ever observed, global or per-toolchain, used solely
    /// for the unused-override audit.
    all_overrides: IndexMap<String, Value>,
    /// Per toolchain: the declared arguments and their default values, as
    /// seen during evaluation.
    declared_per_toolchain: IndexMap<SettingsHandle, IndexMap<String, Value>>,
    /// Per toolchain: overrides scoped to that one toolchain.
    toolchain_overrides: IndexMap<SettingsHandle, IndexMap<String, Value>>,
}

/// The central, process-wide, thread-safe registry of declared build
/// arguments and their overrides.
///
/// A single mutex covers all four maps; every public operation acquires it
/// for its full duration. `Args` is created once per evaluation run and
/// shared across toolchain-evaluating threads behind an `Arc`.
#[derive(Default)]
pub struct Args {
    state: Mutex<ArgsState>,
}

impl Args {
    pub fn new() -> Self {
        Args::default()
    }

    #[cfg(not(feature = "parking_lot"))]
    fn lock(&self) -> MutexGuard<'_, ArgsState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[cfg(feature = "parking_lot")]
    fn lock(&self) -> MutexGuard<'_, ArgsState> {
        self.state.lock()
    }

    // ---- Override registration ----------------------------

    pub fn add_arg_override(&self, name: impl Into<String>, value: Value) {
        let name = name.into();
        let mut state = self.lock();
        state.overrides.insert(name.clone(), value.clone());
        state.all_overrides.insert(name, value);
    }

    pub fn add_arg_overrides(&self, overrides: impl IntoIterator<Item = (String, Value)>) {
        let mut state = self.lock();
        for (name, value) in overrides {
            state.overrides.insert(name.clone(), value.clone());
            state.all_overrides.insert(name, value);
        }
    }

    /// Writes to `overrides` only, never `all_overrides` — default overrides
    /// from the root argument file exist to provide defaults that may or
    /// may not be consumed, and must never be reported as unused.
    pub fn add_default_arg_overrides(&self, overrides: impl IntoIterator<Item = (String, Value)>) {
        let mut state = self.lock();
        for (name, value) in overrides {
            state.overrides.insert(name, value);
        }
    }

    // ---- Lookup ---------------------------------------------------------

    pub fn get_arg_override(&self, name: &str) -> Option<Value> {
        self.lock().all_overrides.get(name).cloned()
    }

    /// Resolution order: `all_overrides`, then the first hit walking
    /// toolchains in sorted (default-first, label-ascending) order, then
    /// absent.
    pub fn get_arg_from_all_arguments(&self, name: &str) -> Option<Value> {
        let state = self.lock();
        if let Some(value) = state.all_overrides.get(name) {
            return Some(value.clone());
        }
        for handle in sorted_toolchains(&state.declared_per_toolchain) {
            if let Some(value) = state.declared_per_toolchain[handle].get(name) {
                return Some(value.clone());
            }
        }
        None
    }

    // ---- Toolchain ordering ---------------------------------

    /// All toolchains that have declared at least one argument, in the
    /// deterministic default-first, label-ascending order.
    pub fn get_sorted_toolchains(&self) -> Vec<SettingsHandle> {
        let state = self.lock();
        sorted_toolchains(&state.declared_per_toolchain)
            .into_iter()
            .cloned()
            .collect()
    }

    // ---- System-variable seeding ----------------------------

    /// Seeds system variables into `dest_scope`, declares and marks them
    /// used, then applies any already-known overrides restricted to those
    /// now-declared names, and records `toolchain_overrides` for later
    /// `declare_args` calls to consult. All of this happens atomically
    /// under the single lock.
    pub fn setup_root_scope(
        &self,
        dest_scope: &mut Scope,
        toolchain_overrides: IndexMap<String, Value>,
    ) -> Result<(), Diagnostic> {
        let system_vars = system_variables()?;

        let mut state = self.lock();
        let handle = dest_scope.settings().clone();
        let declared = state.declared_per_toolchain.entry(handle).or_default();

        // Steps 1-2: seed + declare + mark used.
        for (name, value) in &system_vars {
            declared.insert(name.clone(), value.clone());
            dest_scope
                .set_value(name.clone(), value.clone())
                .expect("root scope is never read-only during seeding");
            dest_scope.mark_used(name.clone());
        }

        // Step 3: apply global overrides, restricted to names just declared.
        for (name, value) in &state.overrides {
            if declared.contains_key(name) {
                dest_scope
                    .set_value(name.clone(), value.clone())
                    .expect("root scope is never read-only during seeding");
            }
        }

        // Step 4: apply this toolchain's overrides, same restriction.
        for (name, value) in &toolchain_overrides {
            if declared.contains_key(name) {
                dest_scope
                    .set_value(name.clone(), value.clone())
                    .expect("root scope is never read-only during seeding");
            }
        }

        // Step 5: store toolchain_overrides for declare_args to consult later.
        let handle = dest_scope.settings().clone();
        state
            .toolchain_overrides
            .entry(handle)
            .or_default()
            .extend(toolchain_overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

        // Step 6: merge into all_overrides (the audit's superset).
        for (name, value) in toolchain_overrides {
            state.all_overrides.insert(name, value);
        }

        debug!(toolchain = %dest_scope.settings().settings().label(), "seeded root scope");
        Ok(())
    }

    // ---- Declaration ----------------------------------------

    /// Declares each `(name, value)` pair against `scope_to_set`'s owning
    /// toolchain, applying toolchain-override > global-override > declared-
    /// default precedence, and always marking the name used regardless of
    /// which branch fired.
    pub fn declare_args(
        &self,
        args: IndexMap<String, Value>,
        scope_to_set: &mut Scope,
    ) -> Result<(), Diagnostic> {
        let mut state = self.lock();
        let handle = scope_to_set.settings().clone();

        for (name, value) in args {
            let declared = state.declared_per_toolchain.entry(handle.clone()).or_default();

            if let Some(previous) = declared.get(&name) {
                if previous.origin() != value.origin() {
                    return Err(Diagnostic::duplicate_declaration(
                        value.origin().clone(),
                        previous.origin().clone(),
                    ));
                }
                // Same-origin re-declaration: silently accepted (an
                // imported file evaluated under multiple toolchains).
            } else {
                declared.insert(name.clone(), value.clone());
            }

            let toolchain_override = state
                .toolchain_overrides
                .get(&handle)
                .and_then(|m| m.get(&name))
                .cloned();
            let global_override = state.overrides.get(&name).cloned();

            let effective = toolchain_override
                .or(global_override)
                .unwrap_or(value);

            scope_to_set
                .set_value(name.clone(), effective)
                .expect("declaration targets are never read-only");
            scope_to_set.mark_used(name);
        }

        Ok(())
    }

    // ---- Unused-override audit -------------------------------

    /// Returns `Ok(())` if every override in `all_overrides` was declared by
    /// at least one toolchain; otherwise picks one representative offender
    /// (iteration order is not guaranteed), attaches a spelling suggestion
    /// when one exists, and returns the corresponding diagnostic.
    pub fn verify_all_overrides_used(&self) -> Result<(), Diagnostic> {
        let state = self.lock();

        let mut unused: IndexMap<String, Value> = state.all_overrides.clone();
        let mut all_declared_names: IndexSet<String> = IndexSet::new();
        for declared in state.declared_per_toolchain.values() {
            for name in declared.keys() {
                unused.shift_remove(name);
                all_declared_names.insert(name.clone());
            }
        }

        let Some((offender, value)) = unused.into_iter().next() else {
            return Ok(());
        };

        let suggestion = spellcheck::suggest(&offender, all_declared_names.iter().map(String::as_str));
        warn!(name = %offender, "build argument override never declared by any toolchain");
        Err(Diagnostic::unused_override(
            value.origin().clone(),
            &offender,
            suggestion,
        ))
    }

    // ---- Bulk view -------------------------------------------

    /// `name -> (default, has_override, override_value)`, built by walking
    /// toolchains default-first so the default toolchain's default is
    /// authoritative, then layering in global overrides for names that are
    /// declared somewhere. Overrides for undeclared names are omitted; they
    /// surface only via `verify_all_overrides_used`.
    pub fn get_all_arguments(&self) -> IndexMap<String, ArgumentSummary> {
        let state = self.lock();
        let mut result: IndexMap<String, ArgumentSummary> = IndexMap::new();

        for handle in sorted_toolchains(&state.declared_per_toolchain) {
            for (name, value) in &state.declared_per_toolchain[handle] {
                result.entry(name.clone()).or_insert_with(|| ArgumentSummary {
                    default_value: value.clone(),
                    override_value: None,
                });
            }
        }

        for (name, value) in &state.overrides {
            if let Some(summary) = result.get_mut(name) {
                summary.override_value = Some(value.clone());
            }
        }

        result
    }
}

fn sorted_toolchains(
    declared_per_toolchain: &IndexMap<SettingsHandle, IndexMap<String, Value>>,
) -> Vec<&SettingsHandle> {
    let mut handles: Vec<&SettingsHandle> = declared_per_toolchain.keys().collect();
    handles.sort();
    handles
}

/// The closed list of system variables seeded into every root scope:
/// `host_os`/`host_cpu` from live detection, `current_os`/`target_os`/
/// `current_cpu`/`target_cpu` seeded empty for the toolchain or project to
/// fill in later.
fn system_variables() -> Result<IndexMap<String, Value>, Diagnostic> {
    let host_os = host::detect_host_os()?;
    let host_cpu = host::detect_host_cpu()?;

    let mut vars = IndexMap::new();
    vars.insert("host_os".to_string(), Value::string(host_os, Origin::synthetic()));
    vars.insert("host_cpu".to_string(), Value::string(host_cpu, Origin::synthetic()));
    for name in ["current_os", "target_os", "current_cpu", "target_cpu"] {
        vars.insert(name.to_string(), Value::string("", Origin::synthetic()));
    }
    Ok(vars)
}
