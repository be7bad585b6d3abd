use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Immutable per-toolchain descriptor.
///
/// An empty `label` marks the *default* toolchain. The source system keys
/// its declared-argument table by the address of a `Settings` instance;
/// here that is rendered as `SettingsHandle`, a cheaply-cloned
/// `Arc<Settings>` whose `Hash`/`Eq` impls are pointer identity rather than
/// structural, so two default toolchains (this occurs whenever
/// `declare_args` appears in both the root argument file and one of its
/// imports) remain distinct map keys even though their labels and
/// `is_default` flags are identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    label: String,
    is_default: bool,
}

impl Settings {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let is_default = label.is_empty();
        Settings { label, is_default }
    }

    pub fn default_toolchain() -> Self {
        Settings::new("")
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

/// Deterministic ordering: default toolchains sort before non-default ones;
/// ties (including between two distinct default-toolchain instances) break
/// on label, which is stable since both are `""`.
impl PartialOrd for Settings {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Settings {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_default, other.is_default) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => self.label.cmp(&other.label),
        }
    }
}

/// A stable, hashable, pointer-identity token for a `Settings` instance —
/// the map key `Args` uses for `declared_per_toolchain` and
/// `toolchain_overrides`.
#[derive(Debug, Clone)]
pub struct SettingsHandle(Arc<Settings>);

impl SettingsHandle {
    pub fn new(settings: Settings) -> Self {
        SettingsHandle(Arc::new(settings))
    }

    pub fn settings(&self) -> &Settings {
        &self.0
    }
}

impl PartialEq for SettingsHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SettingsHandle {}

impl Hash for SettingsHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl PartialOrd for SettingsHandle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SettingsHandle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sorts_before_non_default() {
        let default = Settings::default_toolchain();
        let host = Settings::new("host");
        assert!(default < host);
    }

    #[test]
    fn ties_break_on_label() {
        let a = Settings::new("android");
        let b = Settings::new("host");
        assert!(a < b);
    }

    #[test]
    fn two_default_instances_remain_distinct_handles() {
        let a = SettingsHandle::new(Settings::default_toolchain());
        let b = SettingsHandle::new(Settings::default_toolchain());
        assert_ne!(a, b);
        assert_eq!(a.settings(), b.settings());
    }

    #[test]
    fn equal_settings_sort_as_equal_even_across_distinct_handles() {
        let a = SettingsHandle::new(Settings::default_toolchain());
        let b = SettingsHandle::new(Settings::default_toolchain());
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_ne!(a, b); // still distinct map keys
    }
}
