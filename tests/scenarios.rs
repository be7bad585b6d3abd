//! End-to-end scenarios exercised against the crate's public API only.

use buildargs::{Args, Origin, Scope, Settings, SettingsHandle, Value};
use indexmap::IndexMap;

fn default_scope() -> Scope {
    Scope::new(SettingsHandle::new(Settings::default_toolchain()))
}

fn toolchain_scope(label: &str) -> Scope {
    Scope::new(SettingsHandle::new(Settings::new(label)))
}

fn s(text: &str) -> Value {
    Value::string(text, Origin::new("scenario"))
}

/// An undeclared override fails the audit; the error names the offender.
#[test]
fn undeclared_override_fails_audit() {
    let args = Args::new();
    args.add_arg_override("a", Value::bool(true, Origin::new("a")));
    args.add_arg_override("b", Value::bool(true, Origin::new("b")));
    args.add_arg_override("c", Value::bool(true, Origin::new("c")));

    let mut scope = default_scope();
    let mut decls = IndexMap::new();
    decls.insert("a".to_string(), Value::bool(false, Origin::new("decl-a")));
    decls.insert("b".to_string(), Value::bool(false, Origin::new("decl-b")));
    args.declare_args(decls, &mut scope).unwrap();

    let err = args.verify_all_overrides_used().unwrap_err();
    assert!(err.message().contains('c'));
}

/// Overrides of names not yet declared are held pending and only take
/// effect once the matching `declare_args` call runs; system variables
/// declared during seeding are visible immediately.
#[test]
fn deferred_application() {
    let args = Args::new();
    let mut scope = default_scope();

    args.add_arg_override("a", s("avalue"));
    let mut toolchain_overrides = IndexMap::new();
    toolchain_overrides.insert("b".to_string(), s("bvalue"));
    toolchain_overrides.insert("current_os".to_string(), s("myos"));
    args.setup_root_scope(&mut scope, toolchain_overrides).unwrap();

    assert_eq!(scope.get_value("current_os").unwrap().as_str(), Some("myos"));
    assert!(scope.get_value("a").is_none());
    assert!(scope.get_value("b").is_none());

    let mut decls = IndexMap::new();
    decls.insert("a".to_string(), Value::string("avalue2", Origin::new("da")));
    decls.insert("b".to_string(), Value::string("bvalue2", Origin::new("db")));
    decls.insert("c".to_string(), Value::string("cvalue2", Origin::new("dc")));
    args.declare_args(decls, &mut scope).unwrap();

    assert_eq!(scope.get_value("a").unwrap().as_str(), Some("avalue"));
    assert_eq!(scope.get_value("b").unwrap().as_str(), Some("bvalue"));
    assert_eq!(scope.get_value("c").unwrap().as_str(), Some("cvalue2"));
}

/// `get_arg_from_all_arguments` falls back to the declared default once
/// no override is present, and returns absent for a name nobody declared.
#[test]
fn fallback_to_declared_default() {
    let args = Args::new();
    let mut scope = default_scope();
    let mut decls = IndexMap::new();
    decls.insert("a".to_string(), s("avalue"));
    args.declare_args(decls, &mut scope).unwrap();

    assert!(args.get_arg_override("a").is_none());
    assert_eq!(args.get_arg_from_all_arguments("a").unwrap().as_str(), Some("avalue"));
    assert!(args.get_arg_from_all_arguments("b").is_none());
}

/// A fresh `Args` with only a bulk override registered resolves that
/// name through both lookup paths identically.
#[test]
fn overrides_only_path() {
    let args = Args::new();
    args.add_arg_overrides([("a".to_string(), s("avalue"))]);

    assert_eq!(args.get_arg_override("a").unwrap().as_str(), Some("avalue"));
    assert_eq!(args.get_arg_from_all_arguments("a").unwrap().as_str(), Some("avalue"));
}

/// Redeclaring the same name under the same toolchain with a distinct
/// origin raises `DuplicateDeclaration`, pointing at both origins.
#[test]
fn duplicate_declaration_points_at_both_origins() {
    let args = Args::new();
    let mut scope = default_scope();
    let o1 = Origin::new("origin1");
    let o2 = Origin::new("origin2");

    let mut first = IndexMap::new();
    first.insert("x".to_string(), Value::integer(1, o1.clone()));
    args.declare_args(first, &mut scope).unwrap();

    let mut second = IndexMap::new();
    second.insert("x".to_string(), Value::integer(2, o2));
    let err = args.declare_args(second, &mut scope).unwrap_err();

    assert_eq!(err.title(), "Duplicate build argument declaration.");
    assert_eq!(err.sub_errors().len(), 1);
    assert_eq!(err.sub_errors()[0].origin(), &o1);
}

/// Values registered via `add_default_arg_overrides` never fail the
/// audit, even when nothing ever declares them.
#[test]
fn default_override_silence() {
    let args = Args::new();
    args.add_default_arg_overrides([
        ("a".to_string(), Value::integer(1, Origin::new("a"))),
        ("b".to_string(), Value::integer(2, Origin::new("b"))),
    ]);

    assert!(args.verify_all_overrides_used().is_ok());
}

/// Toolchain-override precedence: a name overridden both globally and for
/// one toolchain resolves to the toolchain override within that toolchain.
#[test]
fn toolchain_override_takes_precedence_over_global() {
    let args = Args::new();
    args.add_arg_override("n", s("global"));

    let mut scope = toolchain_scope("android");
    let mut toolchain_overrides = IndexMap::new();
    toolchain_overrides.insert("n".to_string(), s("toolchain"));
    args.setup_root_scope(&mut scope, toolchain_overrides).unwrap();

    let mut decl = IndexMap::new();
    decl.insert("n".to_string(), s("default"));
    args.declare_args(decl, &mut scope).unwrap();

    assert_eq!(scope.get_value("n").unwrap().as_str(), Some("toolchain"));
}

/// A name declared only in toolchain T does not trigger an unused-variable
/// complaint when a disjoint toolchain T' is evaluated.
#[test]
fn cross_toolchain_unused_variable_immunity() {
    let args = Args::new();
    args.add_arg_override("only_in_t", s("x"));

    let mut scope_t = toolchain_scope("t");
    let mut decl_t = IndexMap::new();
    decl_t.insert("only_in_t".to_string(), s("default"));
    args.declare_args(decl_t, &mut scope_t).unwrap();

    let mut scope_t2 = toolchain_scope("t2");
    let mut decl_t2 = IndexMap::new();
    decl_t2.insert("unrelated".to_string(), s("default"));
    args.declare_args(decl_t2, &mut scope_t2).unwrap();

    assert!(args.verify_all_overrides_used().is_ok());
}

/// Determinism: `get_all_arguments` agrees with itself across repeated
/// calls and resolves a name declared in multiple toolchains to the
/// default toolchain's value.
#[test]
fn get_all_arguments_is_deterministic_and_default_first() {
    let args = Args::new();

    let mut android_scope = toolchain_scope("android");
    let mut decl2 = IndexMap::new();
    decl2.insert("shared".to_string(), s("android-value"));
    args.declare_args(decl2, &mut android_scope).unwrap();

    let mut default_scope = default_scope();
    let mut decl = IndexMap::new();
    decl.insert("shared".to_string(), s("default-wins"));
    args.declare_args(decl, &mut default_scope).unwrap();

    let first = args.get_all_arguments();
    let second = args.get_all_arguments();
    assert_eq!(first, second);
    assert_eq!(first["shared"].default_value.as_str(), Some("default-wins"));
    assert!(!first["shared"].has_override());
}

/// Declaring a system variable's override before `declare_args` has ever
/// been called for it is invisible until then, but the system variables
/// seeded by `setup_root_scope` are visible the moment it returns.
#[test]
fn system_variables_are_declared_and_used_immediately() {
    let args = Args::new();
    let mut scope = default_scope();
    args.setup_root_scope(&mut scope, IndexMap::new()).unwrap();

    for name in ["host_os", "host_cpu", "current_os", "target_os", "current_cpu", "target_cpu"] {
        assert!(scope.get_value(name).is_some(), "{name} should be seeded");
        assert!(scope.is_used(name), "{name} should be marked used");
    }
}
