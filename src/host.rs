//! Host-OS/CPU detection and the `system_variable` seed values derived
//! from it.
//!
//! Detecting these via the build description language's own `uname`-style
//! probe is out of scope for this crate; this module provides a concrete,
//! pure, fully-tested detection mechanism built on `std::env::consts`, so
//! `Args::setup_root_scope` has real values to seed rather than an
//! unimplemented hook.

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::origin::Origin;

/// One of the eleven closed `host_os` values.
pub fn detect_host_os() -> Result<&'static str, Diagnostic> {
    derive_host_os(std::env::consts::OS)
}

/// One of the twelve closed `host_cpu` values.
pub fn detect_host_cpu() -> Result<&'static str, Diagnostic> {
    derive_host_cpu(std::env::consts::ARCH)
}

/// Pure mapping from a raw OS identifier to the closed `host_os` list. Split
/// out from `detect_host_os` so it can be unit-tested without depending on
/// the actual host running the tests.
fn derive_host_os(raw: &str) -> Result<&'static str, Diagnostic> {
    Ok(match raw {
        "windows" => "win",
        "macos" => "mac",
        "linux" => "linux",
        "freebsd" => "freebsd",
        "aix" => "aix",
        "openbsd" => "openbsd",
        "haiku" => "haiku",
        "solaris" => "solaris",
        "netbsd" => "netbsd",
        "zos" => "zos",
        "serenity" => "serenity",
        _ => return Err(unknown_host("host OS", raw)),
    })
}

/// Pure mapping from a raw CPU architecture identifier to the closed
/// `host_cpu` list, following the derivation rules verbatim: literal matches for
/// `"x86"`/`"BePC"`, `"x86_64"`, `"aarch64"`/`"arm64"`, a prefix rule for
/// anything starting with `"arm"`, and so on down to the fatal-on-unknown
/// case.
fn derive_host_cpu(raw: &str) -> Result<&'static str, Diagnostic> {
    Ok(match raw {
        "x86" | "BePC" => "x86",
        "x86_64" => "x64",
        "aarch64" | "arm64" => "arm64",
        s if s.starts_with("arm") => "arm",
        "mips" => "mipsel",
        "mips64" => "mips64el",
        "s390x" => "s390x",
        "ppc64" | "ppc64le" => "ppc64",
        "riscv32" => "riscv32",
        "riscv64" => "riscv64",
        "loongarch64" => "loong64",
        "e2k" => "e2k",
        _ => return Err(unknown_host("host CPU", raw)),
    })
}

fn unknown_host(what: &str, raw: &str) -> Diagnostic {
    Diagnostic::new(
        Origin::synthetic(),
        DiagnosticKind::TypeMismatch,
        "Unknown host.",
        format!("Unrecognized {what} identifier: \"{raw}\""),
    )
}
