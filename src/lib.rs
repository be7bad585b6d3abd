//! Build-argument resolution and scope/declaration subsystem for a
//! meta-build generator, plus the toolchain-parameterized evaluation model
//! around it (the typed `Value` model, the lexically nested `Scope`, the
//! process-wide `Args` registry, the `Spellchecker`, and the `Diagnostic`
//! surface). Lexing/parsing the build description, writing the resulting
//! build graph, filesystem I/O, the CLI front-end, and the external
//! command-executor are all out of scope — this crate consumes AST node
//! identities only as opaque `Origin` tokens.

mod args;
mod diagnostics;
mod host;
mod origin;
mod scope;
mod settings;
mod spellcheck;
mod value;

pub use args::{ArgumentSummary, Args};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use host::{detect_host_cpu, detect_host_os};
pub use origin::Origin;
pub use scope::{ReadOnlyScope, Scope};
pub use settings::{Settings, SettingsHandle};
pub use spellcheck::suggest as spellcheck_suggest;
pub use value::{Value, ValueData, ValueKind};
