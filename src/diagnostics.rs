use std::fmt;

use crate::origin::Origin;

/// Contract-visible error kinds produced by this crate.
///
/// `TypeMismatch` is included for completeness of the taxonomy but is never
/// constructed by this crate directly — `Value`'s accessors return `Option`
/// rather than raising it themselves; an evaluator that gets
/// `None` back from an accessor it expected to succeed builds this variant
/// itself, since only it knows the AST-level message to attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DiagnosticKind {
    DuplicateDeclaration,
    UnusedOverride,
    TypeMismatch,
}

/// The build-description-level error record: an origin, a short title, a
/// longer message, and an ordered list of sub-diagnostics. Deliberately
/// *not* named `Error` and deliberately not a `std::error::Error` impl: it
/// is a plain data structure produced by fallible operations in this crate
/// and returned inside `Result<_, Diagnostic>`; rendering it for a human is
/// the front-end's job, not ours.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    origin: Origin,
    kind: DiagnosticKind,
    title: &'static str,
    message: String,
    sub_errors: Vec<Diagnostic>,
}

impl Diagnostic {
    pub fn new(
        origin: Origin,
        kind: DiagnosticKind,
        title: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            origin,
            kind,
            title,
            message: message.into(),
            sub_errors: Vec::new(),
        }
    }

    pub fn with_sub_error(mut self, sub: Diagnostic) -> Self {
        self.sub_errors.push(sub);
        self
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn sub_errors(&self) -> &[Diagnostic] {
        &self.sub_errors
    }

    /// `DuplicateDeclaration`, anchored at the redeclaration's origin, with
    /// one sub-error pointing at the original declaration.
    pub fn duplicate_declaration(new_origin: Origin, previous_origin: Origin) -> Self {
        Diagnostic::new(
            new_origin,
            DiagnosticKind::DuplicateDeclaration,
            "Duplicate build argument declaration.",
            "Duplicate build argument declaration.",
        )
        .with_sub_error(Diagnostic::new(
            previous_origin,
            DiagnosticKind::DuplicateDeclaration,
            "Previous declaration.",
            "This is the previous declaration of this argument.",
        ))
    }

    /// `UnusedOverride`, with an optional "Did you mean" prefix.
    pub fn unused_override(origin: Origin, name: &str, suggestion: Option<&str>) -> Self {
        let message = match suggestion {
            Some(candidate) => format!(
                "Did you mean \"{candidate}\"? Build argument has no effect. \
                 \"{name}\" was overridden but never declared by any toolchain."
            ),
            None => format!(
                "Build argument has no effect. \
                 \"{name}\" was overridden but never declared by any toolchain."
            ),
        };
        Diagnostic::new(
            origin,
            DiagnosticKind::UnusedOverride,
            "Build argument has no effect.",
            message,
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        for sub in &self.sub_errors {
            writeln!(f, "  {sub}")?;
        }
        Ok(())
    }
}
