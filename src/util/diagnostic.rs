//! User-friendly diagnostic messages.
//!
//! Every error shown to the user carries the root cause, any context that
//! explains it, and the command that fixes it when there is one.

use std::fmt;
use std::path::{Path, PathBuf};

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no configuration directory exists.
    pub const NO_CONFIG: &str = "help: Run `xc init` to create a .xcodecli directory";

    /// Suggestion when the package list is empty.
    pub const NO_PACKAGES: &str = "help: Run `xc link <path>` to track a local package";

    /// Suggestion when a package path is not tracked.
    pub const PACKAGE_NOT_TRACKED: &str = "help: Run `xc show` to list tracked packages";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::error(message)
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = match (color, self.severity) {
            (true, Severity::Error) => "\x1b[1;31merror\x1b[0m",
            (true, Severity::Warning) => "\x1b[1;33mwarning\x1b[0m",
            (false, Severity::Error) => "error",
            (false, Severity::Warning) => "warning",
        };
        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Malformed `project.pbxproj` text, pointing at the offending line.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("failed to parse {file}: {message}")]
#[diagnostic(
    code(xcproj::codec::syntax),
    help("Open the project in Xcode and save it to rewrite the file")
)]
pub struct ProjectSyntaxError {
    pub file: String,
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

impl ProjectSyntaxError {
    /// Label the whole of 1-based `line` inside `text`.
    pub fn new(path: &Path, text: String, line: usize, message: impl Into<String>) -> Self {
        let span = line_span(&text, line);
        let file = path.display().to_string();
        ProjectSyntaxError {
            message: message.into(),
            src: NamedSource::new(file.clone(), text),
            file,
            span,
        }
    }
}

/// No project or workspace under the search root.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("no Xcode project (.xcodeproj) or workspace (.xcworkspace) found in {}", .root.display())]
#[diagnostic(
    code(xcproj::finder::not_found),
    help("Run `xc init --project <path>` to point at the project explicitly")
)]
pub struct NoProjectFoundError {
    pub root: PathBuf,
}

/// Several candidates at the same precedence level.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("multiple Xcode projects found: {}", .candidates.join(", "))]
#[diagnostic(
    code(xcproj::finder::ambiguous),
    help("Pick one with `xc init --project <path>` or `xc init --workspace <path>`")
)]
pub struct AmbiguousProjectError {
    pub candidates: Vec<String>,
}

fn line_span(text: &str, line: usize) -> SourceSpan {
    let mut offset = 0;
    for (index, content) in text.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let len = content.trim_end_matches(['\n', '\r']).len();
            return (offset, len).into();
        }
        offset += content.len();
    }
    (text.len(), 0).into()
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
