//! Project graph error types and diagnostics.

use thiserror::Error;

use crate::core::kind::ObjectKind;
use crate::util::diagnostic::Diagnostic;

/// Error raised while decoding, mutating or encoding a project graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    #[error("{kind} object {reference} is not attached to this project")]
    OrphanedObject { kind: ObjectKind, reference: String },

    #[error("{isa} is missing the reference `{field}`")]
    MissingReference { isa: String, field: String },

    #[error("{isa} is missing the field `{field}`")]
    MissingField { isa: String, field: String },

    #[error("unknown object kind `{isa}`")]
    UnknownKind { isa: String },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("target `{target_name}` not found")]
    TargetNotFound { target_name: String },

    #[error("target `{target_name}` has no frameworks build phase")]
    FrameworksBuildPhaseNotFound { target_name: String },

    #[error("path `{path}` must be relative")]
    PathIsAbsolute { path: String },

    #[error("a remote package for `{product_name}` already exists with a different requirement")]
    MultipleRemotePackages { product_name: String },

    #[error("a local package for `{product_name}` already exists at a different path")]
    MultipleLocalPackages { product_name: String },

    #[error("the document has no root project object")]
    MissingRootObject,

    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("the project cannot be modified while a query on it is running")]
    EditDuringQuery,

    #[error("the project was modified by a nested operation while an edit was running")]
    ConflictingEdit,
}

impl ProjectError {
    /// Build an `OrphanedObject` error for a reference that no longer resolves.
    pub fn orphaned(kind: ObjectKind, reference: impl ToString) -> Self {
        ProjectError::OrphanedObject {
            kind,
            reference: reference.to_string(),
        }
    }

    pub(crate) fn missing_field(isa: impl Into<String>, field: impl Into<String>) -> Self {
        ProjectError::MissingField {
            isa: isa.into(),
            field: field.into(),
        }
    }

    pub(crate) fn missing_reference(isa: impl Into<String>, field: impl Into<String>) -> Self {
        ProjectError::MissingReference {
            isa: isa.into(),
            field: field.into(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ProjectError::OrphanedObject { kind, reference } => {
                Diagnostic::error(format!("{} {} is orphaned", kind, reference))
                    .with_context("the object was removed or belongs to another project")
                    .with_suggestion("Re-fetch the object from the project before using it")
            }

            ProjectError::MissingReference { isa, field } => {
                Diagnostic::error(format!("`{}` in {} does not point at an object", field, isa))
                    .with_context("the project file may be damaged or hand-edited")
                    .with_suggestion("Open the project in Xcode and save it to repair it")
            }

            ProjectError::MissingField { isa, field } => {
                Diagnostic::error(format!("{} has no `{}` field", isa, field))
                    .with_suggestion("Open the project in Xcode and save it to repair it")
            }

            ProjectError::UnknownKind { isa } => {
                Diagnostic::error(format!("unsupported object kind `{}`", isa))
                    .with_context("the project may come from a newer Xcode release")
            }

            ProjectError::InvalidValue { field, reason } => {
                Diagnostic::error(format!("invalid value for `{}`", field)).with_context(reason.clone())
            }

            ProjectError::TargetNotFound { target_name } => {
                Diagnostic::error(format!("no target named `{}`", target_name))
                    .with_suggestion("Run `xc show` to list the targets of the project")
            }

            ProjectError::FrameworksBuildPhaseNotFound { target_name } => Diagnostic::error(format!(
                "target `{}` has no \"Link Binary With Libraries\" phase",
                target_name
            ))
            .with_suggestion("Add a frameworks build phase to the target in Xcode"),

            ProjectError::PathIsAbsolute { path } => {
                Diagnostic::error(format!("`{}` is an absolute path", path))
                    .with_context("local packages are stored relative to the project directory")
                    .with_suggestion("Pass the path relative to the .xcodeproj's parent directory")
            }

            ProjectError::MultipleRemotePackages { product_name } => Diagnostic::error(format!(
                "conflicting remote package requirements for `{}`",
                product_name
            ))
            .with_suggestion("Reuse the existing version requirement or remove the package first"),

            ProjectError::MultipleLocalPackages { product_name } => Diagnostic::error(format!(
                "`{}` is already linked from a different local path",
                product_name
            ))
            .with_suggestion("Detach the existing local package first"),

            ProjectError::MissingRootObject => Diagnostic::error("the project has no root object")
                .with_context("`rootObject` must name a PBXProject"),

            ProjectError::Syntax { line, message } => {
                Diagnostic::error(format!("malformed project file: {}", message))
                    .with_context(format!("at line {}", line))
            }

            ProjectError::EditDuringQuery => {
                Diagnostic::error("cannot edit the project from inside a query")
                    .with_suggestion("Collect what the query needs first, then edit afterwards")
            }

            ProjectError::ConflictingEdit => {
                Diagnostic::error("conflicting edits to the same project")
                    .with_context("a nested operation changed the project while an edit was running")
                    .with_suggestion("Make the changes through the editor passed to the edit")
            }
        }
    }
}
