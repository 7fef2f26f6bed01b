//! xcproj - model, codec and package-linking workflows for Xcode projects
//!
//! This crate provides the core library functionality behind `xc`,
//! including the typed `project.pbxproj` object graph, its text codec and
//! the attach/detach operations that swap remote Swift package references
//! for local checkouts.

pub mod codec;
pub mod core;
pub mod ops;
pub mod package;
pub mod util;

/// Test utilities and fixtures for xcproj unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use core::{
    editor::{ProjectEditor, ProjectView},
    error::ProjectError,
    kind::ObjectKind,
    object::Object,
    pbxproj::PbxProj,
    reference::ObjectRef,
};

pub use package::PackageSummary;
pub use util::context::GlobalContext;
