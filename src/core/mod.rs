//! Core data structures for xcproj.
//!
//! This module contains the in-memory model of a project file:
//! - Opaque object references and their key table
//! - The object kinds and their records
//! - The locked object registry
//! - The project document and its edit operations

pub mod editor;
pub mod error;
pub mod kind;
pub mod object;
pub mod objects;
pub mod pbxproj;
pub mod reference;
pub mod registry;
pub mod value;

pub use editor::{ProjectEditor, ProjectView};
pub use error::ProjectError;
pub use kind::ObjectKind;
pub use object::{Object, ObjectVariant};
pub use pbxproj::PbxProj;
pub use reference::{ObjectRef, ReferenceTable, RegistryId};
pub use registry::{ObjectRegistry, Objects};
pub use value::{Fields, PlistValue};
