//! File-system synchronized groups and their exception sets.

use crate::core::objects::files::{display_name, SourceTree};
use crate::core::reference::ObjectRef;
use crate::core::value::Fields;

/// `PBXFileSystemSynchronizedRootGroup`: a folder whose contents the IDE
/// discovers on disk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SynchronizedRootGroup {
    pub name: Option<String>,
    pub path: Option<String>,
    pub source_tree: Option<SourceTree>,
    pub exceptions: Vec<ObjectRef>,
    pub explicit_file_types: Option<Fields>,
    pub explicit_folders: Vec<String>,
    pub extra: Fields,
}

impl SynchronizedRootGroup {
    pub fn display_name(&self) -> Option<&str> {
        display_name(self.name.as_deref(), self.path.as_deref())
    }
}

/// `PBXFileSystemSynchronizedBuildFileExceptionSet`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildFileExceptionSet {
    pub target: Option<ObjectRef>,
    pub membership_exceptions: Vec<String>,
    pub extra: Fields,
}

/// `PBXFileSystemSynchronizedGroupBuildPhaseMembershipExceptionSet`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MembershipExceptionSet {
    pub build_phase: Option<ObjectRef>,
    pub membership_exceptions: Vec<String>,
    pub extra: Fields,
}
