//! File elements: references, groups and proxies.

use std::fmt;

use crate::core::reference::ObjectRef;
use crate::core::value::Fields;

/// Where a file element's path is anchored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceTree {
    #[default]
    Group,
    Absolute,
    SourceRoot,
    BuildProductsDir,
    SdkRoot,
    DeveloperDir,
    Custom(String),
}

impl SourceTree {
    pub fn as_str(&self) -> &str {
        match self {
            SourceTree::Group => "<group>",
            SourceTree::Absolute => "<absolute>",
            SourceTree::SourceRoot => "SOURCE_ROOT",
            SourceTree::BuildProductsDir => "BUILT_PRODUCTS_DIR",
            SourceTree::SdkRoot => "SDKROOT",
            SourceTree::DeveloperDir => "DEVELOPER_DIR",
            SourceTree::Custom(value) => value,
        }
    }

    pub fn parse(value: &str) -> SourceTree {
        match value {
            "<group>" => SourceTree::Group,
            "<absolute>" => SourceTree::Absolute,
            "SOURCE_ROOT" => SourceTree::SourceRoot,
            "BUILT_PRODUCTS_DIR" => SourceTree::BuildProductsDir,
            "SDKROOT" => SourceTree::SdkRoot,
            "DEVELOPER_DIR" => SourceTree::DeveloperDir,
            other => SourceTree::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `PBXFileReference`: a file or folder on disk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileReference {
    pub name: Option<String>,
    pub path: Option<String>,
    pub source_tree: Option<SourceTree>,
    pub last_known_file_type: Option<String>,
    pub explicit_file_type: Option<String>,
    pub file_encoding: Option<String>,
    pub include_in_index: Option<String>,
    pub extra: Fields,
}

impl FileReference {
    /// A folder reference shown in the navigator under `name`.
    pub fn folder(name: impl Into<String>, path: impl Into<String>) -> Self {
        FileReference {
            name: Some(name.into()),
            path: Some(path.into()),
            source_tree: Some(SourceTree::Group),
            last_known_file_type: Some("folder".to_string()),
            ..Default::default()
        }
    }

    /// The name shown in the navigator: `name`, else the last path component.
    pub fn display_name(&self) -> Option<&str> {
        display_name(self.name.as_deref(), self.path.as_deref())
    }
}

/// `PBXGroup` and `PBXVariantGroup`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    pub children: Vec<ObjectRef>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub source_tree: Option<SourceTree>,
    pub extra: Fields,
}

impl Group {
    pub fn display_name(&self) -> Option<&str> {
        display_name(self.name.as_deref(), self.path.as_deref())
    }
}

/// `XCVersionGroup`: a group of Core Data model versions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionGroup {
    pub group: Group,
    pub current_version: Option<ObjectRef>,
    pub version_group_type: Option<String>,
}

/// `PBXReferenceProxy`: a product of another project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceProxy {
    pub name: Option<String>,
    pub path: Option<String>,
    pub file_type: Option<String>,
    pub source_tree: Option<SourceTree>,
    pub remote_ref: Option<ObjectRef>,
    pub extra: Fields,
}

pub(crate) fn display_name<'a>(name: Option<&'a str>, path: Option<&'a str>) -> Option<&'a str> {
    name.or_else(|| path.map(|p| p.rsplit('/').next().unwrap_or(p)))
}
