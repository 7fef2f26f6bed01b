//! The `PBXProject` record.

use std::collections::BTreeMap;

use crate::core::reference::ObjectRef;
use crate::core::value::Fields;

/// A product group / project file pair linking in another project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReference {
    pub product_group: ObjectRef,
    pub project_ref: ObjectRef,
}

/// `PBXProject`: the root of the object graph.
///
/// `attributes` holds the project attributes without `TargetAttributes`;
/// per-target attributes live in `target_attributes` keyed by target and are
/// merged back in when encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Not serialized; taken from the `.xcodeproj` bundle name.
    pub name: String,
    pub build_configuration_list: ObjectRef,
    pub compatibility_version: Option<String>,
    pub preferred_project_object_version: Option<String>,
    pub minimized_project_reference_proxies: Option<String>,
    pub development_region: Option<String>,
    pub has_scanned_for_encodings: Option<String>,
    pub known_regions: Vec<String>,
    pub main_group: ObjectRef,
    pub products_group: Option<ObjectRef>,
    pub project_dir_path: String,
    pub project_references: Vec<ProjectReference>,
    pub project_roots: Vec<String>,
    pub targets: Vec<ObjectRef>,
    pub attributes: Fields,
    pub target_attributes: BTreeMap<ObjectRef, Fields>,
    pub package_references: Vec<ObjectRef>,
    pub extra: Fields,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        build_configuration_list: ObjectRef,
        main_group: ObjectRef,
    ) -> Self {
        Project {
            name: name.into(),
            build_configuration_list,
            compatibility_version: None,
            preferred_project_object_version: None,
            minimized_project_reference_proxies: None,
            development_region: None,
            has_scanned_for_encodings: Some("0".to_string()),
            known_regions: Vec::new(),
            main_group,
            products_group: None,
            project_dir_path: String::new(),
            project_references: Vec::new(),
            project_roots: vec![String::new()],
            targets: Vec::new(),
            attributes: Fields::new(),
            target_attributes: BTreeMap::new(),
            package_references: Vec::new(),
            extra: Fields::new(),
        }
    }
}
