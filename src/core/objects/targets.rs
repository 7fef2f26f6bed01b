//! Targets and the objects that connect them.

use crate::core::reference::ObjectRef;
use crate::core::value::Fields;

/// `PBXNativeTarget`, `PBXLegacyTarget` and `PBXAggregateTarget`.
///
/// The three kinds share one shape; the variant of `Object` carrying the
/// value decides which one it is. Legacy-only settings such as
/// `buildToolPath` stay in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Target {
    pub name: String,
    pub build_configuration_list: Option<ObjectRef>,
    pub build_phases: Vec<ObjectRef>,
    pub build_rules: Vec<ObjectRef>,
    pub dependencies: Vec<ObjectRef>,
    pub product_name: Option<String>,
    pub product_reference: Option<ObjectRef>,
    pub product_type: Option<String>,
    pub package_product_dependencies: Vec<ObjectRef>,
    pub synchronized_groups: Vec<ObjectRef>,
    pub extra: Fields,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Target {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// `PBXTargetDependency`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetDependency {
    pub name: Option<String>,
    pub platform_filter: Option<String>,
    pub target: Option<ObjectRef>,
    pub target_proxy: Option<ObjectRef>,
    pub product: Option<ObjectRef>,
    pub extra: Fields,
}

/// `PBXContainerItemProxy`.
///
/// `remote_global_id` names an object that may live in another project, so it
/// stays a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerItemProxy {
    pub container_portal: Option<ObjectRef>,
    pub proxy_type: Option<String>,
    pub remote_global_id: Option<String>,
    pub remote_info: Option<String>,
    pub extra: Fields,
}

/// `PBXBuildRule`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildRule {
    pub name: Option<String>,
    pub compiler_spec: Option<String>,
    pub file_type: Option<String>,
    pub file_patterns: Option<String>,
    pub is_editable: Option<String>,
    pub output_files: Vec<String>,
    pub script: Option<String>,
    pub extra: Fields,
}
