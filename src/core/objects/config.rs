//! Build configurations and configuration lists.

use crate::core::reference::ObjectRef;
use crate::core::value::Fields;

/// `XCBuildConfiguration`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildConfiguration {
    pub name: String,
    pub build_settings: Fields,
    pub base_configuration_reference: Option<ObjectRef>,
    pub extra: Fields,
}

/// `XCConfigurationList`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigurationList {
    pub build_configurations: Vec<ObjectRef>,
    pub default_configuration_is_visible: Option<String>,
    pub default_configuration_name: Option<String>,
    pub extra: Fields,
}
