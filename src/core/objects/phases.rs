//! Build phases and build files.

use crate::core::reference::ObjectRef;
use crate::core::value::Fields;

/// `PBXBuildFile`: one entry of a build phase.
///
/// Exactly one of `file_ref` (a file element) or `product_ref` (a package
/// product dependency) is normally set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildFile {
    pub file_ref: Option<ObjectRef>,
    pub product_ref: Option<ObjectRef>,
    pub settings: Option<Fields>,
    pub platform_filter: Option<String>,
    pub extra: Fields,
}

impl BuildFile {
    pub fn for_file(file: ObjectRef) -> Self {
        BuildFile {
            file_ref: Some(file),
            ..Default::default()
        }
    }

    pub fn for_product(product: ObjectRef) -> Self {
        BuildFile {
            product_ref: Some(product),
            ..Default::default()
        }
    }
}

/// Fields shared by every build phase.
///
/// Used directly by the sources, frameworks, headers, resources and Rez
/// phases, and embedded by the copy-files and shell-script phases.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildPhase {
    pub files: Vec<ObjectRef>,
    pub name: Option<String>,
    pub build_action_mask: Option<String>,
    pub run_only_for_deployment_postprocessing: Option<String>,
    pub extra: Fields,
}

/// `PBXCopyFilesBuildPhase`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyFilesBuildPhase {
    pub phase: BuildPhase,
    pub dst_path: Option<String>,
    pub dst_subfolder_spec: Option<String>,
}

/// `PBXShellScriptBuildPhase`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellScriptBuildPhase {
    pub phase: BuildPhase,
    pub shell_path: Option<String>,
    pub shell_script: Option<String>,
    pub input_paths: Vec<String>,
    pub output_paths: Vec<String>,
    pub input_file_list_paths: Vec<String>,
    pub output_file_list_paths: Vec<String>,
}
