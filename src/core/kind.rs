//! The closed set of object kinds a project file can contain.

use std::fmt;

/// Every object kind, declared in canonical traversal order.
///
/// The derived `Ord` follows declaration order, so collections keyed by
/// `ObjectKind` iterate in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    BuildFile,
    LegacyTarget,
    AggregateTarget,
    ContainerItemProxy,
    Group,
    ConfigurationList,
    VersionGroup,
    BuildConfiguration,
    VariantGroup,
    TargetDependency,
    NativeTarget,
    FileReference,
    Project,
    ReferenceProxy,
    BuildRule,
    CopyFilesBuildPhase,
    ShellScriptBuildPhase,
    ResourcesBuildPhase,
    FrameworksBuildPhase,
    HeadersBuildPhase,
    SourcesBuildPhase,
    RezBuildPhase,
    RemotePackageReference,
    LocalPackageReference,
    PackageProductDependency,
    SynchronizedRootGroup,
    BuildFileExceptionSet,
    MembershipExceptionSet,
}

impl ObjectKind {
    /// All kinds in canonical order.
    pub const ALL: [ObjectKind; 28] = [
        ObjectKind::BuildFile,
        ObjectKind::LegacyTarget,
        ObjectKind::AggregateTarget,
        ObjectKind::ContainerItemProxy,
        ObjectKind::Group,
        ObjectKind::ConfigurationList,
        ObjectKind::VersionGroup,
        ObjectKind::BuildConfiguration,
        ObjectKind::VariantGroup,
        ObjectKind::TargetDependency,
        ObjectKind::NativeTarget,
        ObjectKind::FileReference,
        ObjectKind::Project,
        ObjectKind::ReferenceProxy,
        ObjectKind::BuildRule,
        ObjectKind::CopyFilesBuildPhase,
        ObjectKind::ShellScriptBuildPhase,
        ObjectKind::ResourcesBuildPhase,
        ObjectKind::FrameworksBuildPhase,
        ObjectKind::HeadersBuildPhase,
        ObjectKind::SourcesBuildPhase,
        ObjectKind::RezBuildPhase,
        ObjectKind::RemotePackageReference,
        ObjectKind::LocalPackageReference,
        ObjectKind::PackageProductDependency,
        ObjectKind::SynchronizedRootGroup,
        ObjectKind::BuildFileExceptionSet,
        ObjectKind::MembershipExceptionSet,
    ];

    /// Target kinds in lookup priority order.
    pub const TARGETS: [ObjectKind; 3] = [
        ObjectKind::NativeTarget,
        ObjectKind::LegacyTarget,
        ObjectKind::AggregateTarget,
    ];

    /// The `isa` tag used in the textual format.
    pub fn isa(self) -> &'static str {
        match self {
            ObjectKind::BuildFile => "PBXBuildFile",
            ObjectKind::LegacyTarget => "PBXLegacyTarget",
            ObjectKind::AggregateTarget => "PBXAggregateTarget",
            ObjectKind::ContainerItemProxy => "PBXContainerItemProxy",
            ObjectKind::Group => "PBXGroup",
            ObjectKind::ConfigurationList => "XCConfigurationList",
            ObjectKind::VersionGroup => "XCVersionGroup",
            ObjectKind::BuildConfiguration => "XCBuildConfiguration",
            ObjectKind::VariantGroup => "PBXVariantGroup",
            ObjectKind::TargetDependency => "PBXTargetDependency",
            ObjectKind::NativeTarget => "PBXNativeTarget",
            ObjectKind::FileReference => "PBXFileReference",
            ObjectKind::Project => "PBXProject",
            ObjectKind::ReferenceProxy => "PBXReferenceProxy",
            ObjectKind::BuildRule => "PBXBuildRule",
            ObjectKind::CopyFilesBuildPhase => "PBXCopyFilesBuildPhase",
            ObjectKind::ShellScriptBuildPhase => "PBXShellScriptBuildPhase",
            ObjectKind::ResourcesBuildPhase => "PBXResourcesBuildPhase",
            ObjectKind::FrameworksBuildPhase => "PBXFrameworksBuildPhase",
            ObjectKind::HeadersBuildPhase => "PBXHeadersBuildPhase",
            ObjectKind::SourcesBuildPhase => "PBXSourcesBuildPhase",
            ObjectKind::RezBuildPhase => "PBXRezBuildPhase",
            ObjectKind::RemotePackageReference => "XCRemoteSwiftPackageReference",
            ObjectKind::LocalPackageReference => "XCLocalSwiftPackageReference",
            ObjectKind::PackageProductDependency => "XCSwiftPackageProductDependency",
            ObjectKind::SynchronizedRootGroup => "PBXFileSystemSynchronizedRootGroup",
            ObjectKind::BuildFileExceptionSet => {
                "PBXFileSystemSynchronizedBuildFileExceptionSet"
            }
            ObjectKind::MembershipExceptionSet => {
                "PBXFileSystemSynchronizedGroupBuildPhaseMembershipExceptionSet"
            }
        }
    }

    /// Look up a kind by its `isa` tag.
    pub fn from_isa(isa: &str) -> Option<ObjectKind> {
        ObjectKind::ALL.iter().copied().find(|kind| kind.isa() == isa)
    }

    pub fn is_target(self) -> bool {
        ObjectKind::TARGETS.contains(&self)
    }

    pub fn is_group(self) -> bool {
        matches!(
            self,
            ObjectKind::Group | ObjectKind::VariantGroup | ObjectKind::VersionGroup
        )
    }

    pub fn is_build_phase(self) -> bool {
        matches!(
            self,
            ObjectKind::CopyFilesBuildPhase
                | ObjectKind::ShellScriptBuildPhase
                | ObjectKind::ResourcesBuildPhase
                | ObjectKind::FrameworksBuildPhase
                | ObjectKind::HeadersBuildPhase
                | ObjectKind::SourcesBuildPhase
                | ObjectKind::RezBuildPhase
        )
    }

    /// Whether the kind is written on a single line.
    pub fn is_single_line(self) -> bool {
        matches!(self, ObjectKind::BuildFile | ObjectKind::FileReference)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.isa())
    }
}
