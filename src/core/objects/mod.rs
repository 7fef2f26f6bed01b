//! Per-kind object records.

pub mod config;
pub mod files;
pub mod packages;
pub mod phases;
pub mod project;
pub mod sync;
pub mod targets;

pub use config::{BuildConfiguration, ConfigurationList};
pub use files::{FileReference, Group, ReferenceProxy, SourceTree, VersionGroup};
pub use packages::{
    repository_name, LocalPackageReference, PackageProductDependency, RemotePackageReference,
    VersionRequirement,
};
pub use phases::{BuildFile, BuildPhase, CopyFilesBuildPhase, ShellScriptBuildPhase};
pub use project::{Project, ProjectReference};
pub use sync::{BuildFileExceptionSet, MembershipExceptionSet, SynchronizedRootGroup};
pub use targets::{BuildRule, ContainerItemProxy, Target, TargetDependency};
