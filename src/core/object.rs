//! The polymorphic object type.
//!
//! `Object` is a closed sum over every kind a project file can contain.
//! Dispatch is an exhaustive `match`, so adding a kind fails to compile until
//! every site handles it.

use crate::core::kind::ObjectKind;
use crate::core::objects::*;
use crate::core::reference::ObjectRef;
use crate::core::value::Fields;

/// One object of a project graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    BuildFile(BuildFile),
    LegacyTarget(Target),
    AggregateTarget(Target),
    ContainerItemProxy(ContainerItemProxy),
    Group(Group),
    ConfigurationList(ConfigurationList),
    VersionGroup(VersionGroup),
    BuildConfiguration(BuildConfiguration),
    VariantGroup(Group),
    TargetDependency(TargetDependency),
    NativeTarget(Target),
    FileReference(FileReference),
    Project(Project),
    ReferenceProxy(ReferenceProxy),
    BuildRule(BuildRule),
    CopyFilesBuildPhase(CopyFilesBuildPhase),
    ShellScriptBuildPhase(ShellScriptBuildPhase),
    ResourcesBuildPhase(BuildPhase),
    FrameworksBuildPhase(BuildPhase),
    HeadersBuildPhase(BuildPhase),
    SourcesBuildPhase(BuildPhase),
    RezBuildPhase(BuildPhase),
    RemotePackageReference(RemotePackageReference),
    LocalPackageReference(LocalPackageReference),
    PackageProductDependency(PackageProductDependency),
    SynchronizedRootGroup(SynchronizedRootGroup),
    BuildFileExceptionSet(BuildFileExceptionSet),
    MembershipExceptionSet(MembershipExceptionSet),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::BuildFile(_) => ObjectKind::BuildFile,
            Object::LegacyTarget(_) => ObjectKind::LegacyTarget,
            Object::AggregateTarget(_) => ObjectKind::AggregateTarget,
            Object::ContainerItemProxy(_) => ObjectKind::ContainerItemProxy,
            Object::Group(_) => ObjectKind::Group,
            Object::ConfigurationList(_) => ObjectKind::ConfigurationList,
            Object::VersionGroup(_) => ObjectKind::VersionGroup,
            Object::BuildConfiguration(_) => ObjectKind::BuildConfiguration,
            Object::VariantGroup(_) => ObjectKind::VariantGroup,
            Object::TargetDependency(_) => ObjectKind::TargetDependency,
            Object::NativeTarget(_) => ObjectKind::NativeTarget,
            Object::FileReference(_) => ObjectKind::FileReference,
            Object::Project(_) => ObjectKind::Project,
            Object::ReferenceProxy(_) => ObjectKind::ReferenceProxy,
            Object::BuildRule(_) => ObjectKind::BuildRule,
            Object::CopyFilesBuildPhase(_) => ObjectKind::CopyFilesBuildPhase,
            Object::ShellScriptBuildPhase(_) => ObjectKind::ShellScriptBuildPhase,
            Object::ResourcesBuildPhase(_) => ObjectKind::ResourcesBuildPhase,
            Object::FrameworksBuildPhase(_) => ObjectKind::FrameworksBuildPhase,
            Object::HeadersBuildPhase(_) => ObjectKind::HeadersBuildPhase,
            Object::SourcesBuildPhase(_) => ObjectKind::SourcesBuildPhase,
            Object::RezBuildPhase(_) => ObjectKind::RezBuildPhase,
            Object::RemotePackageReference(_) => ObjectKind::RemotePackageReference,
            Object::LocalPackageReference(_) => ObjectKind::LocalPackageReference,
            Object::PackageProductDependency(_) => ObjectKind::PackageProductDependency,
            Object::SynchronizedRootGroup(_) => ObjectKind::SynchronizedRootGroup,
            Object::BuildFileExceptionSet(_) => ObjectKind::BuildFileExceptionSet,
            Object::MembershipExceptionSet(_) => ObjectKind::MembershipExceptionSet,
        }
    }

    /// Every reference this object holds, in field order.
    pub fn references(&self) -> Vec<ObjectRef> {
        let mut refs = Vec::new();
        match self {
            Object::BuildFile(file) => refs.extend(file.file_ref.iter().chain(&file.product_ref)),
            Object::LegacyTarget(target)
            | Object::AggregateTarget(target)
            | Object::NativeTarget(target) => {
                refs.extend(&target.build_configuration_list);
                refs.extend(&target.build_phases);
                refs.extend(&target.build_rules);
                refs.extend(&target.dependencies);
                refs.extend(&target.synchronized_groups);
                refs.extend(&target.package_product_dependencies);
                refs.extend(&target.product_reference);
            }
            Object::ContainerItemProxy(proxy) => refs.extend(&proxy.container_portal),
            Object::Group(group) | Object::VariantGroup(group) => refs.extend(&group.children),
            Object::VersionGroup(group) => {
                refs.extend(&group.group.children);
                refs.extend(&group.current_version);
            }
            Object::ConfigurationList(list) => refs.extend(&list.build_configurations),
            Object::BuildConfiguration(config) => {
                refs.extend(&config.base_configuration_reference)
            }
            Object::TargetDependency(dependency) => {
                refs.extend(&dependency.target);
                refs.extend(&dependency.target_proxy);
                refs.extend(&dependency.product);
            }
            Object::FileReference(_) => {}
            Object::Project(project) => {
                refs.push(project.build_configuration_list);
                refs.push(project.main_group);
                refs.extend(&project.products_group);
                for reference in &project.project_references {
                    refs.push(reference.project_ref);
                    refs.push(reference.product_group);
                }
                refs.extend(&project.targets);
                refs.extend(&project.package_references);
            }
            Object::ReferenceProxy(proxy) => refs.extend(&proxy.remote_ref),
            Object::BuildRule(_) => {}
            Object::CopyFilesBuildPhase(phase) => refs.extend(&phase.phase.files),
            Object::ShellScriptBuildPhase(phase) => refs.extend(&phase.phase.files),
            Object::ResourcesBuildPhase(phase)
            | Object::FrameworksBuildPhase(phase)
            | Object::HeadersBuildPhase(phase)
            | Object::SourcesBuildPhase(phase)
            | Object::RezBuildPhase(phase) => refs.extend(&phase.files),
            Object::RemotePackageReference(_) | Object::LocalPackageReference(_) => {}
            Object::PackageProductDependency(dependency) => refs.extend(&dependency.package),
            Object::SynchronizedRootGroup(group) => refs.extend(&group.exceptions),
            Object::BuildFileExceptionSet(set) => refs.extend(&set.target),
            Object::MembershipExceptionSet(set) => refs.extend(&set.build_phase),
        }
        refs
    }

    /// A human-meaningful name for the object, when it has one.
    ///
    /// Feeds key generation and the comments written next to keys.
    pub fn name(&self) -> Option<String> {
        match self {
            Object::LegacyTarget(target)
            | Object::AggregateTarget(target)
            | Object::NativeTarget(target) => Some(target.name.clone()),
            Object::Group(group) | Object::VariantGroup(group) => {
                group.display_name().map(str::to_string)
            }
            Object::VersionGroup(group) => group.group.display_name().map(str::to_string),
            Object::BuildConfiguration(config) => Some(config.name.clone()),
            Object::TargetDependency(dependency) => dependency.name.clone(),
            Object::FileReference(file) => file.display_name().map(str::to_string),
            Object::Project(project) => Some(project.name.clone()),
            Object::ReferenceProxy(proxy) => proxy
                .name
                .clone()
                .or_else(|| proxy.path.clone()),
            Object::BuildRule(rule) => rule.name.clone(),
            Object::CopyFilesBuildPhase(phase) => phase.phase.name.clone(),
            Object::ShellScriptBuildPhase(phase) => phase.phase.name.clone(),
            Object::ResourcesBuildPhase(phase)
            | Object::FrameworksBuildPhase(phase)
            | Object::HeadersBuildPhase(phase)
            | Object::SourcesBuildPhase(phase)
            | Object::RezBuildPhase(phase) => phase.name.clone(),
            Object::RemotePackageReference(package) => package.name(),
            Object::LocalPackageReference(package) => Some(package.name().to_string()),
            Object::PackageProductDependency(dependency) => Some(dependency.product_name.clone()),
            Object::SynchronizedRootGroup(group) => group.display_name().map(str::to_string),
            Object::BuildFile(_)
            | Object::ContainerItemProxy(_)
            | Object::ConfigurationList(_)
            | Object::BuildFileExceptionSet(_)
            | Object::MembershipExceptionSet(_) => None,
        }
    }

    /// Unmodelled fields carried through decode/encode.
    pub fn extra(&self) -> &Fields {
        match self {
            Object::BuildFile(o) => &o.extra,
            Object::LegacyTarget(o) | Object::AggregateTarget(o) | Object::NativeTarget(o) => {
                &o.extra
            }
            Object::ContainerItemProxy(o) => &o.extra,
            Object::Group(o) | Object::VariantGroup(o) => &o.extra,
            Object::VersionGroup(o) => &o.group.extra,
            Object::ConfigurationList(o) => &o.extra,
            Object::BuildConfiguration(o) => &o.extra,
            Object::TargetDependency(o) => &o.extra,
            Object::FileReference(o) => &o.extra,
            Object::Project(o) => &o.extra,
            Object::ReferenceProxy(o) => &o.extra,
            Object::BuildRule(o) => &o.extra,
            Object::CopyFilesBuildPhase(o) => &o.phase.extra,
            Object::ShellScriptBuildPhase(o) => &o.phase.extra,
            Object::ResourcesBuildPhase(o)
            | Object::FrameworksBuildPhase(o)
            | Object::HeadersBuildPhase(o)
            | Object::SourcesBuildPhase(o)
            | Object::RezBuildPhase(o) => &o.extra,
            Object::RemotePackageReference(o) => &o.extra,
            Object::LocalPackageReference(o) => &o.extra,
            Object::PackageProductDependency(o) => &o.extra,
            Object::SynchronizedRootGroup(o) => &o.extra,
            Object::BuildFileExceptionSet(o) => &o.extra,
            Object::MembershipExceptionSet(o) => &o.extra,
        }
    }
}

/// Typed view of the record inside an `Object`.
///
/// Records shared by several kinds (targets, groups, build phases) match
/// every variant that carries them.
pub trait ObjectVariant: Sized {
    fn extract(object: &Object) -> Option<&Self>;
    fn extract_mut(object: &mut Object) -> Option<&mut Self>;
}

macro_rules! single_variant {
    ($($ty:ident),* $(,)?) => {
        $(
            impl ObjectVariant for $ty {
                fn extract(object: &Object) -> Option<&Self> {
                    match object {
                        Object::$ty(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn extract_mut(object: &mut Object) -> Option<&mut Self> {
                    match object {
                        Object::$ty(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Object {
                fn from(inner: $ty) -> Self {
                    Object::$ty(inner)
                }
            }
        )*
    };
}

single_variant!(
    BuildFile,
    ContainerItemProxy,
    ConfigurationList,
    VersionGroup,
    BuildConfiguration,
    TargetDependency,
    FileReference,
    Project,
    ReferenceProxy,
    BuildRule,
    CopyFilesBuildPhase,
    ShellScriptBuildPhase,
    RemotePackageReference,
    LocalPackageReference,
    PackageProductDependency,
    SynchronizedRootGroup,
    BuildFileExceptionSet,
    MembershipExceptionSet,
);

impl ObjectVariant for Target {
    fn extract(object: &Object) -> Option<&Self> {
        match object {
            Object::NativeTarget(t) | Object::LegacyTarget(t) | Object::AggregateTarget(t) => {
                Some(t)
            }
            _ => None,
        }
    }

    fn extract_mut(object: &mut Object) -> Option<&mut Self> {
        match object {
            Object::NativeTarget(t) | Object::LegacyTarget(t) | Object::AggregateTarget(t) => {
                Some(t)
            }
            _ => None,
        }
    }
}

impl ObjectVariant for Group {
    fn extract(object: &Object) -> Option<&Self> {
        match object {
            Object::Group(g) | Object::VariantGroup(g) => Some(g),
            Object::VersionGroup(v) => Some(&v.group),
            _ => None,
        }
    }

    fn extract_mut(object: &mut Object) -> Option<&mut Self> {
        match object {
            Object::Group(g) | Object::VariantGroup(g) => Some(g),
            Object::VersionGroup(v) => Some(&mut v.group),
            _ => None,
        }
    }
}

/// A bare `Group` is a plain `PBXGroup`; variant groups are built explicitly.
impl From<Group> for Object {
    fn from(inner: Group) -> Self {
        Object::Group(inner)
    }
}

impl ObjectVariant for BuildPhase {
    fn extract(object: &Object) -> Option<&Self> {
        match object {
            Object::ResourcesBuildPhase(p)
            | Object::FrameworksBuildPhase(p)
            | Object::HeadersBuildPhase(p)
            | Object::SourcesBuildPhase(p)
            | Object::RezBuildPhase(p) => Some(p),
            Object::CopyFilesBuildPhase(c) => Some(&c.phase),
            Object::ShellScriptBuildPhase(s) => Some(&s.phase),
            _ => None,
        }
    }

    fn extract_mut(object: &mut Object) -> Option<&mut Self> {
        match object {
            Object::ResourcesBuildPhase(p)
            | Object::FrameworksBuildPhase(p)
            | Object::HeadersBuildPhase(p)
            | Object::SourcesBuildPhase(p)
            | Object::RezBuildPhase(p) => Some(p),
            Object::CopyFilesBuildPhase(c) => Some(&mut c.phase),
            Object::ShellScriptBuildPhase(s) => Some(&mut s.phase),
            _ => None,
        }
    }
}
