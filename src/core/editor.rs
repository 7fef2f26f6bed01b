//! Project aggregate operations.
//!
//! `ProjectView` answers queries about the root project; `ProjectEditor`
//! performs the compound graph edits. Both borrow the `Objects` of one
//! registry transaction, so an edit is never observed half-applied. Every
//! edit validates all of its failure conditions before the first mutation.

use std::path::Path;

use tracing::{debug, info};

use crate::core::error::ProjectError;
use crate::core::kind::ObjectKind;
use crate::core::object::Object;
use crate::core::objects::{
    BuildFile, BuildPhase, FileReference, Group, LocalPackageReference, PackageProductDependency,
    Project, RemotePackageReference, Target, VersionRequirement,
};
use crate::core::reference::ObjectRef;
use crate::core::registry::Objects;
use crate::core::value::Fields;

/// Read-only queries over the root project.
#[derive(Clone, Copy)]
pub struct ProjectView<'a> {
    objects: &'a Objects,
    root: ObjectRef,
}

impl<'a> ProjectView<'a> {
    pub fn new(objects: &'a Objects, root: ObjectRef) -> Self {
        ProjectView { objects, root }
    }

    pub fn objects(&self) -> &'a Objects {
        self.objects
    }

    pub fn root(&self) -> ObjectRef {
        self.root
    }

    /// The root `PBXProject` record.
    pub fn project(&self) -> Result<&'a Project, ProjectError> {
        self.objects
            .get_as::<Project>(self.root)
            .ok_or(ProjectError::MissingRootObject)
    }

    pub fn main_group(&self) -> Result<ObjectRef, ProjectError> {
        Ok(self.project()?.main_group)
    }

    /// The project's targets, in declaration order.
    pub fn targets(&self) -> Result<Vec<ObjectRef>, ProjectError> {
        Ok(self.project()?.targets.clone())
    }

    /// The first target of the project named `name`.
    pub fn target_named(&self, name: &str) -> Result<Option<ObjectRef>, ProjectError> {
        Ok(self.project()?.targets.iter().copied().find(|&target| {
            self.objects
                .get_as::<Target>(target)
                .is_some_and(|t| t.name == name)
        }))
    }

    /// The target's first frameworks build phase.
    pub fn frameworks_phase(&self, target: ObjectRef) -> Option<ObjectRef> {
        self.objects
            .get_as::<Target>(target)?
            .build_phases
            .iter()
            .copied()
            .find(|&phase| self.objects.kind_of(phase) == Some(ObjectKind::FrameworksBuildPhase))
    }

    /// Remote package references, in package-list order.
    pub fn remote_packages(&self) -> Result<Vec<ObjectRef>, ProjectError> {
        self.packages_of_kind(ObjectKind::RemotePackageReference)
    }

    /// Local package references, in package-list order.
    pub fn local_packages(&self) -> Result<Vec<ObjectRef>, ProjectError> {
        self.packages_of_kind(ObjectKind::LocalPackageReference)
    }

    pub fn remote_package_with_url(&self, url: &str) -> Result<Option<ObjectRef>, ProjectError> {
        Ok(self.remote_packages()?.into_iter().find(|&package| {
            self.objects
                .get_as::<RemotePackageReference>(package)
                .is_some_and(|p| p.repository_url.as_deref() == Some(url))
        }))
    }

    pub fn local_package_with_path(&self, path: &str) -> Result<Option<ObjectRef>, ProjectError> {
        Ok(self.local_packages()?.into_iter().find(|&package| {
            self.objects
                .get_as::<LocalPackageReference>(package)
                .is_some_and(|p| p.relative_path == path)
        }))
    }

    /// Attributes recorded for `target`.
    pub fn target_attributes(&self, target: ObjectRef) -> Result<Option<&'a Fields>, ProjectError> {
        Ok(self.project()?.target_attributes.get(&target))
    }

    /// The child of `group` whose name (or, failing that, last path
    /// component) equals `name`.
    pub fn file_named(&self, group: ObjectRef, name: &str) -> Result<Option<ObjectRef>, ProjectError> {
        let group = self.objects.require::<Group>(group, ObjectKind::Group)?;
        Ok(group.children.iter().copied().find(|&child| {
            self.objects
                .get(child)
                .and_then(Object::name)
                .is_some_and(|child_name| child_name == name)
        }))
    }

    fn packages_of_kind(&self, kind: ObjectKind) -> Result<Vec<ObjectRef>, ProjectError> {
        Ok(self
            .project()?
            .package_references
            .iter()
            .copied()
            .filter(|&package| self.objects.kind_of(package) == Some(kind))
            .collect())
    }
}

/// Compound edits on the root project.
pub struct ProjectEditor<'a> {
    objects: &'a mut Objects,
    root: ObjectRef,
}

impl<'a> ProjectEditor<'a> {
    pub fn new(objects: &'a mut Objects, root: ObjectRef) -> Self {
        ProjectEditor { objects, root }
    }

    pub fn view(&self) -> ProjectView<'_> {
        ProjectView::new(self.objects, self.root)
    }

    pub fn objects(&mut self) -> &mut Objects {
        self.objects
    }

    fn project_mut(&mut self) -> Result<&mut Project, ProjectError> {
        self.objects
            .get_as_mut::<Project>(self.root)
            .ok_or(ProjectError::MissingRootObject)
    }

    /// Register a remote package, reusing one with the same URL.
    ///
    /// Fails with `MultipleRemotePackages` when the existing reference has a
    /// different requirement.
    pub fn add_remote_package_reference(
        &mut self,
        repository_url: &str,
        requirement: VersionRequirement,
    ) -> Result<ObjectRef, ProjectError> {
        if let Some(existing) = self.existing_remote(repository_url, &requirement)? {
            return Ok(existing);
        }
        let reference = self
            .objects
            .add(RemotePackageReference::new(repository_url, Some(requirement)));
        self.project_mut()?.package_references.push(reference);
        info!(url = repository_url, "added remote package reference");
        Ok(reference)
    }

    /// Register a local package, reusing one with the same relative path.
    pub fn add_local_package_reference(&mut self, relative_path: &str) -> Result<ObjectRef, ProjectError> {
        if let Some(existing) = self.view().local_package_with_path(relative_path)? {
            debug!(path = relative_path, "local package reference already present");
            return Ok(existing);
        }
        let reference = self.objects.add(LocalPackageReference::new(relative_path));
        self.project_mut()?.package_references.push(reference);
        info!(path = relative_path, "added local package reference");
        Ok(reference)
    }

    /// Link a product of a local package into a target.
    ///
    /// Returns the product dependency.
    pub fn add_local_swift_package(
        &mut self,
        path: &str,
        product_name: &str,
        target_name: &str,
        add_file_reference: bool,
    ) -> Result<ObjectRef, ProjectError> {
        if Path::new(path).is_absolute() {
            return Err(ProjectError::PathIsAbsolute {
                path: path.to_string(),
            });
        }
        let target = self.require_target(target_name)?;

        let existing = self.product_dependency_named(product_name, None);
        if existing.is_some() {
            let same_path = self
                .objects
                .of_kind(ObjectKind::FileReference)
                .filter_map(|(_, object)| match object {
                    Object::FileReference(file) => Some(file),
                    _ => None,
                })
                .find(|file| file.name.as_deref() == Some(product_name))
                .is_some_and(|file| file.path.as_deref() == Some(path));
            if !same_path {
                return Err(ProjectError::MultipleLocalPackages {
                    product_name: product_name.to_string(),
                });
            }
        }
        let phase = self.require_frameworks_phase(target, target_name)?;
        let main_group = self.view().main_group()?;

        let dependency = match existing {
            Some(dependency) => dependency,
            None => self
                .objects
                .add(PackageProductDependency::new(product_name, None)),
        };
        self.link_product(target, phase, dependency)?;

        if add_file_reference {
            let file = self.objects.add(FileReference::folder(product_name, path));
            self.group_mut(main_group)?.children.push(file);
        }
        info!(product = product_name, target = target_name, "linked local package product");
        Ok(dependency)
    }

    /// Add a remote package and link one of its products into a target.
    ///
    /// Returns the remote package reference.
    pub fn add_swift_package(
        &mut self,
        repository_url: &str,
        product_name: &str,
        requirement: VersionRequirement,
        target_name: &str,
    ) -> Result<ObjectRef, ProjectError> {
        let target = self.require_target(target_name)?;
        let phase = self.require_frameworks_phase(target, target_name)?;
        self.existing_remote(repository_url, &requirement)
            .map_err(|err| match err {
                ProjectError::MultipleRemotePackages { .. } => ProjectError::MultipleRemotePackages {
                    product_name: product_name.to_string(),
                },
                other => other,
            })?;

        let package = self.add_remote_package_reference(repository_url, requirement)?;
        let dependency = match self.product_dependency_named(product_name, Some(package)) {
            Some(dependency) => dependency,
            None => self
                .objects
                .add(PackageProductDependency::new(product_name, Some(package))),
        };
        self.link_product(target, phase, dependency)?;
        info!(product = product_name, target = target_name, url = repository_url, "linked remote package product");
        Ok(package)
    }

    /// Create a product dependency and attach it to a target.
    pub fn add_swift_package_product_dependency(
        &mut self,
        product_name: &str,
        package: Option<ObjectRef>,
        target_name: &str,
    ) -> Result<ObjectRef, ProjectError> {
        let target = self.require_target(target_name)?;
        let dependency = self
            .objects
            .add(PackageProductDependency::new(product_name, package));
        self.target_mut(target)?
            .package_product_dependencies
            .push(dependency);
        Ok(dependency)
    }

    /// Wrap a product dependency in a build file inside the target's
    /// frameworks phase.
    pub fn add_swift_package_build_file(
        &mut self,
        dependency: ObjectRef,
        target_name: &str,
    ) -> Result<ObjectRef, ProjectError> {
        let target = self.require_target(target_name)?;
        let phase = self.require_frameworks_phase(target, target_name)?;
        if !self.objects.contains(dependency) {
            return Err(ProjectError::orphaned(ObjectKind::PackageProductDependency, dependency));
        }
        let build_file = self.objects.add(BuildFile::for_product(dependency));
        self.phase_mut(phase)?.files.push(build_file);
        Ok(build_file)
    }

    /// Re-add a previously removed remote reference as it was.
    ///
    /// A reference already registered for the same URL is returned instead.
    pub fn restore_remote_package(
        &mut self,
        remote: RemotePackageReference,
    ) -> Result<ObjectRef, ProjectError> {
        let url = remote.repository_url.clone().unwrap_or_default();
        if let Some(existing) = self.view().remote_package_with_url(&url)? {
            debug!(url = %url, "remote package reference already present");
            return Ok(existing);
        }
        let reference = self.objects.add(remote);
        self.project_mut()?.package_references.push(reference);
        info!(url = %url, "restored remote package reference");
        Ok(reference)
    }

    /// Drop a remote package from the package list and delete it.
    pub fn remove_remote_package(
        &mut self,
        package: ObjectRef,
    ) -> Result<Option<RemotePackageReference>, ProjectError> {
        if let Some(kind) = self.objects.kind_of(package) {
            if kind != ObjectKind::RemotePackageReference {
                return Err(ProjectError::orphaned(kind, package));
            }
        }
        self.project_mut()?.package_references.retain(|&p| p != package);
        match self.objects.delete(package) {
            Some(Object::RemotePackageReference(removed)) => {
                info!(url = removed.repository_url.as_deref().unwrap_or(""), "removed remote package reference");
                Ok(Some(removed))
            }
            _ => Ok(None),
        }
    }

    /// Drop a local package from the package list and delete it.
    pub fn remove_local_package(
        &mut self,
        package: ObjectRef,
    ) -> Result<Option<LocalPackageReference>, ProjectError> {
        if let Some(kind) = self.objects.kind_of(package) {
            if kind != ObjectKind::LocalPackageReference {
                return Err(ProjectError::orphaned(kind, package));
            }
        }
        self.project_mut()?.package_references.retain(|&p| p != package);
        match self.objects.delete(package) {
            Some(Object::LocalPackageReference(removed)) => {
                info!(path = %removed.relative_path, "removed local package reference");
                Ok(Some(removed))
            }
            _ => Ok(None),
        }
    }

    pub fn set_target_attributes(&mut self, target: ObjectRef, attributes: Fields) -> Result<(), ProjectError> {
        self.project_mut()?.target_attributes.insert(target, attributes);
        Ok(())
    }

    pub fn remove_target_attributes(&mut self, target: ObjectRef) -> Result<Option<Fields>, ProjectError> {
        Ok(self.project_mut()?.target_attributes.remove(&target))
    }

    pub fn clear_all_target_attributes(&mut self) -> Result<(), ProjectError> {
        self.project_mut()?.target_attributes.clear();
        Ok(())
    }

    /// Add a folder reference named `name` to `group`.
    pub fn add_folder_reference(
        &mut self,
        group: ObjectRef,
        name: &str,
        path: &str,
    ) -> Result<ObjectRef, ProjectError> {
        self.group_mut(group)?;
        let file = self.objects.add(FileReference::folder(name, path));
        self.group_mut(group)?.children.push(file);
        debug!(name, path, "added folder reference");
        Ok(file)
    }

    /// Detach `child` from `group` and delete it.
    ///
    /// Returns whether the child was present.
    pub fn remove_child(&mut self, group: ObjectRef, child: ObjectRef) -> Result<bool, ProjectError> {
        let children = &mut self.group_mut(group)?.children;
        let before = children.len();
        children.retain(|&c| c != child);
        let present = children.len() != before;
        if present {
            self.objects.delete(child);
        }
        Ok(present)
    }

    fn existing_remote(
        &self,
        repository_url: &str,
        requirement: &VersionRequirement,
    ) -> Result<Option<ObjectRef>, ProjectError> {
        let view = self.view();
        let Some(existing) = view.remote_package_with_url(repository_url)? else {
            return Ok(None);
        };
        let package = self
            .objects
            .require::<RemotePackageReference>(existing, ObjectKind::RemotePackageReference)?;
        if package.requirement.as_ref() == Some(requirement) {
            Ok(Some(existing))
        } else {
            Err(ProjectError::MultipleRemotePackages {
                product_name: package
                    .name()
                    .unwrap_or_else(|| repository_url.to_string()),
            })
        }
    }

    fn product_dependency_named(&self, product_name: &str, package: Option<ObjectRef>) -> Option<ObjectRef> {
        self.objects
            .of_kind(ObjectKind::PackageProductDependency)
            .find(|(_, object)| match object {
                Object::PackageProductDependency(dep) => {
                    dep.product_name == product_name
                        && (package.is_none() || dep.package == package)
                }
                _ => false,
            })
            .map(|(reference, _)| reference)
    }

    fn require_target(&self, target_name: &str) -> Result<ObjectRef, ProjectError> {
        self.view()
            .target_named(target_name)?
            .ok_or_else(|| ProjectError::TargetNotFound {
                target_name: target_name.to_string(),
            })
    }

    fn require_frameworks_phase(&self, target: ObjectRef, target_name: &str) -> Result<ObjectRef, ProjectError> {
        self.view()
            .frameworks_phase(target)
            .ok_or_else(|| ProjectError::FrameworksBuildPhaseNotFound {
                target_name: target_name.to_string(),
            })
    }

    /// Attach `dependency` to the target and add a build file for it.
    fn link_product(&mut self, target: ObjectRef, phase: ObjectRef, dependency: ObjectRef) -> Result<(), ProjectError> {
        let deps = &mut self.target_mut(target)?.package_product_dependencies;
        if !deps.contains(&dependency) {
            deps.push(dependency);
        }
        let build_file = self.objects.add(BuildFile::for_product(dependency));
        self.phase_mut(phase)?.files.push(build_file);
        Ok(())
    }

    fn target_mut(&mut self, target: ObjectRef) -> Result<&mut Target, ProjectError> {
        self.objects.require_mut::<Target>(target, ObjectKind::NativeTarget)
    }

    fn phase_mut(&mut self, phase: ObjectRef) -> Result<&mut BuildPhase, ProjectError> {
        self.objects
            .require_mut::<BuildPhase>(phase, ObjectKind::FrameworksBuildPhase)
    }

    fn group_mut(&mut self, group: ObjectRef) -> Result<&mut Group, ProjectError> {
        self.objects.require_mut::<Group>(group, ObjectKind::Group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::objects::SourceTree;
    use crate::test_support::fixtures::{app_project, App};

    fn nio() -> &'static str {
        "https://github.com/apple/swift-nio.git"
    }

    // =========================================================================
    // Remote packages
    // =========================================================================

    #[test]
    fn test_add_remote_package_is_idempotent() {
        let App { mut objects, root, .. } = app_project();
        let before = objects.len();
        let mut editor = ProjectEditor::new(&mut objects, root);

        let first = editor
            .add_remote_package_reference(nio(), VersionRequirement::up_to_next_major("2.0.0"))
            .unwrap();
        let second = editor
            .add_remote_package_reference(nio(), VersionRequirement::up_to_next_major("2.0.0"))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(editor.view().remote_packages().unwrap(), vec![first]);
        assert_eq!(objects.len(), before + 1);
    }

    #[test]
    fn test_conflicting_remote_requirement_leaves_registry_unchanged() {
        let App { mut objects, root, .. } = app_project();
        let mut editor = ProjectEditor::new(&mut objects, root);
        let original = editor
            .add_remote_package_reference(nio(), VersionRequirement::up_to_next_major("2.0.0"))
            .unwrap();
        let snapshot = editor.objects().clone();

        let err = editor
            .add_remote_package_reference(nio(), VersionRequirement::exact("2.1.0"))
            .unwrap_err();

        assert_eq!(
            err,
            ProjectError::MultipleRemotePackages {
                product_name: "swift-nio".to_string()
            }
        );
        assert_eq!(objects.len(), snapshot.len());
        let kept = objects
            .get_as::<RemotePackageReference>(original)
            .unwrap();
        assert_eq!(kept.requirement, Some(VersionRequirement::up_to_next_major("2.0.0")));
    }

    #[test]
    fn test_add_swift_package_links_product() {
        let App { mut objects, root, target, frameworks, .. } = app_project();
        let mut editor = ProjectEditor::new(&mut objects, root);

        let package = editor
            .add_swift_package(nio(), "NIO", VersionRequirement::up_to_next_major("2.0.0"), "App")
            .unwrap();

        let target = objects.get_as::<Target>(target).unwrap();
        assert_eq!(target.package_product_dependencies.len(), 1);
        let dependency = objects
            .get_as::<PackageProductDependency>(target.package_product_dependencies[0])
            .unwrap();
        assert_eq!(dependency.product_name, "NIO");
        assert_eq!(dependency.package, Some(package));

        let phase = objects.get_as::<BuildPhase>(frameworks).unwrap();
        assert_eq!(phase.files.len(), 1);
        let build_file = objects.get_as::<BuildFile>(phase.files[0]).unwrap();
        assert_eq!(build_file.product_ref, Some(target.package_product_dependencies[0]));
    }

    #[test]
    fn test_add_swift_package_conflict_is_atomic() {
        let App { mut objects, root, .. } = app_project();
        let mut editor = ProjectEditor::new(&mut objects, root);
        editor
            .add_swift_package(nio(), "NIO", VersionRequirement::up_to_next_major("2.0.0"), "App")
            .unwrap();
        let before = editor.objects().len();

        let err = editor
            .add_swift_package(nio(), "NIOHTTP1", VersionRequirement::branch("main"), "App")
            .unwrap_err();

        assert_eq!(
            err,
            ProjectError::MultipleRemotePackages {
                product_name: "NIOHTTP1".to_string()
            }
        );
        assert_eq!(objects.len(), before);
    }

    #[test]
    fn test_add_swift_package_unknown_target() {
        let App { mut objects, root, .. } = app_project();
        let before = objects.len();
        let err = ProjectEditor::new(&mut objects, root)
            .add_swift_package(nio(), "NIO", VersionRequirement::up_to_next_major("2.0.0"), "Nope")
            .unwrap_err();
        assert!(matches!(err, ProjectError::TargetNotFound { .. }));
        assert_eq!(objects.len(), before);
    }

    #[test]
    fn test_remove_remote_package() {
        let App { mut objects, root, .. } = app_project();
        let mut editor = ProjectEditor::new(&mut objects, root);
        let package = editor
            .add_remote_package_reference(nio(), VersionRequirement::up_to_next_major("2.0.0"))
            .unwrap();

        let removed = editor.remove_remote_package(package).unwrap().unwrap();
        assert_eq!(removed.repository_url.as_deref(), Some(nio()));
        assert!(editor.view().remote_packages().unwrap().is_empty());
        assert!(editor.remove_remote_package(package).unwrap().is_none());
    }

    #[test]
    fn test_restore_remote_package() {
        let App { mut objects, root, .. } = app_project();
        let mut editor = ProjectEditor::new(&mut objects, root);

        let restored = editor
            .restore_remote_package(RemotePackageReference::new(nio(), None))
            .unwrap();
        let again = editor
            .restore_remote_package(RemotePackageReference::new(nio(), None))
            .unwrap();

        assert_eq!(restored, again);
        assert_eq!(editor.view().remote_packages().unwrap(), vec![restored]);
        let package = editor
            .view()
            .objects()
            .get_as::<RemotePackageReference>(restored)
            .unwrap();
        assert!(package.requirement.is_none());
    }

    // =========================================================================
    // Local packages
    // =========================================================================

    #[test]
    fn test_add_local_package_reference_is_idempotent() {
        let App { mut objects, root, .. } = app_project();
        let mut editor = ProjectEditor::new(&mut objects, root);

        let first = editor.add_local_package_reference("Packages/Foo").unwrap();
        let count = editor.objects().len();
        let second = editor.add_local_package_reference("Packages/Foo").unwrap();

        assert_eq!(first, second);
        assert_eq!(editor.objects().len(), count);
        assert_eq!(editor.view().local_packages().unwrap(), vec![first]);
    }

    #[test]
    fn test_add_local_swift_package_missing_target() {
        let App { mut objects, root, .. } = app_project();
        let before = objects.len();

        let err = ProjectEditor::new(&mut objects, root)
            .add_local_swift_package("Packages/Foo", "Foo", "Missing", true)
            .unwrap_err();

        assert_eq!(
            err,
            ProjectError::TargetNotFound {
                target_name: "Missing".to_string()
            }
        );
        assert_eq!(objects.len(), before);
    }

    #[test]
    fn test_add_local_swift_package_rejects_absolute_path() {
        let App { mut objects, root, .. } = app_project();
        let err = ProjectEditor::new(&mut objects, root)
            .add_local_swift_package("/tmp/Foo", "Foo", "App", false)
            .unwrap_err();
        assert!(matches!(err, ProjectError::PathIsAbsolute { .. }));
    }

    #[test]
    fn test_add_local_swift_package_with_file_reference() {
        let App { mut objects, root, main_group, frameworks, .. } = app_project();
        let mut editor = ProjectEditor::new(&mut objects, root);

        let dependency = editor
            .add_local_swift_package("Packages/Foo", "Foo", "App", true)
            .unwrap();
        let file = editor.view().file_named(main_group, "Foo").unwrap().unwrap();

        // A second link of the same product and path reuses the dependency.
        let again = editor
            .add_local_swift_package("Packages/Foo", "Foo", "App", false)
            .unwrap();
        assert_eq!(dependency, again);

        let file = objects.get_as::<FileReference>(file).unwrap();
        assert_eq!(file.path.as_deref(), Some("Packages/Foo"));
        assert_eq!(file.source_tree, Some(SourceTree::Group));
        assert_eq!(objects.get_as::<BuildPhase>(frameworks).unwrap().files.len(), 2);
    }

    #[test]
    fn test_add_local_swift_package_different_path_conflicts() {
        let App { mut objects, root, .. } = app_project();
        let mut editor = ProjectEditor::new(&mut objects, root);
        editor
            .add_local_swift_package("Packages/Foo", "Foo", "App", true)
            .unwrap();
        let before = editor.objects().len();

        let err = editor
            .add_local_swift_package("Vendor/Foo", "Foo", "App", true)
            .unwrap_err();

        assert!(matches!(err, ProjectError::MultipleLocalPackages { .. }));
        assert_eq!(objects.len(), before);
    }

    #[test]
    fn test_missing_frameworks_phase() {
        let App { mut objects, root, target, frameworks, .. } = app_project();
        objects
            .get_as_mut::<Target>(target)
            .unwrap()
            .build_phases
            .retain(|&p| p != frameworks);
        let before = objects.len();

        let err = ProjectEditor::new(&mut objects, root)
            .add_local_swift_package("Packages/Foo", "Foo", "App", true)
            .unwrap_err();

        assert!(matches!(err, ProjectError::FrameworksBuildPhaseNotFound { .. }));
        assert_eq!(objects.len(), before);
    }

    #[test]
    fn test_product_dependency_and_build_file() {
        let App { mut objects, root, frameworks, .. } = app_project();
        let mut editor = ProjectEditor::new(&mut objects, root);

        let dependency = editor
            .add_swift_package_product_dependency("Logging", None, "App")
            .unwrap();
        let build_file = editor.add_swift_package_build_file(dependency, "App").unwrap();

        assert!(objects.get_as::<BuildPhase>(frameworks).unwrap().files.contains(&build_file));
    }

    // =========================================================================
    // Attributes and groups
    // =========================================================================

    #[test]
    fn test_target_attributes() {
        let App { mut objects, root, target, .. } = app_project();
        let mut editor = ProjectEditor::new(&mut objects, root);
        let mut attributes = Fields::new();
        attributes.insert("CreatedOnToolsVersion".to_string(), "15.0".into());

        editor.set_target_attributes(target, attributes.clone()).unwrap();
        assert_eq!(editor.view().target_attributes(target).unwrap(), Some(&attributes));

        assert_eq!(editor.remove_target_attributes(target).unwrap(), Some(attributes.clone()));
        editor.set_target_attributes(target, attributes).unwrap();
        editor.clear_all_target_attributes().unwrap();
        assert_eq!(editor.view().target_attributes(target).unwrap(), None);
    }

    #[test]
    fn test_folder_reference_lifecycle() {
        let App { mut objects, root, main_group, .. } = app_project();
        let mut editor = ProjectEditor::new(&mut objects, root);

        let folder = editor
            .add_folder_reference(main_group, "Foo", "../Packages/Foo")
            .unwrap();
        assert_eq!(editor.view().file_named(main_group, "Foo").unwrap(), Some(folder));

        assert!(editor.remove_child(main_group, folder).unwrap());
        assert!(!editor.remove_child(main_group, folder).unwrap());
        assert_eq!(editor.view().file_named(main_group, "Foo").unwrap(), None);
        assert!(!objects.contains(folder));
    }

    #[test]
    fn test_deleting_referenced_object_is_local() {
        let App { mut objects, root, main_group, .. } = app_project();
        let folder = ProjectEditor::new(&mut objects, root)
            .add_folder_reference(main_group, "Foo", "Foo")
            .unwrap();

        objects.delete(folder);

        assert!(objects.get(folder).is_none());
        let group = objects.get_as::<Group>(main_group).unwrap();
        assert!(group.children.contains(&folder));
        assert_eq!(
            ProjectView::new(&objects, root).file_named(main_group, "Foo").unwrap(),
            None
        );
    }
}
