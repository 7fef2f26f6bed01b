//! The project document.

use tracing::warn;

use crate::codec;
use crate::core::editor::{ProjectEditor, ProjectView};
use crate::core::error::ProjectError;
use crate::core::objects::{
    BuildConfiguration, ConfigurationList, Group, Project, SourceTree, VersionRequirement,
};
use crate::core::reference::ObjectRef;
use crate::core::registry::{ObjectRegistry, Objects};
use crate::core::value::Fields;

/// Archive version written by current Xcode releases.
pub const DEFAULT_ARCHIVE_VERSION: &str = "1";

/// Object version written for new documents.
pub const DEFAULT_OBJECT_VERSION: &str = "56";

/// An open `project.pbxproj` document.
///
/// The document owns its registry; every query and edit goes through the
/// registry lock, so a `PbxProj` can be shared between threads behind an
/// `Arc`.
#[derive(Debug)]
pub struct PbxProj {
    registry: ObjectRegistry,
    root: ObjectRef,
    archive_version: String,
    object_version: String,
    classes: Fields,
}

impl PbxProj {
    /// Create a document holding an empty project with Debug and Release
    /// configurations.
    pub fn new(name: &str) -> Self {
        let mut objects = Objects::new();
        let debug = objects.add(BuildConfiguration {
            name: "Debug".to_string(),
            ..Default::default()
        });
        let release = objects.add(BuildConfiguration {
            name: "Release".to_string(),
            ..Default::default()
        });
        let list = objects.add(ConfigurationList {
            build_configurations: vec![debug, release],
            default_configuration_is_visible: Some("0".to_string()),
            default_configuration_name: Some("Release".to_string()),
            ..Default::default()
        });
        let products = objects.add(Group {
            name: Some("Products".to_string()),
            source_tree: Some(SourceTree::Group),
            ..Default::default()
        });
        let main_group = objects.add(Group {
            children: vec![products],
            source_tree: Some(SourceTree::Group),
            ..Default::default()
        });
        let mut project = Project::new(name, list, main_group);
        project.products_group = Some(products);
        let root = objects.add(project);

        PbxProj {
            registry: ObjectRegistry::from_objects(objects),
            root,
            archive_version: DEFAULT_ARCHIVE_VERSION.to_string(),
            object_version: DEFAULT_OBJECT_VERSION.to_string(),
            classes: Fields::new(),
        }
    }

    /// Assemble a document from decoded parts.
    pub fn from_objects(
        objects: Objects,
        root: ObjectRef,
        archive_version: String,
        object_version: String,
        classes: Fields,
    ) -> Result<Self, ProjectError> {
        if objects.get_as::<Project>(root).is_none() {
            return Err(ProjectError::MissingRootObject);
        }
        Ok(PbxProj {
            registry: ObjectRegistry::from_objects(objects),
            root,
            archive_version,
            object_version,
            classes,
        })
    }

    /// Decode a document from its text form.
    pub fn parse(text: &str) -> Result<Self, ProjectError> {
        codec::decode(text)
    }

    /// Encode the document, assigning keys to new objects first.
    pub fn to_text(&self) -> Result<String, ProjectError> {
        codec::encode(self)
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn root(&self) -> ObjectRef {
        self.root
    }

    pub fn archive_version(&self) -> &str {
        &self.archive_version
    }

    pub fn object_version(&self) -> &str {
        &self.object_version
    }

    pub fn classes(&self) -> &Fields {
        &self.classes
    }

    /// Run a query against the root project under the lock.
    pub fn read<R>(&self, f: impl FnOnce(ProjectView<'_>) -> R) -> R {
        let root = self.root;
        self.registry.read(|objects| f(ProjectView::new(objects, root)))
    }

    /// Run a compound edit as one transaction.
    ///
    /// If `f` fails, every change it made is rolled back. Queries made on
    /// this document while `f` runs see the state before the edit.
    pub fn edit<R>(
        &self,
        f: impl FnOnce(&mut ProjectEditor<'_>) -> Result<R, ProjectError>,
    ) -> Result<R, ProjectError> {
        let root = self.root;
        // Each edit clones the whole store; documents are small enough.
        let result = self
            .registry
            .transaction(|objects| f(&mut ProjectEditor::new(objects, root)));
        if let Err(err) = &result {
            warn!(error = %err, "rolling back failed project edit");
        }
        result
    }

    /// The project's display name.
    pub fn name(&self) -> Result<String, ProjectError> {
        self.read(|view| view.project().map(|p| p.name.clone()))
    }

    /// Rename the project; used when loading from a `.xcodeproj` bundle.
    pub fn set_name(&self, name: &str) -> Result<(), ProjectError> {
        self.edit(|editor| {
            let root = editor.view().root();
            editor
                .objects()
                .get_as_mut::<Project>(root)
                .ok_or(ProjectError::MissingRootObject)?
                .name = name.to_string();
            Ok(())
        })
    }

    pub fn main_group(&self) -> Result<ObjectRef, ProjectError> {
        self.read(|view| view.main_group())
    }

    pub fn targets(&self) -> Result<Vec<ObjectRef>, ProjectError> {
        self.read(|view| view.targets())
    }

    pub fn remote_packages(&self) -> Result<Vec<ObjectRef>, ProjectError> {
        self.read(|view| view.remote_packages())
    }

    pub fn local_packages(&self) -> Result<Vec<ObjectRef>, ProjectError> {
        self.read(|view| view.local_packages())
    }

    pub fn target_attributes(&self, target: ObjectRef) -> Result<Option<Fields>, ProjectError> {
        self.read(|view| view.target_attributes(target).map(|a| a.cloned()))
    }

    pub fn add_remote_package_reference(
        &self,
        repository_url: &str,
        requirement: VersionRequirement,
    ) -> Result<ObjectRef, ProjectError> {
        self.edit(|editor| editor.add_remote_package_reference(repository_url, requirement))
    }

    pub fn add_local_package_reference(&self, relative_path: &str) -> Result<ObjectRef, ProjectError> {
        self.edit(|editor| editor.add_local_package_reference(relative_path))
    }

    pub fn add_local_swift_package(
        &self,
        path: &str,
        product_name: &str,
        target_name: &str,
        add_file_reference: bool,
    ) -> Result<ObjectRef, ProjectError> {
        self.edit(|editor| {
            editor.add_local_swift_package(path, product_name, target_name, add_file_reference)
        })
    }

    pub fn add_swift_package(
        &self,
        repository_url: &str,
        product_name: &str,
        requirement: VersionRequirement,
        target_name: &str,
    ) -> Result<ObjectRef, ProjectError> {
        self.edit(|editor| {
            editor.add_swift_package(repository_url, product_name, requirement, target_name)
        })
    }

    pub fn set_target_attributes(&self, target: ObjectRef, attributes: Fields) -> Result<(), ProjectError> {
        self.edit(|editor| editor.set_target_attributes(target, attributes))
    }

    pub fn remove_target_attributes(&self, target: ObjectRef) -> Result<Option<Fields>, ProjectError> {
        self.edit(|editor| editor.remove_target_attributes(target))
    }

    pub fn clear_all_target_attributes(&self) -> Result<(), ProjectError> {
        self.edit(|editor| editor.clear_all_target_attributes())
    }
}

impl Drop for PbxProj {
    fn drop(&mut self) {
        if let Err(err) = self.registry.write(Objects::invalidate_references) {
            warn!(error = %err, "failed to invalidate references on drop");
        }
    }
}
