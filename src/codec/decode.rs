//! Text to object graph.

use tracing::debug;

use crate::codec::plist;
use crate::core::error::ProjectError;
use crate::core::kind::ObjectKind;
use crate::core::object::Object;
use crate::core::objects::*;
use crate::core::pbxproj::{PbxProj, DEFAULT_ARCHIVE_VERSION, DEFAULT_OBJECT_VERSION};
use crate::core::reference::ObjectRef;
use crate::core::registry::Objects;
use crate::core::value::{Fields, PlistValue};

const DOCUMENT: &str = "PBXProj";

/// Decode a complete `project.pbxproj` document.
///
/// Fails as a whole on malformed text, an unknown `isa` or a missing
/// required field. Keys are interned before any record is decoded, so a
/// record may mention a key defined later in the file.
pub fn decode(text: &str) -> Result<PbxProj, ProjectError> {
    let mut document = plist::parse(text)?
        .into_dictionary()
        .ok_or_else(|| ProjectError::InvalidValue {
            field: "document".to_string(),
            reason: "the top level must be a dictionary".to_string(),
        })?;

    let archive_version = take_string(&mut document, "archiveVersion")?
        .unwrap_or_else(|| DEFAULT_ARCHIVE_VERSION.to_string());
    let object_version = take_string(&mut document, "objectVersion")?
        .unwrap_or_else(|| DEFAULT_OBJECT_VERSION.to_string());
    let classes = match document.remove("classes") {
        Some(value) => expect_dictionary("classes", value)?,
        None => Fields::new(),
    };
    let records = match document.remove("objects") {
        Some(value) => expect_dictionary("objects", value)?,
        None => return Err(ProjectError::missing_field(DOCUMENT, "objects")),
    };
    let root_key = take_string(&mut document, "rootObject")?
        .ok_or_else(|| ProjectError::missing_field(DOCUMENT, "rootObject"))?;

    let mut objects = Objects::new();
    for key in records.keys() {
        objects.get_or_create_reference(key);
    }

    for (key, value) in records {
        let fields = expect_dictionary(&key, value)?;
        let reference = objects.get_or_create_reference(&key);
        let object = decode_record(&mut objects, fields)?;
        objects.insert(reference, object)?;
    }

    let root = objects
        .references()
        .lookup(&root_key)
        .ok_or(ProjectError::MissingRootObject)?;
    debug!(objects = objects.len(), "decoded project document");
    PbxProj::from_objects(objects, root, archive_version, object_version, classes)
}

fn decode_record(objects: &mut Objects, mut fields: Fields) -> Result<Object, ProjectError> {
    let isa = match fields.remove("isa") {
        Some(PlistValue::String(isa)) => isa,
        Some(other) => {
            return Err(ProjectError::InvalidValue {
                field: "isa".to_string(),
                reason: format!("expected a string, found {}", other.type_name()),
            })
        }
        None => return Err(ProjectError::missing_field("object", "isa")),
    };
    let kind = ObjectKind::from_isa(&isa).ok_or(ProjectError::UnknownKind { isa })?;
    let mut record = Record {
        isa: kind.isa(),
        fields,
        objects,
    };

    let object = match kind {
        ObjectKind::BuildFile => Object::BuildFile(BuildFile {
            file_ref: record.reference("fileRef")?,
            product_ref: record.reference("productRef")?,
            settings: record.dictionary("settings")?,
            platform_filter: record.string("platformFilter")?,
            extra: record.finish(),
        }),
        ObjectKind::NativeTarget => Object::NativeTarget(record.target()?),
        ObjectKind::LegacyTarget => Object::LegacyTarget(record.target()?),
        ObjectKind::AggregateTarget => Object::AggregateTarget(record.target()?),
        ObjectKind::ContainerItemProxy => Object::ContainerItemProxy(ContainerItemProxy {
            container_portal: record.reference("containerPortal")?,
            proxy_type: record.string("proxyType")?,
            remote_global_id: record.string("remoteGlobalIDString")?,
            remote_info: record.string("remoteInfo")?,
            extra: record.finish(),
        }),
        ObjectKind::Group => Object::Group(record.group()?),
        ObjectKind::VariantGroup => Object::VariantGroup(record.group()?),
        ObjectKind::VersionGroup => {
            let current_version = record.reference("currentVersion")?;
            let version_group_type = record.string("versionGroupType")?;
            Object::VersionGroup(VersionGroup {
                group: record.group()?,
                current_version,
                version_group_type,
            })
        }
        ObjectKind::ConfigurationList => Object::ConfigurationList(ConfigurationList {
            build_configurations: record.references("buildConfigurations")?,
            default_configuration_is_visible: record.string("defaultConfigurationIsVisible")?,
            default_configuration_name: record.string("defaultConfigurationName")?,
            extra: record.finish(),
        }),
        ObjectKind::BuildConfiguration => Object::BuildConfiguration(BuildConfiguration {
            name: record.required_string("name")?,
            build_settings: record.dictionary("buildSettings")?.unwrap_or_default(),
            base_configuration_reference: record.reference("baseConfigurationReference")?,
            extra: record.finish(),
        }),
        ObjectKind::TargetDependency => Object::TargetDependency(TargetDependency {
            name: record.string("name")?,
            platform_filter: record.string("platformFilter")?,
            target: record.reference("target")?,
            target_proxy: record.reference("targetProxy")?,
            product: record.reference("productRef")?,
            extra: record.finish(),
        }),
        ObjectKind::FileReference => Object::FileReference(FileReference {
            name: record.string("name")?,
            path: record.string("path")?,
            source_tree: record.source_tree()?,
            last_known_file_type: record.string("lastKnownFileType")?,
            explicit_file_type: record.string("explicitFileType")?,
            file_encoding: record.string("fileEncoding")?,
            include_in_index: record.string("includeInIndex")?,
            extra: record.finish(),
        }),
        ObjectKind::Project => Object::Project(record.project()?),
        ObjectKind::ReferenceProxy => Object::ReferenceProxy(ReferenceProxy {
            name: record.string("name")?,
            path: record.string("path")?,
            file_type: record.string("fileType")?,
            source_tree: record.source_tree()?,
            remote_ref: record.reference("remoteRef")?,
            extra: record.finish(),
        }),
        ObjectKind::BuildRule => Object::BuildRule(BuildRule {
            name: record.string("name")?,
            compiler_spec: record.string("compilerSpec")?,
            file_type: record.string("fileType")?,
            file_patterns: record.string("filePatterns")?,
            is_editable: record.string("isEditable")?,
            output_files: record.strings("outputFiles")?,
            script: record.string("script")?,
            extra: record.finish(),
        }),
        ObjectKind::CopyFilesBuildPhase => {
            let dst_path = record.string("dstPath")?;
            let dst_subfolder_spec = record.string("dstSubfolderSpec")?;
            Object::CopyFilesBuildPhase(CopyFilesBuildPhase {
                phase: record.build_phase()?,
                dst_path,
                dst_subfolder_spec,
            })
        }
        ObjectKind::ShellScriptBuildPhase => {
            let shell_path = record.string("shellPath")?;
            let shell_script = record.string("shellScript")?;
            let input_paths = record.strings("inputPaths")?;
            let output_paths = record.strings("outputPaths")?;
            let input_file_list_paths = record.strings("inputFileListPaths")?;
            let output_file_list_paths = record.strings("outputFileListPaths")?;
            Object::ShellScriptBuildPhase(ShellScriptBuildPhase {
                phase: record.build_phase()?,
                shell_path,
                shell_script,
                input_paths,
                output_paths,
                input_file_list_paths,
                output_file_list_paths,
            })
        }
        ObjectKind::ResourcesBuildPhase => Object::ResourcesBuildPhase(record.build_phase()?),
        ObjectKind::FrameworksBuildPhase => Object::FrameworksBuildPhase(record.build_phase()?),
        ObjectKind::HeadersBuildPhase => Object::HeadersBuildPhase(record.build_phase()?),
        ObjectKind::SourcesBuildPhase => Object::SourcesBuildPhase(record.build_phase()?),
        ObjectKind::RezBuildPhase => Object::RezBuildPhase(record.build_phase()?),
        ObjectKind::RemotePackageReference => {
            let requirement = match record.dictionary("requirement")? {
                Some(fields) => Some(VersionRequirement::from_fields(&fields)?),
                None => None,
            };
            Object::RemotePackageReference(RemotePackageReference {
                repository_url: record.string("repositoryURL")?,
                requirement,
                extra: record.finish(),
            })
        }
        ObjectKind::LocalPackageReference => Object::LocalPackageReference(LocalPackageReference {
            relative_path: record.required_string("relativePath")?,
            extra: record.finish(),
        }),
        ObjectKind::PackageProductDependency => {
            Object::PackageProductDependency(PackageProductDependency {
                product_name: record.required_string("productName")?,
                package: record.reference("package")?,
                extra: record.finish(),
            })
        }
        ObjectKind::SynchronizedRootGroup => {
            Object::SynchronizedRootGroup(SynchronizedRootGroup {
                name: record.string("name")?,
                path: record.string("path")?,
                source_tree: record.source_tree()?,
                exceptions: record.references("exceptions")?,
                explicit_file_types: record.dictionary("explicitFileTypes")?,
                explicit_folders: record.strings("explicitFolders")?,
                extra: record.finish(),
            })
        }
        ObjectKind::BuildFileExceptionSet => Object::BuildFileExceptionSet(BuildFileExceptionSet {
            target: record.reference("target")?,
            membership_exceptions: record.strings("membershipExceptions")?,
            extra: record.finish(),
        }),
        ObjectKind::MembershipExceptionSet => {
            Object::MembershipExceptionSet(MembershipExceptionSet {
                build_phase: record.reference("buildPhase")?,
                membership_exceptions: record.strings("membershipExceptions")?,
                extra: record.finish(),
            })
        }
    };
    Ok(object)
}

/// Field reader for one object record.
///
/// Every accessor removes the field it reads; whatever is left at the end
/// becomes the object's `extra`.
struct Record<'a> {
    isa: &'static str,
    fields: Fields,
    objects: &'a mut Objects,
}

impl Record<'_> {
    fn string(&mut self, key: &str) -> Result<Option<String>, ProjectError> {
        take_string(&mut self.fields, key)
    }

    fn required_string(&mut self, key: &str) -> Result<String, ProjectError> {
        self.string(key)?
            .ok_or_else(|| ProjectError::missing_field(self.isa, key))
    }

    fn strings(&mut self, key: &str) -> Result<Vec<String>, ProjectError> {
        match self.fields.remove(key) {
            None => Ok(Vec::new()),
            Some(PlistValue::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    PlistValue::String(s) => Ok(s),
                    other => Err(invalid(key, "a list of strings", &other)),
                })
                .collect(),
            Some(other) => Err(invalid(key, "an array", &other)),
        }
    }

    fn dictionary(&mut self, key: &str) -> Result<Option<Fields>, ProjectError> {
        self.fields
            .remove(key)
            .map(|value| expect_dictionary(key, value))
            .transpose()
    }

    fn reference(&mut self, key: &str) -> Result<Option<ObjectRef>, ProjectError> {
        Ok(self
            .string(key)?
            .map(|k| self.objects.get_or_create_reference(&k)))
    }

    fn required_reference(&mut self, key: &str) -> Result<ObjectRef, ProjectError> {
        self.reference(key)?
            .ok_or_else(|| ProjectError::missing_reference(self.isa, key))
    }

    fn references(&mut self, key: &str) -> Result<Vec<ObjectRef>, ProjectError> {
        let keys = self.strings(key)?;
        Ok(keys
            .iter()
            .map(|k| self.objects.get_or_create_reference(k))
            .collect())
    }

    fn source_tree(&mut self) -> Result<Option<SourceTree>, ProjectError> {
        Ok(self.string("sourceTree")?.as_deref().map(SourceTree::parse))
    }

    fn target(&mut self) -> Result<Target, ProjectError> {
        Ok(Target {
            name: self.required_string("name")?,
            build_configuration_list: self.reference("buildConfigurationList")?,
            build_phases: self.references("buildPhases")?,
            build_rules: self.references("buildRules")?,
            dependencies: self.references("dependencies")?,
            product_name: self.string("productName")?,
            product_reference: self.reference("productReference")?,
            product_type: self.string("productType")?,
            package_product_dependencies: self.references("packageProductDependencies")?,
            synchronized_groups: self.references("fileSystemSynchronizedGroups")?,
            extra: self.finish(),
        })
    }

    fn group(&mut self) -> Result<Group, ProjectError> {
        Ok(Group {
            children: self.references("children")?,
            name: self.string("name")?,
            path: self.string("path")?,
            source_tree: self.source_tree()?,
            extra: self.finish(),
        })
    }

    fn build_phase(&mut self) -> Result<BuildPhase, ProjectError> {
        Ok(BuildPhase {
            files: self.references("files")?,
            name: self.string("name")?,
            build_action_mask: self.string("buildActionMask")?,
            run_only_for_deployment_postprocessing: self
                .string("runOnlyForDeploymentPostprocessing")?,
            extra: self.finish(),
        })
    }

    fn project(&mut self) -> Result<Project, ProjectError> {
        let build_configuration_list = self.required_reference("buildConfigurationList")?;
        let main_group = self.required_reference("mainGroup")?;
        let mut project = Project::new("", build_configuration_list, main_group);

        let mut attributes = self.dictionary("attributes")?.unwrap_or_default();
        if let Some(value) = attributes.remove("TargetAttributes") {
            for (key, value) in expect_dictionary("TargetAttributes", value)? {
                let target = self.objects.get_or_create_reference(&key);
                project
                    .target_attributes
                    .insert(target, expect_dictionary(&key, value)?);
            }
        }
        project.attributes = attributes;

        project.compatibility_version = self.string("compatibilityVersion")?;
        project.preferred_project_object_version =
            self.string("preferredProjectObjectVersion")?;
        project.minimized_project_reference_proxies =
            self.string("minimizedProjectReferenceProxies")?;
        project.development_region = self.string("developmentRegion")?;
        project.has_scanned_for_encodings = self.string("hasScannedForEncodings")?;
        project.known_regions = self.strings("knownRegions")?;
        project.products_group = self.reference("productRefGroup")?;
        project.project_dir_path = self.string("projectDirPath")?.unwrap_or_default();
        project.project_references = self.project_references()?;
        project.project_roots = match self.fields.contains_key("projectRoots") {
            true => self.strings("projectRoots")?,
            false => self.string("projectRoot")?.into_iter().collect(),
        };
        project.targets = self.references("targets")?;
        project.package_references = self.references("packageReferences")?;
        project.extra = self.finish();
        Ok(project)
    }

    fn project_references(&mut self) -> Result<Vec<ProjectReference>, ProjectError> {
        let items = match self.fields.remove("projectReferences") {
            None => return Ok(Vec::new()),
            Some(PlistValue::Array(items)) => items,
            Some(other) => return Err(invalid("projectReferences", "an array", &other)),
        };
        let mut references = Vec::with_capacity(items.len());
        for item in items {
            let mut pair = expect_dictionary("projectReferences", item)?;
            let mut resolve = |key: &str| -> Result<ObjectRef, ProjectError> {
                let k = take_string(&mut pair, key)?
                    .ok_or_else(|| ProjectError::missing_reference(self.isa, key))?;
                Ok(self.objects.get_or_create_reference(&k))
            };
            let product_group = resolve("ProductGroup")?;
            let project_ref = resolve("ProjectRef")?;
            references.push(ProjectReference {
                product_group,
                project_ref,
            });
        }
        Ok(references)
    }

    fn finish(&mut self) -> Fields {
        std::mem::take(&mut self.fields)
    }
}

fn take_string(fields: &mut Fields, key: &str) -> Result<Option<String>, ProjectError> {
    match fields.remove(key) {
        None => Ok(None),
        Some(PlistValue::String(s)) => Ok(Some(s)),
        Some(other) => Err(invalid(key, "a string", &other)),
    }
}

fn expect_dictionary(field: &str, value: PlistValue) -> Result<Fields, ProjectError> {
    match value {
        PlistValue::Dictionary(fields) => Ok(fields),
        other => Err(invalid(field, "a dictionary", &other)),
    }
}

fn invalid(field: &str, expected: &str, found: &PlistValue) -> ProjectError {
    ProjectError::InvalidValue {
        field: field.to_string(),
        reason: format!("expected {}, found {}", expected, found.type_name()),
    }
}
