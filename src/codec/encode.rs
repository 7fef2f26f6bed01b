//! Object graph to text.
//!
//! Output follows the layout the IDE writes: objects grouped into
//! per-`isa` sections sorted by name, records sorted by key, `isa` first
//! inside each record and every other field in key order. References carry
//! a `/* comment */` naming their target. Comments are never read back.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::codec::{ids, plist};
use crate::core::error::ProjectError;
use crate::core::kind::ObjectKind;
use crate::core::object::Object;
use crate::core::objects::*;
use crate::core::pbxproj::PbxProj;
use crate::core::reference::ObjectRef;
use crate::core::registry::Objects;
use crate::core::value::{Fields, PlistValue};

const HEADER: &str = "// !$*UTF8*$!";

/// Encode a document, assigning keys to any object that lacks one.
pub fn encode(proj: &PbxProj) -> Result<String, ProjectError> {
    let root = proj.root();
    proj.registry().write(|objects| {
        let assigned = ids::assign_missing_keys(objects, root);
        let text = Encoder::new(objects).document(proj, root)?;
        debug!(assigned, bytes = text.len(), "encoded project document");
        Ok(text)
    })?
}

/// A value ready to be written: a pre-rendered token or a container.
enum Node {
    Token(String),
    Array(Vec<Node>),
    Dict(BTreeMap<String, Node>),
}

impl From<&PlistValue> for Node {
    fn from(value: &PlistValue) -> Self {
        match value {
            PlistValue::String(s) => Node::Token(plist::quote(s)),
            PlistValue::Array(items) => Node::Array(items.iter().map(Node::from).collect()),
            PlistValue::Dictionary(fields) => dict(fields),
        }
    }
}

fn dict(fields: &Fields) -> Node {
    Node::Dict(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), Node::from(v)))
            .collect(),
    )
}

struct Encoder<'a> {
    objects: &'a Objects,
    /// Build file to the display name of the phase holding it.
    phase_of: HashMap<ObjectRef, String>,
    /// Configuration list to its owner's `isa` and name.
    list_owner: HashMap<ObjectRef, (&'static str, String)>,
}

impl<'a> Encoder<'a> {
    fn new(objects: &'a Objects) -> Self {
        let mut phase_of = HashMap::new();
        let mut list_owner = HashMap::new();
        objects.for_each(|_, object| {
            if let Some(phase) = as_build_phase(object) {
                let name = phase_name(object);
                for file in &phase.files {
                    phase_of.insert(*file, name.clone());
                }
            }
            let owned_list = match object {
                Object::Project(project) => Some(project.build_configuration_list),
                Object::NativeTarget(target)
                | Object::LegacyTarget(target)
                | Object::AggregateTarget(target) => target.build_configuration_list,
                _ => None,
            };
            if let Some(list) = owned_list {
                list_owner.insert(list, (object.kind().isa(), object.name().unwrap_or_default()));
            }
        });
        Encoder {
            objects,
            phase_of,
            list_owner,
        }
    }

    fn document(&self, proj: &PbxProj, root: ObjectRef) -> Result<String, ProjectError> {
        let project = self
            .objects
            .get_as::<Project>(root)
            .ok_or(ProjectError::MissingRootObject)?;
        for (field, reference) in [
            ("buildConfigurationList", project.build_configuration_list),
            ("mainGroup", project.main_group),
        ] {
            if !self.objects.contains(reference) {
                return Err(ProjectError::missing_reference(ObjectKind::Project.isa(), field));
            }
        }
        let root_key = self
            .objects
            .key(root)
            .ok_or_else(|| ProjectError::orphaned(ObjectKind::Project, root))?;

        let mut sections: BTreeMap<&'static str, Vec<(&str, String)>> = BTreeMap::new();
        for (reference, object) in self.objects.iter() {
            let Some(key) = self.objects.key(reference) else {
                continue;
            };
            let kind = object.kind();
            let mut line = format!("\t\t{}{} = ", key, self.comment_suffix(reference));
            write_record(&mut line, kind.isa(), self.record(object), 2, kind.is_single_line());
            line.push_str(";\n");
            sections.entry(kind.isa()).or_default().push((key, line));
        }

        let mut out = String::new();
        out.push_str(HEADER);
        out.push_str("\n{\n");
        out.push_str(&format!("\tarchiveVersion = {};\n", plist::quote(proj.archive_version())));
        out.push_str("\tclasses = ");
        write_node(&mut out, &dict(proj.classes()), 1, false);
        out.push_str(";\n");
        out.push_str(&format!("\tobjectVersion = {};\n", plist::quote(proj.object_version())));
        out.push_str("\tobjects = {\n");
        for (isa, mut entries) in sections {
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push_str(&format!("\n/* Begin {} section */\n", isa));
            for (_, line) in entries {
                out.push_str(&line);
            }
            out.push_str(&format!("/* End {} section */\n", isa));
        }
        out.push_str("\t};\n");
        out.push_str(&format!(
            "\trootObject = {}{};\n",
            root_key,
            self.comment_suffix(root)
        ));
        out.push_str("}\n");
        Ok(out)
    }

    /// The fields of one record, without `isa`.
    fn record(&self, object: &Object) -> BTreeMap<String, Node> {
        let mut r = RecordBuilder {
            encoder: self,
            fields: BTreeMap::new(),
        };
        r.extra(object.extra());
        match object {
            Object::BuildFile(file) => {
                r.reference("fileRef", file.file_ref);
                r.reference("productRef", file.product_ref);
                r.dictionary("settings", file.settings.as_ref());
                r.string("platformFilter", file.platform_filter.as_deref());
            }
            Object::NativeTarget(target) => {
                r.target(target);
                r.references("buildRules", &target.build_rules);
            }
            Object::LegacyTarget(target) | Object::AggregateTarget(target) => {
                r.target(target);
                r.references_if_any("buildRules", &target.build_rules);
            }
            Object::ContainerItemProxy(proxy) => {
                r.reference("containerPortal", proxy.container_portal);
                r.string("proxyType", proxy.proxy_type.as_deref());
                r.string("remoteGlobalIDString", proxy.remote_global_id.as_deref());
                r.string("remoteInfo", proxy.remote_info.as_deref());
            }
            Object::Group(group) | Object::VariantGroup(group) => r.group(group),
            Object::VersionGroup(version) => {
                r.group(&version.group);
                r.reference("currentVersion", version.current_version);
                r.string("versionGroupType", version.version_group_type.as_deref());
            }
            Object::ConfigurationList(list) => {
                r.references("buildConfigurations", &list.build_configurations);
                r.string(
                    "defaultConfigurationIsVisible",
                    list.default_configuration_is_visible.as_deref(),
                );
                r.string(
                    "defaultConfigurationName",
                    list.default_configuration_name.as_deref(),
                );
            }
            Object::BuildConfiguration(config) => {
                r.string("name", Some(&config.name));
                r.dictionary("buildSettings", Some(&config.build_settings));
                r.reference(
                    "baseConfigurationReference",
                    config.base_configuration_reference,
                );
            }
            Object::TargetDependency(dependency) => {
                r.string("name", dependency.name.as_deref());
                r.string("platformFilter", dependency.platform_filter.as_deref());
                r.reference("target", dependency.target);
                r.reference("targetProxy", dependency.target_proxy);
                r.reference("productRef", dependency.product);
            }
            Object::FileReference(file) => {
                r.string("name", file.name.as_deref());
                r.string("path", file.path.as_deref());
                r.source_tree(file.source_tree.as_ref());
                r.string("lastKnownFileType", file.last_known_file_type.as_deref());
                r.string("explicitFileType", file.explicit_file_type.as_deref());
                r.string("fileEncoding", file.file_encoding.as_deref());
                r.string("includeInIndex", file.include_in_index.as_deref());
            }
            Object::Project(project) => r.project(project),
            Object::ReferenceProxy(proxy) => {
                r.string("name", proxy.name.as_deref());
                r.string("path", proxy.path.as_deref());
                r.string("fileType", proxy.file_type.as_deref());
                r.source_tree(proxy.source_tree.as_ref());
                r.reference("remoteRef", proxy.remote_ref);
            }
            Object::BuildRule(rule) => {
                r.string("name", rule.name.as_deref());
                r.string("compilerSpec", rule.compiler_spec.as_deref());
                r.string("fileType", rule.file_type.as_deref());
                r.string("filePatterns", rule.file_patterns.as_deref());
                r.string("isEditable", rule.is_editable.as_deref());
                r.strings("outputFiles", &rule.output_files);
                r.string("script", rule.script.as_deref());
            }
            Object::CopyFilesBuildPhase(copy) => {
                r.build_phase(&copy.phase);
                r.string("dstPath", copy.dst_path.as_deref());
                r.string("dstSubfolderSpec", copy.dst_subfolder_spec.as_deref());
            }
            Object::ShellScriptBuildPhase(script) => {
                r.build_phase(&script.phase);
                r.string("shellPath", script.shell_path.as_deref());
                r.string("shellScript", script.shell_script.as_deref());
                r.strings("inputPaths", &script.input_paths);
                r.strings("outputPaths", &script.output_paths);
                r.strings("inputFileListPaths", &script.input_file_list_paths);
                r.strings("outputFileListPaths", &script.output_file_list_paths);
            }
            Object::ResourcesBuildPhase(phase)
            | Object::FrameworksBuildPhase(phase)
            | Object::HeadersBuildPhase(phase)
            | Object::SourcesBuildPhase(phase)
            | Object::RezBuildPhase(phase) => r.build_phase(phase),
            Object::RemotePackageReference(package) => {
                r.string("repositoryURL", package.repository_url.as_deref());
                if let Some(requirement) = &package.requirement {
                    r.dictionary("requirement", Some(&requirement.to_fields()));
                }
            }
            Object::LocalPackageReference(package) => {
                r.string("relativePath", Some(&package.relative_path));
            }
            Object::PackageProductDependency(dependency) => {
                r.reference("package", dependency.package);
                r.string("productName", Some(&dependency.product_name));
            }
            Object::SynchronizedRootGroup(group) => {
                r.string("name", group.name.as_deref());
                r.string("path", group.path.as_deref());
                r.source_tree(group.source_tree.as_ref());
                r.references_if_any("exceptions", &group.exceptions);
                r.dictionary("explicitFileTypes", group.explicit_file_types.as_ref());
                r.strings_if_any("explicitFolders", &group.explicit_folders);
            }
            Object::BuildFileExceptionSet(set) => {
                r.strings("membershipExceptions", &set.membership_exceptions);
                r.reference("target", set.target);
            }
            Object::MembershipExceptionSet(set) => {
                r.reference("buildPhase", set.build_phase);
                r.strings("membershipExceptions", &set.membership_exceptions);
            }
        }
        r.fields
    }

    /// A key token for `reference`, or `None` when it has no key or no
    /// longer resolves.
    fn reference_token(&self, reference: ObjectRef) -> Option<String> {
        if !self.objects.contains(reference) {
            return None;
        }
        let key = self.objects.key(reference)?;
        Some(format!("{}{}", key, self.comment_suffix(reference)))
    }

    fn comment_suffix(&self, reference: ObjectRef) -> String {
        match self.comment(reference) {
            Some(comment) => format!(" /* {} */", comment.replace("*/", "* /")),
            None => String::new(),
        }
    }

    fn comment(&self, reference: ObjectRef) -> Option<String> {
        let object = self.objects.get(reference)?;
        match object {
            Object::BuildFile(file) => {
                let name = file
                    .file_ref
                    .or(file.product_ref)
                    .and_then(|r| self.objects.get(r))
                    .and_then(Object::name)?;
                Some(match self.phase_of.get(&reference) {
                    Some(phase) => format!("{} in {}", name, phase),
                    None => name,
                })
            }
            Object::ConfigurationList(_) => {
                let (isa, name) = self.list_owner.get(&reference)?;
                Some(format!("Build configuration list for {} \"{}\"", isa, name))
            }
            Object::Project(_) => Some("Project object".to_string()),
            Object::RemotePackageReference(package) => Some(format!(
                "{} \"{}\"",
                object.kind().isa(),
                package.name().unwrap_or_default()
            )),
            Object::LocalPackageReference(package) => Some(format!(
                "{} \"{}\"",
                object.kind().isa(),
                package.relative_path
            )),
            Object::ContainerItemProxy(_)
            | Object::TargetDependency(_)
            | Object::BuildRule(_)
            | Object::BuildFileExceptionSet(_)
            | Object::MembershipExceptionSet(_) => Some(object.kind().isa().to_string()),
            _ if as_build_phase(object).is_some() => Some(phase_name(object)),
            _ => object.name(),
        }
    }
}

/// Collects the fields of one record as nodes.
struct RecordBuilder<'e, 'a> {
    encoder: &'e Encoder<'a>,
    fields: BTreeMap<String, Node>,
}

impl RecordBuilder<'_, '_> {
    fn put(&mut self, key: &str, node: Node) {
        self.fields.insert(key.to_string(), node);
    }

    fn extra(&mut self, extra: &Fields) {
        for (key, value) in extra {
            self.put(key, Node::from(value));
        }
    }

    fn string(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.put(key, Node::Token(plist::quote(value)));
        }
    }

    fn strings(&mut self, key: &str, values: &[String]) {
        let items = values.iter().map(|v| Node::Token(plist::quote(v))).collect();
        self.put(key, Node::Array(items));
    }

    fn strings_if_any(&mut self, key: &str, values: &[String]) {
        if !values.is_empty() {
            self.strings(key, values);
        }
    }

    fn dictionary(&mut self, key: &str, fields: Option<&Fields>) {
        if let Some(fields) = fields {
            self.put(key, dict(fields));
        }
    }

    fn reference(&mut self, key: &str, reference: Option<ObjectRef>) {
        if let Some(token) = reference.and_then(|r| self.encoder.reference_token(r)) {
            self.put(key, Node::Token(token));
        }
    }

    fn references(&mut self, key: &str, references: &[ObjectRef]) {
        let items = references
            .iter()
            .filter_map(|r| self.encoder.reference_token(*r))
            .map(Node::Token)
            .collect();
        self.put(key, Node::Array(items));
    }

    fn references_if_any(&mut self, key: &str, references: &[ObjectRef]) {
        if !references.is_empty() {
            self.references(key, references);
        }
    }

    fn source_tree(&mut self, source_tree: Option<&SourceTree>) {
        self.string("sourceTree", source_tree.map(SourceTree::as_str));
    }

    fn target(&mut self, target: &Target) {
        self.string("name", Some(&target.name));
        self.reference("buildConfigurationList", target.build_configuration_list);
        self.references("buildPhases", &target.build_phases);
        self.references("dependencies", &target.dependencies);
        self.string("productName", target.product_name.as_deref());
        self.reference("productReference", target.product_reference);
        self.string("productType", target.product_type.as_deref());
        self.references_if_any(
            "packageProductDependencies",
            &target.package_product_dependencies,
        );
        self.references_if_any("fileSystemSynchronizedGroups", &target.synchronized_groups);
    }

    fn group(&mut self, group: &Group) {
        self.references("children", &group.children);
        self.string("name", group.name.as_deref());
        self.string("path", group.path.as_deref());
        self.source_tree(group.source_tree.as_ref());
    }

    fn build_phase(&mut self, phase: &BuildPhase) {
        self.references("files", &phase.files);
        self.string("name", phase.name.as_deref());
        self.string("buildActionMask", phase.build_action_mask.as_deref());
        self.string(
            "runOnlyForDeploymentPostprocessing",
            phase.run_only_for_deployment_postprocessing.as_deref(),
        );
    }

    fn project(&mut self, project: &Project) {
        let mut attributes = match dict(&project.attributes) {
            Node::Dict(map) => map,
            _ => BTreeMap::new(),
        };
        if !project.target_attributes.is_empty() {
            let mut table = BTreeMap::new();
            for (target, fields) in &project.target_attributes {
                if let Some(key) = self.encoder.objects.key(*target) {
                    table.insert(key.to_string(), dict(fields));
                }
            }
            attributes.insert("TargetAttributes".to_string(), Node::Dict(table));
        }
        self.put("attributes", Node::Dict(attributes));

        self.reference("buildConfigurationList", Some(project.build_configuration_list));
        self.string("compatibilityVersion", project.compatibility_version.as_deref());
        self.string(
            "preferredProjectObjectVersion",
            project.preferred_project_object_version.as_deref(),
        );
        self.string(
            "minimizedProjectReferenceProxies",
            project.minimized_project_reference_proxies.as_deref(),
        );
        self.string("developmentRegion", project.development_region.as_deref());
        self.string(
            "hasScannedForEncodings",
            project.has_scanned_for_encodings.as_deref(),
        );
        self.strings("knownRegions", &project.known_regions);
        self.reference("mainGroup", Some(project.main_group));
        self.reference("productRefGroup", project.products_group);
        self.string("projectDirPath", Some(&project.project_dir_path));
        if !project.project_references.is_empty() {
            let pairs = project
                .project_references
                .iter()
                .map(|pair| {
                    let mut entry = BTreeMap::new();
                    for (key, reference) in [
                        ("ProductGroup", pair.product_group),
                        ("ProjectRef", pair.project_ref),
                    ] {
                        if let Some(token) = self.encoder.reference_token(reference) {
                            entry.insert(key.to_string(), Node::Token(token));
                        }
                    }
                    Node::Dict(entry)
                })
                .collect();
            self.put("projectReferences", Node::Array(pairs));
        }
        self.strings("projectRoots", &project.project_roots);
        self.references("targets", &project.targets);
        self.references_if_any("packageReferences", &project.package_references);
    }
}

fn write_record(
    out: &mut String,
    isa: &str,
    fields: BTreeMap<String, Node>,
    indent: usize,
    single_line: bool,
) {
    let isa = Node::Token(plist::quote(isa));
    let entries = std::iter::once(("isa", &isa)).chain(fields.iter().map(|(k, v)| (k.as_str(), v)));
    write_entries(out, entries, indent, single_line);
}

fn write_node(out: &mut String, node: &Node, indent: usize, single_line: bool) {
    match node {
        Node::Token(token) => out.push_str(token),
        Node::Dict(fields) => {
            write_entries(out, fields.iter().map(|(k, v)| (k.as_str(), v)), indent, single_line)
        }
        Node::Array(items) => {
            out.push('(');
            for item in items {
                if single_line {
                    write_node(out, item, indent, true);
                    out.push_str(", ");
                } else {
                    out.push('\n');
                    push_tabs(out, indent + 1);
                    write_node(out, item, indent + 1, false);
                    out.push(',');
                }
            }
            if !single_line {
                out.push('\n');
                push_tabs(out, indent);
            }
            out.push(')');
        }
    }
}

fn write_entries<'n>(
    out: &mut String,
    entries: impl Iterator<Item = (&'n str, &'n Node)>,
    indent: usize,
    single_line: bool,
) {
    out.push('{');
    for (key, value) in entries {
        if single_line {
            out.push_str(&plist::quote(key));
            out.push_str(" = ");
            write_node(out, value, indent, true);
            out.push_str("; ");
        } else {
            out.push('\n');
            push_tabs(out, indent + 1);
            out.push_str(&plist::quote(key));
            out.push_str(" = ");
            write_node(out, value, indent + 1, false);
            out.push(';');
        }
    }
    if !single_line {
        out.push('\n');
        push_tabs(out, indent);
    }
    out.push('}');
}

fn push_tabs(out: &mut String, count: usize) {
    out.extend(std::iter::repeat('\t').take(count));
}

fn as_build_phase(object: &Object) -> Option<&BuildPhase> {
    match object {
        Object::CopyFilesBuildPhase(copy) => Some(&copy.phase),
        Object::ShellScriptBuildPhase(script) => Some(&script.phase),
        Object::ResourcesBuildPhase(phase)
        | Object::FrameworksBuildPhase(phase)
        | Object::HeadersBuildPhase(phase)
        | Object::SourcesBuildPhase(phase)
        | Object::RezBuildPhase(phase) => Some(phase),
        _ => None,
    }
}

/// A phase's own name, else the name the IDE shows for its kind.
fn phase_name(object: &Object) -> String {
    if let Some(name) = as_build_phase(object).and_then(|phase| phase.name.clone()) {
        return name;
    }
    match object.kind() {
        ObjectKind::CopyFilesBuildPhase => "CopyFiles",
        ObjectKind::ShellScriptBuildPhase => "ShellScript",
        ObjectKind::ResourcesBuildPhase => "Resources",
        ObjectKind::FrameworksBuildPhase => "Frameworks",
        ObjectKind::HeadersBuildPhase => "Headers",
        ObjectKind::SourcesBuildPhase => "Sources",
        ObjectKind::RezBuildPhase => "Rez",
        _ => "",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use crate::test_support::fixtures::{app_project, App, APP_PBXPROJ};

    fn app_document() -> PbxProj {
        let app = app_project();
        PbxProj::from_objects(app.objects, app.root, "1".into(), "56".into(), Fields::new())
            .unwrap()
    }

    // =========================================================================
    // Round trips
    // =========================================================================

    #[test]
    fn test_reencoding_is_byte_stable() {
        let first = encode(&decode(APP_PBXPROJ).unwrap()).unwrap();
        let second = encode(&decode(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encoding_twice_is_identical() {
        let proj = app_document();
        assert_eq!(proj.to_text().unwrap(), proj.to_text().unwrap());
    }

    #[test]
    fn test_fresh_graphs_encode_identically() {
        assert_eq!(
            app_document().to_text().unwrap(),
            app_document().to_text().unwrap()
        );
    }

    #[test]
    fn test_decoded_graph_keeps_keys() {
        let proj = decode(APP_PBXPROJ).unwrap();
        let text = encode(&proj).unwrap();
        assert!(text.contains("A10000000000000000000007 /* App */ = {"));
        assert!(text.contains("\trootObject = A10000000000000000000009 /* Project object */;\n"));
    }

    #[test]
    fn test_project_root_is_written_plural() {
        let text = encode(&decode(APP_PBXPROJ).unwrap()).unwrap();
        assert!(!text.contains("projectRoot ="));
        assert!(text.contains("\t\t\tprojectRoots = (\n\t\t\t\t\"\",\n\t\t\t);\n"));
    }

    // =========================================================================
    // Layout
    // =========================================================================

    #[test]
    fn test_single_line_records() {
        let text = encode(&decode(APP_PBXPROJ).unwrap()).unwrap();
        assert!(text.contains(
            "\t\tA10000000000000000000001 /* main.swift in Sources */ = {isa = PBXBuildFile; fileRef = A10000000000000000000002 /* main.swift */; };\n"
        ));
    }

    #[test]
    fn test_sections_are_sorted_by_isa() {
        let text = app_document().to_text().unwrap();
        let build_file = text.find("/* Begin PBXBuildFile section */").unwrap();
        let group = text.find("/* Begin PBXGroup section */").unwrap();
        let list = text.find("/* Begin XCConfigurationList section */").unwrap();
        assert!(text.starts_with("// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n\tclasses = {\n\t};\n"));
        assert!(build_file < group && group < list);
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_comments_name_owners() {
        let proj = decode(APP_PBXPROJ).unwrap();
        proj.set_name("App").unwrap();
        let text = encode(&proj).unwrap();
        assert!(text.contains("/* Build configuration list for PBXNativeTarget \"App\" */"));
        assert!(text.contains("/* Build configuration list for PBXProject \"App\" */"));
        assert!(text.contains("A10000000000000000000004 /* Frameworks */,"));
    }

    #[test]
    fn test_package_comments_and_requirement() {
        let proj = app_document();
        proj.add_swift_package(
            "https://github.com/apple/swift-log.git",
            "Logging",
            VersionRequirement::up_to_next_major("1.5.0"),
            "App",
        )
        .unwrap();
        proj.add_local_package_reference("Packages/Foo").unwrap();

        let text = proj.to_text().unwrap();
        assert!(text.contains("/* XCRemoteSwiftPackageReference \"swift-log\" */"));
        assert!(text.contains("/* XCLocalSwiftPackageReference \"Packages/Foo\" */"));
        assert!(text.contains("/* Logging in Frameworks */"));
        assert!(text.contains("\t\t\t\tkind = upToNextMajorVersion;\n\t\t\t\tminimumVersion = 1.5.0;\n"));
        assert!(text.contains("repositoryURL = \"https://github.com/apple/swift-log.git\";"));
    }

    #[test]
    fn test_deleted_objects_are_not_referenced() {
        let proj = app_document();
        let local = proj.add_local_package_reference("Packages/Foo").unwrap();
        proj.edit(|editor| editor.remove_local_package(local)).unwrap();

        let text = proj.to_text().unwrap();
        assert!(!text.contains("XCLocalSwiftPackageReference"));
        assert!(!text.contains("packageReferences"));
    }

    #[test]
    fn test_missing_main_group_is_reported() {
        let app = app_project();
        let App { mut objects, root, main_group, .. } = app;
        objects.delete(main_group);
        let proj =
            PbxProj::from_objects(objects, root, "1".into(), "56".into(), Fields::new()).unwrap();
        assert_eq!(
            proj.to_text().unwrap_err(),
            ProjectError::MissingReference {
                isa: "PBXProject".to_string(),
                field: "mainGroup".to_string()
            }
        );
    }
}
