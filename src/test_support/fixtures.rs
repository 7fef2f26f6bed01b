//! Test fixtures for common test scenarios.
//!
//! This module provides a small application project, built either in
//! memory or as project-file text, plus generators for package manifests.

use crate::core::object::Object;
use crate::core::objects::{
    BuildConfiguration, BuildFile, BuildPhase, ConfigurationList, FileReference, Group, Project,
    SourceTree, Target,
};
use crate::core::reference::ObjectRef;
use crate::core::registry::Objects;

/// Handles into the objects built by [`app_project`].
pub struct App {
    pub objects: Objects,
    pub root: ObjectRef,
    pub main_group: ObjectRef,
    pub target: ObjectRef,
    pub sources: ObjectRef,
    pub frameworks: ObjectRef,
}

fn configuration_list(objects: &mut Objects) -> ObjectRef {
    let debug = objects.add(BuildConfiguration {
        name: "Debug".to_string(),
        ..Default::default()
    });
    let release = objects.add(BuildConfiguration {
        name: "Release".to_string(),
        ..Default::default()
    });
    objects.add(ConfigurationList {
        build_configurations: vec![debug, release],
        default_configuration_is_visible: Some("0".to_string()),
        default_configuration_name: Some("Release".to_string()),
        ..Default::default()
    })
}

/// An unkeyed project with one native target `App`.
///
/// The target has a sources phase holding `main.swift` and an empty
/// frameworks phase.
pub fn app_project() -> App {
    let mut objects = Objects::new();

    let main_swift = objects.add(FileReference {
        path: Some("main.swift".to_string()),
        source_tree: Some(SourceTree::Group),
        last_known_file_type: Some("sourcecode.swift".to_string()),
        ..Default::default()
    });
    let product = objects.add(FileReference {
        path: Some("App.app".to_string()),
        source_tree: Some(SourceTree::BuildProductsDir),
        explicit_file_type: Some("wrapper.application".to_string()),
        include_in_index: Some("0".to_string()),
        ..Default::default()
    });
    let products = objects.add(Group {
        children: vec![product],
        name: Some("Products".to_string()),
        source_tree: Some(SourceTree::Group),
        ..Default::default()
    });
    let main_group = objects.add(Group {
        children: vec![main_swift, products],
        source_tree: Some(SourceTree::Group),
        ..Default::default()
    });

    let main_build_file = objects.add(BuildFile::for_file(main_swift));
    let sources = objects.add(Object::SourcesBuildPhase(BuildPhase {
        files: vec![main_build_file],
        build_action_mask: Some("2147483647".to_string()),
        run_only_for_deployment_postprocessing: Some("0".to_string()),
        ..Default::default()
    }));
    let frameworks = objects.add(Object::FrameworksBuildPhase(BuildPhase {
        build_action_mask: Some("2147483647".to_string()),
        run_only_for_deployment_postprocessing: Some("0".to_string()),
        ..Default::default()
    }));

    let target_configs = configuration_list(&mut objects);
    let mut app = Target::new("App");
    app.build_configuration_list = Some(target_configs);
    app.build_phases = vec![sources, frameworks];
    app.product_name = Some("App".to_string());
    app.product_reference = Some(product);
    app.product_type = Some("com.apple.product-type.application".to_string());
    let target = objects.add(Object::NativeTarget(app));

    let project_configs = configuration_list(&mut objects);
    let mut project = Project::new("App", project_configs, main_group);
    project.products_group = Some(products);
    project.targets = vec![target];
    project.known_regions = vec!["en".to_string(), "Base".to_string()];
    project.development_region = Some("en".to_string());
    project.compatibility_version = Some("Xcode 14.0".to_string());
    let root = objects.add(project);

    App {
        objects,
        root,
        main_group,
        target,
        sources,
        frameworks,
    }
}

/// The same application project as written by the IDE.
pub const APP_PBXPROJ: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 56;
	objects = {

/* Begin PBXBuildFile section */
		A10000000000000000000001 /* main.swift in Sources */ = {isa = PBXBuildFile; fileRef = A10000000000000000000002 /* main.swift */; };
/* End PBXBuildFile section */

/* Begin PBXFileReference section */
		A10000000000000000000002 /* main.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = main.swift; sourceTree = "<group>"; };
		A10000000000000000000003 /* App.app */ = {isa = PBXFileReference; explicitFileType = wrapper.application; includeInIndex = 0; path = App.app; sourceTree = BUILT_PRODUCTS_DIR; };
/* End PBXFileReference section */

/* Begin PBXFrameworksBuildPhase section */
		A10000000000000000000004 /* Frameworks */ = {
			isa = PBXFrameworksBuildPhase;
			buildActionMask = 2147483647;
			files = (
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXFrameworksBuildPhase section */

/* Begin PBXGroup section */
		A10000000000000000000005 = {
			isa = PBXGroup;
			children = (
				A10000000000000000000002 /* main.swift */,
				A10000000000000000000006 /* Products */,
			);
			sourceTree = "<group>";
		};
		A10000000000000000000006 /* Products */ = {
			isa = PBXGroup;
			children = (
				A10000000000000000000003 /* App.app */,
			);
			name = Products;
			sourceTree = "<group>";
		};
/* End PBXGroup section */

/* Begin PBXNativeTarget section */
		A10000000000000000000007 /* App */ = {
			isa = PBXNativeTarget;
			buildConfigurationList = A1000000000000000000000C /* Build configuration list for PBXNativeTarget "App" */;
			buildPhases = (
				A10000000000000000000008 /* Sources */,
				A10000000000000000000004 /* Frameworks */,
			);
			buildRules = (
			);
			dependencies = (
			);
			name = App;
			productName = App;
			productReference = A10000000000000000000003 /* App.app */;
			productType = "com.apple.product-type.application";
		};
/* End PBXNativeTarget section */

/* Begin PBXProject section */
		A10000000000000000000009 /* Project object */ = {
			isa = PBXProject;
			attributes = {
				BuildIndependentTargetsInParallel = 1;
				LastSwiftUpdateCheck = 1500;
				LastUpgradeCheck = 1500;
				TargetAttributes = {
					A10000000000000000000007 = {
						CreatedOnToolsVersion = 15.0;
					};
				};
			};
			buildConfigurationList = A1000000000000000000000D /* Build configuration list for PBXProject "App" */;
			compatibilityVersion = "Xcode 14.0";
			developmentRegion = en;
			hasScannedForEncodings = 0;
			knownRegions = (
				en,
				Base,
			);
			mainGroup = A10000000000000000000005;
			productRefGroup = A10000000000000000000006 /* Products */;
			projectDirPath = "";
			projectRoot = "";
			targets = (
				A10000000000000000000007 /* App */,
			);
		};
/* End PBXProject section */

/* Begin PBXSourcesBuildPhase section */
		A10000000000000000000008 /* Sources */ = {
			isa = PBXSourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
				A10000000000000000000001 /* main.swift in Sources */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXSourcesBuildPhase section */

/* Begin XCBuildConfiguration section */
		A1000000000000000000000A /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				PRODUCT_NAME = "$(TARGET_NAME)";
				SWIFT_VERSION = 5.0;
			};
			name = Debug;
		};
		A1000000000000000000000B /* Release */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				PRODUCT_NAME = "$(TARGET_NAME)";
				SWIFT_VERSION = 5.0;
			};
			name = Release;
		};
		A1000000000000000000000E /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				ONLY_ACTIVE_ARCH = YES;
				SDKROOT = iphoneos;
			};
			name = Debug;
		};
		A1000000000000000000000F /* Release */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				SDKROOT = iphoneos;
				VALIDATE_PRODUCT = YES;
			};
			name = Release;
		};
/* End XCBuildConfiguration section */

/* Begin XCConfigurationList section */
		A1000000000000000000000C /* Build configuration list for PBXNativeTarget "App" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				A1000000000000000000000A /* Debug */,
				A1000000000000000000000B /* Release */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = Release;
		};
		A1000000000000000000000D /* Build configuration list for PBXProject "App" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				A1000000000000000000000E /* Debug */,
				A1000000000000000000000F /* Release */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = Release;
		};
/* End XCConfigurationList section */
	};
	rootObject = A10000000000000000000009 /* Project object */;
}
"#;

/// Key of the `App` target in [`APP_PBXPROJ`].
pub const APP_TARGET_KEY: &str = "A10000000000000000000007";

/// A `Package.swift` declaring `name` with one library per entry of `libraries`.
pub fn package_manifest(name: &str, libraries: &[&str]) -> String {
    let products: Vec<String> = libraries
        .iter()
        .map(|lib| format!("        .library(name: \"{}\", targets: [\"{}\"]),", lib, lib))
        .collect();
    let targets: Vec<String> = libraries
        .iter()
        .map(|lib| format!("        .target(name: \"{}\"),", lib))
        .collect();
    format!(
        r#"// swift-tools-version:5.9
import PackageDescription

let package = Package(
    name: "{}",
    platforms: [.iOS(.v16)],
    products: [
{}
    ],
    targets: [
{}
    ]
)
"#,
        name,
        products.join("\n"),
        targets.join("\n")
    )
}
