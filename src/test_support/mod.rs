//! Test support utilities for xcproj unit tests.
//!
//! - [`fixtures`]: in-memory and on-disk sample projects
//! - [`assertions`]: checks shared by several test modules

pub mod fixtures;

use std::path::{Path, PathBuf};

/// Write `<dir>/<name>.xcodeproj/project.pbxproj` and return the bundle path.
pub fn write_xcodeproj(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let bundle = dir.join(format!("{}.xcodeproj", name));
    std::fs::create_dir_all(&bundle).unwrap();
    std::fs::write(bundle.join("project.pbxproj"), contents).unwrap();
    bundle
}

/// Write a package directory holding a `Package.swift` and return its path.
pub fn write_package(dir: &Path, name: &str, libraries: &[&str]) -> PathBuf {
    let package = dir.join(name);
    std::fs::create_dir_all(&package).unwrap();
    std::fs::write(
        package.join("Package.swift"),
        fixtures::package_manifest(name, libraries),
    )
    .unwrap();
    package
}

/// Assertion helpers.
pub mod assertions {
    use crate::core::kind::ObjectKind;
    use crate::core::registry::Objects;

    /// Assert that no reference is registered under two kinds.
    pub fn assert_kinds_disjoint(objects: &Objects) {
        let mut seen = std::collections::HashSet::new();
        for kind in ObjectKind::ALL {
            for (reference, _) in objects.of_kind(kind) {
                assert!(
                    seen.insert(reference),
                    "{:?} registered under more than one kind",
                    reference
                );
            }
        }
    }

    /// Assert that `text` contains `needle` exactly `count` times.
    pub fn assert_occurrences(text: &str, needle: &str, count: usize) {
        let found = text.matches(needle).count();
        assert_eq!(
            found, count,
            "expected {} occurrences of {:?}, found {}",
            count, needle, found
        );
    }
}
