//! The package side of linking: identifying a local Swift package and
//! remembering the remote references it replaces.
//!
//! - [`manifest`]: text scan of `Package.swift`
//! - [`schema`]: `swift package dump-package` introspection
//! - [`state`]: saved remote references

pub mod manifest;
pub mod schema;
pub mod state;

use std::path::{Path, PathBuf};

use tracing::debug;

pub use manifest::{scan_manifest, ManifestError, ManifestInfo};
pub use schema::PackageSchema;
pub use state::PackageStateStore;

/// How a package was identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Toolchain,
    Manifest,
    Directory,
}

/// Name and products of a local package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSummary {
    pub path: PathBuf,
    pub name: String,
    pub products: Vec<String>,
    pub source: NameSource,
}

/// Identify the package at `path`.
///
/// The toolchain's description wins, then the manifest scan, then the
/// directory name. Every package resolves independently, so one unreadable
/// package never shifts the names of the others.
pub fn describe(path: &Path) -> PackageSummary {
    match PackageSchema::introspect(path) {
        Ok(schema) => {
            let products = schema.product_names().into_iter().map(str::to_string).collect();
            return PackageSummary {
                path: path.to_path_buf(),
                name: schema.name,
                products,
                source: NameSource::Toolchain,
            };
        }
        Err(err) => debug!(path = %path.display(), "introspection failed: {:#}", err),
    }

    match manifest::read_manifest(path) {
        Ok(info) => PackageSummary {
            path: path.to_path_buf(),
            name: info.name,
            products: info.libraries,
            source: NameSource::Manifest,
        },
        Err(err) => {
            debug!(path = %path.display(), "manifest scan failed: {:#}", err);
            PackageSummary {
                path: path.to_path_buf(),
                name: directory_name(path),
                products: Vec::new(),
                source: NameSource::Directory,
            }
        }
    }
}

/// Last component of `path`, or the whole path when it has none.
pub fn directory_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_package;
    use tempfile::TempDir;

    #[test]
    fn test_describe_falls_back_to_directory_name() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("Loose");
        std::fs::create_dir_all(&dir).unwrap();

        let summary = describe(&dir);
        assert_eq!(summary.name, "Loose");
        assert_eq!(summary.source, NameSource::Directory);
        assert!(summary.products.is_empty());
    }

    #[test]
    fn test_describe_reads_package_name() {
        let tmp = TempDir::new().unwrap();
        let dir = write_package(tmp.path(), "Networking", &["Networking", "NetworkingMocks"]);

        let summary = describe(&dir);
        assert_eq!(summary.name, "Networking");
        assert_ne!(summary.source, NameSource::Directory);
    }

    #[test]
    fn test_directory_name() {
        assert_eq!(directory_name(Path::new("/pkgs/Lib")), "Lib");
        assert_eq!(directory_name(Path::new("/")), "/");
    }
}
