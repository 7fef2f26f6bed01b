//! Text scanner for `Package.swift`.
//!
//! This does not evaluate the manifest. It finds the package name inside
//! the `Package(` call and the names of the `.library(...)` products, which
//! is enough to identify a package when the Swift toolchain is unavailable.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use thiserror::Error;

/// Manifest file name inside a package directory.
pub const MANIFEST_FILE: &str = "Package.swift";

/// Arguments that end the part of `Package(` that may hold the name.
const STOP_KEYWORDS: [&str; 4] = ["products:", "targets:", "dependencies:", "platforms:"];

static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"name:\s*(?:"([^"]+)"|'([^']+)')"#).expect("valid name pattern")
});

/// Errors from scanning a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("package name not found in Package.swift")]
    MissingName,

    #[error("no library products found in Package.swift")]
    NoLibrariesFound,
}

/// What the scanner extracts from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    pub name: String,
    /// Library product names, de-duplicated, in declaration order
    pub libraries: Vec<String>,
}

/// Scan manifest source text.
pub fn scan_manifest(content: &str) -> Result<ManifestInfo, ManifestError> {
    let package = package_call(content).ok_or(ManifestError::MissingName)?;

    let header_end = STOP_KEYWORDS
        .iter()
        .filter_map(|keyword| package.find(keyword))
        .min()
        .unwrap_or(package.len());
    let name = first_name(&package[..header_end]).ok_or(ManifestError::MissingName)?;

    let libraries = library_products(package);
    if libraries.is_empty() {
        return Err(ManifestError::NoLibrariesFound);
    }

    Ok(ManifestInfo { name, libraries })
}

/// Read and scan `<dir>/Package.swift`.
pub fn read_manifest(dir: &Path) -> Result<ManifestInfo> {
    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        anyhow::bail!("Package.swift file not found at: {}", path.display());
    }
    let content = crate::util::fs::read_to_string(&path)?;
    scan_manifest(&content).with_context(|| format!("failed to scan {}", path.display()))
}

/// The argument list of the first `Package(` call, parentheses included.
fn package_call(content: &str) -> Option<&str> {
    let start = content.find("Package(")? + "Package".len();
    Some(balanced(content, start, '(', ')'))
}

fn library_products(package: &str) -> Vec<String> {
    let Some(products) = package.find("products:") else {
        return Vec::new();
    };
    let Some(open) = package[products..].find('[').map(|i| products + i) else {
        return Vec::new();
    };
    let list = balanced(package, open, '[', ']');

    let mut libraries: Vec<String> = Vec::new();
    let mut rest = list;
    while let Some(index) = rest.find(".library(") {
        let call_start = index + ".library".len();
        let call = balanced(rest, call_start, '(', ')');
        if let Some(name) = first_name(call) {
            if !libraries.contains(&name) {
                libraries.push(name);
            }
        }
        rest = &rest[call_start + call.len()..];
    }
    libraries
}

fn first_name(text: &str) -> Option<String> {
    let captures = NAME.captures(text)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|m| m.as_str().to_string())
}

/// Slice from `start` (which must hold `open`) through the matching `close`,
/// or to the end of `text` when it is unbalanced.
fn balanced(text: &str, start: usize, open: char, close: char) -> &str {
    let mut depth = 0usize;
    for (offset, c) in text[start..].char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return &text[start..start + offset + c.len_utf8()];
            }
        }
    }
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SIMPLE: &str = r#"// swift-tools-version: 5.9
import PackageDescription

let package = Package(
    name: "MyPackage",
    products: [
        .library(name: "MyLib", targets: ["MyLib"]),
    ],
    targets: [
        .target(name: "MyLib"),
    ]
)
"#;

    #[test]
    fn test_scan_simple_manifest() {
        let info = scan_manifest(SIMPLE).unwrap();
        assert_eq!(info.name, "MyPackage");
        assert_eq!(info.libraries, vec!["MyLib"]);
    }

    #[test]
    fn test_single_quoted_name() {
        let content = SIMPLE.replace("\"MyPackage\"", "'MyPackage'");
        assert_eq!(scan_manifest(&content).unwrap().name, "MyPackage");
    }

    #[test]
    fn test_multiline_libraries_and_executables() {
        let content = r#"
let package = Package(
    name: "ComplexPackage",
    platforms: [
        .macOS(.v10_15),
        .iOS(.v13)
    ],
    products: [
        .library(
            name: "CoreLibrary",
            targets: ["CoreLibrary"]
        ),
        .library(
            name: "UIComponents",
            type: .dynamic,
            targets: ["UIComponents"]
        ),
        .executable(
            name: "CLITool",
            targets: ["CLITool"]
        ),
        .library(name: "CoreLibrary", targets: ["CoreLibrary"])
    ],
    dependencies: [
        .package(url: "https://github.com/example/dependency", from: "1.0.0")
    ],
    targets: [
        .target(name: "CoreLibrary", dependencies: []),
    ]
)
"#;
        let info = scan_manifest(content).unwrap();
        assert_eq!(info.name, "ComplexPackage");
        assert_eq!(info.libraries, vec!["CoreLibrary", "UIComponents"]);
    }

    #[test]
    fn test_name_must_precede_products() {
        let content = r#"
let package = Package(
    products: [
        .library(name: "MyLib", targets: ["MyLib"]),
    ]
)
"#;
        assert_eq!(scan_manifest(content), Err(ManifestError::MissingName));
    }

    #[test]
    fn test_no_libraries() {
        let content = r#"
let package = Package(
    name: "MyPackage",
    products: [],
    targets: [
        .target(name: "MyLib"),
    ]
)
"#;
        assert_eq!(scan_manifest(content), Err(ManifestError::NoLibrariesFound));
    }

    #[test]
    fn test_no_package_call() {
        assert_eq!(
            scan_manifest("import PackageDescription\n"),
            Err(ManifestError::MissingName)
        );
    }

    #[test]
    fn test_read_manifest_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_manifest(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("Package.swift file not found"));
    }

    #[test]
    fn test_read_manifest() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(MANIFEST_FILE), SIMPLE).unwrap();
        assert_eq!(read_manifest(tmp.path()).unwrap().name, "MyPackage");
    }
}
