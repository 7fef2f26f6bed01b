//! `xc link` / `xc delink`: maintain the tracked package list.

use std::path::PathBuf;

use anyhow::{bail, Result};
use tracing::info;

use crate::package::manifest::{self, ManifestInfo};
use crate::util::config::PackageList;
use crate::util::context::GlobalContext;
use crate::util::diagnostic::suggestions;

/// A package that was added to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkResult {
    pub path: PathBuf,
    pub manifest: ManifestInfo,
    /// The package list after the update
    pub packages: Vec<String>,
}

/// The package directory a command operates on.
///
/// With no argument the working directory is used, which only makes sense
/// when the configuration lives elsewhere, so `--config` is then required.
pub fn package_path(ctx: &GlobalContext, arg: Option<&str>) -> Result<PathBuf> {
    match arg {
        Some(path) => Ok(ctx.resolve(path)),
        None if ctx.has_explicit_config() => Ok(ctx.cwd().to_path_buf()),
        None => bail!("missing required --config when no package path is provided"),
    }
}

/// Track the package at `arg` (or the working directory).
///
/// The package must have a readable `Package.swift` declaring at least one
/// library.
pub fn link(ctx: &GlobalContext, arg: Option<&str>) -> Result<LinkResult> {
    let path = package_path(ctx, arg)?;
    let manifest = manifest::read_manifest(&path)?;
    let packages = PackageList::update(ctx, &path.to_string_lossy())?;
    info!(package = %manifest.name, path = %path.display(), "linked package");
    Ok(LinkResult {
        path,
        manifest,
        packages,
    })
}

/// Stop tracking the package at `arg` (or the working directory).
pub fn delink(ctx: &GlobalContext, arg: Option<&str>) -> Result<PathBuf> {
    let path = package_path(ctx, arg)?;
    if !PackageList::remove(ctx, &path.to_string_lossy())? {
        bail!(
            "package not found in configuration: {}\n{}",
            path.display(),
            suggestions::PACKAGE_NOT_TRACKED
        );
    }
    info!(path = %path.display(), "delinked package");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_package;
    use tempfile::TempDir;

    #[test]
    fn test_link_records_absolute_path() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path(), "Networking", &["Networking", "NetworkingMocks"]);
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());

        let result = link(&ctx, Some("Networking")).unwrap();

        assert_eq!(result.path, tmp.path().join("Networking"));
        assert_eq!(result.manifest.name, "Networking");
        assert_eq!(result.manifest.libraries, vec!["Networking", "NetworkingMocks"]);
        assert_eq!(
            PackageList::read(&ctx).unwrap(),
            vec![tmp.path().join("Networking").to_string_lossy().into_owned()]
        );
    }

    #[test]
    fn test_link_requires_manifest() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("Empty")).unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());

        let err = link(&ctx, Some("Empty")).unwrap_err();
        assert!(err.to_string().contains("Package.swift file not found"));
        assert!(PackageList::read(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_link_without_path_requires_config() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());

        let err = link(&ctx, None).unwrap_err();
        assert!(err.to_string().contains("--config"));
    }

    #[test]
    fn test_link_cwd_with_config() {
        let tmp = TempDir::new().unwrap();
        let package = write_package(tmp.path(), "Core", &["Core"]);
        let app = tmp.path().join("app");
        std::fs::create_dir_all(&app).unwrap();
        let ctx = GlobalContext::with_cwd(package.clone()).with_config_root(app);

        let result = link(&ctx, None).unwrap();
        assert_eq!(result.path, package);
        assert!(ctx.packages_path().exists());
    }

    #[test]
    fn test_delink() {
        let tmp = TempDir::new().unwrap();
        write_package(tmp.path(), "Core", &["Core"]);
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        link(&ctx, Some("Core")).unwrap();

        assert_eq!(delink(&ctx, Some("Core")).unwrap(), tmp.path().join("Core"));
        assert!(PackageList::read(&ctx).unwrap().is_empty());

        let err = delink(&ctx, Some("Core")).unwrap_err();
        assert!(err.to_string().contains("package not found in configuration"));
    }
}
