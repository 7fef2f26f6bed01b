//! What `attach` and `detach` work on: the configured packages and the
//! projects they are linked into.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::ops::{finder, workspace};
use crate::package::{self, PackageSummary};
use crate::util::config::{PackageList, ProgramConfiguration};
use crate::util::context::GlobalContext;
use crate::util::fs;

/// Resolved inputs of a link session.
#[derive(Debug, Clone)]
pub struct Session {
    /// The configured or discovered `.xcodeproj` / `.xcworkspace`
    pub target: PathBuf,
    /// Project bundles to edit, in order
    pub projects: Vec<PathBuf>,
    /// Tracked packages, identified
    pub packages: Vec<PackageSummary>,
}

impl Session {
    /// Read the configuration and package list and locate the projects.
    pub fn open(ctx: &GlobalContext) -> Result<Self> {
        let config = ProgramConfiguration::read(ctx)?;
        let target = fs::absolutize(&finder::locate(ctx, &config)?, ctx.cwd());
        let projects = workspace::project_bundles(&target)?;

        let packages = PackageList::read(ctx)?
            .iter()
            .map(|path| package::describe(&ctx.resolve(path)))
            .collect::<Vec<_>>();
        debug!(
            target = %target.display(),
            projects = projects.len(),
            packages = packages.len(),
            "opened link session"
        );

        Ok(Session {
            target,
            projects,
            packages,
        })
    }
}

/// Case-insensitive substring match used to pair packages with project
/// references.
pub(crate) fn name_matches(reference_name: &str, package_name: &str) -> bool {
    reference_name
        .to_lowercase()
        .contains(&package_name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::APP_PBXPROJ;
    use crate::test_support::{write_package, write_xcodeproj};
    use tempfile::TempDir;

    #[test]
    fn test_name_matches() {
        assert!(name_matches("swift-Networking", "networking"));
        assert!(!name_matches("Core", "CoreKit"));
    }

    #[test]
    fn test_open_discovers_project_and_packages() {
        let tmp = TempDir::new().unwrap();
        let bundle = write_xcodeproj(tmp.path(), "App", APP_PBXPROJ);
        let package = write_package(tmp.path(), "Networking", &["Networking"]);
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        PackageList::update(&ctx, &package.to_string_lossy()).unwrap();

        let session = Session::open(&ctx).unwrap();
        assert_eq!(session.target, bundle);
        assert_eq!(session.projects, vec![bundle]);
        assert_eq!(session.packages.len(), 1);
        assert_eq!(session.packages[0].name, "Networking");
    }
}
