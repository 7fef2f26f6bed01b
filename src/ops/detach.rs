//! `xc detach`: undo `attach`, restoring saved remote references.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::PbxProj;
use crate::ops::attach::matching_local;
use crate::ops::project_io::{load_project, save_project};
use crate::ops::session::Session;
use crate::package::{PackageStateStore, PackageSummary};
use crate::util::context::GlobalContext;

/// Outcome for one package in one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedPackage {
    pub name: String,
    pub removed_local: bool,
    /// URL of the remote reference put back
    pub restored_remote: Option<String>,
    pub folder_removed: bool,
}

/// Outcome for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachReport {
    pub project: PathBuf,
    pub packages: Vec<DetachedPackage>,
}

/// Detach every tracked package from every configured project.
pub fn detach(ctx: &GlobalContext) -> Result<Vec<DetachReport>> {
    let session = Session::open(ctx)?;
    let store = PackageStateStore::new(ctx);

    let mut reports = Vec::with_capacity(session.projects.len());
    for bundle in &session.projects {
        let proj = load_project(bundle)?;
        let packages = detach_packages(&proj, &session.packages, &store)
            .with_context(|| format!("failed to detach packages from {}", bundle.display()))?;
        save_project(&proj, bundle)?;
        reports.push(DetachReport {
            project: bundle.clone(),
            packages,
        });
    }
    Ok(reports)
}

/// Detach `packages` from an open project.
///
/// A saved remote reference is restored only for packages whose local
/// reference was actually removed.
pub fn detach_packages(
    proj: &PbxProj,
    packages: &[PackageSummary],
    store: &PackageStateStore,
) -> Result<Vec<DetachedPackage>> {
    packages
        .iter()
        .map(|package| detach_package(proj, &package.name, store))
        .collect()
}

fn detach_package(proj: &PbxProj, name: &str, store: &PackageStateStore) -> Result<DetachedPackage> {
    let mut removed_local = false;
    let mut restored_remote = None;

    if let Some(local) = matching_local(proj, name)? {
        proj.edit(|editor| editor.remove_local_package(local))?;
        removed_local = true;

        if let Some(remote) = store.load_and_remove(name)? {
            let url = remote.repository_url.clone().unwrap_or_default();
            proj.edit(|editor| editor.restore_remote_package(remote))?;
            info!(package = name, url = %url, "restored remote package reference");
            restored_remote = Some(url);
        }
    }

    let folder_removed = proj.edit(|editor| {
        let main_group = editor.view().main_group()?;
        let folder = editor.view().file_named(main_group, name)?;
        match folder {
            Some(file) => editor.remove_child(main_group, file),
            None => Ok(false),
        }
    })?;

    Ok(DetachedPackage {
        name: name.to_string(),
        removed_local,
        restored_remote,
        folder_removed,
    })
}
