//! `xc attach`: swap remote package references for local checkouts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::objects::{LocalPackageReference, RemotePackageReference};
use crate::core::{ObjectRef, PbxProj, ProjectError};
use crate::ops::project_io::{load_project, save_project};
use crate::ops::session::{name_matches, Session};
use crate::package::{PackageStateStore, PackageSummary};
use crate::util::context::GlobalContext;
use crate::util::fs;

/// How the local package reference was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalLink {
    /// A reference at this project-relative path was added.
    Added { relative_path: String },
    /// A local reference with a matching name was already present.
    AlreadyAttached,
}

/// Outcome for one package in one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedPackage {
    pub name: String,
    /// URL of the remote reference that was removed
    pub removed_remote: Option<String>,
    /// Whether the removed reference was saved for `detach`
    pub saved_state: bool,
    pub local: LocalLink,
    pub folder_added: bool,
}

/// Outcome for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachReport {
    pub project: PathBuf,
    pub packages: Vec<AttachedPackage>,
}

/// Attach every tracked package to every configured project.
pub fn attach(ctx: &GlobalContext) -> Result<Vec<AttachReport>> {
    let session = Session::open(ctx)?;
    let store = PackageStateStore::new(ctx);

    let mut reports = Vec::with_capacity(session.projects.len());
    for bundle in &session.projects {
        let proj = load_project(bundle)?;
        let packages = attach_packages(&proj, bundle, &session.packages, &store)
            .with_context(|| format!("failed to attach packages to {}", bundle.display()))?;
        save_project(&proj, bundle)?;
        reports.push(AttachReport {
            project: bundle.clone(),
            packages,
        });
    }
    Ok(reports)
}

/// Attach `packages` to the open project at `bundle`.
///
/// The project is edited in memory only; the caller writes it back.
pub fn attach_packages(
    proj: &PbxProj,
    bundle: &Path,
    packages: &[PackageSummary],
    store: &PackageStateStore,
) -> Result<Vec<AttachedPackage>> {
    let project_dir = bundle.parent().unwrap_or_else(|| Path::new(""));
    packages
        .iter()
        .map(|package| attach_package(proj, project_dir, package, store))
        .collect()
}

fn attach_package(
    proj: &PbxProj,
    project_dir: &Path,
    package: &PackageSummary,
    store: &PackageStateStore,
) -> Result<AttachedPackage> {
    let name = package.name.as_str();
    let relative_path = fs::relative_path(project_dir, &fs::normalize(&package.path))
        .to_string_lossy()
        .into_owned();

    let mut removed_remote = None;
    let mut saved_state = false;
    if let Some((reference, remote)) = matching_remote(proj, name)? {
        proj.edit(|editor| editor.remove_remote_package(reference))?;
        info!(package = name, "removed remote package reference");
        if let Some(url) = remote.repository_url.as_deref() {
            saved_state = store.save(&remote, name, url)?;
        }
        removed_remote = Some(remote.repository_url.unwrap_or_default());
    }

    let local = if has_matching_local(proj, name)? {
        debug!(package = name, "already attached locally");
        LocalLink::AlreadyAttached
    } else {
        proj.edit(|editor| editor.add_local_package_reference(&relative_path))?;
        LocalLink::Added {
            relative_path: relative_path.clone(),
        }
    };

    let folder_added = proj.edit(|editor| {
        let main_group = editor.view().main_group()?;
        if editor.view().file_named(main_group, name)?.is_some() {
            return Ok(false);
        }
        editor.add_folder_reference(main_group, name, &relative_path)?;
        Ok(true)
    })?;

    Ok(AttachedPackage {
        name: name.to_string(),
        removed_remote,
        saved_state,
        local,
        folder_added,
    })
}

fn matching_remote(
    proj: &PbxProj,
    name: &str,
) -> Result<Option<(ObjectRef, RemotePackageReference)>, ProjectError> {
    proj.read(|view| {
        for reference in view.remote_packages()? {
            let Some(remote) = view.objects().get_as::<RemotePackageReference>(reference) else {
                continue;
            };
            if remote.name().is_some_and(|n| name_matches(&n, name)) {
                return Ok(Some((reference, remote.clone())));
            }
        }
        Ok(None)
    })
}

fn has_matching_local(proj: &PbxProj, name: &str) -> Result<bool, ProjectError> {
    Ok(matching_local(proj, name)?.is_some())
}

pub(crate) fn matching_local(proj: &PbxProj, name: &str) -> Result<Option<ObjectRef>, ProjectError> {
    proj.read(|view| {
        Ok(view.local_packages()?.into_iter().find(|&reference| {
            view.objects()
                .get_as::<LocalPackageReference>(reference)
                .is_some_and(|local| name_matches(local.name(), name))
        }))
    })
}
