//! Remote package references set aside while a local copy is attached.
//!
//! `attach` saves the remote reference it replaces; `detach` takes it back
//! out and re-adds it to the project. The store lives in
//! `.xcodecli/package_states.json`, keyed by package name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::objects::{RemotePackageReference, VersionRequirement};
use crate::util::context::GlobalContext;
use crate::util::fs;

/// One saved remote reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRemote {
    #[serde(rename = "repositoryURL")]
    pub repository_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement: Option<VersionRequirement>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    packages: BTreeMap<String, SavedRemote>,
}

/// File-backed store of saved remote references.
#[derive(Debug, Clone)]
pub struct PackageStateStore {
    path: PathBuf,
}

impl PackageStateStore {
    /// The store of the context's configuration root.
    pub fn new(ctx: &GlobalContext) -> Self {
        Self::at(ctx.state_path())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        PackageStateStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remember `remote` under `package_name`.
    ///
    /// Nothing is saved unless the reference's URL equals `expected_url`.
    /// Returns whether an entry was written; an existing entry for the same
    /// name is replaced.
    pub fn save(
        &self,
        remote: &RemotePackageReference,
        package_name: &str,
        expected_url: &str,
    ) -> Result<bool> {
        let url = match remote.repository_url.as_deref() {
            Some(url) if url == expected_url => url,
            _ => {
                warn!(package = package_name, "repository URL mismatch, not saving package state");
                return Ok(false);
            }
        };

        let mut state = self.load()?;
        state.packages.insert(
            package_name.to_string(),
            SavedRemote {
                repository_url: url.to_string(),
                requirement: remote.requirement.clone(),
            },
        );
        self.store(&state)?;
        debug!(package = package_name, url, "saved remote package state");
        Ok(true)
    }

    /// Take the saved reference for `package_name` out of the store.
    pub fn load_and_remove(&self, package_name: &str) -> Result<Option<RemotePackageReference>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let mut state = self.load()?;
        let Some(saved) = state.packages.remove(package_name) else {
            return Ok(None);
        };
        self.store(&state)?;
        debug!(package = package_name, "restored remote package state");
        Ok(Some(RemotePackageReference::new(
            saved.repository_url,
            saved.requirement,
        )))
    }

    /// Names with a saved reference.
    pub fn package_names(&self) -> Result<Vec<String>> {
        Ok(self.load()?.packages.into_keys().collect())
    }

    fn load(&self) -> Result<StateFile> {
        if !self.path.exists() {
            return Ok(StateFile::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse package state: {}", self.path.display()))
    }

    fn store(&self, state: &StateFile) -> Result<()> {
        let mut contents =
            serde_json::to_string_pretty(state).context("failed to serialize package state")?;
        contents.push('\n');
        fs::write_string(&self.path, &contents)
    }
}
