//! Configuration files under `.xcodecli/`.
//!
//! - `config.toml`: which project or workspace to edit
//! - `packages.toml`: the ordered list of tracked local package paths
//!
//! A missing file reads as the empty value; a malformed one is an error.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::util::context::GlobalContext;
use crate::util::fs;

/// Which project or workspace the commands operate on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfiguration {
    /// Path to a `.xcodeproj`, relative to the working directory or absolute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Path to a `.xcworkspace`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
}

impl ProgramConfiguration {
    pub fn new(project: Option<String>, workspace: Option<String>) -> Self {
        ProgramConfiguration { project, workspace }
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Read the context's configuration, or the empty one if there is none.
    pub fn read(ctx: &GlobalContext) -> Result<Self> {
        let path = ctx.config_path();
        if !path.exists() {
            debug!(path = %path.display(), "no configuration file");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Write the configuration, creating `.xcodecli/` if needed.
    pub fn write(&self, ctx: &GlobalContext) -> Result<()> {
        self.save(&ctx.config_path())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;
        fs::write_string(path, &contents)
            .with_context(|| format!("failed to write config file: {}", path.display()))
    }
}

/// On-disk shape of `packages.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageList {
    pub packages: Vec<String>,
}

impl PackageList {
    /// Tracked package paths, in insertion order.
    pub fn read(ctx: &GlobalContext) -> Result<Vec<String>> {
        let path = ctx.packages_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)?;
        let list: PackageList = toml::from_str(&contents)
            .with_context(|| format!("failed to parse package list: {}", path.display()))?;
        Ok(list.packages)
    }

    /// Replace the tracked package list.
    pub fn write(ctx: &GlobalContext, packages: &[String]) -> Result<()> {
        let path = ctx.packages_path();
        let list = PackageList {
            packages: packages.to_vec(),
        };
        let contents =
            toml::to_string_pretty(&list).with_context(|| "failed to serialize package list")?;
        fs::write_string(&path, &contents)
            .with_context(|| format!("failed to write package list: {}", path.display()))
    }

    /// Track `package`, moving it to the end if it is already present.
    pub fn update(ctx: &GlobalContext, package: &str) -> Result<Vec<String>> {
        let mut packages = Self::read(ctx)?;
        packages.retain(|p| p != package);
        packages.push(package.to_string());
        Self::write(ctx, &packages)?;
        debug!(package, count = packages.len(), "updated package list");
        Ok(packages)
    }

    /// Stop tracking `package`.
    ///
    /// Returns `false` (and leaves the file alone) if it was not tracked.
    pub fn remove(ctx: &GlobalContext, package: &str) -> Result<bool> {
        let mut packages = Self::read(ctx)?;
        let before = packages.len();
        packages.retain(|p| p != package);
        if packages.len() == before {
            return Ok(false);
        }
        Self::write(ctx, &packages)?;
        Ok(true)
    }
}
