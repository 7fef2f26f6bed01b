//! Global context for xc operations.
//!
//! The context is created once by the binary from `--workdir` and
//! `--config` and passed down to every operation that touches the
//! filesystem. Nothing in the library reads the process working directory
//! on its own.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::fs;

/// Name of the per-project configuration directory.
pub const CONFIG_DIR_NAME: &str = ".xcodecli";

/// Project configuration file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Tracked package list inside [`CONFIG_DIR_NAME`].
pub const PACKAGES_FILE_NAME: &str = "packages.toml";

/// Saved remote package references inside [`CONFIG_DIR_NAME`].
pub const STATE_FILE_NAME: &str = "package_states.json";

/// Global context holding paths and output flags.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Working directory commands resolve relative paths against
    cwd: PathBuf,

    /// Directory that owns `.xcodecli/`
    config_root: PathBuf,

    /// Whether `--config` was given explicitly
    explicit_config: bool,

    verbose: bool,
    color: bool,
}

impl GlobalContext {
    /// Create a context rooted at the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a context with a specific working directory that also owns
    /// the configuration.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            config_root: cwd.clone(),
            cwd,
            explicit_config: false,
            verbose: false,
            color: true,
        }
    }

    /// Build the context from the `--workdir` and `--config` options.
    ///
    /// Both accept a leading `~` and are resolved against the process
    /// working directory.
    pub fn from_options(workdir: Option<&str>, config: Option<&str>) -> Result<Self> {
        let process_cwd =
            std::env::current_dir().context("failed to determine current directory")?;
        let cwd = match workdir {
            Some(dir) => fs::absolutize(&fs::expand_tilde(dir), &process_cwd),
            None => process_cwd.clone(),
        };
        let mut ctx = Self::with_cwd(cwd);
        if let Some(config) = config {
            ctx = ctx.with_config_root(fs::absolutize(&fs::expand_tilde(config), &process_cwd));
        }
        Ok(ctx)
    }

    /// Use `root` as the owner of `.xcodecli/`.
    pub fn with_config_root(mut self, root: PathBuf) -> Self {
        self.config_root = root;
        self.explicit_config = true;
        self
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn config_root(&self) -> &Path {
        &self.config_root
    }

    /// Whether the configuration root came from `--config`.
    pub fn has_explicit_config(&self) -> bool {
        self.explicit_config
    }

    /// `<config_root>/.xcodecli`
    pub fn config_dir(&self) -> PathBuf {
        self.config_root.join(CONFIG_DIR_NAME)
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE_NAME)
    }

    pub fn packages_path(&self) -> PathBuf {
        self.config_dir().join(PACKAGES_FILE_NAME)
    }

    pub fn state_path(&self) -> PathBuf {
        self.config_dir().join(STATE_FILE_NAME)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Resolve a user-supplied path against the working directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        fs::absolutize(&fs::expand_tilde(path), &self.cwd)
    }

    /// Ensure the configuration directory exists.
    pub fn ensure_config_dir(&self) -> Result<PathBuf> {
        let dir = self.config_dir();
        fs::ensure_dir(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_follow_config_root() {
        let ctx = GlobalContext::with_cwd(PathBuf::from("/work/app"))
            .with_config_root(PathBuf::from("/work/shared"));

        assert_eq!(ctx.cwd(), Path::new("/work/app"));
        assert!(ctx.has_explicit_config());
        assert_eq!(
            ctx.config_path(),
            PathBuf::from("/work/shared/.xcodecli/config.toml")
        );
        assert_eq!(
            ctx.packages_path(),
            PathBuf::from("/work/shared/.xcodecli/packages.toml")
        );
        assert_eq!(
            ctx.state_path(),
            PathBuf::from("/work/shared/.xcodecli/package_states.json")
        );
    }

    #[test]
    fn test_config_root_defaults_to_cwd() {
        let ctx = GlobalContext::with_cwd(PathBuf::from("/work/app"));
        assert_eq!(ctx.config_root(), Path::new("/work/app"));
        assert!(!ctx.has_explicit_config());
    }

    #[test]
    fn test_resolve_relative_to_cwd() {
        let ctx = GlobalContext::with_cwd(PathBuf::from("/work/app"));
        assert_eq!(ctx.resolve("../Lib"), PathBuf::from("/work/Lib"));
        assert_eq!(ctx.resolve("/abs/Lib"), PathBuf::from("/abs/Lib"));
    }

    #[test]
    fn test_from_options_absolute() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().to_str().unwrap();

        let ctx = GlobalContext::from_options(Some(dir), Some(dir)).unwrap();
        assert_eq!(ctx.cwd(), tmp.path());
        assert_eq!(ctx.config_root(), tmp.path());
        assert!(ctx.has_explicit_config());
    }

    #[test]
    fn test_ensure_config_dir() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());

        let dir = ctx.ensure_config_dir().unwrap();
        assert!(dir.is_dir());
        assert!(dir.ends_with(".xcodecli"));
    }
}
