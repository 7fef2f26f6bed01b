//! `xc init`: create `.xcodecli/config.toml`.

use anyhow::{bail, Result};
use tracing::info;

use crate::util::config::ProgramConfiguration;
use crate::util::context::GlobalContext;

/// Options for `xc init`.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub project: Option<String>,
    pub workspace: Option<String>,
}

/// Write a fresh configuration under the context's configuration root.
///
/// Fails if a configuration already exists or if both a project and a
/// workspace are given.
pub fn init(ctx: &GlobalContext, opts: &InitOptions) -> Result<ProgramConfiguration> {
    let dir = ctx.config_dir();
    let path = ctx.config_path();
    if dir.is_dir() && path.exists() {
        bail!(
            "both .xcodecli directory and config file already exist at: {}",
            dir.display()
        );
    }
    if opts.project.is_some() && opts.workspace.is_some() {
        bail!("cannot specify both --project and --workspace, please choose one");
    }

    ctx.ensure_config_dir()?;
    let config = ProgramConfiguration::new(opts.project.clone(), opts.workspace.clone());
    config.write(ctx)?;
    info!(path = %path.display(), "initialized configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_config() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        let opts = InitOptions {
            project: Some("App.xcodeproj".into()),
            workspace: None,
        };

        init(&ctx, &opts).unwrap();

        let config = ProgramConfiguration::read(&ctx).unwrap();
        assert_eq!(config.project.as_deref(), Some("App.xcodeproj"));
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        init(&ctx, &InitOptions::default()).unwrap();

        let err = init(&ctx, &InitOptions::default()).unwrap_err();
        assert!(err.to_string().contains("already exist"));
    }

    #[test]
    fn test_init_with_existing_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        std::fs::create_dir_all(ctx.config_dir()).unwrap();

        assert!(init(&ctx, &InitOptions::default()).is_ok());
        assert!(ctx.config_path().exists());
    }

    #[test]
    fn test_init_refuses_both_targets() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        let opts = InitOptions {
            project: Some("App.xcodeproj".into()),
            workspace: Some("App.xcworkspace".into()),
        };

        let err = init(&ctx, &opts).unwrap_err();
        assert!(err.to_string().contains("both --project and --workspace"));
        assert!(!ctx.config_path().exists());
    }
}
