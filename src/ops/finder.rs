//! Locating the project or workspace to edit.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::util::config::ProgramConfiguration;
use crate::util::context::GlobalContext;
use crate::util::diagnostic::{AmbiguousProjectError, NoProjectFoundError};
use crate::util::fs;

pub const WORKSPACE_EXTENSION: &str = "xcworkspace";
pub const PROJECT_EXTENSION: &str = "xcodeproj";
const BUNDLE_EXTENSIONS: [&str; 2] = [WORKSPACE_EXTENSION, PROJECT_EXTENSION];

/// Find the single workspace, or failing that the single project, under
/// `dir`.
///
/// The search is recursive and skips dot directories. Bundles are not
/// searched inside, so the workspace embedded in every `.xcodeproj` is never
/// a candidate.
pub fn find_xcode_project(dir: &Path) -> Result<PathBuf> {
    for extension in [WORKSPACE_EXTENSION, PROJECT_EXTENSION] {
        let mut found = fs::find_dirs_with_extension(dir, extension, &BUNDLE_EXTENSIONS)?;
        match found.len() {
            0 => continue,
            1 => return Ok(found.remove(0)),
            _ => {
                return Err(AmbiguousProjectError {
                    candidates: found.iter().map(|p| p.display().to_string()).collect(),
                }
                .into())
            }
        }
    }
    Err(NoProjectFoundError {
        root: dir.to_path_buf(),
    }
    .into())
}

/// Resolve a configured project path.
///
/// Absolute paths are returned as-is. A relative path is joined to `base`
/// if that exists; otherwise the path itself is used if it exists as
/// given. When neither exists the joined path is returned for the caller to
/// report.
pub fn resolve_project_path(path: &str, base: &Path) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let joined = base.join(path);
    if joined.exists() {
        return joined;
    }
    if path.exists() {
        return path.to_path_buf();
    }
    joined
}

/// The project or workspace the configuration names, else the one
/// discovered under the working directory.
pub fn locate(ctx: &GlobalContext, config: &ProgramConfiguration) -> Result<PathBuf> {
    let located = if let Some(project) = &config.project {
        resolve_project_path(project, ctx.cwd())
    } else if let Some(workspace) = &config.workspace {
        resolve_project_path(workspace, ctx.cwd())
    } else {
        find_xcode_project(ctx.cwd())?
    };
    debug!(path = %located.display(), "located project");
    Ok(located)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mkdir(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn test_prefers_workspace() {
        let tmp = TempDir::new().unwrap();
        mkdir(tmp.path(), "App.xcodeproj/project.xcworkspace");
        let workspace = mkdir(tmp.path(), "App.xcworkspace");

        assert_eq!(find_xcode_project(tmp.path()).unwrap(), workspace);
    }

    #[test]
    fn test_embedded_workspace_is_not_a_candidate() {
        let tmp = TempDir::new().unwrap();
        let project = mkdir(tmp.path(), "App.xcodeproj");
        mkdir(tmp.path(), "App.xcodeproj/project.xcworkspace");

        assert_eq!(find_xcode_project(tmp.path()).unwrap(), project);
    }

    #[test]
    fn test_finds_nested_project() {
        let tmp = TempDir::new().unwrap();
        let project = mkdir(tmp.path(), "ios/App.xcodeproj");
        mkdir(tmp.path(), ".build/Other.xcodeproj");

        assert_eq!(find_xcode_project(tmp.path()).unwrap(), project);
    }

    #[test]
    fn test_multiple_projects_is_error() {
        let tmp = TempDir::new().unwrap();
        mkdir(tmp.path(), "A.xcodeproj");
        mkdir(tmp.path(), "B.xcodeproj");

        let err = find_xcode_project(tmp.path()).unwrap_err();
        let ambiguous = err.downcast_ref::<AmbiguousProjectError>().unwrap();
        assert_eq!(ambiguous.candidates.len(), 2);
    }

    #[test]
    fn test_nothing_found() {
        let tmp = TempDir::new().unwrap();
        let err = find_xcode_project(tmp.path()).unwrap_err();
        assert!(err.downcast_ref::<NoProjectFoundError>().is_some());
    }

    #[test]
    fn test_resolve_project_path() {
        let tmp = TempDir::new().unwrap();
        let project = mkdir(tmp.path(), "App.xcodeproj");

        assert_eq!(resolve_project_path("App.xcodeproj", tmp.path()), project);
        assert_eq!(
            resolve_project_path("/abs/App.xcodeproj", tmp.path()),
            PathBuf::from("/abs/App.xcodeproj")
        );
        assert_eq!(
            resolve_project_path("Missing.xcodeproj", tmp.path()),
            tmp.path().join("Missing.xcodeproj")
        );
    }

    #[test]
    fn test_locate_uses_config_first() {
        let tmp = TempDir::new().unwrap();
        mkdir(tmp.path(), "A.xcodeproj");
        mkdir(tmp.path(), "B.xcodeproj");
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());

        let config = ProgramConfiguration::new(Some("B.xcodeproj".into()), None);
        assert_eq!(locate(&ctx, &config).unwrap(), tmp.path().join("B.xcodeproj"));

        let config = ProgramConfiguration::new(None, Some("W.xcworkspace".into()));
        assert_eq!(locate(&ctx, &config).unwrap(), tmp.path().join("W.xcworkspace"));
    }
}
