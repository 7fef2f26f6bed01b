//! Reading and writing `.xcodeproj` bundles.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::{PbxProj, ProjectError};
use crate::util::diagnostic::ProjectSyntaxError;
use crate::util::fs;

/// Document file inside a project bundle.
pub const PBXPROJ_FILE: &str = "project.pbxproj";

/// `<bundle>/project.pbxproj`
pub fn pbxproj_path(bundle: &Path) -> PathBuf {
    bundle.join(PBXPROJ_FILE)
}

/// Open the project in `bundle`, naming it after the bundle.
///
/// Syntax errors are reported with the offending line highlighted.
pub fn load_project(bundle: &Path) -> Result<PbxProj> {
    let path = pbxproj_path(bundle);
    let text = fs::read_to_string(&path)?;
    let proj = match PbxProj::parse(&text) {
        Ok(proj) => proj,
        Err(ProjectError::Syntax { line, message }) => {
            return Err(ProjectSyntaxError::new(&path, text, line, message).into());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to load {}", path.display()));
        }
    };

    if let Some(name) = bundle.file_stem().and_then(|s| s.to_str()) {
        proj.set_name(name)?;
    }
    debug!(path = %path.display(), "loaded project");
    Ok(proj)
}

/// Encode `proj` and replace the bundle's document.
pub fn save_project(proj: &PbxProj, bundle: &Path) -> Result<()> {
    let path = pbxproj_path(bundle);
    let text = proj
        .to_text()
        .with_context(|| format!("failed to encode {}", path.display()))?;
    fs::write_string(&path, &text)?;
    info!(path = %path.display(), "wrote project");
    Ok(())
}
