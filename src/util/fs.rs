//! Filesystem utilities.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
///
/// The contents go to a temporary file in the same directory first and are
/// moved into place, so readers never observe a half-written file.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temporary file in {}", parent.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = || directories::BaseDirs::new().map(|b| b.home_dir().to_path_buf());
    if path == "~" {
        if let Some(home) = home() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Lexically remove `.` and `..` components without touching the disk.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Directories under `root` whose extension is `ext`.
///
/// Hidden directories are skipped. Matches and any directory whose
/// extension is listed in `bundles` are not descended into. Results are
/// sorted.
pub fn find_dirs_with_extension(root: &Path, ext: &str, bundles: &[&str]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root).min_depth(1).into_iter();
    while let Some(entry) = walker.next() {
        let entry =
            entry.with_context(|| format!("failed to read directory: {}", root.display()))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden {
            walker.skip_current_dir();
            continue;
        }
        let Some(extension) = entry.path().extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if extension == ext {
            found.push(entry.into_path());
            walker.skip_current_dir();
        } else if bundles.contains(&extension) {
            walker.skip_current_dir();
        }
    }
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a/b/file.txt");

        write_string(&path, "one").unwrap();
        write_string(&path, "two").unwrap();

        assert_eq!(read_to_string(&path).unwrap(), "two");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/work/app"), Path::new("/work/packages/Foo")),
            PathBuf::from("../packages/Foo")
        );
    }

    #[test]
    fn test_find_dirs_with_extension() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("App.xcodeproj/nested.xcodeproj")).unwrap();
        fs::create_dir_all(tmp.path().join("sub/Lib.xcodeproj")).unwrap();
        fs::create_dir_all(tmp.path().join(".build/Hidden.xcodeproj")).unwrap();
        fs::write(tmp.path().join("file.xcodeproj"), "").unwrap();

        let found = find_dirs_with_extension(tmp.path(), "xcodeproj", &[]).unwrap();

        assert_eq!(
            found,
            vec![
                tmp.path().join("App.xcodeproj"),
                tmp.path().join("sub/Lib.xcodeproj")
            ]
        );
    }

    #[test]
    fn test_find_dirs_skips_bundles() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("App.xcodeproj/project.xcworkspace")).unwrap();
        fs::create_dir_all(tmp.path().join("sub/Main.xcworkspace")).unwrap();

        let found =
            find_dirs_with_extension(tmp.path(), "xcworkspace", &["xcodeproj", "xcworkspace"])
                .unwrap();
        assert_eq!(found, vec![tmp.path().join("sub/Main.xcworkspace")]);

        let unbounded = find_dirs_with_extension(tmp.path(), "xcworkspace", &[]).unwrap();
        assert_eq!(unbounded.len(), 2);
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("rel/path"), PathBuf::from("rel/path"));
        assert_eq!(expand_tilde("/abs"), PathBuf::from("/abs"));
    }
}
