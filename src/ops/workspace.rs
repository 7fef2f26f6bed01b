//! Expanding a workspace into the projects it references.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::ops::finder::{PROJECT_EXTENSION, WORKSPACE_EXTENSION};
use crate::util::fs;

/// Workspace contents file inside a `.xcworkspace` bundle.
pub const CONTENTS_FILE: &str = "contents.xcworkspacedata";

/// The `.xcodeproj` bundles to edit for `path`.
///
/// A project yields itself; a workspace yields the projects it lists.
pub fn project_bundles(path: &Path) -> Result<Vec<PathBuf>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(PROJECT_EXTENSION) => Ok(vec![path.to_path_buf()]),
        Some(WORKSPACE_EXTENSION) => workspace_projects(path),
        _ => bail!(
            "path is neither a .xcodeproj nor a .xcworkspace: {}",
            path.display()
        ),
    }
}

/// Projects referenced by a workspace, in file order.
///
/// `absolute:` locations are taken as-is. `group:` locations are resolved
/// against the enclosing `Group`, or the workspace's directory at the top
/// level. `container:` and `self:` locations are resolved against the
/// workspace's directory.
pub fn workspace_projects(workspace: &Path) -> Result<Vec<PathBuf>> {
    let data = workspace.join(CONTENTS_FILE);
    let contents = fs::read_to_string(&data)?;
    let base = workspace.parent().unwrap_or_else(|| Path::new(""));

    let projects: Vec<PathBuf> = file_refs(&contents, base)
        .with_context(|| format!("failed to parse workspace data: {}", data.display()))?
        .into_iter()
        .filter(|path| path.extension().is_some_and(|e| e == PROJECT_EXTENSION))
        .collect();
    debug!(workspace = %workspace.display(), count = projects.len(), "expanded workspace");
    Ok(projects)
}

/// Every `FileRef` location in document order.
fn file_refs(contents: &str, base: &Path) -> Result<Vec<PathBuf>> {
    let mut reader = Reader::from_str(contents);
    let mut groups = vec![base.to_path_buf()];
    let mut found = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(element) if element.name().as_ref() == b"Group" => {
                let parent = groups.last().cloned().unwrap_or_else(|| base.to_path_buf());
                let dir = location(&element)?
                    .and_then(|location| resolve_location(&location, &parent, base))
                    .unwrap_or(parent);
                groups.push(dir);
            }
            Event::End(element) if element.name().as_ref() == b"Group" => {
                if groups.len() > 1 {
                    groups.pop();
                }
            }
            Event::Start(element) | Event::Empty(element)
                if element.name().as_ref() == b"FileRef" =>
            {
                let group = groups.last().map_or(base, PathBuf::as_path);
                if let Some(path) = location(&element)?
                    .and_then(|location| resolve_location(&location, group, base))
                {
                    found.push(path);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(found)
}

fn location(element: &BytesStart<'_>) -> Result<Option<String>> {
    match element.try_get_attribute("location")? {
        Some(attribute) => Ok(Some(attribute.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn resolve_location(location: &str, group: &Path, container: &Path) -> Option<PathBuf> {
    let (schema, path) = location.split_once(':')?;
    if path.is_empty() {
        return None;
    }
    match schema {
        "absolute" => Some(PathBuf::from(path)),
        "group" => Some(fs::normalize(&group.join(path))),
        _ => Some(fs::normalize(&container.join(path))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_workspace(dir: &Path, name: &str, refs: &[&str]) -> PathBuf {
        let workspace = dir.join(format!("{}.xcworkspace", name));
        std::fs::create_dir_all(&workspace).unwrap();
        let entries: String = refs
            .iter()
            .map(|location| format!("   <FileRef\n      location = \"{}\">\n   </FileRef>\n", location))
            .collect();
        std::fs::write(
            workspace.join(CONTENTS_FILE),
            format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Workspace\n   version = \"1.0\">\n{}</Workspace>\n",
                entries
            ),
        )
        .unwrap();
        workspace
    }

    #[test]
    fn test_workspace_projects() {
        let tmp = TempDir::new().unwrap();
        let workspace = write_workspace(
            tmp.path(),
            "App",
            &[
                "group:App.xcodeproj",
                "container:Libs/Core.xcodeproj",
                "absolute:/opt/Shared.xcodeproj",
                "group:Pods/Pods.xcodeproj",
                "group:README.md",
            ],
        );

        let projects = workspace_projects(&workspace).unwrap();
        assert_eq!(
            projects,
            vec![
                tmp.path().join("App.xcodeproj"),
                tmp.path().join("Libs/Core.xcodeproj"),
                PathBuf::from("/opt/Shared.xcodeproj"),
                tmp.path().join("Pods/Pods.xcodeproj"),
            ]
        );
    }

    #[test]
    fn test_project_bundles_for_project() {
        let path = PathBuf::from("/work/App.xcodeproj");
        assert_eq!(project_bundles(&path).unwrap(), vec![path]);
    }

    #[test]
    fn test_project_bundles_rejects_other_paths() {
        let err = project_bundles(Path::new("/work/App")).unwrap_err();
        assert!(err.to_string().contains("neither a .xcodeproj nor a .xcworkspace"));
    }

    #[test]
    fn test_group_locations_nest() {
        let tmp = TempDir::new().unwrap();
        let workspace = tmp.path().join("App.xcworkspace");
        std::fs::create_dir_all(&workspace).unwrap();
        std::fs::write(
            workspace.join(CONTENTS_FILE),
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Workspace
   version = "1.0">
   <Group
      location = "group:Libs"
      name = "Libs">
      <FileRef
         location = "group:Core.xcodeproj">
      </FileRef>
      <Group
         location = "container:Vendor"
         name = "Vendor">
         <FileRef
            location = "group:Pods.xcodeproj">
         </FileRef>
      </Group>
      <FileRef
         location = "group:../Tools/Gen.xcodeproj">
      </FileRef>
   </Group>
   <Group
      name = "Empty"/>
   <FileRef
      location = "group:R&amp;D.xcodeproj"/>
</Workspace>
"#,
        )
        .unwrap();

        let projects = workspace_projects(&workspace).unwrap();
        assert_eq!(
            projects,
            vec![
                tmp.path().join("Libs/Core.xcodeproj"),
                tmp.path().join("Vendor/Pods.xcodeproj"),
                tmp.path().join("Tools/Gen.xcodeproj"),
                tmp.path().join("R&D.xcodeproj"),
            ]
        );
    }

    #[test]
    fn test_malformed_workspace_data() {
        let tmp = TempDir::new().unwrap();
        let workspace = tmp.path().join("App.xcworkspace");
        std::fs::create_dir_all(&workspace).unwrap();
        std::fs::write(
            workspace.join(CONTENTS_FILE),
            "<Workspace><Group location = \"group:Libs\"></Workspace>",
        )
        .unwrap();

        let err = workspace_projects(&workspace).unwrap_err();
        assert!(err.to_string().contains("failed to parse workspace data"));
    }
}
