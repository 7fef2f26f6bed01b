//! Swift package references and product dependencies.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::error::ProjectError;
use crate::core::reference::ObjectRef;
use crate::core::value::{Fields, PlistValue};

/// Version constraint for a remote Swift package.
///
/// Serialized with the same `kind` tags and field names the IDE writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum VersionRequirement {
    UpToNextMajorVersion { minimum_version: String },
    UpToNextMinorVersion { minimum_version: String },
    VersionRange {
        minimum_version: String,
        maximum_version: String,
    },
    ExactVersion { version: String },
    Branch { branch: String },
    Revision { revision: String },
}

impl VersionRequirement {
    pub fn up_to_next_major(minimum: impl Into<String>) -> Self {
        VersionRequirement::UpToNextMajorVersion {
            minimum_version: minimum.into(),
        }
    }

    pub fn exact(version: impl Into<String>) -> Self {
        VersionRequirement::ExactVersion {
            version: version.into(),
        }
    }

    pub fn branch(branch: impl Into<String>) -> Self {
        VersionRequirement::Branch {
            branch: branch.into(),
        }
    }

    /// The IDE's `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            VersionRequirement::UpToNextMajorVersion { .. } => "upToNextMajorVersion",
            VersionRequirement::UpToNextMinorVersion { .. } => "upToNextMinorVersion",
            VersionRequirement::VersionRange { .. } => "versionRange",
            VersionRequirement::ExactVersion { .. } => "exactVersion",
            VersionRequirement::Branch { .. } => "branch",
            VersionRequirement::Revision { .. } => "revision",
        }
    }

    /// Encode as the `requirement` dictionary of a remote package.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("kind".to_string(), PlistValue::from(self.kind()));
        let mut put = |key: &str, value: &str| {
            fields.insert(key.to_string(), PlistValue::from(value));
        };
        match self {
            VersionRequirement::UpToNextMajorVersion { minimum_version }
            | VersionRequirement::UpToNextMinorVersion { minimum_version } => {
                put("minimumVersion", minimum_version)
            }
            VersionRequirement::VersionRange {
                minimum_version,
                maximum_version,
            } => {
                put("minimumVersion", minimum_version);
                put("maximumVersion", maximum_version);
            }
            VersionRequirement::ExactVersion { version } => put("version", version),
            VersionRequirement::Branch { branch } => put("branch", branch),
            VersionRequirement::Revision { revision } => put("revision", revision),
        }
        fields
    }

    /// Decode a `requirement` dictionary.
    pub fn from_fields(fields: &Fields) -> Result<Self, ProjectError> {
        let get = |key: &str| -> Result<String, ProjectError> {
            fields
                .get(key)
                .and_then(PlistValue::as_str)
                .map(str::to_string)
                .ok_or_else(|| ProjectError::InvalidValue {
                    field: "requirement".to_string(),
                    reason: format!("missing `{}`", key),
                })
        };
        let kind = get("kind")?;
        let requirement = match kind.as_str() {
            "upToNextMajorVersion" => VersionRequirement::UpToNextMajorVersion {
                minimum_version: get("minimumVersion")?,
            },
            "upToNextMinorVersion" => VersionRequirement::UpToNextMinorVersion {
                minimum_version: get("minimumVersion")?,
            },
            "versionRange" => VersionRequirement::VersionRange {
                minimum_version: get("minimumVersion")?,
                maximum_version: get("maximumVersion")?,
            },
            "exactVersion" => VersionRequirement::ExactVersion {
                version: get("version")?,
            },
            "branch" => VersionRequirement::Branch {
                branch: get("branch")?,
            },
            "revision" => VersionRequirement::Revision {
                revision: get("revision")?,
            },
            other => {
                return Err(ProjectError::InvalidValue {
                    field: "requirement".to_string(),
                    reason: format!("unknown requirement kind `{}`", other),
                })
            }
        };
        Ok(requirement)
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRequirement::UpToNextMajorVersion { minimum_version } => {
                write!(f, "up to next major from {}", minimum_version)
            }
            VersionRequirement::UpToNextMinorVersion { minimum_version } => {
                write!(f, "up to next minor from {}", minimum_version)
            }
            VersionRequirement::VersionRange {
                minimum_version,
                maximum_version,
            } => write!(f, "{}..<{}", minimum_version, maximum_version),
            VersionRequirement::ExactVersion { version } => write!(f, "exactly {}", version),
            VersionRequirement::Branch { branch } => write!(f, "branch {}", branch),
            VersionRequirement::Revision { revision } => write!(f, "revision {}", revision),
        }
    }
}

/// `XCRemoteSwiftPackageReference`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemotePackageReference {
    pub repository_url: Option<String>,
    pub requirement: Option<VersionRequirement>,
    pub extra: Fields,
}

impl RemotePackageReference {
    pub fn new(repository_url: impl Into<String>, requirement: Option<VersionRequirement>) -> Self {
        RemotePackageReference {
            repository_url: Some(repository_url.into()),
            requirement,
            extra: Fields::new(),
        }
    }

    /// Display name derived from the repository URL.
    pub fn name(&self) -> Option<String> {
        self.repository_url.as_deref().map(repository_name)
    }
}

/// `XCLocalSwiftPackageReference`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalPackageReference {
    pub relative_path: String,
    pub extra: Fields,
}

impl LocalPackageReference {
    pub fn new(relative_path: impl Into<String>) -> Self {
        LocalPackageReference {
            relative_path: relative_path.into(),
            extra: Fields::new(),
        }
    }

    /// Display name: the last component of the relative path.
    pub fn name(&self) -> &str {
        last_component(&self.relative_path)
    }
}

/// `XCSwiftPackageProductDependency`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageProductDependency {
    pub product_name: String,
    pub package: Option<ObjectRef>,
    pub extra: Fields,
}

impl PackageProductDependency {
    pub fn new(product_name: impl Into<String>, package: Option<ObjectRef>) -> Self {
        PackageProductDependency {
            product_name: product_name.into(),
            package,
            extra: Fields::new(),
        }
    }
}

/// Last path component of a repository URL without any `.git` suffix.
pub fn repository_name(repository_url: &str) -> String {
    let last = match Url::parse(repository_url) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string)
            .unwrap_or_else(|| last_component(repository_url).to_string()),
        Err(_) => last_component(repository_url).to_string(),
    };
    last.strip_suffix(".git").unwrap_or(&last).to_string()
}

fn last_component(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed
        .rsplit(|c| c == '/' || c == ':')
        .next()
        .unwrap_or(trimmed)
}
