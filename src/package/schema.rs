//! Package description from `swift package dump-package`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::util::process::{find_swift, ProcessBuilder};

/// The subset of the dumped manifest xc uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageSchema {
    pub name: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A product declared by the package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub targets: Vec<String>,
}

impl PackageSchema {
    /// Ask the Swift toolchain to describe the package at `path`.
    pub fn introspect(path: &Path) -> Result<Self> {
        let swift = find_swift().context("`swift` was not found in PATH")?;
        let output = ProcessBuilder::new(swift)
            .args(["package", "dump-package"])
            .cwd(path)
            .exec_and_check()?;
        let schema = Self::from_json(&String::from_utf8_lossy(&output.stdout))
            .with_context(|| format!("failed to describe package at {}", path.display()))?;
        debug!(name = %schema.name, products = schema.products.len(), "introspected package");
        Ok(schema)
    }

    /// Parse `dump-package` JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse `swift package dump-package` output")
    }

    pub fn product_names(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.name.as_str()).collect()
    }
}
