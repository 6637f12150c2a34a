use crate::Result;

use serde::{Deserialize, Serialize};
use tabula_core::Error;

use std::{collections::BTreeMap, fmt, path::Path, str::FromStr};

/// The schema versions an application expects, read from a TOML file:
///
/// ```toml
/// default_schema = "blog"
///
/// [schema_versions]
/// blog = 3
/// audit = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionManifest {
    /// Schema used for tables that are not given one explicitly
    pub default_schema: String,

    /// Target version per schema
    pub schema_versions: BTreeMap<String, i64>,
}

/// One schema and the version the application expects it at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub name: String,
    pub version: i64,
}

impl VersionManifest {
    /// Load a manifest from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            Error::from(err).context(Error::configuration(format!(
                "cannot read version manifest `{}`",
                path.display()
            )))
        })?;
        contents.parse()
    }

    /// Schemas sorted by name.
    pub fn schemas(&self) -> impl Iterator<Item = SchemaEntry> + '_ {
        self.schema_versions
            .iter()
            .map(|(name, version)| SchemaEntry {
                name: name.clone(),
                version: *version,
            })
    }

    /// Target version of `schema`, if it is declared.
    pub fn target(&self, schema: &str) -> Option<i64> {
        self.schema_versions.get(schema).copied()
    }
}

impl FromStr for VersionManifest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let manifest: VersionManifest = toml::from_str(s).map_err(|err| {
            Error::configuration(format!("invalid version manifest: {}", err.message()))
        })?;

        if manifest.default_schema.is_empty() {
            return Err(Error::configuration(
                "invalid version manifest: `default_schema` is empty",
            ));
        }

        if manifest.schema_versions.is_empty() {
            return Err(Error::configuration(
                "invalid version manifest: `schema_versions` declares no schemas",
            ));
        }

        if let Some((name, version)) = manifest.schema_versions.iter().find(|(_, v)| **v < 0) {
            return Err(Error::configuration(format!(
                "invalid version manifest: schema `{name}` has negative version {version}"
            )));
        }

        Ok(manifest)
    }
}

impl fmt::Display for VersionManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let toml_str = toml::to_string_pretty(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", toml_str)
    }
}
