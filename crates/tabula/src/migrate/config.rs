use std::path::{Path, PathBuf};

/// Where migration inputs live, relative to an application base path.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Application root the other paths are relative to
    pub base_path: PathBuf,

    /// Directory of numbered change scripts
    pub changes_path: PathBuf,

    /// Directory of view definition scripts
    pub objects_path: PathBuf,

    /// The schema-version manifest
    pub manifest_path: PathBuf,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            changes_path: PathBuf::from("sql/changes"),
            objects_path: PathBuf::from("sql/objects"),
            manifest_path: PathBuf::from("etc/dbversions.toml"),
        }
    }
}

impl MigrationConfig {
    /// Create a new MigrationConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    pub fn changes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.changes_path = path.into();
        self
    }

    pub fn objects_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.objects_path = path.into();
        self
    }

    pub fn manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    /// `<changes>/<driver>_<schema>_<version:04>.sql`
    pub fn change_script(&self, driver: &str, schema: &str, version: i64) -> PathBuf {
        self.resolve(&self.changes_path)
            .join(format!("{driver}_{schema}_{version:04}.sql"))
    }

    /// `<objects>/<driver>_<schema>_views.sql`
    pub fn views_script(&self, driver: &str, schema: &str) -> PathBuf {
        self.resolve(&self.objects_path)
            .join(format!("{driver}_{schema}_views.sql"))
    }

    pub fn manifest_file(&self) -> PathBuf {
        self.resolve(&self.manifest_path)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}
