use super::Error;

/// Error when a schema change script fails to apply.
///
/// The failing statement's error is carried as the cause, so the display
/// reads `migration failed: <script>: <driver error>`.
#[derive(Debug)]
pub(super) struct MigrationError {
    script: Box<str>,
}

impl std::error::Error for MigrationError {}

impl core::fmt::Display for MigrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "migration failed: {}", self.script)
    }
}

impl Error {
    /// Creates a migration error naming the script that failed.
    ///
    /// Usually attached with [`Error::context`] on top of the driver error.
    pub fn migration(script: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Migration(MigrationError {
            script: script.into().into(),
        }))
    }

    /// Returns `true` if this error is a migration failure.
    pub fn is_migration(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Migration(_)))
    }
}
