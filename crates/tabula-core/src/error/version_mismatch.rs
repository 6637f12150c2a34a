use super::Error;

/// Error when the stored schema version differs from the expected one and
/// migration was not requested, or when the database is ahead of the
/// application.
#[derive(Debug)]
pub(super) struct VersionMismatchError {
    schema: Box<str>,
    found: i64,
    expected: i64,
}

impl std::error::Error for VersionMismatchError {}

impl core::fmt::Display for VersionMismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "schema `{}` is at version {} but the application expects version {}; ",
            self.schema, self.found, self.expected
        )?;
        if self.found > self.expected {
            f.write_str("the database is newer than the application")
        } else {
            f.write_str("run migrate to update the database")
        }
    }
}

impl Error {
    /// Creates a version mismatch error.
    pub fn version_mismatch(schema: impl Into<String>, found: i64, expected: i64) -> Error {
        Error::from(super::ErrorKind::VersionMismatch(VersionMismatchError {
            schema: schema.into().into(),
            found,
            expected,
        }))
    }

    /// Returns `true` if this error is a version mismatch.
    pub fn is_version_mismatch(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::VersionMismatch(_)))
    }
}
