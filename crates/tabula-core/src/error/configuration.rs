use super::Error;

/// Error when the database or migration configuration is invalid.
///
/// Raised for unknown driver names, unreadable version manifests, and
/// manifests that do not name the schema being reconciled.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Configuration(_)))
    }
}
