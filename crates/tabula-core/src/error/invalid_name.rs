use super::Error;

/// Error when an identifier cannot be converted between field and column form.
#[derive(Debug)]
pub(super) struct InvalidNameError {
    name: Box<str>,
}

impl std::error::Error for InvalidNameError {}

impl core::fmt::Display for InvalidNameError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid identifier `{}`", self.name)
    }
}

impl Error {
    /// Creates an invalid-name error for `name`.
    pub fn invalid_name(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidName(InvalidNameError {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid-name error.
    pub fn is_invalid_name(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidName(_)))
    }
}
