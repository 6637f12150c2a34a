use super::Flavor;

use std::fmt;

/// A bound-parameter placeholder, rendered through `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    flavor: Flavor,
    ordinal: usize,
}

impl Placeholder {
    pub(super) fn new(flavor: Flavor, ordinal: usize) -> Placeholder {
        Placeholder { flavor, ordinal }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flavor {
            Flavor::Mysql => write!(f, "?"),
            Flavor::Postgresql => write!(f, "${}", self.ordinal),
            Flavor::Sqlite => write!(f, "?{}", self.ordinal),
        }
    }
}
