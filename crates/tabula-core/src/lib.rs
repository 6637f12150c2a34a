pub mod driver;
pub use driver::{Connection, Driver};

mod error;
pub use error::{Error, IntoError};

pub mod naming;

mod record;
pub use record::{Field, Record};

pub mod stmt;

/// A Result type alias that uses Tabula's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
