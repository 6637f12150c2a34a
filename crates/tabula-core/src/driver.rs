mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, Result};

use std::{borrow::Cow, fmt::Debug};

/// A database backend: knows how to open connections to one database.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Driver name, as used in migration script file names
    /// (`postgres`, `mysql`, `sqlite`).
    fn driver_name(&self) -> &'static str;

    /// The URL this driver connects to.
    fn url(&self) -> Cow<'_, str>;

    /// Opens a new connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;

    /// Upper bound on open connections, when the backend imposes one.
    fn max_connections(&self) -> Option<usize> {
        None
    }
}

/// One database session.
///
/// Statements executed through the same `Connection` share a session, so a
/// last-insert-id query sees the insert that preceded it.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;
}
