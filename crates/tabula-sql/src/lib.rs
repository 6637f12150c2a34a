//! SQL text generation for each supported backend.
//!
//! A [`Dialect`] renders the fixed set of statement templates the table
//! engine and the migration runner need. It is a pure string builder: it never
//! touches a connection and never fails.

mod dialect;
pub use dialect::{ConnectParams, Dialect, Flavor, Placeholder};
