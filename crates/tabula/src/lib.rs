extern crate self as tabula;

pub mod db;
pub use db::{ColumnInfo, Db};

mod engine;
pub use engine::{RowDescriptor, Table};

pub mod migrate;

mod query;
pub use query::Query;

pub use tabula_core::{
    bail, err, naming,
    stmt::{self, Primitive, Type, Value},
    Error, Field, Record, Result,
};

pub use tabula_macros::Record;

pub use tabula_sql::{Dialect, Flavor, Placeholder};

#[doc(hidden)]
pub mod codegen_support {
    pub use tabula_core::{
        stmt::{Primitive, Value},
        Error, Field, Record, Result,
    };
}
