use crate::{
    stmt::{Type, Value},
    Result,
};

/// Column metadata for one field of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// The field name as declared on the type.
    pub name: &'static str,

    /// Storage type of the column.
    pub ty: Type,

    /// Whether the field accepts null (`Option<T>`).
    pub nullable: bool,

    /// Whether this is the identity field.
    pub key: bool,
}

/// A flat type whose fields map one-to-one to the columns of a table.
///
/// Implemented by `#[derive(Record)]`. Field order in [`Record::FIELDS`] is the
/// declaration order, and is the column order of every generated statement.
pub trait Record: Send + Sync + Sized + 'static {
    /// Bare type name, without any module path.
    const NAME: &'static str;

    /// Table name override. When `None`, the table name is derived from
    /// [`Record::NAME`].
    const TABLE: Option<&'static str> = None;

    /// Fields in declaration order.
    const FIELDS: &'static [Field];

    /// Returns the value of the field at `index`.
    fn get(&self, index: usize) -> Value;

    /// Stores `value` into the field at `index`.
    fn set(&mut self, index: usize, value: Value) -> Result<()>;

    /// Position of the identity field, if the type has one.
    fn identity_index() -> Option<usize> {
        Self::FIELDS.iter().position(|field| field.key)
    }
}
