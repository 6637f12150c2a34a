use crate::{naming, Record, Result};

use tabula_core::stmt::{Type, Value, ValueRecord};
use tabula_sql::Dialect;

/// Per-call statement metadata derived from one record.
///
/// Column names and values are index-aligned and follow the record's field
/// declaration order. Built fresh for every table operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDescriptor {
    /// Identity value, when the record has an identity field holding a
    /// positive integer.
    pub identity: Option<i64>,

    /// Position of the identity field among the record's fields.
    pub identity_index: Option<usize>,

    /// Column name of the identity field.
    pub identity_column: Option<String>,

    pub columns: Vec<String>,

    pub values: Vec<Value>,

    /// Schema-qualified table name in the dialect's syntax.
    pub table_name: String,

    /// Identity sequence, empty for dialects without one or records without
    /// an identity.
    pub sequence_name: String,

    /// Field index behind each entry of `columns`.
    fields: Vec<usize>,
}

impl RowDescriptor {
    /// Describes `record` for statements against `schema`.
    ///
    /// The identity column is left out of `columns` unless
    /// `include_identity` is set.
    pub fn describe<R: Record>(
        record: &R,
        include_identity: bool,
        schema: &str,
        dialect: &Dialect,
    ) -> Result<RowDescriptor> {
        let identity_index = R::identity_index();
        let mut columns = Vec::with_capacity(R::FIELDS.len());
        let mut values = Vec::with_capacity(R::FIELDS.len());
        let mut fields = Vec::with_capacity(R::FIELDS.len());

        for (index, field) in R::FIELDS.iter().enumerate() {
            if !include_identity && identity_index == Some(index) {
                continue;
            }

            columns.push(naming::to_column_name(field.name)?);
            values.push(record.get(index));
            fields.push(index);
        }

        // Zero and negative identities count as unset, so a default-valued
        // record never addresses a row.
        let identity = identity_index
            .and_then(|index| record.get(index).as_i64())
            .filter(|id| *id > 0);

        let identity_column = identity_index
            .map(|index| naming::to_column_name(R::FIELDS[index].name))
            .transpose()?;

        let table = table_name::<R>()?;
        let table_name = dialect.table_name(schema, &table);
        let sequence_name = match &identity_column {
            Some(column) => dialect.sequence_name_for(schema, &table, column),
            None => String::new(),
        };

        Ok(RowDescriptor {
            identity,
            identity_index,
            identity_column,
            columns,
            values,
            table_name,
            sequence_name,
            fields,
        })
    }

    /// Column types of `columns`, for decoding result rows.
    pub(crate) fn types<R: Record>(&self) -> Vec<Type> {
        self.fields.iter().map(|index| R::FIELDS[*index].ty).collect()
    }

    /// Stores a result row into `record`, column by column.
    pub(crate) fn scan<R: Record>(&self, record: &mut R, row: ValueRecord) -> Result<()> {
        if row.len() != self.fields.len() {
            tabula_core::bail!(
                "expected {} columns from `{}` but the row has {}",
                self.fields.len(),
                self.table_name,
                row.len()
            );
        }

        for (index, value) in self.fields.iter().zip(row) {
            record.set(*index, value)?;
        }

        Ok(())
    }
}

/// The unqualified table name of `R`: its `#[table]` override, or the type
/// name converted to snake case.
pub(crate) fn table_name<R: Record>() -> Result<String> {
    match R::TABLE {
        Some(table) => Ok(table.to_string()),
        None => naming::to_column_name(R::NAME),
    }
}
