use tabula_core::stmt::Value;
use tabula_sql::Dialect;

/// Filter, ordering and paging for [`Table::fetch_all`](crate::Table::fetch_all).
///
/// Empty strings and zero limits or offsets mean "no clause". The filter is
/// SQL text; `args` are bound, in order, to the placeholders it contains. Use
/// [`Db::p`](crate::Db::p) to write placeholders that work on every dialect.
///
/// ```
/// # use tabula::{Dialect, Query};
/// let p = Dialect::postgresql();
/// let query = Query::new()
///     .filter(format!("author = {} AND published = {}", p.p(1), p.p(2)))
///     .arg("ann")
///     .arg(true)
///     .order("created_on DESC")
///     .limit(10);
///
/// assert_eq!(query.args.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// WHERE predicate
    pub filter: String,

    /// ORDER BY expression list
    pub order: String,

    pub limit: u64,

    pub offset: u64,

    /// Values bound to the filter's placeholders
    pub args: Vec<Value>,
}

impl Query {
    pub fn new() -> Query {
        Query::default()
    }

    pub fn filter(mut self, predicate: impl Into<String>) -> Query {
        self.filter = predicate.into();
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Query {
        self.order = order.into();
        self
    }

    pub fn limit(mut self, limit: u64) -> Query {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u64) -> Query {
        self.offset = offset;
        self
    }

    /// Appends one bound argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Query {
        self.args.push(value.into());
        self
    }

    pub fn args<I>(mut self, values: I) -> Query
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    /// Appends the clauses that are set to `select`, always in the order
    /// WHERE, ORDER BY, LIMIT, OFFSET.
    pub fn to_sql(&self, dialect: &Dialect, select: String) -> String {
        let mut sql = select;

        if !self.filter.is_empty() {
            sql = dialect.fetch_all_where(sql, &self.filter);
        }

        if !self.order.is_empty() {
            sql = dialect.fetch_all_order(sql, &self.order);
        }

        if self.limit != 0 {
            sql = dialect.fetch_all_limit(sql, self.limit);
        }

        if self.offset != 0 {
            sql = dialect.fetch_all_offset(sql, self.offset, self.limit != 0);
        }

        sql
    }
}
