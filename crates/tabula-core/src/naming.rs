//! Conversion between field names and column names.
//!
//! Field names are PascalCase (`FirstName`), column and table names are
//! snake_case (`first_name`). The two functions are inverses for names that
//! follow that convention.
//!
//! Both functions are total over identifier characters. Inputs outside the
//! convention (consecutive underscores, a leading digit) convert without
//! error, but may not round-trip. The empty string, and a column name ending
//! in an underscore, are rejected with [`Error::invalid_name`].

use crate::{Error, Result};

/// Converts a field or type name to its column name.
///
/// Every uppercase letter after the first character gets an underscore in
/// front of it, then the whole name is lowercased.
///
/// ```
/// # use tabula_core::naming::to_column_name;
/// assert_eq!(to_column_name("FirstName").unwrap(), "first_name");
/// assert_eq!(to_column_name("Type").unwrap(), "type");
/// ```
pub fn to_column_name(field_name: &str) -> Result<String> {
    if field_name.is_empty() {
        return Err(Error::invalid_name(field_name));
    }

    let mut ret = String::with_capacity(field_name.len() + 4);

    for (i, ch) in field_name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                ret.push('_');
            }
            ret.extend(ch.to_lowercase());
        } else {
            ret.push(ch);
        }
    }

    Ok(ret)
}

/// Converts a column name to its field name.
///
/// The first character, and every character following an underscore, is
/// uppercased; underscores are dropped.
///
/// ```
/// # use tabula_core::naming::to_field_name;
/// assert_eq!(to_field_name("first_name").unwrap(), "FirstName");
/// ```
pub fn to_field_name(column_name: &str) -> Result<String> {
    if column_name.is_empty() || column_name.ends_with('_') {
        return Err(Error::invalid_name(column_name));
    }

    let mut ret = String::with_capacity(column_name.len());
    let mut upper = true;

    for ch in column_name.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            ret.extend(ch.to_uppercase());
            upper = false;
        } else {
            ret.push(ch);
        }
    }

    Ok(ret)
}
