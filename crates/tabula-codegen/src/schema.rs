mod error;
use error::ErrorSet;

mod field;
pub(crate) use field::Field;

mod record;
pub(crate) use record::Record;

mod record_attr;
use record_attr::RecordAttr;
