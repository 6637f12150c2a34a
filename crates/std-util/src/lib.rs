mod result;

pub mod prelude {
    pub use crate::{assert_err, assert_ok};
}
