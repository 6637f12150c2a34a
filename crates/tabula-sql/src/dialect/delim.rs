use std::fmt;

/// Comma delimited
pub(super) struct Comma<L>(pub(super) L);

impl<L> fmt::Display for Comma<L>
where
    L: IntoIterator + Clone,
    L::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for i in self.0.clone() {
            write!(f, "{s}{i}")?;
            s = ", ";
        }
        Ok(())
    }
}
