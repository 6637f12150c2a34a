/// The backend a [`Dialect`](super::Dialect) renders SQL for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    Postgresql,
    Mysql,
    Sqlite,
}
