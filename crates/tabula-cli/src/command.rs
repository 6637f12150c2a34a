mod describe;
mod migrate;
mod script;
mod status;

pub use describe::DescribeCommand;
pub use migrate::MigrateCommand;
pub use script::ScriptCommand;
pub use status::StatusCommand;
