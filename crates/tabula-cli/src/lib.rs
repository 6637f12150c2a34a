mod command;
mod config;
mod utility;

pub use command::*;
pub use config::*;

use anyhow::Result;
use clap::Parser;
use tabula::{migrate::VersionManifest, Db};

/// Tabula CLI library for building custom command-line tools
pub struct TabulaCli {
    db: Db,
    config: Config,
}

impl TabulaCli {
    /// Create a new TabulaCli instance with the given database connection
    pub fn new(db: Db) -> Self {
        Self {
            db,
            config: Config::default(),
        }
    }

    /// Create a new TabulaCli instance with a custom configuration
    pub fn with_config(db: Db, config: Config) -> Self {
        Self { db, config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and execute CLI commands from command-line arguments
    pub async fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli).await
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub async fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli).await
    }

    async fn run(&self, cli: Cli) -> Result<()> {
        match cli.command {
            Command::Migrate(cmd) => cmd.run(&self.db, &self.config).await,
            Command::Status(cmd) => cmd.run(&self.db, &self.config).await,
            Command::Script(cmd) => cmd.run(&self.db).await,
            Command::Describe(cmd) => cmd.run(&self.db).await,
        }
    }
}

/// The manifest the database handle was built with, or the one at the
/// configured manifest path.
pub(crate) fn load_manifest(db: &Db, config: &Config) -> Result<VersionManifest> {
    match db.manifest() {
        Some(manifest) => Ok(manifest.clone()),
        None => Ok(VersionManifest::load(config.migration.manifest_file())?),
    }
}

#[derive(Parser, Debug)]
#[command(name = "tabula")]
#[command(about = "Tabula CLI - schema migration and inspection tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Apply pending change scripts and rerun view scripts
    Migrate(MigrateCommand),

    /// Compare stored schema versions with the manifest
    Status(StatusCommand),

    /// Run a SQL script in a single transaction
    Script(ScriptCommand),

    /// List the columns of a table
    Describe(DescribeCommand),
}
