use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tabula::Db;

#[derive(Parser, Debug)]
pub struct ScriptCommand {
    /// Path to the SQL script
    path: PathBuf,
}

impl ScriptCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<()> {
        println!(
            "  {} Running {}",
            style("→").cyan(),
            style(self.path.display()).bold()
        );

        db.run_script(&self.path).await?;

        println!("  {} {}", style("✓").green().bold(), style("Committed").dim());
        Ok(())
    }
}
