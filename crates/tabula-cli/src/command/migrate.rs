use crate::{load_manifest, Config};
use anyhow::Result;
use clap::Parser;
use console::style;
use tabula::{migrate, Db};

#[derive(Parser, Debug)]
pub struct MigrateCommand {}

impl MigrateCommand {
    pub(crate) async fn run(self, db: &Db, config: &Config) -> Result<()> {
        println!();
        println!("  {}", style("Migrate Schemas").cyan().bold().underlined());
        println!();

        let manifest = load_manifest(db, config)?;
        let report = migrate::reconcile(db, &manifest, &config.migration, true).await?;

        for schema in &report.schemas {
            if schema.applied.is_empty() {
                println!(
                    "  {} {} is at version {}",
                    style("✓").green().bold(),
                    style(&schema.name).bold(),
                    schema.target
                );
                continue;
            }

            for version in &schema.applied {
                println!(
                    "  {} {} {}",
                    style("→").cyan(),
                    style(&schema.name).bold(),
                    style(format!("applied version {version:04}")).dim()
                );
            }

            println!(
                "  {} {} migrated from version {} to {}",
                style("✓").green().bold(),
                style(&schema.name).bold(),
                schema.found,
                schema.target
            );
        }

        println!();
        println!("  {}", style("All schemas updated").green().bold());
        println!();

        Ok(())
    }
}
