use crate::{load_manifest, utility::redact_url_password, Config};
use anyhow::{bail, Result};
use clap::Parser;
use console::style;
use tabula::{migrate, Db};

#[derive(Parser, Debug)]
pub struct StatusCommand {}

impl StatusCommand {
    pub(crate) async fn run(self, db: &Db, config: &Config) -> Result<()> {
        println!();
        println!("  {}", style("Schema Status").cyan().bold().underlined());
        println!();
        println!(
            "  {} {}",
            style("Database:").dim(),
            redact_url_password(&db.url())
        );
        println!();

        let manifest = load_manifest(db, config)?;
        let report = migrate::status(db, &manifest).await?;

        for schema in &report.schemas {
            let mark = if schema.is_current() {
                style("✓").green().bold()
            } else {
                style("✖").red().bold()
            };

            println!(
                "  {} {:<24} found {:>4}  expected {:>4}",
                mark,
                style(&schema.name).bold(),
                schema.found,
                schema.target
            );
        }

        println!();

        if let Some(schema) = report.first_mismatch() {
            bail!(
                "schema `{}` is at version {} but version {} is expected; run `migrate`",
                schema.name,
                schema.found,
                schema.target
            );
        }

        println!("  {}", style("All schemas are current").green().dim());
        println!();

        Ok(())
    }
}
