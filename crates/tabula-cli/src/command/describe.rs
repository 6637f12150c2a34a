use anyhow::{bail, Result};
use clap::Parser;
use console::style;
use tabula::Db;

#[derive(Parser, Debug)]
pub struct DescribeCommand {
    /// Table name, without schema
    table: String,

    /// Schema the table belongs to; defaults to the default schema
    #[arg(short, long)]
    schema: Option<String>,
}

impl DescribeCommand {
    pub(crate) async fn run(self, db: &Db) -> Result<()> {
        let schema = self.schema.as_deref().unwrap_or(db.default_schema());
        let columns = db.describe_table(schema, &self.table).await?;

        if columns.is_empty() {
            bail!("table `{}` not found in schema `{}`", self.table, schema);
        }

        println!();
        println!(
            "  {}",
            style(format!("{schema}.{}", self.table)).cyan().bold().underlined()
        );
        println!();

        for column in &columns {
            println!(
                "  {:<24} {:<20} {:<8} {}",
                style(&column.name).bold(),
                column.data_type,
                if column.nullable { "null" } else { "not null" },
                style(&column.field_name).dim()
            );
        }

        println!();
        Ok(())
    }
}
