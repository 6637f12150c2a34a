use anyhow::Context;
use tabula::{migrate::VersionManifest, Db};
use tabula_cli::{Config, TabulaCli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let url = std::env::var("DATABASE_URL").context("`DATABASE_URL` is not set")?;
    let config = Config::new();

    let manifest = VersionManifest::load(config.migration.manifest_file())?;
    let db = Db::builder().manifest(manifest).connect(&url).await?;

    TabulaCli::with_config(db, config).parse_and_run().await
}
