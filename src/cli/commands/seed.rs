//! Seed command handler

use std::path::Path;

use crate::config::Config;
use crate::db::Store;
use crate::services::SeedService;

pub async fn cmd_seed(config: &Config, path: &Path) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    store.sync_rating_stars(&config.catalog.rating_stars).await?;

    let report = SeedService::new(store).load_file(path).await?;

    println!("✓ Seeded from {}", path.display());
    println!("  {report}");
    Ok(())
}
