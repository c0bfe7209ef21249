//! List actors command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_list_actors(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let actors = store.list_actors().await?;

    if actors.is_empty() {
        println!("No actors or directors yet.");
        return Ok(());
    }

    println!("People ({} total)", actors.len());
    println!("{:-<70}", "");

    for actor in actors {
        println!("{} (age {})", actor.name, actor.age);
        println!("  ID: {}", actor.id);
    }

    Ok(())
}
