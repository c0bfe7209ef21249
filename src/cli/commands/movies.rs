//! List movies command handler

use crate::catalog::rating::tally_by_movie;
use crate::config::Config;
use crate::db::Store;

pub async fn cmd_list_movies(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let movies = store.list_published_movies().await?;

    if movies.is_empty() {
        println!("No published movies.");
        println!();
        println!("Load some with: filmoteka seed <file.toml>");
        return Ok(());
    }

    let ids: Vec<i32> = movies.iter().map(|m| m.id).collect();
    let tallies = tally_by_movie(store.get_star_values_for_movies(&ids).await?);

    println!("Movies ({} total)", movies.len());
    println!("{:-<70}", "");

    for movie in movies {
        let stars = tallies
            .get(&movie.id)
            .and_then(|t| t.middle_star())
            .map_or_else(|| "-".to_string(), |s| format!("avg {s}"));

        println!("{} ({}) [{}]", movie.title, movie.year, stars);
        println!("  ID: {} | Slug: {}", movie.id, movie.slug);
    }

    Ok(())
}
