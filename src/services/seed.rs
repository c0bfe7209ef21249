//! Administrative seeding of the catalog from a TOML fixture.
//!
//! Categories and genres are matched by slug, people by name, movies by slug.
//! Rows that already exist are reused, so loading the same fixture twice only
//! adds ratings and reviews of movies created by the second run.
//!
//! Dates must be quoted (`world_premiere = "2024-05-01"`).

use crate::db::Store;
use crate::models::actor::NewActor;
use crate::models::feedback::ReviewThread;
use crate::models::movie::NewMovie;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSeed {
    pub categories: Vec<SeedTaxon>,
    pub genres: Vec<SeedTaxon>,
    pub actors: Vec<SeedActor>,
    pub movies: Vec<SeedMovie>,
}

/// A category or a genre.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedTaxon {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedActor {
    pub name: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedMovie {
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    pub poster: Option<String>,
    pub year: i32,
    #[serde(default)]
    pub country: String,
    pub world_premiere: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub budget: i64,
    #[serde(default)]
    pub fees_in_usa: i64,
    #[serde(default)]
    pub fees_in_world: i64,
    /// Category slug.
    pub category: Option<String>,
    /// Person names.
    #[serde(default)]
    pub directors: Vec<String>,
    /// Person names.
    #[serde(default)]
    pub actors: Vec<String>,
    /// Genre slugs.
    #[serde(default)]
    pub genres: Vec<String>,
    pub slug: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub ratings: Vec<SeedRating>,
    #[serde(default)]
    pub reviews: Vec<ReviewThread>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRating {
    pub ip: String,
    pub star: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub genres: usize,
    pub actors: usize,
    pub movies: usize,
    pub ratings: usize,
    pub reviews: usize,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} categories, {} genres, {} actors, {} movies, {} ratings, {} reviews",
            self.categories, self.genres, self.actors, self.movies, self.ratings, self.reviews
        )
    }
}

impl CatalogSeed {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse seed file: {}", path.display()))
    }

    /// Distinct star values used by the fixture's ratings, sorted.
    pub fn star_values(&self) -> Result<Vec<i32>> {
        let mut values = Vec::new();
        for m in &self.movies {
            for r in &m.ratings {
                if !(1..=10).contains(&r.star) {
                    bail!(
                        "Rating star {} of movie '{}' is out of range, stars must be between 1 and 10",
                        r.star,
                        m.slug
                    );
                }
                values.push(r.star);
            }
        }
        values.sort_unstable();
        values.dedup();
        Ok(values)
    }
}

pub struct SeedService {
    store: Store,
}

impl SeedService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn load_file(&self, path: &Path) -> Result<SeedReport> {
        let seed = CatalogSeed::from_path(path)?;
        self.apply(&seed).await
    }

    pub async fn apply(&self, seed: &CatalogSeed) -> Result<SeedReport> {
        let star_values = seed.star_values()?;
        let mut report = SeedReport::default();

        let mut categories: HashMap<String, i32> = HashMap::new();
        for c in &seed.categories {
            let id = match self.store.get_category_by_slug(&c.slug).await? {
                Some(existing) => existing.id,
                None => {
                    report.categories += 1;
                    self.store
                        .add_category(&c.title, &c.description, &c.slug)
                        .await?
                }
            };
            categories.insert(c.slug.clone(), id);
        }

        let mut genres: HashMap<String, i32> = HashMap::new();
        for g in &seed.genres {
            let id = match self.store.get_genre_by_slug(&g.slug).await? {
                Some(existing) => existing.id,
                None => {
                    report.genres += 1;
                    self.store.add_genre(&g.title, &g.description, &g.slug).await?
                }
            };
            genres.insert(g.slug.clone(), id);
        }

        let mut people: HashMap<String, i32> = self
            .store
            .list_actors()
            .await?
            .into_iter()
            .map(|a| (a.name, a.id))
            .collect();
        for a in &seed.actors {
            if people.contains_key(&a.name) {
                continue;
            }
            let id = self
                .store
                .add_actor(&NewActor {
                    name: a.name.clone(),
                    age: a.age,
                    description: a.description.clone(),
                    image: a.image.clone(),
                })
                .await?;
            people.insert(a.name.clone(), id);
            report.actors += 1;
        }

        self.store.sync_rating_stars(&star_values).await?;
        let star_ids: HashMap<i32, i32> = self
            .store
            .list_rating_stars()
            .await?
            .into_iter()
            .map(|s| (s.value, s.id))
            .collect();

        for m in &seed.movies {
            if self.store.get_movie_by_slug(&m.slug).await?.is_some() {
                info!("Movie {} already present, skipping", m.slug);
                continue;
            }

            let new_movie = NewMovie {
                title: m.title.clone(),
                tagline: m.tagline.clone(),
                description: m.description.clone(),
                poster: m.poster.clone(),
                year: m.year,
                country: m.country.clone(),
                world_premiere: m.world_premiere,
                budget: m.budget,
                fees_in_usa: m.fees_in_usa,
                fees_in_world: m.fees_in_world,
                category_id: m
                    .category
                    .as_deref()
                    .map(|slug| resolve(&categories, slug, "category", &m.slug))
                    .transpose()?,
                slug: m.slug.clone(),
                draft: m.draft,
                director_ids: resolve_all(&people, &m.directors, "director", &m.slug)?,
                actor_ids: resolve_all(&people, &m.actors, "actor", &m.slug)?,
                genre_ids: resolve_all(&genres, &m.genres, "genre", &m.slug)?,
            };

            let ratings = m
                .ratings
                .iter()
                .map(|r| {
                    star_ids
                        .get(&r.star)
                        .map(|&star_id| (r.ip.clone(), star_id))
                        .with_context(|| {
                            format!("Star {} of movie '{}' is not registered", r.star, m.slug)
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            let (_, reviews) = self
                .store
                .add_movie_with_feedback(&new_movie, &ratings, &m.reviews)
                .await?;
            report.movies += 1;
            report.ratings += ratings.len();
            report.reviews += reviews;
        }

        info!("Seeding finished: {}", report);
        Ok(report)
    }
}

fn resolve(index: &HashMap<String, i32>, key: &str, kind: &str, movie: &str) -> Result<i32> {
    index
        .get(key)
        .copied()
        .with_context(|| format!("Unknown {kind} '{key}' referenced by movie '{movie}'"))
}

fn resolve_all(
    index: &HashMap<String, i32>,
    keys: &[String],
    kind: &str,
    movie: &str,
) -> Result<Vec<i32>> {
    keys.iter()
        .map(|key| resolve(index, key, kind, movie))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_parses_nested_reviews() {
        let toml_str = r#"
            [[categories]]
            title = "Feature"
            slug = "feature"

            [[actors]]
            name = "Jane Doe"
            age = 40

            [[movies]]
            title = "TestTitle"
            year = 2150
            world_premiere = "2150-01-01"
            category = "feature"
            directors = ["Jane Doe"]
            slug = "test-movie"
            ratings = [{ ip = "172.17.0.1", star = 5 }]

            [[movies.reviews]]
            email = "test@gmail.com"
            name = "TestName"
            text = "Top level"

            [[movies.reviews.replies]]
            email = "child@gmail.com"
            name = "Child"
            text = "Reply"
        "#;

        let seed: CatalogSeed = toml::from_str(toml_str).unwrap();
        assert_eq!(seed.categories.len(), 1);
        assert!(seed.genres.is_empty());

        let movie = &seed.movies[0];
        assert_eq!(
            movie.world_premiere,
            chrono::NaiveDate::from_ymd_opt(2150, 1, 1)
        );
        assert!(!movie.draft);
        assert_eq!(movie.ratings[0].star, 5);
        assert_eq!(movie.reviews[0].replies[0].name, "Child");
    }

    #[test]
    fn test_star_values_are_range_checked() {
        let toml_str = r#"
            [[movies]]
            title = "A"
            year = 2000
            slug = "a"
            ratings = [{ ip = "1.1.1.1", star = 7 }, { ip = "2.2.2.2", star = 3 }]

            [[movies]]
            title = "B"
            year = 2001
            slug = "b"
            ratings = [{ ip = "1.1.1.1", star = 7 }]
        "#;
        let seed: CatalogSeed = toml::from_str(toml_str).unwrap();
        assert_eq!(seed.star_values().unwrap(), vec![3, 7]);

        let toml_str = r#"
            [[movies]]
            title = "C"
            year = 2002
            slug = "c"
            ratings = [{ ip = "1.1.1.1", star = 11 }]
        "#;
        let seed: CatalogSeed = toml::from_str(toml_str).unwrap();
        let err = seed.star_values().unwrap_err().to_string();
        assert!(err.contains("Rating star 11 of movie 'c' is out of range"));
    }

    #[test]
    fn test_unknown_reference_is_reported() {
        let index: HashMap<String, i32> = [("a".to_string(), 1)].into_iter().collect();
        assert_eq!(resolve(&index, "a", "genre", "m").unwrap(), 1);

        let err = resolve_all(&index, &["a".to_string(), "b".to_string()], "genre", "m")
            .unwrap_err()
            .to_string();
        assert!(err.contains("Unknown genre 'b'"));
    }
}
