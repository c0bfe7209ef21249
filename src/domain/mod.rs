//! Domain primitives for the movie catalog.
//!
//! Newtype identifiers keep movie, actor and review keys from being mixed up
//! as they travel between the HTTP layer, services and repositories.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[derive(Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }
    };
}

entity_id!(
    /// Primary key of a movie.
    MovieId
);
entity_id!(
    /// Primary key of an actor (also used for directors).
    ActorId
);
entity_id!(
    /// Primary key of a review.
    ReviewId
);

/// How a movie is addressed in a detail request: by primary key or by slug.
///
/// # Examples
///
/// ```rust
/// use filmoteka::domain::{MovieId, MovieKey};
///
/// assert_eq!(
///     MovieKey::parse("1917"),
///     MovieKey::Numeric { id: MovieId::new(1917), segment: "1917".into() }
/// );
/// assert_eq!(MovieKey::parse("test-movie"), MovieKey::Slug("test-movie".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieKey {
    /// Digits only. Matches the primary key first, then a slug spelled
    /// exactly like `segment`.
    Numeric { id: MovieId, segment: String },
    Slug(String),
}

impl MovieKey {
    /// A segment made only of ASCII digits that fits an `i32` may be an id,
    /// anything else is a slug.
    #[must_use]
    pub fn parse(segment: &str) -> Self {
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = segment.parse::<i32>() {
                return Self::Numeric {
                    id: MovieId::new(id),
                    segment: segment.to_string(),
                };
            }
        }
        Self::Slug(segment.to_string())
    }
}

impl fmt::Display for MovieKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric { segment, .. } => write!(f, "{segment}"),
            Self::Slug(slug) => write!(f, "'{slug}'"),
        }
    }
}

/// A 1-based page window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub const MAX_PAGE_SIZE: u64 = 100;

    #[must_use]
    pub const fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    /// Zero-based page index, as expected by the ORM paginator.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.page.saturating_sub(1)
    }
}

/// One page of results together with the total number of matching rows.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub page: u64,
    pub page_size: u64,
    pub results: Vec<T>,
}
