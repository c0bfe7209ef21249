pub use super::actor::Entity as Actor;
pub use super::category::Entity as Category;
pub use super::genre::Entity as Genre;
pub use super::movie::Entity as Movie;
pub use super::movie_actors::Entity as MovieActors;
pub use super::movie_directors::Entity as MovieDirectors;
pub use super::movie_genres::Entity as MovieGenres;
pub use super::rating::Entity as Rating;
pub use super::rating_star::Entity as RatingStar;
pub use super::review::Entity as Review;
