pub mod prelude;

pub mod actor;
pub mod category;
pub mod genre;
pub mod movie;
pub mod movie_actors;
pub mod movie_directors;
pub mod movie_genres;
pub mod rating;
pub mod rating_star;
pub mod review;
