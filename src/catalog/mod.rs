//! Read-model building blocks that do not touch the database: the average
//! star computation and review threading.

pub mod rating;
pub mod thread;

pub use rating::{StarTally, middle_star};
pub use thread::{FlatReview, ReviewNode, build_forest};
