pub mod actor;
pub mod movie;
pub mod rating;
pub mod reference;
pub mod review;
