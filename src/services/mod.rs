pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod feedback_service;
pub mod feedback_service_impl;
pub use feedback_service::{FeedbackError, FeedbackService, RatingSubmission, ReviewSubmission};
pub use feedback_service_impl::SeaOrmFeedbackService;

pub mod seed;
pub use seed::{CatalogSeed, SeedReport, SeedService};

pub mod validation;
pub use validation::FieldErrors;
