pub mod actor;
pub mod feedback;
pub mod movie;
pub mod reference;
