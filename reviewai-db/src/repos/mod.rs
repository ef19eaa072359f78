//! Repositories for database access

pub mod reviews;

pub use reviews::{ReviewRecord, ReviewsRepo};
