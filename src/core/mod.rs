//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod costs;
pub mod filters;
pub mod log;
pub mod model;
pub mod rates;
pub mod renewals;
pub mod summary;

// Re-export the list query types for cleaner imports
pub use filters::{ListQuery, SortKey};
