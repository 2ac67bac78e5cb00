//! Upstream data access.

pub mod api;

pub use api::ClimateClient;
