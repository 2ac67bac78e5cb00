//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - chart-facing types (`TimeSeries`, `Dataset`, `ChartSpec`)
//! - API payloads as served by the backend (`payloads`)

pub mod payloads;
pub mod types;

pub use payloads::*;
pub use types::*;
