//! Input/output helpers.
//!
//! - chart file export and reload (`export`)

pub mod export;

pub use export::*;
