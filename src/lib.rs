//! `climate-dash` library crate.
//!
//! The binary (`climate`) is a thin wrapper around this library so that:
//!
//! - chart composition is testable without a terminal or a server
//! - the same fetch/compose pipeline feeds both the CLI and the TUI

pub mod app;
pub mod cli;
pub mod compose;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod tui;
