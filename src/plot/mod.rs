//! Text rendering surface for charts.

pub mod ascii;

pub use ascii::render_chart;
