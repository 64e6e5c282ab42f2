//! Prefecture population dashboard.
//!
//! Loads the e-Stat population estimate export (CP932 CSV), drops the
//! grand-total row, and derives a per-selection view: the chosen regions
//! sorted by one metric, the display unit for that metric, and the max/min
//! regions. Rendering is left to `output` and the interactive shell.
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod reports;
pub mod selection;
pub mod types;
pub mod util;
