//! Customer revenue & usage KPI dashboard.
//!
//! The [`data`] layer loads the KPI table and derives filtered views and
//! group-by summaries; [`pages`] turns those into render directives; [`ui`]
//! draws them with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pages;
pub mod state;
pub mod ui;
