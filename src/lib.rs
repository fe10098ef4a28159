//! Taxi trip + weather analytics dashboard.
//!
//! `data` loads the trip table once, `query` answers every view from it,
//! and `app`/`state`/`ui` host those views in an egui window.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod query;
pub mod state;
pub mod theme;
pub mod ui;
