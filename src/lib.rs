//! Water-quality dashboard for the Big Sioux River sampling sites.
//!
//! `data` and `view` turn the sample table into chart specifications; `ui`
//! draws them with egui. The binary in `main.rs` wires the two together.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod registry;
pub mod state;
pub mod ui;
pub mod view;
