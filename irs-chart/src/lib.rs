//! Figures, controls and callback table for the US tax filing dashboard.
//!
//! This crate provides:
//! - `figure`: serde model of plotly.js figures
//! - `controls`: dropdowns whose options are derived from the dataset
//! - `state`: the control values submitted with each change
//! - `map_view` / `trend_view`: the two chart handlers
//! - `callbacks`: which handler runs when which control changes
//! - `page`: the HTML shell and its embedded client script

pub mod callbacks;
pub mod controls;
pub mod figure;
pub mod map_view;
pub mod page;
pub mod state;
pub mod trend_view;
