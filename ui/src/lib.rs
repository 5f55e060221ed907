//! Shared UI crate for Risk Atlas. Data model, aggregation and the dashboard views live here.

pub mod core;
pub mod dashboard;
pub mod views;
