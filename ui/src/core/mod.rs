//! Platform-agnostic data model: loading, filter cascade, aggregation and selection.

pub mod aggregate;
pub mod color;
pub mod config;
pub mod filters;
pub mod format;
pub mod geo;
pub mod loader;
pub mod platform;
pub mod record;
pub mod selection;
pub mod snapshot;
pub mod state;
