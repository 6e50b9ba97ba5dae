//! Core rain-drain simulation library.
//!
//! Water falls uniformly from the top edge of a wall onto horizontal
//! drains; each drain sheds what it collects off its right end, where it
//! falls onto the next drain below or down to the wall base.
//!
//! Main components:
//! - [`drain`] - drain records, layouts and the sweep order.
//! - [`validation`] - input checks and the overlap sweep.
//! - [`phases`] - drain-amount accumulation and landing-height resolution.
//! - [`occupancy`] / [`flow_buffer`] - per-position sweep buffers.
//! - [`wall`] - wall extent and span normalization.
//! - [`generator`] / [`raindrops`] - seeded random layouts and rain scatter.
//! - [`config`] - parameters for generation and display.
//! - [`error`] - the [`DrainError`] taxonomy.
//! - [`types`] - shared type aliases and IDs.

pub mod config;
pub mod drain;
pub mod error;
pub mod flow_buffer;
pub mod generator;
pub mod occupancy;
pub mod phases;
pub mod raindrops;
pub mod types;
pub mod validation;
pub mod wall;

pub use error::DrainError;
