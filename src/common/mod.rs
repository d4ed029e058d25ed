//! # Common Components
//!
//! Host-side utilities wrapped around the codec.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration parsing
//! - [`container`]: lossless image file loading and saving
//! - [`report`]: JSON summaries of encode and decode runs

pub mod config;
pub mod container;
pub mod report;
