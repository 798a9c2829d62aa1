//! Shared types, error model, and configuration for HotelScrub.
//!
//! This crate is the foundation depended on by all other HotelScrub crates.
//! It provides:
//! - [`HotelScrubError`] — the unified error type
//! - Domain types ([`RawListing`], [`HotelListing`], [`SkipReason`],
//!   [`CleanReport`], [`RunId`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, InputConfig, OutputConfig, config_dir, config_file_path, delimiter_byte,
    init_config, load_config, load_config_from,
};
pub use error::{HotelScrubError, Result};
pub use types::{
    CURRENT_REPORT_VERSION, CleanReport, HotelListing, RawListing, ReviewCategory, RunId,
    SkipClass, SkipCount, SkipReason,
};
