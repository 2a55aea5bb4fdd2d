//! Catalyst Core: configuration, errors, tag vocabulary, text helpers.

pub mod config;
pub mod error;
pub mod tags;
pub mod text;

pub use config::{CatalystConfig, DataPaths};
pub use error::{Error, Result};
