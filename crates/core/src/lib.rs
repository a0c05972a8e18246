//! Core functionality shared by the PilotOps crates.
//!
//! This crate provides the ambient pieces every other crate leans on:
//! the error type, logging initialization, configuration and the
//! geographic coordinate model used for departure points.

pub mod config;
pub mod error;
pub mod geo;
pub mod logging;

pub use config::{Config, FilesConfig, LogFormat, LoggingConfig, MalformedRecordPolicy};
pub use error::{CoreError, Result};
pub use geo::{GeoCoordinate, EARTH_RADIUS_KM};
