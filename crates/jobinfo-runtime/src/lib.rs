//! Runtime layer for jobinfo: configuration, caller identity, and the
//! service that sequences the scheduler queries for one report.

pub mod config;
pub mod error;
pub mod identity;
pub mod service;

pub use config::{Config, resolve_config_path};
pub use error::{Error, Result};
pub use identity::Identity;
pub use service::ReportService;
