//! Accesspipe Core - shared error taxonomy and process configuration

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
