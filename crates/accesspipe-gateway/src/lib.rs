//! Accesspipe Gateway - HTTP upload trigger in front of the pipeline core

pub mod server;

pub use server::{start_server, AppState};
