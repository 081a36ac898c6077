//! Types and configuration shared between the server binary and its tests.

pub mod config;
pub mod types;
