//! Infrastructure: configuration, filesystem layout, and logging setup.

pub mod config;
