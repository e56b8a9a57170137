//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`fixture`] - Seed data: the "Annual Review" scenario and date helpers.
//! - [`store`] - Ready-to-use store backends.

pub mod fixture;
pub mod store;
