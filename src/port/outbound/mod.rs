//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! The only infrastructure dependency is record storage.

pub mod store;
