//! Appraisal - relational records for employee performance evaluations.
//!
//! Templates define the form (sections and questions), evaluations apply a
//! template to one employee over a period, and responses, goals, and
//! feedback hang off those evaluations. The crate keeps these records and
//! the rules that tie them together; it has no workflow of its own.
//!
//! # Architecture
//!
//! - [`domain`] - Record types, typed ids, choice enums, default orderings
//! - [`port`] - Store traits, one per record type
//! - [`adapter::outbound::sqlite`] - Diesel/SQLite store with declared
//!   foreign keys, cascades, and `CHECK` constraints
//! - [`adapter::outbound::memory`] - In-process store enforcing the same rules
//! - [`adapter::inbound::cli`] - The `appraisal` command-line interface
//! - [`infrastructure`] - Configuration, paths, logging
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use appraisal::adapter::outbound::sqlite::{open, PoolOptions, SqliteStore, MEMORY_DATABASE_URL};
//! use appraisal::domain::{NewSection, NewTemplate};
//! use appraisal::port::{SectionStore, TemplateStore};
//!
//! # async fn demo() -> appraisal::error::Result<()> {
//! let store = SqliteStore::new(open(MEMORY_DATABASE_URL, PoolOptions::default())?);
//! let template = TemplateStore::create(&store, NewTemplate::new("Annual Review")).await?;
//! SectionStore::create(&store, NewSection::new(template.id, "Delivery").with_order(2)).await?;
//! SectionStore::create(&store, NewSection::new(template.id, "Impact")).await?;
//!
//! let sections = SectionStore::list(&store, template.id).await?;
//! assert_eq!(sections[0].name, "Impact");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
