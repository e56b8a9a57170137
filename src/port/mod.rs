//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!        ┌─────────────────────────┐
//!        │   CLI (inbound adapter) │
//!        └────────────┬────────────┘
//!                     │
//!        ┌────────────▼────────────┐
//!        │   Domain + Store ports  │
//!        └────────────┬────────────┘
//!            ┌────────┴────────┐
//!            ▼                 ▼
//!      ┌───────────┐     ┌───────────┐
//!      │  SQLite   │     │  Memory   │
//!      │  Adapter  │     │  Adapter  │
//!      └───────────┘     └───────────┘
//! ```

pub mod outbound;

pub use outbound::store::{
    EvaluationStore, FeedbackStore, GoalStore, QuestionStore, ResponseStore, SectionStore, Store,
    TemplateStore, UserStore,
};
