//! Storage-agnostic record types for performance evaluations.
//!
//! Every entity is a plain struct with explicit relationship fields. A
//! `New*` draft carries the fields a caller supplies; the store assigns the
//! surrogate key (and creation timestamp where the entity has one) and hands
//! back the full record.
//!
//! Relationship rules enforced by every store:
//!
//! | Child | Parent | On parent delete |
//! | --- | --- | --- |
//! | section | template | cascade |
//! | question | section | cascade |
//! | evaluation | employee, manager, template | cascade |
//! | response | evaluation, question | cascade |
//! | goal | employee | cascade |
//! | goal | evaluation (optional) | set null |
//! | feedback | evaluation, provider, recipient | cascade |

pub mod calendar;
pub mod choice;
pub mod error;
pub mod evaluation;
pub mod feedback;
pub mod goal;
pub mod id;
pub mod template;
pub mod user;

pub use choice::{EvaluationStatus, GoalStatus, QuestionType};
pub use evaluation::{
    EvaluationFilter, EvaluationResponse, NewEvaluation, NewResponse, PerformanceEvaluation,
};
pub use feedback::{Feedback, NewFeedback};
pub use goal::{Goal, GoalFilter, NewGoal};
pub use id::{
    EvaluationId, FeedbackId, GoalId, QuestionId, ResponseId, SectionId, TemplateId, UserId,
};
pub use template::{
    EvaluationQuestion, EvaluationSection, EvaluationTemplate, NewQuestion, NewSection,
    NewTemplate,
};
pub use user::{NewUser, User};
