//! Persistence ports for every evaluation record.
//!
//! One trait per entity. Implementations must uphold the relationship rules
//! documented on [`crate::domain`]:
//!
//! - `create` and `update` fail with [`Error::Integrity`](crate::error::Error::Integrity)
//!   when a reference does not resolve, and write nothing.
//! - `update` fails with [`Error::NotFound`](crate::error::Error::NotFound) when
//!   the record no longer exists.
//! - `delete` applies cascade and set-null rules atomically and returns
//!   `false` when there was nothing to delete.
//! - `list` returns records in the entity's default order.

use std::future::Future;

use crate::domain::{
    EvaluationFilter, EvaluationId, EvaluationQuestion, EvaluationResponse, EvaluationSection,
    EvaluationTemplate, Feedback, FeedbackId, Goal, GoalFilter, GoalId, NewEvaluation,
    NewFeedback, NewGoal, NewQuestion, NewResponse, NewSection, NewTemplate, NewUser,
    PerformanceEvaluation, QuestionId, ResponseId, SectionId, TemplateId, User, UserId,
};
use crate::error::Result;

/// Storage operations for users.
pub trait UserStore: Send + Sync {
    /// Insert a user. Usernames are unique.
    fn create(&self, user: NewUser) -> impl Future<Output = Result<User>> + Send;

    fn get(&self, id: UserId) -> impl Future<Output = Result<Option<User>>> + Send;

    fn update(&self, user: &User) -> impl Future<Output = Result<()>> + Send;

    /// Delete a user and every record referencing them in any role.
    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool>> + Send;

    /// All users by id.
    fn list(&self) -> impl Future<Output = Result<Vec<User>>> + Send;
}

/// Storage operations for evaluation templates.
pub trait TemplateStore: Send + Sync {
    fn create(&self, template: NewTemplate)
        -> impl Future<Output = Result<EvaluationTemplate>> + Send;

    fn get(&self, id: TemplateId)
        -> impl Future<Output = Result<Option<EvaluationTemplate>>> + Send;

    /// Write every mutable field. The creation timestamp is kept as stored.
    fn update(&self, template: &EvaluationTemplate) -> impl Future<Output = Result<()>> + Send;

    /// Delete a template with its sections, questions, and the evaluations
    /// built on it.
    fn delete(&self, id: TemplateId) -> impl Future<Output = Result<bool>> + Send;

    /// Templates by id, optionally only the active ones.
    fn list(&self, active_only: bool)
        -> impl Future<Output = Result<Vec<EvaluationTemplate>>> + Send;
}

/// Storage operations for template sections.
pub trait SectionStore: Send + Sync {
    fn create(&self, section: NewSection)
        -> impl Future<Output = Result<EvaluationSection>> + Send;

    fn get(&self, id: SectionId) -> impl Future<Output = Result<Option<EvaluationSection>>> + Send;

    fn update(&self, section: &EvaluationSection) -> impl Future<Output = Result<()>> + Send;

    /// Delete a section with its questions.
    fn delete(&self, id: SectionId) -> impl Future<Output = Result<bool>> + Send;

    /// Sections of a template by `order`, ties in insertion order.
    fn list(&self, template: TemplateId)
        -> impl Future<Output = Result<Vec<EvaluationSection>>> + Send;
}

/// Storage operations for section questions.
pub trait QuestionStore: Send + Sync {
    fn create(&self, question: NewQuestion)
        -> impl Future<Output = Result<EvaluationQuestion>> + Send;

    fn get(&self, id: QuestionId)
        -> impl Future<Output = Result<Option<EvaluationQuestion>>> + Send;

    fn update(&self, question: &EvaluationQuestion) -> impl Future<Output = Result<()>> + Send;

    /// Delete a question with the responses given to it.
    fn delete(&self, id: QuestionId) -> impl Future<Output = Result<bool>> + Send;

    /// Questions of a section by `order`, ties in insertion order.
    fn list(&self, section: SectionId)
        -> impl Future<Output = Result<Vec<EvaluationQuestion>>> + Send;
}

/// Storage operations for performance evaluations.
pub trait EvaluationStore: Send + Sync {
    fn create(&self, evaluation: NewEvaluation)
        -> impl Future<Output = Result<PerformanceEvaluation>> + Send;

    fn get(&self, id: EvaluationId)
        -> impl Future<Output = Result<Option<PerformanceEvaluation>>> + Send;

    /// Write every mutable field. The creation timestamp is kept as stored.
    fn update(&self, evaluation: &PerformanceEvaluation)
        -> impl Future<Output = Result<()>> + Send;

    /// Delete an evaluation with its responses and feedback. Goals linked to
    /// it survive with the link cleared.
    fn delete(&self, id: EvaluationId) -> impl Future<Output = Result<bool>> + Send;

    /// Evaluations by id matching `filter`.
    fn list(&self, filter: EvaluationFilter)
        -> impl Future<Output = Result<Vec<PerformanceEvaluation>>> + Send;
}

/// Storage operations for evaluation responses.
pub trait ResponseStore: Send + Sync {
    fn create(&self, response: NewResponse)
        -> impl Future<Output = Result<EvaluationResponse>> + Send;

    fn get(&self, id: ResponseId)
        -> impl Future<Output = Result<Option<EvaluationResponse>>> + Send;

    fn update(&self, response: &EvaluationResponse) -> impl Future<Output = Result<()>> + Send;

    fn delete(&self, id: ResponseId) -> impl Future<Output = Result<bool>> + Send;

    /// Responses of an evaluation by id.
    fn list(&self, evaluation: EvaluationId)
        -> impl Future<Output = Result<Vec<EvaluationResponse>>> + Send;
}

/// Storage operations for goals.
pub trait GoalStore: Send + Sync {
    fn create(&self, goal: NewGoal) -> impl Future<Output = Result<Goal>> + Send;

    fn get(&self, id: GoalId) -> impl Future<Output = Result<Option<Goal>>> + Send;

    fn update(&self, goal: &Goal) -> impl Future<Output = Result<()>> + Send;

    fn delete(&self, id: GoalId) -> impl Future<Output = Result<bool>> + Send;

    /// Goals matching `filter` by end date, ties in insertion order.
    fn list(&self, filter: GoalFilter) -> impl Future<Output = Result<Vec<Goal>>> + Send;
}

/// Storage operations for feedback.
pub trait FeedbackStore: Send + Sync {
    fn create(&self, feedback: NewFeedback) -> impl Future<Output = Result<Feedback>> + Send;

    fn get(&self, id: FeedbackId) -> impl Future<Output = Result<Option<Feedback>>> + Send;

    /// Write every mutable field. The creation timestamp is kept as stored.
    fn update(&self, feedback: &Feedback) -> impl Future<Output = Result<()>> + Send;

    fn delete(&self, id: FeedbackId) -> impl Future<Output = Result<bool>> + Send;

    /// Feedback of an evaluation by creation time, ties in insertion order.
    fn list(&self, evaluation: EvaluationId)
        -> impl Future<Output = Result<Vec<Feedback>>> + Send;
}

/// Every store trait at once, for code that drives a whole backend.
pub trait Store:
    UserStore
    + TemplateStore
    + SectionStore
    + QuestionStore
    + EvaluationStore
    + ResponseStore
    + GoalStore
    + FeedbackStore
{
}

impl<T> Store for T where
    T: UserStore
        + TemplateStore
        + SectionStore
        + QuestionStore
        + EvaluationStore
        + ResponseStore
        + GoalStore
        + FeedbackStore
{
}
