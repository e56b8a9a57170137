//! Evaluation instances and the answers recorded against them.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::choice::EvaluationStatus;
use super::id::{EvaluationId, QuestionId, ResponseId, TemplateId, UserId};

/// One employee evaluated against one template over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceEvaluation {
    pub id: EvaluationId,
    pub employee_id: UserId,
    pub manager_id: UserId,
    pub template_id: TemplateId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: EvaluationStatus,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for PerformanceEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Evaluation #{} for employee {} ({} to {})",
            self.id, self.employee_id, self.start_date, self.end_date
        )
    }
}

/// Fields for an evaluation that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvaluation {
    pub employee_id: UserId,
    pub manager_id: UserId,
    pub template_id: TemplateId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: EvaluationStatus,
}

impl NewEvaluation {
    /// A pending evaluation.
    #[must_use]
    pub fn new(
        employee_id: UserId,
        manager_id: UserId,
        template_id: TemplateId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            employee_id,
            manager_id,
            template_id,
            start_date,
            end_date,
            status: EvaluationStatus::default(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: EvaluationStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn into_evaluation(
        self,
        id: EvaluationId,
        created_at: DateTime<Utc>,
    ) -> PerformanceEvaluation {
        PerformanceEvaluation {
            id,
            employee_id: self.employee_id,
            manager_id: self.manager_id,
            template_id: self.template_id,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            created_at,
        }
    }
}

/// Restricts an evaluation listing. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationFilter {
    pub employee: Option<UserId>,
    pub manager: Option<UserId>,
    pub template: Option<TemplateId>,
    pub status: Option<EvaluationStatus>,
}

impl EvaluationFilter {
    /// True when `evaluation` passes every set criterion.
    #[must_use]
    pub fn matches(&self, evaluation: &PerformanceEvaluation) -> bool {
        self.employee.map_or(true, |id| evaluation.employee_id == id)
            && self.manager.map_or(true, |id| evaluation.manager_id == id)
            && self.template.map_or(true, |id| evaluation.template_id == id)
            && self.status.map_or(true, |s| evaluation.status == s)
    }
}

/// An answer to one question within one evaluation.
///
/// `rating` is meant for rating questions but nothing ties the two together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub id: ResponseId,
    pub evaluation_id: EvaluationId,
    pub question_id: QuestionId,
    pub response_text: Option<String>,
    pub rating: Option<i32>,
}

impl fmt::Display for EvaluationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Response to question {} in evaluation {}",
            self.question_id, self.evaluation_id
        )
    }
}

/// Fields for a response that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResponse {
    pub evaluation_id: EvaluationId,
    pub question_id: QuestionId,
    pub response_text: Option<String>,
    pub rating: Option<i32>,
}

impl NewResponse {
    /// An empty answer.
    #[must_use]
    pub fn new(evaluation_id: EvaluationId, question_id: QuestionId) -> Self {
        Self {
            evaluation_id,
            question_id,
            response_text: None,
            rating: None,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.response_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: i32) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn into_response(self, id: ResponseId) -> EvaluationResponse {
        EvaluationResponse {
            id,
            evaluation_id: self.evaluation_id,
            question_id: self.question_id,
            response_text: self.response_text,
            rating: self.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn evaluation() -> PerformanceEvaluation {
        NewEvaluation::new(
            UserId::new(1),
            UserId::new(2),
            TemplateId::new(3),
            date(2026, 1, 1),
            date(2026, 12, 31),
        )
        .into_evaluation(EvaluationId::new(5), Utc::now())
    }

    #[test]
    fn new_evaluation_is_pending() {
        assert_eq!(evaluation().status, EvaluationStatus::Pending);
    }

    #[test]
    fn display_names_employee_and_period() {
        assert_eq!(
            evaluation().to_string(),
            "Evaluation #5 for employee 1 (2026-01-01 to 2026-12-31)"
        );
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(EvaluationFilter::default().matches(&evaluation()));
    }

    #[test]
    fn filter_requires_every_set_field() {
        let filter = EvaluationFilter {
            employee: Some(UserId::new(1)),
            status: Some(EvaluationStatus::Completed),
            ..EvaluationFilter::default()
        };
        assert!(!filter.matches(&evaluation()));

        let filter = EvaluationFilter {
            employee: Some(UserId::new(1)),
            manager: Some(UserId::new(2)),
            ..EvaluationFilter::default()
        };
        assert!(filter.matches(&evaluation()));
    }

    #[test]
    fn rating_is_not_tied_to_question_type() {
        let response = NewResponse::new(EvaluationId::new(1), QuestionId::new(1))
            .with_text("Great work")
            .with_rating(11)
            .into_response(ResponseId::new(1));
        assert_eq!(response.rating, Some(11));
        assert_eq!(response.to_string(), "Response to question 1 in evaluation 1");
    }
}
