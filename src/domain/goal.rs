//! Employee goals, optionally tied to an evaluation cycle.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::choice::GoalStatus;
use super::id::{EvaluationId, GoalId, UserId};

/// An objective owned by an employee.
///
/// `progress` is a percentage by convention; it is not clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub employee_id: UserId,
    pub text: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: GoalStatus,
    pub progress: i32,
    /// Cleared, not cascaded, when the evaluation is deleted.
    pub evaluation_id: Option<EvaluationId>,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Fields for a goal that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoal {
    pub employee_id: UserId,
    pub text: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: GoalStatus,
    pub progress: i32,
    pub evaluation_id: Option<EvaluationId>,
}

impl NewGoal {
    /// A goal that has not started, at zero progress, with no evaluation.
    pub fn new(
        employee_id: UserId,
        text: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            employee_id,
            text: text.into(),
            start_date,
            end_date,
            status: GoalStatus::default(),
            progress: 0,
            evaluation_id: None,
        }
    }

    #[must_use]
    pub fn for_evaluation(mut self, evaluation_id: EvaluationId) -> Self {
        self.evaluation_id = Some(evaluation_id);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: GoalStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: i32) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn into_goal(self, id: GoalId) -> Goal {
        Goal {
            id,
            employee_id: self.employee_id,
            text: self.text,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            progress: self.progress,
            evaluation_id: self.evaluation_id,
        }
    }
}

/// Restricts a goal listing. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoalFilter {
    pub employee: Option<UserId>,
    pub evaluation: Option<EvaluationId>,
}

impl GoalFilter {
    #[must_use]
    pub fn matches(&self, goal: &Goal) -> bool {
        self.employee.map_or(true, |id| goal.employee_id == id)
            && self
                .evaluation
                .map_or(true, |id| goal.evaluation_id == Some(id))
    }
}

/// Sort goals into listing order: end date, then insertion.
pub fn sort_goals(goals: &mut [Goal]) {
    goals.sort_by_key(|g| (g.end_date, g.id));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id: i32, end: (i32, u32, u32)) -> Goal {
        NewGoal::new(
            UserId::new(1),
            format!("goal {id}"),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
        .into_goal(GoalId::new(id))
    }

    #[test]
    fn new_goal_defaults() {
        let g = goal(1, (2026, 6, 30));
        assert_eq!(g.status, GoalStatus::NotStarted);
        assert_eq!(g.progress, 0);
        assert_eq!(g.evaluation_id, None);
    }

    #[test]
    fn progress_is_not_clamped() {
        let draft = NewGoal::new(
            UserId::new(1),
            "Overachieve",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        )
        .with_progress(150);
        assert_eq!(draft.progress, 150);
    }

    #[test]
    fn sort_goals_orders_by_end_date_then_insertion() {
        let mut goals = vec![
            goal(1, (2026, 12, 31)),
            goal(2, (2026, 3, 31)),
            goal(3, (2026, 3, 31)),
        ];
        sort_goals(&mut goals);
        let ids: Vec<i32> = goals.iter().map(|g| g.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn filter_by_evaluation_skips_unlinked_goals() {
        let linked = NewGoal::new(
            UserId::new(1),
            "linked",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        )
        .for_evaluation(EvaluationId::new(9))
        .into_goal(GoalId::new(1));
        let filter = GoalFilter {
            evaluation: Some(EvaluationId::new(9)),
            ..GoalFilter::default()
        };
        assert!(filter.matches(&linked));
        assert!(!filter.matches(&goal(2, (2026, 2, 1))));
    }
}
