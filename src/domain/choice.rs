//! Enumerated value sets for choice-constrained fields.
//!
//! Each type has a stable wire value (what is stored and accepted on the
//! command line) and a human label. Parsing anything outside the set fails,
//! which is how writes of unknown values are rejected before they reach a
//! store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

fn invalid_choice(field: &'static str, value: &str, all: &[&'static str]) -> DomainError {
    DomainError::InvalidChoice {
        field,
        value: value.to_string(),
        expected: all.join(", "),
    }
}

/// Answer format of an evaluation question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuestionType {
    /// Numeric rating.
    #[default]
    #[serde(rename = "rating")]
    Rating,
    /// Free text.
    #[serde(rename = "text")]
    Text,
    /// Yes or no.
    #[serde(rename = "yesno")]
    YesNo,
}

impl QuestionType {
    /// Every accepted value, in declaration order.
    pub const ALL: [Self; 3] = [Self::Rating, Self::Text, Self::YesNo];

    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Text => "text",
            Self::YesNo => "yesno",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rating => "Rating",
            Self::Text => "Text",
            Self::YesNo => "Yes/No",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| invalid_choice("question_type", s, &Self::ALL.map(Self::as_str)))
    }
}

/// Lifecycle status of a performance evaluation.
///
/// Inert: nothing restricts which status may follow which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl EvaluationStatus {
    /// Every accepted value, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| invalid_choice("status", s, &Self::ALL.map(Self::as_str)))
    }
}

/// Progress status of an employee goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    OnHold,
}

impl GoalStatus {
    /// Every accepted value, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::NotStarted,
        Self::InProgress,
        Self::Completed,
        Self::OnHold,
    ];

    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| invalid_choice("status", s, &Self::ALL.map(Self::as_str)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_defaults_to_rating() {
        assert_eq!(QuestionType::default(), QuestionType::Rating);
    }

    #[test]
    fn question_type_accepts_only_known_values() {
        assert_eq!("rating".parse::<QuestionType>().unwrap(), QuestionType::Rating);
        assert_eq!("text".parse::<QuestionType>().unwrap(), QuestionType::Text);
        assert_eq!("yesno".parse::<QuestionType>().unwrap(), QuestionType::YesNo);

        let err = "essay".parse::<QuestionType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value 'essay' for question_type; expected one of: rating, text, yesno"
        );
    }

    #[test]
    fn choice_parsing_is_case_sensitive() {
        assert!("Rating".parse::<QuestionType>().is_err());
        assert!("PENDING".parse::<EvaluationStatus>().is_err());
    }

    #[test]
    fn evaluation_status_round_trips_stored_values() {
        for status in EvaluationStatus::ALL {
            assert_eq!(status.as_str().parse::<EvaluationStatus>().unwrap(), status);
        }
        assert_eq!(EvaluationStatus::default(), EvaluationStatus::Pending);
        assert!("archived".parse::<EvaluationStatus>().is_err());
    }

    #[test]
    fn goal_status_round_trips_stored_values() {
        for status in GoalStatus::ALL {
            assert_eq!(status.as_str().parse::<GoalStatus>().unwrap(), status);
        }
        assert_eq!(GoalStatus::default(), GoalStatus::NotStarted);
        assert!("cancelled".parse::<GoalStatus>().is_err());
    }

    #[test]
    fn serde_uses_stored_values() {
        assert_eq!(
            serde_json::to_string(&QuestionType::YesNo).unwrap(),
            "\"yesno\""
        );
        assert_eq!(
            serde_json::to_string(&EvaluationStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&GoalStatus::OnHold).unwrap(),
            "\"on_hold\""
        );
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(QuestionType::YesNo.label(), "Yes/No");
        assert_eq!(EvaluationStatus::InProgress.label(), "In Progress");
        assert_eq!(GoalStatus::NotStarted.label(), "Not Started");
    }
}
