//! Free-text feedback exchanged between users within an evaluation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{EvaluationId, FeedbackId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub evaluation_id: EvaluationId,
    pub provider_id: UserId,
    pub recipient_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Part of a 360-degree review.
    pub is_360: bool,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Feedback from {} to {}",
            self.provider_id, self.recipient_id
        )
    }
}

/// Fields for feedback that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub evaluation_id: EvaluationId,
    pub provider_id: UserId,
    pub recipient_id: UserId,
    pub text: String,
    pub is_360: bool,
}

impl NewFeedback {
    pub fn new(
        evaluation_id: EvaluationId,
        provider_id: UserId,
        recipient_id: UserId,
        text: impl Into<String>,
    ) -> Self {
        Self {
            evaluation_id,
            provider_id,
            recipient_id,
            text: text.into(),
            is_360: false,
        }
    }

    #[must_use]
    pub fn three_sixty(mut self) -> Self {
        self.is_360 = true;
        self
    }

    #[must_use]
    pub fn into_feedback(self, id: FeedbackId, created_at: DateTime<Utc>) -> Feedback {
        Feedback {
            id,
            evaluation_id: self.evaluation_id,
            provider_id: self.provider_id,
            recipient_id: self.recipient_id,
            text: self.text,
            created_at,
            is_360: self.is_360,
        }
    }
}

/// Sort feedback into listing order: creation time, then insertion.
pub fn sort_feedback(entries: &mut [Feedback]) {
    entries.sort_by_key(|f| (f.created_at, f.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: i32, minute: u32) -> Feedback {
        NewFeedback::new(EvaluationId::new(1), UserId::new(2), UserId::new(3), "ok")
            .into_feedback(
                FeedbackId::new(id),
                Utc.with_ymd_and_hms(2026, 5, 1, 12, minute, 0).unwrap(),
            )
    }

    #[test]
    fn feedback_is_not_360_by_default() {
        let draft = NewFeedback::new(EvaluationId::new(1), UserId::new(2), UserId::new(3), "x");
        assert!(!draft.is_360);
        assert!(draft.three_sixty().is_360);
    }

    #[test]
    fn sort_feedback_orders_by_creation_then_insertion() {
        let mut entries = vec![entry(1, 30), entry(2, 10), entry(3, 10)];
        sort_feedback(&mut entries);
        let ids: Vec<i32> = entries.iter().map(|f| f.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn display_names_both_parties() {
        assert_eq!(entry(1, 0).to_string(), "Feedback from 2 to 3");
    }
}
