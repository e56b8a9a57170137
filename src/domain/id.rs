//! Surrogate key newtypes for every persisted record.
//!
//! Keys are assigned by the store on insert and are otherwise opaque. Each
//! entity gets its own type so a `SectionId` can never be passed where a
//! `TemplateId` is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! surrogate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw key.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// The raw key as stored.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

surrogate_id!(
    /// Identity of a user (employee, manager, feedback provider or recipient).
    UserId
);
surrogate_id!(
    /// Identity of an evaluation template.
    TemplateId
);
surrogate_id!(
    /// Identity of a template section.
    SectionId
);
surrogate_id!(
    /// Identity of a section question.
    QuestionId
);
surrogate_id!(
    /// Identity of a performance evaluation.
    EvaluationId
);
surrogate_id!(
    /// Identity of an answer within an evaluation.
    ResponseId
);
surrogate_id!(
    /// Identity of an employee goal.
    GoalId
);
surrogate_id!(
    /// Identity of a feedback entry.
    FeedbackId
);
