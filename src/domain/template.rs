//! Evaluation form structure: templates, their sections, and questions.
//!
//! A template owns sections, a section owns questions. Removing a parent
//! removes everything beneath it. Sections and questions carry an `order`
//! that is not unique; listings sort by it and fall back to insertion order.
//!
//! # Examples
//!
//! ```
//! use appraisal::domain::template::{NewQuestion, NewSection};
//! use appraisal::domain::choice::QuestionType;
//! use appraisal::domain::id::{SectionId, TemplateId};
//!
//! let section = NewSection::new(TemplateId::new(1), "Leadership");
//! assert_eq!(section.order, 1);
//!
//! let question = NewQuestion::new(SectionId::new(1), "Delegates effectively?")
//!     .with_type(QuestionType::YesNo)
//!     .with_order(3);
//! assert_eq!(question.order, 3);
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::choice::QuestionType;
use super::id::{QuestionId, SectionId, TemplateId};

/// Order assigned to sections and questions when none is given.
pub const DEFAULT_ORDER: i32 = 1;

/// Root of a form definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationTemplate {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    /// Set by the store on create.
    pub created_at: DateTime<Utc>,
    /// Advisory only; inactive templates can still be used.
    pub is_active: bool,
}

impl fmt::Display for EvaluationTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Fields for a template that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTemplate {
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl NewTemplate {
    /// An active template with an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            is_active: true,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Attach the id and creation time assigned by a store.
    #[must_use]
    pub fn into_template(self, id: TemplateId, created_at: DateTime<Utc>) -> EvaluationTemplate {
        EvaluationTemplate {
            id,
            name: self.name,
            description: self.description,
            created_at,
            is_active: self.is_active,
        }
    }
}

/// A titled group of questions within a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSection {
    pub id: SectionId,
    pub template_id: TemplateId,
    pub name: String,
    pub order: i32,
}

impl fmt::Display for EvaluationSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Fields for a section that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSection {
    pub template_id: TemplateId,
    pub name: String,
    pub order: i32,
}

impl NewSection {
    pub fn new(template_id: TemplateId, name: impl Into<String>) -> Self {
        Self {
            template_id,
            name: name.into(),
            order: DEFAULT_ORDER,
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn into_section(self, id: SectionId) -> EvaluationSection {
        EvaluationSection {
            id,
            template_id: self.template_id,
            name: self.name,
            order: self.order,
        }
    }
}

/// A single prompt within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationQuestion {
    pub id: QuestionId,
    pub section_id: SectionId,
    pub text: String,
    pub question_type: QuestionType,
    pub order: i32,
}

impl fmt::Display for EvaluationQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Fields for a question that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub section_id: SectionId,
    pub text: String,
    pub question_type: QuestionType,
    pub order: i32,
}

impl NewQuestion {
    /// A rating question at the default order.
    pub fn new(section_id: SectionId, text: impl Into<String>) -> Self {
        Self {
            section_id,
            text: text.into(),
            question_type: QuestionType::default(),
            order: DEFAULT_ORDER,
        }
    }

    #[must_use]
    pub fn with_type(mut self, question_type: QuestionType) -> Self {
        self.question_type = question_type;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn into_question(self, id: QuestionId) -> EvaluationQuestion {
        EvaluationQuestion {
            id,
            section_id: self.section_id,
            text: self.text,
            question_type: self.question_type,
            order: self.order,
        }
    }
}

/// Sort sections into listing order: `order`, then insertion.
pub fn sort_sections(sections: &mut [EvaluationSection]) {
    sections.sort_by_key(|s| (s.order, s.id));
}

/// Sort questions into listing order: `order`, then insertion.
pub fn sort_questions(questions: &mut [EvaluationQuestion]) {
    questions.sort_by_key(|q| (q.order, q.id));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: i32, order: i32) -> EvaluationSection {
        NewSection::new(TemplateId::new(1), format!("s{id}"))
            .with_order(order)
            .into_section(SectionId::new(id))
    }

    #[test]
    fn new_template_is_active_by_default() {
        let draft = NewTemplate::new("Annual Review");
        assert!(draft.is_active);
        assert!(draft.description.is_empty());
        assert!(!draft.inactive().is_active);
    }

    #[test]
    fn new_question_defaults() {
        let draft = NewQuestion::new(SectionId::new(4), "Communicates clearly?");
        assert_eq!(draft.question_type, QuestionType::Rating);
        assert_eq!(draft.order, DEFAULT_ORDER);
    }

    #[test]
    fn sort_sections_orders_by_order_then_insertion() {
        let mut sections = vec![section(1, 2), section(2, 1), section(3, 2), section(4, 1)];
        sort_sections(&mut sections);
        let ids: Vec<i32> = sections.iter().map(|s| s.id.get()).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn sort_questions_handles_negative_orders() {
        let mut questions = vec![
            NewQuestion::new(SectionId::new(1), "b")
                .with_order(0)
                .into_question(QuestionId::new(1)),
            NewQuestion::new(SectionId::new(1), "a")
                .with_order(-5)
                .into_question(QuestionId::new(2)),
        ];
        sort_questions(&mut questions);
        assert_eq!(questions[0].text, "a");
    }

    #[test]
    fn display_uses_names_and_text() {
        let template =
            NewTemplate::new("Annual Review").into_template(TemplateId::new(1), Utc::now());
        assert_eq!(template.to_string(), "Annual Review");
        assert_eq!(section(9, 1).to_string(), "s9");
    }
}
