//! Seed data shared by store and CLI tests.

use chrono::NaiveDate;

use crate::domain::{
    EvaluationQuestion, EvaluationSection, EvaluationTemplate, NewEvaluation, NewQuestion,
    NewSection, NewTemplate, NewUser, PerformanceEvaluation, QuestionType, User,
};
use crate::error::Result;
use crate::port::{EvaluationStore, QuestionStore, SectionStore, Store, TemplateStore, UserStore};

/// Build a date, panicking on an impossible one.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// The "Annual Review" scenario: two users, a template whose sections were
/// inserted with orders 2 then 1, one question in each section, and one
/// evaluation of `employee` by `manager`.
#[derive(Debug, Clone)]
pub struct AnnualReview {
    pub employee: User,
    pub manager: User,
    pub template: EvaluationTemplate,
    /// Inserted first, order 2.
    pub delivery: EvaluationSection,
    /// Inserted second, order 1.
    pub growth: EvaluationSection,
    pub delivery_question: EvaluationQuestion,
    pub growth_question: EvaluationQuestion,
    pub evaluation: PerformanceEvaluation,
}

impl AnnualReview {
    /// Insert the scenario into `store`.
    pub async fn seed<S: Store>(store: &S) -> Result<Self> {
        let employee = UserStore::create(
            store,
            NewUser::new("ada").with_email("ada@example.com"),
        )
        .await?;
        let manager = UserStore::create(
            store,
            NewUser::new("grace").with_email("grace@example.com"),
        )
        .await?;

        let template = TemplateStore::create(
            store,
            NewTemplate::new("Annual Review").with_description("Yearly review cycle"),
        )
        .await?;
        let delivery = SectionStore::create(
            store,
            NewSection::new(template.id, "Delivery").with_order(2),
        )
        .await?;
        let growth = SectionStore::create(
            store,
            NewSection::new(template.id, "Growth").with_order(1),
        )
        .await?;

        let delivery_question = QuestionStore::create(
            store,
            NewQuestion::new(delivery.id, "How consistently were commitments met?"),
        )
        .await?;
        let growth_question = QuestionStore::create(
            store,
            NewQuestion::new(growth.id, "Did they mentor anyone?").with_type(QuestionType::YesNo),
        )
        .await?;

        let evaluation = EvaluationStore::create(
            store,
            NewEvaluation::new(
                employee.id,
                manager.id,
                template.id,
                date(2026, 1, 1),
                date(2026, 12, 31),
            ),
        )
        .await?;

        Ok(Self {
            employee,
            manager,
            template,
            delivery,
            growth,
            delivery_question,
            growth_question,
            evaluation,
        })
    }
}
