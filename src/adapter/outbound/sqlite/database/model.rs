//! Database model types for Diesel ORM.
//!
//! Each table has a queryable row, an insertable row without the key, and a
//! changeset holding the columns an update may write. Changesets leave out
//! creation timestamps, which are fixed at insert.

use diesel::prelude::*;

use super::schema::{
    evaluation_questions, evaluation_responses, evaluation_sections, evaluation_templates,
    feedback, goals, performance_evaluations, users,
};

/// Database row for a user.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// Insertable user row; also the update changeset.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub username: String,
    pub email: String,
}

/// Database row for a template.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = evaluation_templates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TemplateRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub is_active: bool,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = evaluation_templates)]
pub struct NewTemplateRow {
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub is_active: bool,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = evaluation_templates)]
pub struct TemplateChanges {
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

/// Database row for a section.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = evaluation_sections)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SectionRow {
    pub id: i32,
    pub template_id: i32,
    pub name: String,
    pub sort_order: i32,
}

/// Insertable section row; also the update changeset.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = evaluation_sections)]
pub struct NewSectionRow {
    pub template_id: i32,
    pub name: String,
    pub sort_order: i32,
}

/// Database row for a question.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = evaluation_questions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuestionRow {
    pub id: i32,
    pub section_id: i32,
    pub question_text: String,
    pub question_type: String,
    pub sort_order: i32,
}

/// Insertable question row; also the update changeset.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = evaluation_questions)]
pub struct NewQuestionRow {
    pub section_id: i32,
    pub question_text: String,
    pub question_type: String,
    pub sort_order: i32,
}

/// Database row for an evaluation.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = performance_evaluations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EvaluationRow {
    pub id: i32,
    pub employee_id: i32,
    pub manager_id: i32,
    pub template_id: i32,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = performance_evaluations)]
pub struct NewEvaluationRow {
    pub employee_id: i32,
    pub manager_id: i32,
    pub template_id: i32,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub created_at: String,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = performance_evaluations)]
pub struct EvaluationChanges {
    pub employee_id: i32,
    pub manager_id: i32,
    pub template_id: i32,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

/// Database row for a response.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = evaluation_responses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ResponseRow {
    pub id: i32,
    pub evaluation_id: i32,
    pub question_id: i32,
    pub response_text: Option<String>,
    pub rating: Option<i32>,
}

/// Insertable response row; also the update changeset.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = evaluation_responses)]
#[diesel(treat_none_as_null = true)]
pub struct NewResponseRow {
    pub evaluation_id: i32,
    pub question_id: i32,
    pub response_text: Option<String>,
    pub rating: Option<i32>,
}

/// Database row for a goal.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalRow {
    pub id: i32,
    pub employee_id: i32,
    pub goal_text: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub progress: i32,
    pub evaluation_id: Option<i32>,
}

/// Insertable goal row; also the update changeset.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = goals)]
#[diesel(treat_none_as_null = true)]
pub struct NewGoalRow {
    pub employee_id: i32,
    pub goal_text: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub progress: i32,
    pub evaluation_id: Option<i32>,
}

/// Database row for feedback.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = feedback)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FeedbackRow {
    pub id: i32,
    pub evaluation_id: i32,
    pub provider_id: i32,
    pub recipient_id: i32,
    pub feedback_text: String,
    pub created_at: String,
    pub is_360_feedback: bool,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = feedback)]
pub struct NewFeedbackRow {
    pub evaluation_id: i32,
    pub provider_id: i32,
    pub recipient_id: i32,
    pub feedback_text: String,
    pub created_at: String,
    pub is_360_feedback: bool,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = feedback)]
pub struct FeedbackChanges {
    pub evaluation_id: i32,
    pub provider_id: i32,
    pub recipient_id: i32,
    pub feedback_text: String,
    pub is_360_feedback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{
        create_pool, run_migrations, MEMORY_DATABASE_URL,
    };

    #[test]
    fn question_row_round_trips_through_sqlite() {
        let pool = create_pool(MEMORY_DATABASE_URL).unwrap();
        run_migrations(&pool).unwrap();
        let mut conn = pool.get().unwrap();

        diesel::insert_into(evaluation_templates::table)
            .values(&NewTemplateRow {
                name: "Annual Review".to_string(),
                description: String::new(),
                created_at: "2026-01-01T00:00:00.000000Z".to_string(),
                is_active: true,
            })
            .execute(&mut conn)
            .unwrap();
        diesel::insert_into(evaluation_sections::table)
            .values(&NewSectionRow {
                template_id: 1,
                name: "Delivery".to_string(),
                sort_order: 1,
            })
            .execute(&mut conn)
            .unwrap();
        diesel::insert_into(evaluation_questions::table)
            .values(&NewQuestionRow {
                section_id: 1,
                question_text: "Meets deadlines?".to_string(),
                question_type: "yesno".to_string(),
                sort_order: 2,
            })
            .execute(&mut conn)
            .unwrap();

        let row: QuestionRow = evaluation_questions::table
            .select(QuestionRow::as_select())
            .first(&mut conn)
            .unwrap();
        assert_eq!(row.question_type, "yesno");
        assert_eq!(row.sort_order, 2);
    }

    #[test]
    fn goal_changeset_writes_null_link() {
        let pool = create_pool(MEMORY_DATABASE_URL).unwrap();
        run_migrations(&pool).unwrap();
        let mut conn = pool.get().unwrap();

        diesel::insert_into(users::table)
            .values(&NewUserRow {
                username: "ada".to_string(),
                email: String::new(),
            })
            .execute(&mut conn)
            .unwrap();
        diesel::insert_into(evaluation_templates::table)
            .values(&NewTemplateRow {
                name: "t".to_string(),
                description: String::new(),
                created_at: "2026-01-01T00:00:00.000000Z".to_string(),
                is_active: true,
            })
            .execute(&mut conn)
            .unwrap();
        diesel::insert_into(performance_evaluations::table)
            .values(&NewEvaluationRow {
                employee_id: 1,
                manager_id: 1,
                template_id: 1,
                start_date: "2026-01-01".to_string(),
                end_date: "2026-12-31".to_string(),
                status: "pending".to_string(),
                created_at: "2026-01-01T00:00:00.000000Z".to_string(),
            })
            .execute(&mut conn)
            .unwrap();

        let mut goal = NewGoalRow {
            employee_id: 1,
            goal_text: "Mentor".to_string(),
            start_date: "2026-01-01".to_string(),
            end_date: "2026-06-30".to_string(),
            status: "not_started".to_string(),
            progress: 0,
            evaluation_id: Some(1),
        };
        diesel::insert_into(goals::table)
            .values(&goal)
            .execute(&mut conn)
            .unwrap();

        goal.evaluation_id = None;
        diesel::update(goals::table.find(1))
            .set(&goal)
            .execute(&mut conn)
            .unwrap();

        let row: GoalRow = goals::table
            .select(GoalRow::as_select())
            .first(&mut conn)
            .unwrap();
        assert_eq!(row.evaluation_id, None);
    }
}
