//! SQLite store implementation.
//!
//! Provides persistent storage for every evaluation record using SQLite and
//! Diesel ORM. Cascades, set-null links, dangling references and choice
//! values are all enforced by the schema; constraint failures come back as
//! [`Error::Integrity`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    EvaluationChanges, EvaluationRow, FeedbackChanges, FeedbackRow, GoalRow, NewEvaluationRow,
    NewFeedbackRow, NewGoalRow, NewQuestionRow, NewResponseRow, NewSectionRow, NewTemplateRow,
    NewUserRow, QuestionRow, ResponseRow, SectionRow, TemplateChanges, TemplateRow, UserRow,
};
use crate::adapter::outbound::sqlite::database::schema::{
    evaluation_questions, evaluation_responses, evaluation_sections, evaluation_templates,
    feedback, goals, performance_evaluations, users,
};
use crate::domain::calendar::{self, parse_date};
use crate::domain::{
    EvaluationFilter, EvaluationId, EvaluationQuestion, EvaluationResponse, EvaluationSection,
    EvaluationTemplate, Feedback, FeedbackId, Goal, GoalFilter, GoalId, NewEvaluation,
    NewFeedback, NewGoal, NewQuestion, NewResponse, NewSection, NewTemplate, NewUser,
    PerformanceEvaluation, QuestionId, ResponseId, SectionId, TemplateId, User, UserId,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{
    EvaluationStore, FeedbackStore, GoalStore, QuestionStore, ResponseStore, SectionStore,
    TemplateStore, UserStore,
};

type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    #[diesel(column_name = "id")]
    id: i32,
}

/// Classify a Diesel error. Constraint violations are integrity errors.
fn db_error(err: DieselError) -> Error {
    match err {
        DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::NotNullViolation,
            info,
        ) => Error::Integrity(info.message().to_string()),
        other => Error::Database(other.to_string()),
    }
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| Error::Parse(e.to_string()))
}

/// Run `insert` and read back the key SQLite assigned, in one transaction.
fn insert_returning_id<F>(conn: &mut SqliteConnection, insert: F) -> Result<i32>
where
    F: FnOnce(&mut SqliteConnection) -> QueryResult<usize>,
{
    conn.transaction::<i32, DieselError, _>(|conn| {
        insert(conn)?;
        diesel::sql_query("SELECT last_insert_rowid() AS id")
            .get_result::<LastInsertRowId>(conn)
            .map(|row| row.id)
    })
    .map_err(db_error)
}

fn user_from_row(row: UserRow) -> User {
    User {
        id: UserId::new(row.id),
        username: row.username,
        email: row.email,
    }
}

fn template_from_row(row: TemplateRow) -> Result<EvaluationTemplate> {
    Ok(EvaluationTemplate {
        id: TemplateId::new(row.id),
        name: row.name,
        description: row.description,
        created_at: parse_timestamp(&row.created_at)?,
        is_active: row.is_active,
    })
}

fn section_from_row(row: SectionRow) -> EvaluationSection {
    EvaluationSection {
        id: SectionId::new(row.id),
        template_id: TemplateId::new(row.template_id),
        name: row.name,
        order: row.sort_order,
    }
}

fn question_from_row(row: QuestionRow) -> Result<EvaluationQuestion> {
    Ok(EvaluationQuestion {
        id: QuestionId::new(row.id),
        section_id: SectionId::new(row.section_id),
        text: row.question_text,
        question_type: row.question_type.parse()?,
        order: row.sort_order,
    })
}

fn evaluation_from_row(row: EvaluationRow) -> Result<PerformanceEvaluation> {
    Ok(PerformanceEvaluation {
        id: EvaluationId::new(row.id),
        employee_id: UserId::new(row.employee_id),
        manager_id: UserId::new(row.manager_id),
        template_id: TemplateId::new(row.template_id),
        start_date: parse_date("start_date", &row.start_date)?,
        end_date: parse_date("end_date", &row.end_date)?,
        status: row.status.parse()?,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

fn response_from_row(row: ResponseRow) -> EvaluationResponse {
    EvaluationResponse {
        id: ResponseId::new(row.id),
        evaluation_id: EvaluationId::new(row.evaluation_id),
        question_id: QuestionId::new(row.question_id),
        response_text: row.response_text,
        rating: row.rating,
    }
}

fn goal_from_row(row: GoalRow) -> Result<Goal> {
    Ok(Goal {
        id: GoalId::new(row.id),
        employee_id: UserId::new(row.employee_id),
        text: row.goal_text,
        start_date: parse_date("start_date", &row.start_date)?,
        end_date: parse_date("end_date", &row.end_date)?,
        status: row.status.parse()?,
        progress: row.progress,
        evaluation_id: row.evaluation_id.map(EvaluationId::new),
    })
}

fn feedback_from_row(row: FeedbackRow) -> Result<Feedback> {
    Ok(Feedback {
        id: FeedbackId::new(row.id),
        evaluation_id: EvaluationId::new(row.evaluation_id),
        provider_id: UserId::new(row.provider_id),
        recipient_id: UserId::new(row.recipient_id),
        text: row.feedback_text,
        created_at: parse_timestamp(&row.created_at)?,
        is_360: row.is_360_feedback,
    })
}

/// SQLite-backed store.
///
/// Implements every store trait in [`crate::port::outbound::store`] over one
/// connection pool.
#[derive(Clone)]
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection pool.
    ///
    /// The pool must already be migrated.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn conn(&self) -> Result<Conn> {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }
}

impl UserStore for SqliteStore {
    async fn create(&self, user: NewUser) -> Result<User> {
        let row = NewUserRow {
            username: user.username.clone(),
            email: user.email.clone(),
        };
        let mut conn = self.conn()?;
        let id = insert_returning_id(&mut conn, |conn| {
            diesel::insert_into(users::table).values(&row).execute(conn)
        })?;
        debug!(user_id = id, username = %row.username, "Created user");
        Ok(user.into_user(UserId::new(id)))
    }

    async fn get(&self, id: UserId) -> Result<Option<User>> {
        let mut conn = self.conn()?;
        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_error)?;
        Ok(row.map(user_from_row))
    }

    async fn update(&self, user: &User) -> Result<()> {
        let changes = NewUserRow {
            username: user.username.clone(),
            email: user.email.clone(),
        };
        let mut conn = self.conn()?;
        let updated = diesel::update(users::table.find(user.id.get()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(db_error)?;
        if updated == 0 {
            return Err(Error::not_found("user", user.id));
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .map_err(db_error)?;
        if deleted > 0 {
            info!(user_id = id.get(), "Deleted user and every record referencing them");
        }
        Ok(deleted > 0)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let mut conn = self.conn()?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order(users::id.asc())
            .load(&mut conn)
            .map_err(db_error)?;
        Ok(rows.into_iter().map(user_from_row).collect())
    }
}

impl TemplateStore for SqliteStore {
    async fn create(&self, template: NewTemplate) -> Result<EvaluationTemplate> {
        let created_at = calendar::now();
        let row = NewTemplateRow {
            name: template.name.clone(),
            description: template.description.clone(),
            created_at: calendar::format_timestamp(created_at),
            is_active: template.is_active,
        };
        let mut conn = self.conn()?;
        let id = insert_returning_id(&mut conn, |conn| {
            diesel::insert_into(evaluation_templates::table)
                .values(&row)
                .execute(conn)
        })?;
        debug!(template_id = id, name = %row.name, "Created template");
        Ok(template.into_template(TemplateId::new(id), created_at))
    }

    async fn get(&self, id: TemplateId) -> Result<Option<EvaluationTemplate>> {
        let mut conn = self.conn()?;
        let row: Option<TemplateRow> = evaluation_templates::table
            .find(id.get())
            .select(TemplateRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_error)?;
        row.map(template_from_row).transpose()
    }

    async fn update(&self, template: &EvaluationTemplate) -> Result<()> {
        let changes = TemplateChanges {
            name: template.name.clone(),
            description: template.description.clone(),
            is_active: template.is_active,
        };
        let mut conn = self.conn()?;
        let updated = diesel::update(evaluation_templates::table.find(template.id.get()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(db_error)?;
        if updated == 0 {
            return Err(Error::not_found("template", template.id));
        }
        Ok(())
    }

    async fn delete(&self, id: TemplateId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(evaluation_templates::table.find(id.get()))
            .execute(&mut conn)
            .map_err(db_error)?;
        if deleted > 0 {
            info!(
                template_id = id.get(),
                "Deleted template with its sections, questions and evaluations"
            );
        }
        Ok(deleted > 0)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<EvaluationTemplate>> {
        let mut conn = self.conn()?;
        let rows: Vec<TemplateRow> = if active_only {
            evaluation_templates::table
                .filter(evaluation_templates::is_active.eq(true))
                .select(TemplateRow::as_select())
                .order(evaluation_templates::id.asc())
                .load(&mut conn)
                .map_err(db_error)?
        } else {
            evaluation_templates::table
                .select(TemplateRow::as_select())
                .order(evaluation_templates::id.asc())
                .load(&mut conn)
                .map_err(db_error)?
        };
        rows.into_iter().map(template_from_row).collect()
    }
}

impl SectionStore for SqliteStore {
    async fn create(&self, section: NewSection) -> Result<EvaluationSection> {
        let row = NewSectionRow {
            template_id: section.template_id.get(),
            name: section.name.clone(),
            sort_order: section.order,
        };
        let mut conn = self.conn()?;
        let id = insert_returning_id(&mut conn, |conn| {
            diesel::insert_into(evaluation_sections::table)
                .values(&row)
                .execute(conn)
        })?;
        debug!(section_id = id, template_id = row.template_id, "Created section");
        Ok(section.into_section(SectionId::new(id)))
    }

    async fn get(&self, id: SectionId) -> Result<Option<EvaluationSection>> {
        let mut conn = self.conn()?;
        let row: Option<SectionRow> = evaluation_sections::table
            .find(id.get())
            .select(SectionRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_error)?;
        Ok(row.map(section_from_row))
    }

    async fn update(&self, section: &EvaluationSection) -> Result<()> {
        let changes = NewSectionRow {
            template_id: section.template_id.get(),
            name: section.name.clone(),
            sort_order: section.order,
        };
        let mut conn = self.conn()?;
        let updated = diesel::update(evaluation_sections::table.find(section.id.get()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(db_error)?;
        if updated == 0 {
            return Err(Error::not_found("section", section.id));
        }
        Ok(())
    }

    async fn delete(&self, id: SectionId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(evaluation_sections::table.find(id.get()))
            .execute(&mut conn)
            .map_err(db_error)?;
        if deleted > 0 {
            info!(section_id = id.get(), "Deleted section with its questions");
        }
        Ok(deleted > 0)
    }

    async fn list(&self, template: TemplateId) -> Result<Vec<EvaluationSection>> {
        let mut conn = self.conn()?;
        let rows: Vec<SectionRow> = evaluation_sections::table
            .filter(evaluation_sections::template_id.eq(template.get()))
            .select(SectionRow::as_select())
            .order((
                evaluation_sections::sort_order.asc(),
                evaluation_sections::id.asc(),
            ))
            .load(&mut conn)
            .map_err(db_error)?;
        Ok(rows.into_iter().map(section_from_row).collect())
    }
}

impl QuestionStore for SqliteStore {
    async fn create(&self, question: NewQuestion) -> Result<EvaluationQuestion> {
        let row = NewQuestionRow {
            section_id: question.section_id.get(),
            question_text: question.text.clone(),
            question_type: question.question_type.as_str().to_string(),
            sort_order: question.order,
        };
        let mut conn = self.conn()?;
        let id = insert_returning_id(&mut conn, |conn| {
            diesel::insert_into(evaluation_questions::table)
                .values(&row)
                .execute(conn)
        })?;
        debug!(question_id = id, section_id = row.section_id, "Created question");
        Ok(question.into_question(QuestionId::new(id)))
    }

    async fn get(&self, id: QuestionId) -> Result<Option<EvaluationQuestion>> {
        let mut conn = self.conn()?;
        let row: Option<QuestionRow> = evaluation_questions::table
            .find(id.get())
            .select(QuestionRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_error)?;
        row.map(question_from_row).transpose()
    }

    async fn update(&self, question: &EvaluationQuestion) -> Result<()> {
        let changes = NewQuestionRow {
            section_id: question.section_id.get(),
            question_text: question.text.clone(),
            question_type: question.question_type.as_str().to_string(),
            sort_order: question.order,
        };
        let mut conn = self.conn()?;
        let updated = diesel::update(evaluation_questions::table.find(question.id.get()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(db_error)?;
        if updated == 0 {
            return Err(Error::not_found("question", question.id));
        }
        Ok(())
    }

    async fn delete(&self, id: QuestionId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(evaluation_questions::table.find(id.get()))
            .execute(&mut conn)
            .map_err(db_error)?;
        if deleted > 0 {
            info!(question_id = id.get(), "Deleted question with its responses");
        }
        Ok(deleted > 0)
    }

    async fn list(&self, section: SectionId) -> Result<Vec<EvaluationQuestion>> {
        let mut conn = self.conn()?;
        let rows: Vec<QuestionRow> = evaluation_questions::table
            .filter(evaluation_questions::section_id.eq(section.get()))
            .select(QuestionRow::as_select())
            .order((
                evaluation_questions::sort_order.asc(),
                evaluation_questions::id.asc(),
            ))
            .load(&mut conn)
            .map_err(db_error)?;
        rows.into_iter().map(question_from_row).collect()
    }
}

impl EvaluationStore for SqliteStore {
    async fn create(&self, evaluation: NewEvaluation) -> Result<PerformanceEvaluation> {
        let created_at = calendar::now();
        let row = NewEvaluationRow {
            employee_id: evaluation.employee_id.get(),
            manager_id: evaluation.manager_id.get(),
            template_id: evaluation.template_id.get(),
            start_date: calendar::format_date("start_date", evaluation.start_date)?,
            end_date: calendar::format_date("end_date", evaluation.end_date)?,
            status: evaluation.status.as_str().to_string(),
            created_at: calendar::format_timestamp(created_at),
        };
        let mut conn = self.conn()?;
        let id = insert_returning_id(&mut conn, |conn| {
            diesel::insert_into(performance_evaluations::table)
                .values(&row)
                .execute(conn)
        })?;
        debug!(
            evaluation_id = id,
            employee_id = row.employee_id,
            template_id = row.template_id,
            "Created evaluation"
        );
        Ok(evaluation.into_evaluation(EvaluationId::new(id), created_at))
    }

    async fn get(&self, id: EvaluationId) -> Result<Option<PerformanceEvaluation>> {
        let mut conn = self.conn()?;
        let row: Option<EvaluationRow> = performance_evaluations::table
            .find(id.get())
            .select(EvaluationRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_error)?;
        row.map(evaluation_from_row).transpose()
    }

    async fn update(&self, evaluation: &PerformanceEvaluation) -> Result<()> {
        let changes = EvaluationChanges {
            employee_id: evaluation.employee_id.get(),
            manager_id: evaluation.manager_id.get(),
            template_id: evaluation.template_id.get(),
            start_date: calendar::format_date("start_date", evaluation.start_date)?,
            end_date: calendar::format_date("end_date", evaluation.end_date)?,
            status: evaluation.status.as_str().to_string(),
        };
        let mut conn = self.conn()?;
        let updated = diesel::update(performance_evaluations::table.find(evaluation.id.get()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(db_error)?;
        if updated == 0 {
            return Err(Error::not_found("evaluation", evaluation.id));
        }
        Ok(())
    }

    async fn delete(&self, id: EvaluationId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(performance_evaluations::table.find(id.get()))
            .execute(&mut conn)
            .map_err(db_error)?;
        if deleted > 0 {
            info!(
                evaluation_id = id.get(),
                "Deleted evaluation with its responses and feedback; linked goals kept"
            );
        }
        Ok(deleted > 0)
    }

    async fn list(&self, filter: EvaluationFilter) -> Result<Vec<PerformanceEvaluation>> {
        let mut conn = self.conn()?;
        let mut query = performance_evaluations::table
            .select(EvaluationRow::as_select())
            .into_boxed();
        if let Some(employee) = filter.employee {
            query = query.filter(performance_evaluations::employee_id.eq(employee.get()));
        }
        if let Some(manager) = filter.manager {
            query = query.filter(performance_evaluations::manager_id.eq(manager.get()));
        }
        if let Some(template) = filter.template {
            query = query.filter(performance_evaluations::template_id.eq(template.get()));
        }
        if let Some(status) = filter.status {
            query = query.filter(performance_evaluations::status.eq(status.as_str()));
        }
        let rows: Vec<EvaluationRow> = query
            .order(performance_evaluations::id.asc())
            .load(&mut conn)
            .map_err(db_error)?;
        rows.into_iter().map(evaluation_from_row).collect()
    }
}

impl ResponseStore for SqliteStore {
    async fn create(&self, response: NewResponse) -> Result<EvaluationResponse> {
        let row = NewResponseRow {
            evaluation_id: response.evaluation_id.get(),
            question_id: response.question_id.get(),
            response_text: response.response_text.clone(),
            rating: response.rating,
        };
        let mut conn = self.conn()?;
        let id = insert_returning_id(&mut conn, |conn| {
            diesel::insert_into(evaluation_responses::table)
                .values(&row)
                .execute(conn)
        })?;
        debug!(
            response_id = id,
            evaluation_id = row.evaluation_id,
            question_id = row.question_id,
            "Recorded response"
        );
        Ok(response.into_response(ResponseId::new(id)))
    }

    async fn get(&self, id: ResponseId) -> Result<Option<EvaluationResponse>> {
        let mut conn = self.conn()?;
        let row: Option<ResponseRow> = evaluation_responses::table
            .find(id.get())
            .select(ResponseRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_error)?;
        Ok(row.map(response_from_row))
    }

    async fn update(&self, response: &EvaluationResponse) -> Result<()> {
        let changes = NewResponseRow {
            evaluation_id: response.evaluation_id.get(),
            question_id: response.question_id.get(),
            response_text: response.response_text.clone(),
            rating: response.rating,
        };
        let mut conn = self.conn()?;
        let updated = diesel::update(evaluation_responses::table.find(response.id.get()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(db_error)?;
        if updated == 0 {
            return Err(Error::not_found("response", response.id));
        }
        Ok(())
    }

    async fn delete(&self, id: ResponseId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(evaluation_responses::table.find(id.get()))
            .execute(&mut conn)
            .map_err(db_error)?;
        Ok(deleted > 0)
    }

    async fn list(&self, evaluation: EvaluationId) -> Result<Vec<EvaluationResponse>> {
        let mut conn = self.conn()?;
        let rows: Vec<ResponseRow> = evaluation_responses::table
            .filter(evaluation_responses::evaluation_id.eq(evaluation.get()))
            .select(ResponseRow::as_select())
            .order(evaluation_responses::id.asc())
            .load(&mut conn)
            .map_err(db_error)?;
        Ok(rows.into_iter().map(response_from_row).collect())
    }
}

impl GoalStore for SqliteStore {
    async fn create(&self, goal: NewGoal) -> Result<Goal> {
        let row = NewGoalRow {
            employee_id: goal.employee_id.get(),
            goal_text: goal.text.clone(),
            start_date: calendar::format_date("start_date", goal.start_date)?,
            end_date: calendar::format_date("end_date", goal.end_date)?,
            status: goal.status.as_str().to_string(),
            progress: goal.progress,
            evaluation_id: goal.evaluation_id.map(EvaluationId::get),
        };
        let mut conn = self.conn()?;
        let id = insert_returning_id(&mut conn, |conn| {
            diesel::insert_into(goals::table).values(&row).execute(conn)
        })?;
        debug!(goal_id = id, employee_id = row.employee_id, "Created goal");
        Ok(goal.into_goal(GoalId::new(id)))
    }

    async fn get(&self, id: GoalId) -> Result<Option<Goal>> {
        let mut conn = self.conn()?;
        let row: Option<GoalRow> = goals::table
            .find(id.get())
            .select(GoalRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_error)?;
        row.map(goal_from_row).transpose()
    }

    async fn update(&self, goal: &Goal) -> Result<()> {
        let changes = NewGoalRow {
            employee_id: goal.employee_id.get(),
            goal_text: goal.text.clone(),
            start_date: calendar::format_date("start_date", goal.start_date)?,
            end_date: calendar::format_date("end_date", goal.end_date)?,
            status: goal.status.as_str().to_string(),
            progress: goal.progress,
            evaluation_id: goal.evaluation_id.map(EvaluationId::get),
        };
        let mut conn = self.conn()?;
        let updated = diesel::update(goals::table.find(goal.id.get()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(db_error)?;
        if updated == 0 {
            return Err(Error::not_found("goal", goal.id));
        }
        Ok(())
    }

    async fn delete(&self, id: GoalId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(goals::table.find(id.get()))
            .execute(&mut conn)
            .map_err(db_error)?;
        Ok(deleted > 0)
    }

    async fn list(&self, filter: GoalFilter) -> Result<Vec<Goal>> {
        let mut conn = self.conn()?;
        let mut query = goals::table.select(GoalRow::as_select()).into_boxed();
        if let Some(employee) = filter.employee {
            query = query.filter(goals::employee_id.eq(employee.get()));
        }
        if let Some(evaluation) = filter.evaluation {
            query = query.filter(goals::evaluation_id.eq(evaluation.get()));
        }
        let rows: Vec<GoalRow> = query
            .order((goals::end_date.asc(), goals::id.asc()))
            .load(&mut conn)
            .map_err(db_error)?;
        rows.into_iter().map(goal_from_row).collect()
    }
}

impl FeedbackStore for SqliteStore {
    async fn create(&self, entry: NewFeedback) -> Result<Feedback> {
        let created_at = calendar::now();
        let row = NewFeedbackRow {
            evaluation_id: entry.evaluation_id.get(),
            provider_id: entry.provider_id.get(),
            recipient_id: entry.recipient_id.get(),
            feedback_text: entry.text.clone(),
            created_at: calendar::format_timestamp(created_at),
            is_360_feedback: entry.is_360,
        };
        let mut conn = self.conn()?;
        let id = insert_returning_id(&mut conn, |conn| {
            diesel::insert_into(feedback::table).values(&row).execute(conn)
        })?;
        debug!(
            feedback_id = id,
            evaluation_id = row.evaluation_id,
            is_360 = row.is_360_feedback,
            "Recorded feedback"
        );
        Ok(entry.into_feedback(FeedbackId::new(id), created_at))
    }

    async fn get(&self, id: FeedbackId) -> Result<Option<Feedback>> {
        let mut conn = self.conn()?;
        let row: Option<FeedbackRow> = feedback::table
            .find(id.get())
            .select(FeedbackRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(db_error)?;
        row.map(feedback_from_row).transpose()
    }

    async fn update(&self, entry: &Feedback) -> Result<()> {
        let changes = FeedbackChanges {
            evaluation_id: entry.evaluation_id.get(),
            provider_id: entry.provider_id.get(),
            recipient_id: entry.recipient_id.get(),
            feedback_text: entry.text.clone(),
            is_360_feedback: entry.is_360,
        };
        let mut conn = self.conn()?;
        let updated = diesel::update(feedback::table.find(entry.id.get()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(db_error)?;
        if updated == 0 {
            return Err(Error::not_found("feedback", entry.id));
        }
        Ok(())
    }

    async fn delete(&self, id: FeedbackId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(feedback::table.find(id.get()))
            .execute(&mut conn)
            .map_err(db_error)?;
        Ok(deleted > 0)
    }

    async fn list(&self, evaluation: EvaluationId) -> Result<Vec<Feedback>> {
        let mut conn = self.conn()?;
        let rows: Vec<FeedbackRow> = feedback::table
            .filter(feedback::evaluation_id.eq(evaluation.get()))
            .select(FeedbackRow::as_select())
            .order((feedback::created_at.asc(), feedback::id.asc()))
            .load(&mut conn)
            .map_err(db_error)?;
        rows.into_iter().map(feedback_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{open, PoolOptions};
    use crate::adapter::outbound::sqlite::MEMORY_DATABASE_URL;
    use crate::domain::{EvaluationStatus, GoalStatus, QuestionType};
    use chrono::NaiveDate;

    fn setup_store() -> SqliteStore {
        let pool = open(MEMORY_DATABASE_URL, PoolOptions::default()).unwrap();
        SqliteStore::new(pool)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn evaluation_fixture(store: &SqliteStore) -> (User, User, PerformanceEvaluation) {
        let employee = UserStore::create(store, NewUser::new("ada")).await.unwrap();
        let manager = UserStore::create(store, NewUser::new("grace")).await.unwrap();
        let template = TemplateStore::create(store, NewTemplate::new("Annual Review"))
            .await
            .unwrap();
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
        .await
        .unwrap();
        (employee, manager, evaluation)
    }

    #[tokio::test]
    async fn create_then_get_returns_same_record() {
        let store = setup_store();
        let (_, _, evaluation) = evaluation_fixture(&store).await;

        let loaded = EvaluationStore::get(&store, evaluation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, evaluation);
        assert_eq!(loaded.status, EvaluationStatus::Pending);
    }

    #[tokio::test]
    async fn dangling_reference_is_an_integrity_error() {
        let store = setup_store();
        let err = QuestionStore::create(&store, NewQuestion::new(SectionId::new(404), "?"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Integrity(_)), "got {err:?}");

        let err = GoalStore::create(
            &store,
            NewGoal::new(UserId::new(9), "x", date(2026, 1, 1), date(2026, 2, 1)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Integrity(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn duplicate_username_is_an_integrity_error() {
        let store = setup_store();
        UserStore::create(&store, NewUser::new("ada")).await.unwrap();
        let err = UserStore::create(&store, NewUser::new("ada")).await.unwrap_err();
        assert!(matches!(err, Error::Integrity(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn check_constraint_rejects_unknown_question_type() {
        let store = setup_store();
        let template = TemplateStore::create(&store, NewTemplate::new("t")).await.unwrap();
        let section = SectionStore::create(&store, NewSection::new(template.id, "s"))
            .await
            .unwrap();

        let mut conn = store.pool().get().unwrap();
        let result = diesel::insert_into(evaluation_questions::table)
            .values(&NewQuestionRow {
                section_id: section.id.get(),
                question_text: "Essay?".to_string(),
                question_type: "essay".to_string(),
                sort_order: 1,
            })
            .execute(&mut conn)
            .map_err(db_error);
        assert!(matches!(result, Err(Error::Integrity(_))));
    }

    #[tokio::test]
    async fn check_constraint_rejects_unknown_statuses() {
        let store = setup_store();
        let (employee, _, evaluation) = evaluation_fixture(&store).await;

        let mut conn = store.pool().get().unwrap();
        let result = diesel::update(performance_evaluations::table.find(evaluation.id.get()))
            .set(performance_evaluations::status.eq("archived"))
            .execute(&mut conn)
            .map_err(db_error);
        assert!(matches!(result, Err(Error::Integrity(_))));

        let result = diesel::insert_into(goals::table)
            .values(&NewGoalRow {
                employee_id: employee.id.get(),
                goal_text: "x".to_string(),
                start_date: "2026-01-01".to_string(),
                end_date: "2026-02-01".to_string(),
                status: "cancelled".to_string(),
                progress: 0,
                evaluation_id: None,
            })
            .execute(&mut conn)
            .map_err(db_error);
        assert!(matches!(result, Err(Error::Integrity(_))));
    }

    #[tokio::test]
    async fn update_writes_fields_and_keeps_created_at() {
        let store = setup_store();
        let (_, _, mut evaluation) = evaluation_fixture(&store).await;
        let created_at = evaluation.created_at;

        evaluation.status = EvaluationStatus::Completed;
        evaluation.end_date = date(2026, 11, 30);
        evaluation.created_at = created_at - chrono::Duration::days(30);
        EvaluationStore::update(&store, &evaluation).await.unwrap();

        let loaded = EvaluationStore::get(&store, evaluation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.status, EvaluationStatus::Completed);
        assert_eq!(loaded.end_date, date(2026, 11, 30));
        assert_eq!(loaded.created_at, created_at);
    }

    #[tokio::test]
    async fn update_of_missing_goal_is_not_found() {
        let store = setup_store();
        let ghost = NewGoal::new(UserId::new(1), "x", date(2026, 1, 1), date(2026, 2, 1))
            .into_goal(GoalId::new(77));
        let err = GoalStore::update(&store, &ghost).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "goal", id: 77 }));
    }

    #[tokio::test]
    async fn evaluation_filter_narrows_listing() {
        let store = setup_store();
        let (employee, manager, first) = evaluation_fixture(&store).await;
        let second = EvaluationStore::create(
            &store,
            NewEvaluation::new(
                manager.id,
                employee.id,
                first.template_id,
                date(2026, 1, 1),
                date(2026, 6, 30),
            )
            .with_status(EvaluationStatus::InProgress),
        )
        .await
        .unwrap();

        let all = EvaluationStore::list(&store, EvaluationFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let by_employee = EvaluationStore::list(
            &store,
            EvaluationFilter {
                employee: Some(employee.id),
                ..EvaluationFilter::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_employee, vec![first]);

        let in_progress = EvaluationStore::list(
            &store,
            EvaluationFilter {
                status: Some(EvaluationStatus::InProgress),
                ..EvaluationFilter::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(in_progress, vec![second]);
    }

    #[tokio::test]
    async fn goal_updates_round_trip_status_and_link() {
        let store = setup_store();
        let (employee, _, evaluation) = evaluation_fixture(&store).await;
        let mut goal = GoalStore::create(
            &store,
            NewGoal::new(employee.id, "Mentor two juniors", date(2026, 1, 1), date(2026, 6, 30)),
        )
        .await
        .unwrap();

        goal.status = GoalStatus::InProgress;
        goal.progress = 40;
        goal.evaluation_id = Some(evaluation.id);
        GoalStore::update(&store, &goal).await.unwrap();
        assert_eq!(GoalStore::get(&store, goal.id).await.unwrap(), Some(goal.clone()));

        goal.evaluation_id = None;
        GoalStore::update(&store, &goal).await.unwrap();
        let loaded = GoalStore::get(&store, goal.id).await.unwrap().unwrap();
        assert_eq!(loaded.evaluation_id, None);
    }

    #[tokio::test]
    async fn questions_keep_their_type() {
        let store = setup_store();
        let template = TemplateStore::create(&store, NewTemplate::new("t")).await.unwrap();
        let section = SectionStore::create(&store, NewSection::new(template.id, "s"))
            .await
            .unwrap();
        let question = QuestionStore::create(
            &store,
            NewQuestion::new(section.id, "Would you work with them again?")
                .with_type(QuestionType::YesNo),
        )
        .await
        .unwrap();

        let loaded = QuestionStore::get(&store, question.id).await.unwrap().unwrap();
        assert_eq!(loaded.question_type, QuestionType::YesNo);
    }

    #[tokio::test]
    async fn responses_store_optional_fields() {
        let store = setup_store();
        let (_, _, evaluation) = evaluation_fixture(&store).await;
        let section = SectionStore::create(&store, NewSection::new(evaluation.template_id, "s"))
            .await
            .unwrap();
        let question = QuestionStore::create(&store, NewQuestion::new(section.id, "q"))
            .await
            .unwrap();

        let blank = ResponseStore::create(&store, NewResponse::new(evaluation.id, question.id))
            .await
            .unwrap();
        let loaded = ResponseStore::get(&store, blank.id).await.unwrap().unwrap();
        assert_eq!(loaded.response_text, None);
        assert_eq!(loaded.rating, None);

        let mut rated = loaded;
        rated.rating = Some(5);
        ResponseStore::update(&store, &rated).await.unwrap();
        rated.rating = None;
        ResponseStore::update(&store, &rated).await.unwrap();
        let loaded = ResponseStore::get(&store, blank.id).await.unwrap().unwrap();
        assert_eq!(loaded.rating, None);
    }
}
