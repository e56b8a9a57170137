//! In-memory store implementation.
//!
//! Holds every table behind one lock so a cascading delete is a single
//! atomic step. Referential integrity is checked by hand on every write, and
//! the cascade / set-null rules live in the `remove_*` methods of [`Tables`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::domain::calendar;
use crate::domain::template::{sort_questions, sort_sections};
use crate::domain::{
    feedback::sort_feedback, goal::sort_goals, EvaluationFilter, EvaluationId,
    EvaluationQuestion, EvaluationResponse, EvaluationSection, EvaluationTemplate, Feedback,
    FeedbackId, Goal, GoalFilter, GoalId, NewEvaluation, NewFeedback, NewGoal, NewQuestion,
    NewResponse, NewSection, NewTemplate, NewUser, PerformanceEvaluation, QuestionId, ResponseId,
    SectionId, TemplateId, User, UserId,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{
    EvaluationStore, FeedbackStore, GoalStore, QuestionStore, ResponseStore, SectionStore,
    TemplateStore, UserStore,
};

/// Same date range the SQLite store can keep in sortable text form.
fn check_period(start: NaiveDate, end: NaiveDate) -> Result<()> {
    calendar::check_date("start_date", start)?;
    calendar::check_date("end_date", end)?;
    Ok(())
}

/// Last key handed out per table. Keys are never reused.
#[derive(Debug, Default)]
struct Sequences {
    users: i32,
    templates: i32,
    sections: i32,
    questions: i32,
    evaluations: i32,
    responses: i32,
    goals: i32,
    feedback: i32,
}

fn next(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

fn missing(entity: &str, id: impl std::fmt::Display) -> Error {
    Error::Integrity(format!("{entity} {id} does not exist"))
}

#[derive(Debug, Default)]
struct Tables {
    seq: Sequences,
    users: BTreeMap<UserId, User>,
    templates: BTreeMap<TemplateId, EvaluationTemplate>,
    sections: BTreeMap<SectionId, EvaluationSection>,
    questions: BTreeMap<QuestionId, EvaluationQuestion>,
    evaluations: BTreeMap<EvaluationId, PerformanceEvaluation>,
    responses: BTreeMap<ResponseId, EvaluationResponse>,
    goals: BTreeMap<GoalId, Goal>,
    feedback: BTreeMap<FeedbackId, Feedback>,
}

impl Tables {
    fn require_user(&self, id: UserId) -> Result<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(missing("user", id))
        }
    }

    fn require_template(&self, id: TemplateId) -> Result<()> {
        if self.templates.contains_key(&id) {
            Ok(())
        } else {
            Err(missing("template", id))
        }
    }

    fn require_section(&self, id: SectionId) -> Result<()> {
        if self.sections.contains_key(&id) {
            Ok(())
        } else {
            Err(missing("section", id))
        }
    }

    fn require_question(&self, id: QuestionId) -> Result<()> {
        if self.questions.contains_key(&id) {
            Ok(())
        } else {
            Err(missing("question", id))
        }
    }

    fn require_evaluation(&self, id: EvaluationId) -> Result<()> {
        if self.evaluations.contains_key(&id) {
            Ok(())
        } else {
            Err(missing("evaluation", id))
        }
    }

    fn require_unique_username(&self, username: &str, except: Option<UserId>) -> Result<()> {
        let taken = self
            .users
            .values()
            .any(|u| u.username == username && Some(u.id) != except);
        if taken {
            return Err(Error::Integrity(format!(
                "username '{username}' already exists"
            )));
        }
        Ok(())
    }

    fn check_evaluation_refs(
        &self,
        employee: UserId,
        manager: UserId,
        template: TemplateId,
    ) -> Result<()> {
        self.require_user(employee)?;
        self.require_user(manager)?;
        self.require_template(template)
    }

    fn check_goal_refs(&self, employee: UserId, evaluation: Option<EvaluationId>) -> Result<()> {
        self.require_user(employee)?;
        match evaluation {
            Some(id) => self.require_evaluation(id),
            None => Ok(()),
        }
    }

    fn check_feedback_refs(
        &self,
        evaluation: EvaluationId,
        provider: UserId,
        recipient: UserId,
    ) -> Result<()> {
        self.require_evaluation(evaluation)?;
        self.require_user(provider)?;
        self.require_user(recipient)
    }

    fn remove_user(&mut self, id: UserId) -> bool {
        if self.users.remove(&id).is_none() {
            return false;
        }
        let evaluations: Vec<EvaluationId> = self
            .evaluations
            .values()
            .filter(|e| e.employee_id == id || e.manager_id == id)
            .map(|e| e.id)
            .collect();
        for evaluation in evaluations {
            self.remove_evaluation(evaluation);
        }
        self.goals.retain(|_, g| g.employee_id != id);
        self.feedback
            .retain(|_, f| f.provider_id != id && f.recipient_id != id);
        true
    }

    fn remove_template(&mut self, id: TemplateId) -> bool {
        if self.templates.remove(&id).is_none() {
            return false;
        }
        let sections: Vec<SectionId> = self
            .sections
            .values()
            .filter(|s| s.template_id == id)
            .map(|s| s.id)
            .collect();
        for section in sections {
            self.remove_section(section);
        }
        let evaluations: Vec<EvaluationId> = self
            .evaluations
            .values()
            .filter(|e| e.template_id == id)
            .map(|e| e.id)
            .collect();
        for evaluation in evaluations {
            self.remove_evaluation(evaluation);
        }
        true
    }

    fn remove_section(&mut self, id: SectionId) -> bool {
        if self.sections.remove(&id).is_none() {
            return false;
        }
        let questions: Vec<QuestionId> = self
            .questions
            .values()
            .filter(|q| q.section_id == id)
            .map(|q| q.id)
            .collect();
        for question in questions {
            self.remove_question(question);
        }
        true
    }

    fn remove_question(&mut self, id: QuestionId) -> bool {
        if self.questions.remove(&id).is_none() {
            return false;
        }
        self.responses.retain(|_, r| r.question_id != id);
        true
    }

    fn remove_evaluation(&mut self, id: EvaluationId) -> bool {
        if self.evaluations.remove(&id).is_none() {
            return false;
        }
        self.responses.retain(|_, r| r.evaluation_id != id);
        self.feedback.retain(|_, f| f.evaluation_id != id);
        for goal in self.goals.values_mut() {
            if goal.evaluation_id == Some(id) {
                goal.evaluation_id = None;
            }
        }
        true
    }
}

/// In-memory store with the same integrity rules as the SQLite schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User> {
        let mut tables = self.tables.write();
        tables.require_unique_username(&user.username, None)?;
        let id = UserId::new(next(&mut tables.seq.users));
        let user = user.into_user(id);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn update(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&user.id) {
            return Err(Error::not_found("user", user.id));
        }
        tables.require_unique_username(&user.username, Some(user.id))?;
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<bool> {
        Ok(self.tables.write().remove_user(id))
    }

    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.tables.read().users.values().cloned().collect())
    }
}

impl TemplateStore for MemoryStore {
    async fn create(&self, template: NewTemplate) -> Result<EvaluationTemplate> {
        let mut tables = self.tables.write();
        let id = TemplateId::new(next(&mut tables.seq.templates));
        let template = template.into_template(id, calendar::now());
        tables.templates.insert(id, template.clone());
        Ok(template)
    }

    async fn get(&self, id: TemplateId) -> Result<Option<EvaluationTemplate>> {
        Ok(self.tables.read().templates.get(&id).cloned())
    }

    async fn update(&self, template: &EvaluationTemplate) -> Result<()> {
        let mut tables = self.tables.write();
        let stored = tables
            .templates
            .get_mut(&template.id)
            .ok_or_else(|| Error::not_found("template", template.id))?;
        stored.name.clone_from(&template.name);
        stored.description.clone_from(&template.description);
        stored.is_active = template.is_active;
        Ok(())
    }

    async fn delete(&self, id: TemplateId) -> Result<bool> {
        Ok(self.tables.write().remove_template(id))
    }

    async fn list(&self, active_only: bool) -> Result<Vec<EvaluationTemplate>> {
        Ok(self
            .tables
            .read()
            .templates
            .values()
            .filter(|t| !active_only || t.is_active)
            .cloned()
            .collect())
    }
}

impl SectionStore for MemoryStore {
    async fn create(&self, section: NewSection) -> Result<EvaluationSection> {
        let mut tables = self.tables.write();
        tables.require_template(section.template_id)?;
        let id = SectionId::new(next(&mut tables.seq.sections));
        let section = section.into_section(id);
        tables.sections.insert(id, section.clone());
        Ok(section)
    }

    async fn get(&self, id: SectionId) -> Result<Option<EvaluationSection>> {
        Ok(self.tables.read().sections.get(&id).cloned())
    }

    async fn update(&self, section: &EvaluationSection) -> Result<()> {
        let mut tables = self.tables.write();
        if !tables.sections.contains_key(&section.id) {
            return Err(Error::not_found("section", section.id));
        }
        tables.require_template(section.template_id)?;
        tables.sections.insert(section.id, section.clone());
        Ok(())
    }

    async fn delete(&self, id: SectionId) -> Result<bool> {
        Ok(self.tables.write().remove_section(id))
    }

    async fn list(&self, template: TemplateId) -> Result<Vec<EvaluationSection>> {
        let mut sections: Vec<EvaluationSection> = self
            .tables
            .read()
            .sections
            .values()
            .filter(|s| s.template_id == template)
            .cloned()
            .collect();
        sort_sections(&mut sections);
        Ok(sections)
    }
}

impl QuestionStore for MemoryStore {
    async fn create(&self, question: NewQuestion) -> Result<EvaluationQuestion> {
        let mut tables = self.tables.write();
        tables.require_section(question.section_id)?;
        let id = QuestionId::new(next(&mut tables.seq.questions));
        let question = question.into_question(id);
        tables.questions.insert(id, question.clone());
        Ok(question)
    }

    async fn get(&self, id: QuestionId) -> Result<Option<EvaluationQuestion>> {
        Ok(self.tables.read().questions.get(&id).cloned())
    }

    async fn update(&self, question: &EvaluationQuestion) -> Result<()> {
        let mut tables = self.tables.write();
        if !tables.questions.contains_key(&question.id) {
            return Err(Error::not_found("question", question.id));
        }
        tables.require_section(question.section_id)?;
        tables.questions.insert(question.id, question.clone());
        Ok(())
    }

    async fn delete(&self, id: QuestionId) -> Result<bool> {
        Ok(self.tables.write().remove_question(id))
    }

    async fn list(&self, section: SectionId) -> Result<Vec<EvaluationQuestion>> {
        let mut questions: Vec<EvaluationQuestion> = self
            .tables
            .read()
            .questions
            .values()
            .filter(|q| q.section_id == section)
            .cloned()
            .collect();
        sort_questions(&mut questions);
        Ok(questions)
    }
}

impl EvaluationStore for MemoryStore {
    async fn create(&self, evaluation: NewEvaluation) -> Result<PerformanceEvaluation> {
        check_period(evaluation.start_date, evaluation.end_date)?;
        let mut tables = self.tables.write();
        tables.check_evaluation_refs(
            evaluation.employee_id,
            evaluation.manager_id,
            evaluation.template_id,
        )?;
        let id = EvaluationId::new(next(&mut tables.seq.evaluations));
        let evaluation = evaluation.into_evaluation(id, calendar::now());
        tables.evaluations.insert(id, evaluation.clone());
        Ok(evaluation)
    }

    async fn get(&self, id: EvaluationId) -> Result<Option<PerformanceEvaluation>> {
        Ok(self.tables.read().evaluations.get(&id).cloned())
    }

    async fn update(&self, evaluation: &PerformanceEvaluation) -> Result<()> {
        check_period(evaluation.start_date, evaluation.end_date)?;
        let mut tables = self.tables.write();
        let created_at = tables
            .evaluations
            .get(&evaluation.id)
            .map(|e| e.created_at)
            .ok_or_else(|| Error::not_found("evaluation", evaluation.id))?;
        tables.check_evaluation_refs(
            evaluation.employee_id,
            evaluation.manager_id,
            evaluation.template_id,
        )?;
        let mut updated = evaluation.clone();
        updated.created_at = created_at;
        tables.evaluations.insert(evaluation.id, updated);
        Ok(())
    }

    async fn delete(&self, id: EvaluationId) -> Result<bool> {
        Ok(self.tables.write().remove_evaluation(id))
    }

    async fn list(&self, filter: EvaluationFilter) -> Result<Vec<PerformanceEvaluation>> {
        Ok(self
            .tables
            .read()
            .evaluations
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}

impl ResponseStore for MemoryStore {
    async fn create(&self, response: NewResponse) -> Result<EvaluationResponse> {
        let mut tables = self.tables.write();
        tables.require_evaluation(response.evaluation_id)?;
        tables.require_question(response.question_id)?;
        let id = ResponseId::new(next(&mut tables.seq.responses));
        let response = response.into_response(id);
        tables.responses.insert(id, response.clone());
        Ok(response)
    }

    async fn get(&self, id: ResponseId) -> Result<Option<EvaluationResponse>> {
        Ok(self.tables.read().responses.get(&id).cloned())
    }

    async fn update(&self, response: &EvaluationResponse) -> Result<()> {
        let mut tables = self.tables.write();
        if !tables.responses.contains_key(&response.id) {
            return Err(Error::not_found("response", response.id));
        }
        tables.require_evaluation(response.evaluation_id)?;
        tables.require_question(response.question_id)?;
        tables.responses.insert(response.id, response.clone());
        Ok(())
    }

    async fn delete(&self, id: ResponseId) -> Result<bool> {
        Ok(self.tables.write().responses.remove(&id).is_some())
    }

    async fn list(&self, evaluation: EvaluationId) -> Result<Vec<EvaluationResponse>> {
        Ok(self
            .tables
            .read()
            .responses
            .values()
            .filter(|r| r.evaluation_id == evaluation)
            .cloned()
            .collect())
    }
}

impl GoalStore for MemoryStore {
    async fn create(&self, goal: NewGoal) -> Result<Goal> {
        check_period(goal.start_date, goal.end_date)?;
        let mut tables = self.tables.write();
        tables.check_goal_refs(goal.employee_id, goal.evaluation_id)?;
        let id = GoalId::new(next(&mut tables.seq.goals));
        let goal = goal.into_goal(id);
        tables.goals.insert(id, goal.clone());
        Ok(goal)
    }

    async fn get(&self, id: GoalId) -> Result<Option<Goal>> {
        Ok(self.tables.read().goals.get(&id).cloned())
    }

    async fn update(&self, goal: &Goal) -> Result<()> {
        check_period(goal.start_date, goal.end_date)?;
        let mut tables = self.tables.write();
        if !tables.goals.contains_key(&goal.id) {
            return Err(Error::not_found("goal", goal.id));
        }
        tables.check_goal_refs(goal.employee_id, goal.evaluation_id)?;
        tables.goals.insert(goal.id, goal.clone());
        Ok(())
    }

    async fn delete(&self, id: GoalId) -> Result<bool> {
        Ok(self.tables.write().goals.remove(&id).is_some())
    }

    async fn list(&self, filter: GoalFilter) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .tables
            .read()
            .goals
            .values()
            .filter(|g| filter.matches(g))
            .cloned()
            .collect();
        sort_goals(&mut goals);
        Ok(goals)
    }
}

impl FeedbackStore for MemoryStore {
    async fn create(&self, feedback: NewFeedback) -> Result<Feedback> {
        let mut tables = self.tables.write();
        tables.check_feedback_refs(
            feedback.evaluation_id,
            feedback.provider_id,
            feedback.recipient_id,
        )?;
        let id = FeedbackId::new(next(&mut tables.seq.feedback));
        let feedback = feedback.into_feedback(id, calendar::now());
        tables.feedback.insert(id, feedback.clone());
        Ok(feedback)
    }

    async fn get(&self, id: FeedbackId) -> Result<Option<Feedback>> {
        Ok(self.tables.read().feedback.get(&id).cloned())
    }

    async fn update(&self, feedback: &Feedback) -> Result<()> {
        let mut tables = self.tables.write();
        let created_at = tables
            .feedback
            .get(&feedback.id)
            .map(|f| f.created_at)
            .ok_or_else(|| Error::not_found("feedback", feedback.id))?;
        tables.check_feedback_refs(
            feedback.evaluation_id,
            feedback.provider_id,
            feedback.recipient_id,
        )?;
        let mut updated = feedback.clone();
        updated.created_at = created_at;
        tables.feedback.insert(feedback.id, updated);
        Ok(())
    }

    async fn delete(&self, id: FeedbackId) -> Result<bool> {
        Ok(self.tables.write().feedback.remove(&id).is_some())
    }

    async fn list(&self, evaluation: EvaluationId) -> Result<Vec<Feedback>> {
        let mut entries: Vec<Feedback> = self
            .tables
            .read()
            .feedback
            .values()
            .filter(|f| f.evaluation_id == evaluation)
            .cloned()
            .collect();
        sort_feedback(&mut entries);
        Ok(entries)
    }
}
