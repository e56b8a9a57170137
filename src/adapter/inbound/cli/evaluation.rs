//! Handlers for the `evaluation` and `response` command groups.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::{
    EvaluationCommand, EvaluationCreateArgs, EvaluationListArgs, ResponseCommand,
};
use super::{output, prompt};
use crate::domain::{
    EvaluationFilter, EvaluationId, EvaluationResponse, EvaluationStatus, GoalFilter,
    NewEvaluation, NewResponse, PerformanceEvaluation, QuestionId, ResponseId,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{EvaluationStore, FeedbackStore, GoalStore, ResponseStore};

#[derive(Tabled)]
struct EvaluationRow {
    #[tabled(rename = "ID")]
    id: EvaluationId,
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "Manager")]
    manager: String,
    #[tabled(rename = "Template")]
    template: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl From<PerformanceEvaluation> for EvaluationRow {
    fn from(evaluation: PerformanceEvaluation) -> Self {
        Self {
            id: evaluation.id,
            employee: evaluation.employee_id.to_string(),
            manager: evaluation.manager_id.to_string(),
            template: evaluation.template_id.to_string(),
            period: format!("{} to {}", evaluation.start_date, evaluation.end_date),
            status: evaluation.status.label(),
        }
    }
}

#[derive(Tabled)]
struct ResponseRow {
    #[tabled(rename = "ID")]
    id: ResponseId,
    #[tabled(rename = "Question")]
    question: QuestionId,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Answer")]
    text: String,
}

impl From<EvaluationResponse> for ResponseRow {
    fn from(response: EvaluationResponse) -> Self {
        Self {
            id: response.id,
            question: response.question_id,
            rating: response
                .rating
                .map_or_else(|| "-".to_string(), |r| r.to_string()),
            text: response.response_text.unwrap_or_default(),
        }
    }
}

async fn require_evaluation<S: EvaluationStore>(
    store: &S,
    id: EvaluationId,
) -> Result<PerformanceEvaluation> {
    store
        .get(id)
        .await?
        .ok_or_else(|| Error::not_found("evaluation", id))
}

pub async fn execute<S>(store: &S, command: EvaluationCommand) -> Result<()>
where
    S: EvaluationStore + ResponseStore + FeedbackStore + GoalStore,
{
    match command {
        EvaluationCommand::Create(args) => create(store, args).await,
        EvaluationCommand::List(args) => list(store, args).await,
        EvaluationCommand::Show { id } => show(store, id).await,
        EvaluationCommand::Status { id, status } => set_status(store, id, status).await,
        EvaluationCommand::Remove { id, confirm } => {
            let evaluation = require_evaluation(store, id).await?;
            let what = format!("{evaluation} with its responses and feedback");
            if !prompt::confirm_removal(&what, confirm.yes)? {
                return Ok(());
            }
            let removed = EvaluationStore::delete(store, id).await?;
            if output::is_json() {
                output::json_output(
                    json!({ "command": "evaluation.remove", "id": id, "removed": removed }),
                );
                return Ok(());
            }
            output::success(&format!("Removed {evaluation}"));
            output::note("Goals linked to it were kept and unlinked.");
            Ok(())
        }
    }
}

async fn create<S: EvaluationStore>(store: &S, args: EvaluationCreateArgs) -> Result<()> {
    let draft = NewEvaluation::new(
        args.employee,
        args.manager,
        args.template,
        args.start,
        args.end,
    )
    .with_status(args.status);
    let evaluation = store.create(draft).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "evaluation.create", "evaluation": evaluation }));
        return Ok(());
    }
    output::success(&format!("Created {}", output::highlight(&evaluation)));
    output::field("Status", evaluation.status.label());
    Ok(())
}

async fn list<S: EvaluationStore>(store: &S, args: EvaluationListArgs) -> Result<()> {
    let filter = EvaluationFilter {
        employee: args.employee,
        manager: args.manager,
        template: args.template,
        status: args.status,
    };
    let evaluations = store.list(filter).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "evaluation.list", "evaluations": evaluations }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }
    if evaluations.is_empty() {
        output::note("No evaluations found.");
        return Ok(());
    }
    let rows: Vec<EvaluationRow> = evaluations.into_iter().map(EvaluationRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}

async fn show<S>(store: &S, id: EvaluationId) -> Result<()>
where
    S: EvaluationStore + ResponseStore + FeedbackStore + GoalStore,
{
    let evaluation = require_evaluation(store, id).await?;
    let responses = ResponseStore::list(store, id).await?;
    let feedback = FeedbackStore::list(store, id).await?;
    let goals = GoalStore::list(
        store,
        GoalFilter {
            evaluation: Some(id),
            ..GoalFilter::default()
        },
    )
    .await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "evaluation.show",
            "evaluation": evaluation,
            "responses": responses,
            "feedback": feedback,
            "goals": goals,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section(&evaluation.to_string());
    output::field("Manager", evaluation.manager_id);
    output::field("Template", evaluation.template_id);
    output::field("Status", evaluation.status.label());
    output::field("Created", evaluation.created_at.format("%Y-%m-%d %H:%M"));

    output::section("Responses");
    if responses.is_empty() {
        output::note("None recorded.");
    } else {
        let rows: Vec<ResponseRow> = responses.into_iter().map(ResponseRow::from).collect();
        output::lines(&Table::new(rows).to_string());
    }

    output::section("Feedback");
    if feedback.is_empty() {
        output::note("None given.");
    }
    for entry in &feedback {
        let tag = if entry.is_360 { " [360]" } else { "" };
        output::field(&format!("#{}", entry.id), format!("{entry}{tag}: {}", entry.text));
    }

    output::section("Goals");
    if goals.is_empty() {
        output::note("None linked.");
    }
    for goal in &goals {
        let detail = format!(
            "({}, {}%, due {})",
            goal.status.label(),
            goal.progress,
            goal.end_date
        );
        output::field(
            &format!("#{}", goal.id),
            format!("{goal} {}", output::muted(detail)),
        );
    }
    Ok(())
}

async fn set_status<S: EvaluationStore>(
    store: &S,
    id: EvaluationId,
    status: EvaluationStatus,
) -> Result<()> {
    let mut evaluation = require_evaluation(store, id).await?;
    evaluation.status = status;
    store.update(&evaluation).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "evaluation.status", "evaluation": evaluation }));
        return Ok(());
    }
    output::success(&format!("{evaluation} is now {}", status.label()));
    Ok(())
}

pub async fn execute_response<S: ResponseStore>(store: &S, command: ResponseCommand) -> Result<()> {
    match command {
        ResponseCommand::Record {
            evaluation,
            question,
            text,
            rating,
        } => record(store, evaluation, question, text, rating).await,
        ResponseCommand::List { evaluation } => {
            let responses = store.list(evaluation).await?;
            if output::is_json() {
                output::json_output(json!({ "command": "response.list", "responses": responses }));
                return Ok(());
            }
            if output::is_quiet() {
                return Ok(());
            }
            if responses.is_empty() {
                output::note("No responses recorded.");
                return Ok(());
            }
            let rows: Vec<ResponseRow> = responses.into_iter().map(ResponseRow::from).collect();
            output::lines(&Table::new(rows).to_string());
            Ok(())
        }
    }
}

async fn record<S: ResponseStore>(
    store: &S,
    evaluation: EvaluationId,
    question: QuestionId,
    text: Option<String>,
    rating: Option<i32>,
) -> Result<()> {
    let mut draft = NewResponse::new(evaluation, question);
    if let Some(text) = text {
        draft = draft.with_text(text);
    }
    if let Some(rating) = rating {
        draft = draft.with_rating(rating);
    }
    let response = store.create(draft).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "response.record", "response": response }));
        return Ok(());
    }
    output::success(&format!("Recorded {}", output::highlight(&response)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::domain::{NewGoal, NewTemplate, NewUser};
    use crate::port::outbound::store::{TemplateStore, UserStore};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded() -> (MemoryStore, EvaluationCreateArgs) {
        let store = MemoryStore::new();
        let employee = UserStore::create(&store, NewUser::new("ada")).await.unwrap();
        let manager = UserStore::create(&store, NewUser::new("grace")).await.unwrap();
        let template = TemplateStore::create(&store, NewTemplate::new("Annual Review"))
            .await
            .unwrap();
        let args = EvaluationCreateArgs {
            employee: employee.id,
            manager: manager.id,
            template: template.id,
            start: date(2026, 1, 1),
            end: date(2026, 12, 31),
            status: EvaluationStatus::Pending,
        };
        (store, args)
    }

    #[tokio::test]
    async fn status_command_updates_record() {
        let (store, args) = seeded().await;
        execute(&store, EvaluationCommand::Create(args)).await.unwrap();
        let id = EvaluationStore::list(&store, EvaluationFilter::default())
            .await
            .unwrap()[0]
            .id;

        execute(
            &store,
            EvaluationCommand::Status {
                id,
                status: EvaluationStatus::InProgress,
            },
        )
        .await
        .unwrap();
        let loaded = EvaluationStore::get(&store, id).await.unwrap().unwrap();
        assert_eq!(loaded.status, EvaluationStatus::InProgress);
    }

    #[tokio::test]
    async fn show_collects_linked_records() {
        let (store, args) = seeded().await;
        let employee = args.employee;
        execute(&store, EvaluationCommand::Create(args)).await.unwrap();
        let id = EvaluationStore::list(&store, EvaluationFilter::default())
            .await
            .unwrap()[0]
            .id;
        GoalStore::create(
            &store,
            NewGoal::new(employee, "Ship v2", date(2026, 1, 1), date(2026, 6, 30))
                .for_evaluation(id),
        )
        .await
        .unwrap();

        show(&store, id).await.unwrap();
    }

    #[tokio::test]
    async fn status_of_missing_evaluation_is_not_found() {
        let (store, _) = seeded().await;
        let err = execute(
            &store,
            EvaluationCommand::Status {
                id: EvaluationId::new(42),
                status: EvaluationStatus::Completed,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "evaluation", id: 42 }));
    }

    #[tokio::test]
    async fn response_for_missing_question_is_integrity_error() {
        let (store, args) = seeded().await;
        execute(&store, EvaluationCommand::Create(args)).await.unwrap();
        let err = execute_response(
            &store,
            ResponseCommand::Record {
                evaluation: EvaluationId::new(1),
                question: QuestionId::new(99),
                text: None,
                rating: Some(4),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Integrity(_)));
    }
}
