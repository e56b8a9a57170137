//! Handler for the `goal` command group.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::{GoalCommand, GoalCreateArgs, GoalUpdateArgs};
use super::{output, prompt};
use crate::domain::{Goal, GoalFilter, GoalId, NewGoal, UserId};
use crate::error::{Error, Result};
use crate::port::outbound::store::GoalStore;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: GoalId,
    #[tabled(rename = "Employee")]
    employee: UserId,
    #[tabled(rename = "Goal")]
    text: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Evaluation")]
    evaluation: String,
}

impl From<Goal> for GoalRow {
    fn from(goal: Goal) -> Self {
        Self {
            id: goal.id,
            employee: goal.employee_id,
            due: goal.end_date.to_string(),
            status: goal.status.label(),
            progress: format!("{}%", goal.progress),
            evaluation: goal
                .evaluation_id
                .map_or_else(|| "-".to_string(), |id| id.to_string()),
            text: goal.text,
        }
    }
}

pub async fn execute<S: GoalStore>(store: &S, command: GoalCommand) -> Result<()> {
    match command {
        GoalCommand::Create(args) => create(store, args).await,
        GoalCommand::List {
            employee,
            evaluation,
        } => list(store, GoalFilter { employee, evaluation }).await,
        GoalCommand::Update(args) => update(store, args).await,
        GoalCommand::Remove { id, confirm } => {
            let goal = require_goal(store, id).await?;
            if !prompt::confirm_removal(&format!("goal \"{goal}\""), confirm.yes)? {
                return Ok(());
            }
            let removed = store.delete(id).await?;
            if output::is_json() {
                output::json_output(
                    json!({ "command": "goal.remove", "id": id, "removed": removed }),
                );
                return Ok(());
            }
            output::success(&format!("Removed goal {id}"));
            Ok(())
        }
    }
}

async fn require_goal<S: GoalStore>(store: &S, id: GoalId) -> Result<Goal> {
    store
        .get(id)
        .await?
        .ok_or_else(|| Error::not_found("goal", id))
}

async fn create<S: GoalStore>(store: &S, args: GoalCreateArgs) -> Result<()> {
    let mut draft = NewGoal::new(args.employee, args.text, args.start, args.end)
        .with_status(args.status)
        .with_progress(args.progress);
    if let Some(evaluation) = args.evaluation {
        draft = draft.for_evaluation(evaluation);
    }
    let goal = store.create(draft).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "goal.create", "goal": goal }));
        return Ok(());
    }
    output::success(&format!("Created goal {}", output::highlight(goal.id)));
    output::field("Due", goal.end_date);
    Ok(())
}

async fn list<S: GoalStore>(store: &S, filter: GoalFilter) -> Result<()> {
    let goals = store.list(filter).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "goal.list", "goals": goals }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }
    if goals.is_empty() {
        output::note("No goals found.");
        return Ok(());
    }
    let rows: Vec<GoalRow> = goals.into_iter().map(GoalRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}

async fn update<S: GoalStore>(store: &S, args: GoalUpdateArgs) -> Result<()> {
    let mut goal = require_goal(store, args.id).await?;
    if let Some(status) = args.status {
        goal.status = status;
    }
    if let Some(progress) = args.progress {
        goal.progress = progress;
    }
    if args.unlink {
        goal.evaluation_id = None;
    } else if let Some(evaluation) = args.evaluation {
        goal.evaluation_id = Some(evaluation);
    }
    store.update(&goal).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "goal.update", "goal": goal }));
        return Ok(());
    }
    output::success(&format!("Updated goal {}", goal.id));
    output::field("Status", goal.status.label());
    output::field("Progress", format!("{}%", goal.progress));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::domain::{GoalStatus, NewUser};
    use crate::port::outbound::store::UserStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let store = MemoryStore::new();
        let employee = UserStore::create(&store, NewUser::new("ada")).await.unwrap();
        let goal = GoalStore::create(
            &store,
            NewGoal::new(employee.id, "Mentor", date(2026, 1, 1), date(2026, 6, 30)),
        )
        .await
        .unwrap();

        execute(
            &store,
            GoalCommand::Update(GoalUpdateArgs {
                id: goal.id,
                status: None,
                progress: Some(150),
                evaluation: None,
                unlink: false,
            }),
        )
        .await
        .unwrap();

        let loaded = GoalStore::get(&store, goal.id).await.unwrap().unwrap();
        assert_eq!(loaded.progress, 150);
        assert_eq!(loaded.status, GoalStatus::NotStarted);
        assert_eq!(loaded.text, "Mentor");
    }

    #[tokio::test]
    async fn update_missing_goal_is_not_found() {
        let store = MemoryStore::new();
        let err = execute(
            &store,
            GoalCommand::Update(GoalUpdateArgs {
                id: GoalId::new(8),
                status: Some(GoalStatus::OnHold),
                progress: None,
                evaluation: None,
                unlink: false,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "goal", id: 8 }));
    }
}
