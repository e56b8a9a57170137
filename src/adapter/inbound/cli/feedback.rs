//! Handler for the `feedback` command group.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::FeedbackCommand;
use super::{output, prompt};
use crate::domain::{Feedback, FeedbackId, NewFeedback, UserId};
use crate::error::{Error, Result};
use crate::port::outbound::store::FeedbackStore;

#[derive(Tabled)]
struct FeedbackRow {
    #[tabled(rename = "ID")]
    id: FeedbackId,
    #[tabled(rename = "From")]
    provider: UserId,
    #[tabled(rename = "To")]
    recipient: UserId,
    #[tabled(rename = "360")]
    three_sixty: &'static str,
    #[tabled(rename = "Given")]
    given: String,
    #[tabled(rename = "Feedback")]
    text: String,
}

impl From<Feedback> for FeedbackRow {
    fn from(entry: Feedback) -> Self {
        Self {
            id: entry.id,
            provider: entry.provider_id,
            recipient: entry.recipient_id,
            three_sixty: if entry.is_360 { "yes" } else { "no" },
            given: entry.created_at.format("%Y-%m-%d %H:%M").to_string(),
            text: entry.text,
        }
    }
}

pub async fn execute<S: FeedbackStore>(store: &S, command: FeedbackCommand) -> Result<()> {
    match command {
        FeedbackCommand::Give {
            evaluation,
            provider,
            recipient,
            text,
            three_sixty,
        } => {
            let mut draft = NewFeedback::new(evaluation, provider, recipient, text);
            if three_sixty {
                draft = draft.three_sixty();
            }
            let entry = store.create(draft).await?;
            if output::is_json() {
                output::json_output(json!({ "command": "feedback.give", "feedback": entry }));
                return Ok(());
            }
            output::success(&format!("Recorded {}", output::highlight(&entry)));
            output::field("ID", entry.id);
            Ok(())
        }
        FeedbackCommand::List { evaluation } => {
            let entries = store.list(evaluation).await?;
            if output::is_json() {
                output::json_output(json!({ "command": "feedback.list", "feedback": entries }));
                return Ok(());
            }
            if output::is_quiet() {
                return Ok(());
            }
            if entries.is_empty() {
                output::note("No feedback for this evaluation.");
                return Ok(());
            }
            let rows: Vec<FeedbackRow> = entries.into_iter().map(FeedbackRow::from).collect();
            output::lines(&Table::new(rows).to_string());
            Ok(())
        }
        FeedbackCommand::Remove { id, confirm } => {
            let entry = store
                .get(id)
                .await?
                .ok_or_else(|| Error::not_found("feedback", id))?;
            if !prompt::confirm_removal(&entry.to_string(), confirm.yes)? {
                return Ok(());
            }
            let removed = store.delete(id).await?;
            if output::is_json() {
                output::json_output(
                    json!({ "command": "feedback.remove", "id": id, "removed": removed }),
                );
                return Ok(());
            }
            output::success(&format!("Removed {entry}"));
            Ok(())
        }
    }
}
