//! Handlers for the `template`, `section`, and `question` command groups.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::{QuestionCommand, SectionCommand, TemplateCommand};
use super::{output, prompt};
use crate::domain::{
    EvaluationQuestion, EvaluationSection, EvaluationTemplate, NewQuestion, NewSection,
    NewTemplate, QuestionId, SectionId, TemplateId,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{QuestionStore, SectionStore, TemplateStore};

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "ID")]
    id: TemplateId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<EvaluationTemplate> for TemplateRow {
    fn from(template: EvaluationTemplate) -> Self {
        Self {
            id: template.id,
            name: template.name,
            active: if template.is_active { "yes" } else { "no" },
            created: template.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "ID")]
    id: SectionId,
    #[tabled(rename = "Order")]
    order: i32,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct QuestionRow {
    #[tabled(rename = "ID")]
    id: QuestionId,
    #[tabled(rename = "Order")]
    order: i32,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Question")]
    text: String,
}

impl From<EvaluationQuestion> for QuestionRow {
    fn from(question: EvaluationQuestion) -> Self {
        Self {
            id: question.id,
            order: question.order,
            kind: question.question_type.label(),
            text: question.text,
        }
    }
}

async fn require_template<S: TemplateStore>(
    store: &S,
    id: TemplateId,
) -> Result<EvaluationTemplate> {
    store
        .get(id)
        .await?
        .ok_or_else(|| Error::not_found("template", id))
}

pub async fn execute<S>(store: &S, command: TemplateCommand) -> Result<()>
where
    S: TemplateStore + SectionStore + QuestionStore,
{
    match command {
        TemplateCommand::Create {
            name,
            description,
            inactive,
        } => {
            let mut draft = NewTemplate::new(name).with_description(description);
            if inactive {
                draft = draft.inactive();
            }
            let template = TemplateStore::create(store, draft).await?;
            if output::is_json() {
                output::json_output(json!({ "command": "template.create", "template": template }));
                return Ok(());
            }
            output::success(&format!("Created template {}", output::highlight(&template)));
            output::field("ID", template.id);
            Ok(())
        }
        TemplateCommand::List { active } => list(store, active).await,
        TemplateCommand::Show { id } => show(store, id).await,
        TemplateCommand::Activate { id } => set_active(store, id, true).await,
        TemplateCommand::Deactivate { id } => set_active(store, id, false).await,
        TemplateCommand::Remove { id, confirm } => {
            let template = require_template(store, id).await?;
            let what = format!("template {template} with its sections, questions, and evaluations");
            if !prompt::confirm_removal(&what, confirm.yes)? {
                return Ok(());
            }
            let removed = TemplateStore::delete(store, id).await?;
            if output::is_json() {
                output::json_output(
                    json!({ "command": "template.remove", "id": id, "removed": removed }),
                );
                return Ok(());
            }
            output::success(&format!("Removed template {template}"));
            Ok(())
        }
    }
}

async fn list<S: TemplateStore>(store: &S, active_only: bool) -> Result<()> {
    let templates = store.list(active_only).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "template.list", "templates": templates }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }
    if templates.is_empty() {
        output::note("No templates found.");
        return Ok(());
    }
    let rows: Vec<TemplateRow> = templates.into_iter().map(TemplateRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}

async fn show<S>(store: &S, id: TemplateId) -> Result<()>
where
    S: TemplateStore + SectionStore + QuestionStore,
{
    let template = require_template(store, id).await?;
    let sections = SectionStore::list(store, id).await?;
    let mut tree: Vec<(EvaluationSection, Vec<EvaluationQuestion>)> =
        Vec::with_capacity(sections.len());
    for section in sections {
        let questions = QuestionStore::list(store, section.id).await?;
        tree.push((section, questions));
    }

    if output::is_json() {
        let sections: Vec<_> = tree
            .iter()
            .map(|(section, questions)| json!({ "section": section, "questions": questions }))
            .collect();
        output::json_output(json!({
            "command": "template.show",
            "template": template,
            "sections": sections,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section(&template.name);
    output::field("ID", template.id);
    output::field("Active", if template.is_active { "yes" } else { "no" });
    output::field("Created", template.created_at.format("%Y-%m-%d %H:%M"));
    if !template.description.is_empty() {
        output::field("Description", &template.description);
    }

    if tree.is_empty() {
        output::note("No sections yet.");
        return Ok(());
    }
    for (section, questions) in tree {
        output::section(&format!(
            "{}. {} {}",
            section.order,
            section.name,
            output::muted(format!("(section {})", section.id))
        ));
        if questions.is_empty() {
            output::note("No questions.");
            continue;
        }
        let rows: Vec<QuestionRow> = questions.into_iter().map(QuestionRow::from).collect();
        output::lines(&Table::new(rows).to_string());
    }
    Ok(())
}

async fn set_active<S: TemplateStore>(store: &S, id: TemplateId, active: bool) -> Result<()> {
    let mut template = require_template(store, id).await?;
    template.is_active = active;
    store.update(&template).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "template.update", "template": template }));
        return Ok(());
    }
    let state = if active { "active" } else { "inactive" };
    output::success(&format!("Template {template} is now {state}"));
    Ok(())
}

pub async fn execute_section<S: SectionStore>(store: &S, command: SectionCommand) -> Result<()> {
    match command {
        SectionCommand::Add {
            template,
            name,
            order,
        } => {
            let section = store
                .create(NewSection::new(template, name).with_order(order))
                .await?;
            if output::is_json() {
                output::json_output(json!({ "command": "section.add", "section": section }));
                return Ok(());
            }
            output::success(&format!("Added section {}", output::highlight(&section)));
            output::field("ID", section.id);
            Ok(())
        }
        SectionCommand::List { template } => {
            let sections = store.list(template).await?;
            if output::is_json() {
                output::json_output(json!({ "command": "section.list", "sections": sections }));
                return Ok(());
            }
            if output::is_quiet() {
                return Ok(());
            }
            if sections.is_empty() {
                output::note("No sections found.");
                return Ok(());
            }
            let rows: Vec<SectionRow> = sections
                .into_iter()
                .map(|section| SectionRow {
                    id: section.id,
                    order: section.order,
                    name: section.name,
                })
                .collect();
            output::lines(&Table::new(rows).to_string());
            Ok(())
        }
        SectionCommand::Remove { id, confirm } => {
            let section = store
                .get(id)
                .await?
                .ok_or_else(|| Error::not_found("section", id))?;
            let what = format!("section {section} with its questions");
            if !prompt::confirm_removal(&what, confirm.yes)? {
                return Ok(());
            }
            let removed = store.delete(id).await?;
            if output::is_json() {
                output::json_output(
                    json!({ "command": "section.remove", "id": id, "removed": removed }),
                );
                return Ok(());
            }
            output::success(&format!("Removed section {section}"));
            Ok(())
        }
    }
}

pub async fn execute_question<S: QuestionStore>(store: &S, command: QuestionCommand) -> Result<()> {
    match command {
        QuestionCommand::Add {
            section,
            text,
            question_type,
            order,
        } => {
            let question = store
                .create(
                    NewQuestion::new(section, text)
                        .with_type(question_type)
                        .with_order(order),
                )
                .await?;
            if output::is_json() {
                output::json_output(json!({ "command": "question.add", "question": question }));
                return Ok(());
            }
            output::success(&format!("Added question {}", output::highlight(question.id)));
            output::field("Type", question.question_type.label());
            Ok(())
        }
        QuestionCommand::List { section } => {
            let questions = store.list(section).await?;
            if output::is_json() {
                output::json_output(json!({ "command": "question.list", "questions": questions }));
                return Ok(());
            }
            if output::is_quiet() {
                return Ok(());
            }
            if questions.is_empty() {
                output::note("No questions found.");
                return Ok(());
            }
            let rows: Vec<QuestionRow> = questions.into_iter().map(QuestionRow::from).collect();
            output::lines(&Table::new(rows).to_string());
            Ok(())
        }
        QuestionCommand::Remove { id, confirm } => {
            let question = store
                .get(id)
                .await?
                .ok_or_else(|| Error::not_found("question", id))?;
            let what = format!("question {} and its responses", question.id);
            if !prompt::confirm_removal(&what, confirm.yes)? {
                return Ok(());
            }
            let removed = store.delete(id).await?;
            if output::is_json() {
                output::json_output(
                    json!({ "command": "question.remove", "id": id, "removed": removed }),
                );
                return Ok(());
            }
            output::success(&format!("Removed question {}", question.id));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::inbound::cli::command::ConfirmArgs;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::domain::QuestionType;

    #[tokio::test]
    async fn deactivate_and_activate_flip_flag() {
        let store = MemoryStore::new();
        let template = TemplateStore::create(&store, NewTemplate::new("Annual Review"))
            .await
            .unwrap();

        execute(&store, TemplateCommand::Deactivate { id: template.id })
            .await
            .unwrap();
        let loaded = TemplateStore::get(&store, template.id).await.unwrap().unwrap();
        assert!(!loaded.is_active);
        assert!(TemplateStore::list(&store, true).await.unwrap().is_empty());

        execute(&store, TemplateCommand::Activate { id: template.id })
            .await
            .unwrap();
        let loaded = TemplateStore::get(&store, template.id).await.unwrap().unwrap();
        assert!(loaded.is_active);
    }

    #[tokio::test]
    async fn section_and_question_commands_build_tree() {
        let store = MemoryStore::new();
        let template = TemplateStore::create(&store, NewTemplate::new("Annual Review"))
            .await
            .unwrap();

        execute_section(
            &store,
            SectionCommand::Add {
                template: template.id,
                name: "Delivery".into(),
                order: 1,
            },
        )
        .await
        .unwrap();
        let section = SectionStore::list(&store, template.id).await.unwrap().remove(0);

        execute_question(
            &store,
            QuestionCommand::Add {
                section: section.id,
                text: "Ships on time?".into(),
                question_type: QuestionType::YesNo,
                order: 1,
            },
        )
        .await
        .unwrap();
        let questions = QuestionStore::list(&store, section.id).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_type, QuestionType::YesNo);

        show(&store, template.id).await.unwrap();
    }

    #[tokio::test]
    async fn section_for_missing_template_is_integrity_error() {
        let store = MemoryStore::new();
        let err = execute_section(
            &store,
            SectionCommand::Add {
                template: TemplateId::new(9),
                name: "Orphan".into(),
                order: 1,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Integrity(_)));
    }

    #[tokio::test]
    async fn remove_template_cascades() {
        let store = MemoryStore::new();
        let template = TemplateStore::create(&store, NewTemplate::new("t"))
            .await
            .unwrap();
        let section = SectionStore::create(&store, NewSection::new(template.id, "s"))
            .await
            .unwrap();

        execute(
            &store,
            TemplateCommand::Remove {
                id: template.id,
                confirm: ConfirmArgs { yes: true },
            },
        )
        .await
        .unwrap();
        assert!(SectionStore::get(&store, section.id).await.unwrap().is_none());
    }
}
