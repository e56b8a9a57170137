//! Handler for the `user` command group.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::UserCommand;
use super::{output, prompt};
use crate::domain::{NewUser, User, UserId};
use crate::error::{Error, Result};
use crate::port::outbound::store::UserStore;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: UserId,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Email")]
    email: String,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

pub async fn execute<S: UserStore>(store: &S, command: UserCommand) -> Result<()> {
    match command {
        UserCommand::Add { username, email } => add(store, username, email).await,
        UserCommand::List => list(store).await,
        UserCommand::Remove { id, confirm } => remove(store, id, confirm.yes).await,
    }
}

async fn add<S: UserStore>(store: &S, username: String, email: String) -> Result<()> {
    let user = store.create(NewUser::new(username).with_email(email)).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "user.add", "user": user }));
        return Ok(());
    }
    output::success(&format!("Added user {}", output::highlight(&user)));
    output::field("ID", user.id);
    Ok(())
}

async fn list<S: UserStore>(store: &S) -> Result<()> {
    let users = store.list().await?;

    if output::is_json() {
        output::json_output(json!({ "command": "user.list", "users": users }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }
    if users.is_empty() {
        output::note("No users yet.");
        return Ok(());
    }
    let rows: Vec<UserRow> = users.into_iter().map(UserRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}

async fn remove<S: UserStore>(store: &S, id: UserId, assume_yes: bool) -> Result<()> {
    let user = store
        .get(id)
        .await?
        .ok_or_else(|| Error::not_found("user", id))?;

    let what = format!("user {user} and every evaluation, goal, and feedback entry involving them");
    if !prompt::confirm_removal(&what, assume_yes)? {
        return Ok(());
    }
    let removed = store.delete(id).await?;

    if output::is_json() {
        output::json_output(json!({ "command": "user.remove", "id": id, "removed": removed }));
        return Ok(());
    }
    output::success(&format!("Removed user {user}"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::adapter::inbound::cli::command::ConfirmArgs;

    #[tokio::test]
    async fn add_then_remove_user() {
        let store = MemoryStore::new();
        execute(
            &store,
            UserCommand::Add {
                username: "ada".into(),
                email: "ada@example.com".into(),
            },
        )
        .await
        .unwrap();
        let users = store.list().await.unwrap();
        assert_eq!(users.len(), 1);

        execute(
            &store,
            UserCommand::Remove {
                id: users[0].id,
                confirm: ConfirmArgs { yes: true },
            },
        )
        .await
        .unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn removing_unknown_user_is_not_found() {
        let store = MemoryStore::new();
        let err = execute(
            &store,
            UserCommand::Remove {
                id: UserId::new(3),
                confirm: ConfirmArgs { yes: true },
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "user", id: 3 }));
    }
}
