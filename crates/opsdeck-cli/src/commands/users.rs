// User directory management

use std::path::PathBuf;
use std::sync::Arc;

use opsdeck_users::{JsonFileUserRepository, NewUser, Role, UserDirectory, UserQuery, UserStatus};

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;

#[derive(Debug, Clone)]
pub enum UsersAction {
    List {
        query: UserQuery,
        page: usize,
    },
    Add {
        name: String,
        email: String,
        role: Role,
        department: String,
    },
    Remove {
        id: String,
    },
}

/// Manage the user store
pub struct UsersCommand {
    pub action: UsersAction,
    pub store_path: PathBuf,
    pub page_size: usize,
}

impl UsersCommand {
    pub fn new(action: UsersAction, store_path: PathBuf, page_size: usize) -> Self {
        Self {
            action,
            store_path,
            page_size,
        }
    }

    fn open_directory(&self) -> CliResult<UserDirectory> {
        let repository = Arc::new(JsonFileUserRepository::new(&self.store_path));
        Ok(UserDirectory::open(repository)?.with_page_size(self.page_size)?)
    }

    pub fn run(&self, style: &OutputStyle) -> CliResult<String> {
        let mut directory = self.open_directory()?;

        match &self.action {
            UsersAction::List { query, page } => {
                let view = directory.page(query, (*page).max(1));
                if view.items.is_empty() {
                    return Ok(style.info("No users match the current search"));
                }

                let rows: Vec<Vec<String>> = view
                    .items
                    .iter()
                    .map(|user| {
                        vec![
                            user.id.clone(),
                            user.name.clone(),
                            user.email.clone(),
                            user.role.to_string(),
                            user.department.clone(),
                            user.status.to_string(),
                            user.joined.to_string(),
                        ]
                    })
                    .collect();

                let mut lines = vec![style.table(
                    &["ID", "Name", "Email", "Role", "Department", "Status", "Joined"],
                    &rows,
                )];
                lines.push(String::new());
                lines.push(format!(
                    "Page {} of {} ({} users)",
                    view.page_number, view.total_pages, view.total_items
                ));
                Ok(lines.join("\n"))
            }
            UsersAction::Add {
                name,
                email,
                role,
                department,
            } => {
                let user = directory.add(
                    NewUser::new(name.clone(), email.clone(), *role)
                        .with_department(department.clone()),
                )?;
                Ok(style.success(&format!(
                    "Added {} <{}> as {} ({})",
                    user.name,
                    user.email,
                    user.role,
                    style.code(&user.id)
                )))
            }
            UsersAction::Remove { id } => {
                let user = directory.remove(id)?;
                Ok(style.success(&format!("Removed {} <{}>", user.name, user.email)))
            }
        }
    }
}

#[async_trait::async_trait]
impl Command for UsersCommand {
    async fn execute(&self) -> CliResult<()> {
        println!("{}", self.run(&OutputStyle::default())?);
        Ok(())
    }
}

/// Build a directory query from CLI flags
pub fn build_query(
    search: Option<&str>,
    role: Option<Role>,
    status: Option<UserStatus>,
) -> UserQuery {
    let mut query = UserQuery::new().with_text(search.unwrap_or_default());
    query.role = role;
    query.status = status;
    query
}
