//! User directory service
//!
//! [`UserDirectory`] owns the in-memory user list, writes it back to its
//! repository after every change and answers search and page queries for the
//! user management table.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use opsdeck_audit::{PageView, Paginator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{UserStoreError, UserStoreResult};
use crate::model::{seed_users, validate_identity, NewUser, User, UserStatus};
use crate::repository::UserRepository;
use crate::role::Role;

/// Search over the directory
///
/// Text matches name or email, case-insensitively. Role and status narrow
/// further when set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    pub text: String,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

impl UserQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Check if a user matches this query
    pub fn matches(&self, user: &User) -> bool {
        if let Some(role) = self.role {
            if user.role != role {
                return false;
            }
        }

        if let Some(status) = self.status {
            if user.status != status {
                return false;
            }
        }

        let needle = self.text.trim().to_lowercase();
        needle.is_empty()
            || user.name.to_lowercase().contains(&needle)
            || user.email.to_lowercase().contains(&needle)
    }
}

/// In-memory user list backed by a [`UserRepository`]
pub struct UserDirectory {
    repository: Arc<dyn UserRepository>,
    users: Vec<User>,
    paginator: Paginator,
}

impl UserDirectory {
    /// Load the directory, seeding the store when it is empty
    pub fn open(repository: Arc<dyn UserRepository>) -> UserStoreResult<Self> {
        let mut users = repository.load()?;
        if users.is_empty() {
            users = seed_users();
            repository.save(&users)?;
            info!(count = users.len(), "Seeded empty user store");
        }

        Ok(Self {
            repository,
            users,
            paginator: Paginator::default(),
        })
    }

    /// Use `page_size` rows per page
    pub fn with_page_size(mut self, page_size: usize) -> UserStoreResult<Self> {
        self.paginator = Paginator::new(page_size)?;
        Ok(self)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Add a user with a fresh id and persist the collection
    pub fn add(&mut self, new_user: NewUser) -> UserStoreResult<User> {
        validate_identity(&new_user.name, &new_user.email)?;
        self.ensure_unique_email(&new_user.email, None)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: new_user.name.trim().to_string(),
            email: new_user.email.trim().to_string(),
            role: new_user.role,
            department: new_user.department.trim().to_string(),
            status: UserStatus::Active,
            joined: new_user.joined.unwrap_or_else(|| Utc::now().date_naive()),
        };

        let mut users = self.users.clone();
        users.push(user.clone());
        self.commit(users)?;

        info!(id = %user.id, role = %user.role, "Added user");
        Ok(user)
    }

    /// Replace the stored user with the same id and persist the collection
    pub fn update(&mut self, user: User) -> UserStoreResult<()> {
        user.validate()?;
        let index = self.index_of(&user.id)?;
        self.ensure_unique_email(&user.email, Some(&user.id))?;

        let mut users = self.users.clone();
        users[index] = user;
        self.commit(users)?;

        debug!(index, "Updated user");
        Ok(())
    }

    /// Remove the user with `id` and persist the collection
    pub fn remove(&mut self, id: &str) -> UserStoreResult<User> {
        let index = self.index_of(id)?;

        let mut users = self.users.clone();
        let removed = users.remove(index);
        self.commit(users)?;

        info!(id = %removed.id, "Removed user");
        Ok(removed)
    }

    /// Users matching `query`, in stored order
    pub fn search(&self, query: &UserQuery) -> Vec<User> {
        let found: Vec<User> = self
            .users
            .iter()
            .filter(|user| query.matches(user))
            .cloned()
            .collect();
        debug!(total = self.users.len(), matched = found.len(), "Searched users");
        found
    }

    /// One page of the users matching `query`; out of range pages are clamped
    pub fn page(&self, query: &UserQuery, page: usize) -> PageView<User> {
        self.paginator.paginate(&self.search(query), page)
    }

    /// Number of users per role
    pub fn count_by_role(&self) -> BTreeMap<Role, usize> {
        let mut counts = BTreeMap::new();
        for user in &self.users {
            *counts.entry(user.role).or_insert(0) += 1;
        }
        counts
    }

    fn index_of(&self, id: &str) -> UserStoreResult<usize> {
        self.users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| UserStoreError::UserNotFound(id.to_string()))
    }

    fn ensure_unique_email(&self, email: &str, except_id: Option<&str>) -> UserStoreResult<()> {
        let email = email.trim();
        let taken = self.users.iter().any(|user| {
            Some(user.id.as_str()) != except_id && user.email.eq_ignore_ascii_case(email)
        });
        if taken {
            return Err(UserStoreError::DuplicateEmail(email.to_string()));
        }
        Ok(())
    }

    /// Save first so a failed write leaves the directory unchanged
    fn commit(&mut self, users: Vec<User>) -> UserStoreResult<()> {
        self.repository.save(&users)?;
        self.users = users;
        Ok(())
    }
}
