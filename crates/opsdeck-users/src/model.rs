//! User records

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{UserStoreError, UserStoreResult};
use crate::role::Role;

/// Account status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = UserStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(UserStoreError::UnknownStatus(s.to_string())),
        }
    }
}

/// A dashboard user as stored by a [`crate::UserRepository`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    #[serde(default)]
    pub status: UserStatus,
    pub joined: NaiveDate,
}

impl User {
    /// Check the fields a user must always carry
    pub fn validate(&self) -> UserStoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(UserStoreError::invalid("id must not be empty"));
        }
        validate_identity(&self.name, &self.email)
    }
}

/// Fields supplied when adding a user; the directory assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub joined: Option<NaiveDate>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
            department: String::new(),
            joined: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_joined(mut self, joined: NaiveDate) -> Self {
        self.joined = Some(joined);
        self
    }
}

pub(crate) fn validate_identity(name: &str, email: &str) -> UserStoreResult<()> {
    if name.trim().is_empty() {
        return Err(UserStoreError::invalid("name must not be empty"));
    }
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(UserStoreError::invalid(format!(
            "email '{}' is not a valid address",
            email
        ))),
    }
}

/// Users written to an empty store on first start
pub fn seed_users() -> Vec<User> {
    let rows: [(&str, &str, Role, &str, UserStatus, (i32, u32, u32)); 12] = [
        ("Ana Pereira", "ana@opsdeck.local", Role::Admin, "Platform", UserStatus::Active, (2021, 3, 1)),
        ("Ben Okafor", "ben@opsdeck.local", Role::Manager, "Operations", UserStatus::Active, (2021, 6, 14)),
        ("Chloe Martin", "chloe@opsdeck.local", Role::Employee, "Operations", UserStatus::Active, (2022, 1, 10)),
        ("Dev Patel", "dev@opsdeck.local", Role::Employee, "Support", UserStatus::Active, (2022, 2, 7)),
        ("Elena Rossi", "elena@opsdeck.local", Role::Manager, "Support", UserStatus::Active, (2020, 11, 23)),
        ("Farid Haddad", "farid@opsdeck.local", Role::Employee, "Platform", UserStatus::Inactive, (2019, 8, 5)),
        ("Grace Kim", "grace@opsdeck.local", Role::Employee, "Finance", UserStatus::Active, (2023, 4, 17)),
        ("Hugo Silva", "hugo@opsdeck.local", Role::Employee, "Finance", UserStatus::Active, (2023, 5, 2)),
        ("Ines Duarte", "ines@opsdeck.local", Role::Admin, "Security", UserStatus::Active, (2020, 2, 29)),
        ("Jonas Berg", "jonas@opsdeck.local", Role::Employee, "Security", UserStatus::Active, (2022, 9, 12)),
        ("Kemi Adeyemi", "kemi@opsdeck.local", Role::Manager, "Finance", UserStatus::Active, (2021, 12, 6)),
        ("Liam Walsh", "liam@opsdeck.local", Role::Employee, "Platform", UserStatus::Inactive, (2023, 7, 31)),
    ];

    rows.into_iter()
        .enumerate()
        .filter_map(|(i, (name, email, role, department, status, (y, m, d)))| {
            Some(User {
                id: format!("usr_{:03}", i + 1),
                name: name.to_string(),
                email: email.to_string(),
                role,
                department: department.to_string(),
                status,
                joined: NaiveDate::from_ymd_opt(y, m, d)?,
            })
        })
        .collect()
}
