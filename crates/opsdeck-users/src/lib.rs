//! OpsDeck user store
//!
//! Users, their roles and which dashboard views each role may open, plus the
//! directory service behind the user management table.
//!
//! ## Features
//!
//! - **Role-Based Views**: [`Role::can_access`] decides which views a user sees
//! - **Pluggable Storage**: [`UserRepository`] with JSON file and in-memory backends
//! - **Write-Back Directory**: every add, update or remove saves the whole collection
//! - **Search and Paging**: text, role and status filters with clamped pages
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use opsdeck_users::{InMemoryUserRepository, NewUser, Role, UserDirectory, UserQuery};
//!
//! let repo = Arc::new(InMemoryUserRepository::new());
//! let mut directory = UserDirectory::open(repo).unwrap();
//!
//! directory
//!     .add(NewUser::new("Mia Chen", "mia@corp.example", Role::Employee))
//!     .unwrap();
//!
//! let page = directory.page(&UserQuery::new().with_text("mia"), 1);
//! assert_eq!(page.total_items, 1);
//! ```

pub mod directory;
pub mod error;
pub mod model;
pub mod repository;
pub mod role;

pub use directory::{UserDirectory, UserQuery};
pub use error::{UserStoreError, UserStoreResult};
pub use model::{seed_users, NewUser, User, UserStatus};
pub use repository::{
    InMemoryUserRepository, JsonFileUserRepository, UserRepository, USERS_FILE_NAME,
};
pub use role::{DashboardView, Role};
