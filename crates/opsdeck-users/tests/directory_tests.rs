//! Integration tests for the user directory over a JSON file store

use std::sync::Arc;

use opsdeck_users::{
    seed_users, JsonFileUserRepository, NewUser, Role, UserDirectory, UserQuery, UserRepository,
    UserStatus,
};
use proptest::prelude::*;
use tempfile::TempDir;

fn file_directory(dir: &TempDir) -> (JsonFileUserRepository, UserDirectory) {
    let repo = JsonFileUserRepository::with_defaults(dir.path());
    let directory = UserDirectory::open(Arc::new(repo.clone())).unwrap();
    (repo, directory)
}

#[test]
fn test_changes_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let (repo, mut directory) = file_directory(&dir);

    let added = directory
        .add(NewUser::new("Noor Aziz", "noor@opsdeck.local", Role::Manager).with_department("Ops"))
        .unwrap();
    directory.remove("usr_001").unwrap();

    let reopened = UserDirectory::open(Arc::new(repo)).unwrap();
    assert_eq!(reopened.users(), directory.users());
    assert!(reopened.get(&added.id).is_some());
    assert!(reopened.get("usr_001").is_none());
}

#[test]
fn test_twenty_six_users_make_six_pages() {
    let dir = TempDir::new().unwrap();
    let (repo, mut directory) = file_directory(&dir);

    for i in directory.len()..26 {
        directory
            .add(NewUser::new(
                format!("User {}", i),
                format!("user{}@corp.example", i),
                Role::Employee,
            ))
            .unwrap();
    }
    let directory = directory.with_page_size(5).unwrap();

    let first = directory.page(&UserQuery::new(), 1);
    assert_eq!(first.total_items, 26);
    assert_eq!(first.total_pages, 6);
    assert_eq!(first.items.len(), 5);

    let last = directory.page(&UserQuery::new(), 6);
    assert_eq!(last.items.len(), 1);
    assert_eq!(repo.load().unwrap().len(), 26);
}

#[test]
fn test_empty_search_yields_single_empty_page() {
    let dir = TempDir::new().unwrap();
    let (_, directory) = file_directory(&dir);

    let page = directory.page(&UserQuery::new().with_text("nobody-by-this-name"), 3);
    assert_eq!(page.page_number, 1);
    assert_eq!(page.total_pages, 1);
    assert!(page.items.is_empty());
}

#[test]
fn test_combined_filters() {
    let dir = TempDir::new().unwrap();
    let (_, directory) = file_directory(&dir);

    let inactive_employees = directory.search(
        &UserQuery::new()
            .with_role(Role::Employee)
            .with_status(UserStatus::Inactive),
    );
    let names: Vec<_> = inactive_employees.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Farid Haddad", "Liam Walsh"]);
}

#[test]
fn test_zero_page_size_rejected() {
    let dir = TempDir::new().unwrap();
    let (_, directory) = file_directory(&dir);
    assert!(directory.with_page_size(0).is_err());
}

// ============================================================================
// Property: pages of a search cover exactly the matching users
// ============================================================================

proptest! {
    #[test]
    fn prop_pages_cover_search(
        page_size in 1usize..8,
        role in prop::option::of(prop::sample::select(Role::ALL.to_vec())),
        text in prop::sample::select(vec!["", "a", "opsdeck", "zz"]),
    ) {
        let repo = Arc::new(opsdeck_users::InMemoryUserRepository::with_users(seed_users()));
        let directory = UserDirectory::open(repo).unwrap().with_page_size(page_size).unwrap();

        let mut query = UserQuery::new().with_text(text);
        query.role = role;

        let expected = directory.search(&query);
        let total_pages = directory.page(&query, 1).total_pages;

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            seen.extend(directory.page(&query, page).items);
        }
        prop_assert_eq!(seen, expected);
    }
}
