use notevault_core::db::open_db_in_memory;
use notevault_core::{verify_password, RepoError, SqliteUserRepository, UserRepository};
use rusqlite::Connection;

#[test]
fn create_returns_id_and_username_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let created = repo.create("alice", "correct horse").unwrap();
    assert!(created.id > 0);
    assert_eq!(created.username, "alice");
}

#[test]
fn stored_password_is_a_hash_never_the_plaintext() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    repo.create("alice", "correct horse").unwrap();
    let stored = repo.find_by_username("alice").unwrap().unwrap();

    assert_ne!(stored.password_hash, "correct horse");
    assert!(stored.password_hash.starts_with("$argon2id$"));
    assert!(verify_password("correct horse", &stored.password_hash).unwrap());
    assert!(!verify_password("battery staple", &stored.password_hash).unwrap());
}

#[test]
fn duplicate_username_raises_distinct_condition_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    repo.create("alice", "first password").unwrap();
    let err = repo.create("alice", "second password").unwrap_err();
    assert!(matches!(err, RepoError::UsernameTaken(name) if name == "alice"));

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM users WHERE username = 'alice';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn find_by_username_missing_is_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_username("nobody").unwrap().is_none());
}

#[test]
fn find_by_username_returns_the_full_stored_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let created = repo.create("alice", "correct horse").unwrap();
    let stored = repo.find_by_username("alice").unwrap().unwrap();

    assert_eq!(stored.id, created.id);
    assert_eq!(stored.username, "alice");
    assert!(!stored.password_hash.is_empty());
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteUserRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("users"))
    ));
}
