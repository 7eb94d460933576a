use tp_db::Database;

use sqlx::SqlitePool;
use tempfile::TempDir;

/// Creates an in-memory database with migrations run
pub async fn create_test_database() -> Database {
    Database::in_memory()
        .await
        .expect("Failed to create test database")
}

/// Creates a file-backed database inside a fresh temp directory.
/// Keep the TempDir alive for as long as the database is used.
pub async fn create_file_database() -> (TempDir, Database) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let database = Database::open(&temp_dir.path().join("telepush.db"))
        .await
        .expect("Failed to open file database");

    (temp_dir, database)
}

/// Inserts a row directly, bypassing the repository
pub async fn insert_raw_user(
    pool: &SqlitePool,
    id: i64,
    first_name: &str,
    chat_id: Option<i64>,
    send_key: Option<&str>,
) -> Result<(), sqlx::Error> {
    // Use sqlx::query (not query!) to avoid offline mode issues in tests
    sqlx::query(
        "INSERT INTO users (id, first_name, chat_id, send_key, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(first_name)
    .bind(chat_id)
    .bind(send_key)
    .bind(chrono::Utc::now().timestamp())
    .execute(pool)
    .await
    .map(|_| ())
}
