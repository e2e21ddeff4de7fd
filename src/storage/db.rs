use anyhow::Context;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Result;

use crate::core::config::admin::MAIN_ADMIN_SENTINEL_ID;
use crate::storage::migrations;

/// A registered bot user.
///
/// Rows are upserted on every `/start`; the blocked flag is only ever set
/// externally (there is no in-session blocking operation).
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// 0 = active, 1 = blocked
    pub is_blocked: i64,
    pub created_at: String,
}

/// A purchase-like transaction, keyed by an externally generated string id.
///
/// This core has no creation path for transactions; only read paths exist.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub transaction_id: String,
    pub user_id: i64,
    pub amount: Option<f64>,
    pub status: Option<String>,
    pub details: Option<String>,
    pub created_at: String,
    pub completed_at: Option<String>,
}

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Create a new database connection pool
///
/// Initializes a connection pool with up to 10 connections and runs schema
/// migrations on the first connection. Migration failure is fatal: a bot
/// started against an unusable store cannot serve anything.
///
/// # Arguments
///
/// * `database_path` - Path to SQLite database file
pub fn create_pool(database_path: &str) -> anyhow::Result<DbPool> {
    let manager = SqliteConnectionManager::file(database_path);
    let pool = Pool::builder()
        .max_size(10) // Maximum 10 connections in the pool
        .build(manager)
        .context("build connection pool")?;

    let mut conn = pool.get().context("get connection for migrations")?;
    migrations::run_migrations(&mut conn)?;

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is automatically returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> std::result::Result<DbConnection, r2d2::Error> {
    pool.get()
}

/// Seed the main admin row if it does not exist yet.
///
/// Uses the sentinel user_id so repeated startups are idempotent; the row
/// carries the configured username and the is_main_admin flag.
pub fn seed_main_admin(conn: &DbConnection, username: &str) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO admins (user_id, username, is_main_admin) VALUES (?1, ?2, 1)",
        rusqlite::params![MAIN_ADMIN_SENTINEL_ID, username],
    )?;
    Ok(())
}

/// Insert or update the user row keyed by `user_id`.
///
/// Last write wins for the name fields only; the blocked flag and
/// created_at of an existing row are preserved across re-registration.
pub fn upsert_user(
    conn: &DbConnection,
    user_id: i64,
    username: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO users (user_id, username, first_name, last_name) VALUES (?1, ?2, ?3, ?4) \
         ON CONFLICT(user_id) DO UPDATE SET \
             username = excluded.username, \
             first_name = excluded.first_name, \
             last_name = excluded.last_name",
        rusqlite::params![user_id, username, first_name, last_name],
    )?;
    Ok(())
}

/// Fetch a user row by id.
///
/// Returns `Ok(None)` when no row exists, so callers can distinguish
/// "no user" from "user with default flags".
pub fn get_user(conn: &DbConnection, user_id: i64) -> Result<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, username, first_name, last_name, is_blocked, created_at FROM users WHERE user_id = ?1",
    )?;
    let mut rows = stmt.query([user_id])?;

    if let Some(row) = rows.next()? {
        Ok(Some(User {
            user_id: row.get(0)?,
            username: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            is_blocked: row.get(4)?,
            created_at: row.get(5)?,
        }))
    } else {
        Ok(None)
    }
}

/// Check if a user is in the admin roster
pub fn is_admin(conn: &DbConnection, user_id: i64) -> Result<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM admins WHERE user_id = ?1)",
        [user_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Check if a user is the main admin
pub fn is_main_admin(conn: &DbConnection, user_id: i64) -> Result<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM admins WHERE user_id = ?1 AND is_main_admin = 1)",
        [user_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Check if a user is blocked. A missing user row is not blocked.
pub fn is_blocked(conn: &DbConnection, user_id: i64) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT is_blocked FROM users WHERE user_id = ?1")?;
    let mut rows = stmt.query([user_id])?;

    match rows.next()? {
        Some(row) => Ok(row.get::<_, i64>(0)? == 1),
        None => Ok(false),
    }
}

/// List a user's most recent transactions, newest first.
///
/// Ordered by descending created_at; rows sharing a timestamp (SQLite's
/// CURRENT_TIMESTAMP has second resolution) are broken by insertion order,
/// newest insert first.
pub fn list_recent_transactions(conn: &DbConnection, user_id: i64, limit: usize) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT transaction_id, user_id, amount, status, details, created_at, completed_at \
         FROM transactions WHERE user_id = ?1 \
         ORDER BY created_at DESC, rowid DESC LIMIT ?2",
    )?;
    let rows = stmt.query_map(rusqlite::params![user_id, limit as i64], |row| {
        Ok(Transaction {
            transaction_id: row.get(0)?,
            user_id: row.get(1)?,
            amount: row.get(2)?,
            status: row.get(3)?,
            details: row.get(4)?,
            created_at: row.get(5)?,
            completed_at: row.get(6)?,
        })
    })?;

    let mut transactions = Vec::new();
    for row in rows {
        transactions.push(row?);
    }
    Ok(transactions)
}

pub fn count_users(conn: &DbConnection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
}

pub fn count_blocked_users(conn: &DbConnection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users WHERE is_blocked = 1", [], |row| row.get(0))
}

pub fn count_transactions(conn: &DbConnection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
}

pub fn count_completed_transactions(conn: &DbConnection) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE status = 'completed'",
        [],
        |row| row.get(0),
    )
}

/// Sum of amounts over completed transactions; 0.0 when there are none.
pub fn sum_completed_amount(conn: &DbConnection) -> Result<f64> {
    conn.query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE status = 'completed'",
        [],
        |row| row.get(0),
    )
}

pub fn count_admins(conn: &DbConnection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn test_db() -> (TempDir, DbPool) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        let pool = create_pool(path.to_str().unwrap()).unwrap();
        (dir, pool)
    }

    fn insert_transaction(
        conn: &DbConnection,
        id: &str,
        user_id: i64,
        amount: f64,
        status: &str,
        created_at: &str,
    ) {
        conn.execute(
            "INSERT INTO transactions (transaction_id, user_id, amount, status, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![id, user_id, amount, status, created_at],
        )
        .unwrap();
    }

    #[test]
    fn test_upsert_user_is_idempotent_and_last_write_wins() {
        let (_dir, pool) = test_db();
        let conn = get_connection(&pool).unwrap();

        upsert_user(&conn, 42, Some("alice"), Some("Alice"), None).unwrap();
        upsert_user(&conn, 42, Some("alice_new"), Some("Alice"), Some("Smith")).unwrap();

        assert_eq!(count_users(&conn).unwrap(), 1);

        let user = get_user(&conn, 42).unwrap().unwrap();
        assert_eq!(user.username.as_deref(), Some("alice_new"));
        assert_eq!(user.last_name.as_deref(), Some("Smith"));
        assert_eq!(user.is_blocked, 0);
    }

    #[test]
    fn test_is_blocked_false_for_missing_user() {
        let (_dir, pool) = test_db();
        let conn = get_connection(&pool).unwrap();

        assert!(!is_blocked(&conn, 99999).unwrap());
    }

    #[test]
    fn test_is_blocked_reads_flag() {
        let (_dir, pool) = test_db();
        let conn = get_connection(&pool).unwrap();

        upsert_user(&conn, 42, Some("alice"), None, None).unwrap();
        assert!(!is_blocked(&conn, 42).unwrap());

        conn.execute("UPDATE users SET is_blocked = 1 WHERE user_id = 42", [])
            .unwrap();
        assert!(is_blocked(&conn, 42).unwrap());

        // Re-registration must not clear the flag
        upsert_user(&conn, 42, Some("alice2"), None, None).unwrap();
        assert!(is_blocked(&conn, 42).unwrap());
    }

    #[test]
    fn test_main_admin_implies_admin_but_not_conversely() {
        let (_dir, pool) = test_db();
        let conn = get_connection(&pool).unwrap();

        seed_main_admin(&conn, "@boss").unwrap();
        conn.execute(
            "INSERT INTO admins (user_id, username, is_main_admin) VALUES (7, '@helper', 0)",
            [],
        )
        .unwrap();

        assert!(is_main_admin(&conn, MAIN_ADMIN_SENTINEL_ID).unwrap());
        assert!(is_admin(&conn, MAIN_ADMIN_SENTINEL_ID).unwrap());

        assert!(is_admin(&conn, 7).unwrap());
        assert!(!is_main_admin(&conn, 7).unwrap());

        assert!(!is_admin(&conn, 8).unwrap());
    }

    #[test]
    fn test_seed_main_admin_is_idempotent() {
        let (_dir, pool) = test_db();
        let conn = get_connection(&pool).unwrap();

        seed_main_admin(&conn, "@boss").unwrap();
        seed_main_admin(&conn, "@other").unwrap();

        assert_eq!(count_admins(&conn).unwrap(), 1);
        // First seed wins: INSERT OR IGNORE does not overwrite
        let username: String = conn
            .query_row("SELECT username FROM admins WHERE user_id = 0", [], |row| row.get(0))
            .unwrap();
        assert_eq!(username, "@boss");
    }

    #[test]
    fn test_list_recent_transactions_orders_and_limits() {
        let (_dir, pool) = test_db();
        let conn = get_connection(&pool).unwrap();

        insert_transaction(&conn, "t1", 42, 10.0, "pending", "2024-01-01 10:00:00");
        insert_transaction(&conn, "t2", 42, 20.0, "completed", "2024-01-02 10:00:00");
        insert_transaction(&conn, "t3", 42, 30.0, "completed", "2024-01-03 10:00:00");
        // Same timestamp as t3: insertion order breaks the tie, newest first
        insert_transaction(&conn, "t4", 42, 40.0, "pending", "2024-01-03 10:00:00");
        // Other user's transaction must not leak in
        insert_transaction(&conn, "t5", 7, 50.0, "pending", "2024-01-04 10:00:00");

        let all = list_recent_transactions(&conn, 42, 5).unwrap();
        let ids: Vec<&str> = all.iter().map(|t| t.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["t4", "t3", "t2", "t1"]);

        let limited = list_recent_transactions(&conn, 42, 2).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].transaction_id, "t4");
    }

    #[test]
    fn test_list_recent_transactions_empty_for_unknown_user() {
        let (_dir, pool) = test_db();
        let conn = get_connection(&pool).unwrap();

        assert!(list_recent_transactions(&conn, 42, 5).unwrap().is_empty());
    }

    #[test]
    fn test_aggregate_counts_and_sum() {
        let (_dir, pool) = test_db();
        let conn = get_connection(&pool).unwrap();

        upsert_user(&conn, 1, Some("a"), None, None).unwrap();
        upsert_user(&conn, 2, Some("b"), None, None).unwrap();
        conn.execute("UPDATE users SET is_blocked = 1 WHERE user_id = 2", [])
            .unwrap();
        seed_main_admin(&conn, "@boss").unwrap();

        insert_transaction(&conn, "t1", 1, 9.99, "completed", "2024-01-01 10:00:00");
        insert_transaction(&conn, "t2", 1, 5.01, "completed", "2024-01-02 10:00:00");
        insert_transaction(&conn, "t3", 2, 100.0, "pending", "2024-01-03 10:00:00");

        assert_eq!(count_users(&conn).unwrap(), 2);
        assert_eq!(count_blocked_users(&conn).unwrap(), 1);
        assert_eq!(count_transactions(&conn).unwrap(), 3);
        assert_eq!(count_completed_transactions(&conn).unwrap(), 2);
        assert_eq!(count_admins(&conn).unwrap(), 1);
        assert!((sum_completed_amount(&conn).unwrap() - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sum_completed_amount_zero_when_empty() {
        let (_dir, pool) = test_db();
        let conn = get_connection(&pool).unwrap();

        assert_eq!(sum_completed_amount(&conn).unwrap(), 0.0);
    }
}
