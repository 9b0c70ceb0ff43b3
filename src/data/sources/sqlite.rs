//
// Copyright (c) 2024 Nathan Fiedler
//
use super::LIKES_TABLE;
use crate::data::sources::LikeDataSource;
use crate::domain::entities::Like;
use crate::Error;
use async_trait::async_trait;
use rusqlite::{Connection, Params, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

///
/// Data source implementation backed by an SQLite database.
///
/// The table mirrors the hosted one and, like it, has no uniqueness
/// constraint on the post/user pair.
///
/// Queries run synchronously while holding the connection mutex, blocking
/// the async executor thread. Meant for development and tests, not for
/// production load.
///
pub struct SqliteLikeDataSource {
    // database connection
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLikeDataSource {
    /// Construct an SQLite-based data source that will be stored at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let conn = Connection::open(path)?;
        create_tables(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Construct an SQLite-based data source that will be memory resident.
    pub fn new_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()?;
        create_tables(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.conn
            .lock()
            .map_err(|_| Error::InternalError("database lock poisoned".into()))
    }
}

#[async_trait]
impl LikeDataSource for SqliteLikeDataSource {
    async fn count_likes(&self, post_id: &str) -> Result<u64, Error> {
        let db = self.lock()?;
        let sql = format!("SELECT COUNT(*) FROM {} WHERE post_id = ?", LIKES_TABLE);
        let count: i64 = db.query_row(&sql, [post_id], |row| row.get(0))?;
        u64::try_from(count).map_err(|e| Error::InternalError(e.to_string()))
    }

    async fn insert_like(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>, Error> {
        let db = self.lock()?;
        let sql = format!(
            "INSERT INTO {} (post_id, user_id) VALUES (?, ?) RETURNING id, post_id, user_id",
            LIKES_TABLE
        );
        query_likes(&db, &sql, [post_id, user_id])
    }

    async fn delete_likes(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>, Error> {
        let db = self.lock()?;
        // need 'RETURNING' otherwise the query rows will be empty
        let sql = format!(
            "DELETE FROM {} WHERE post_id = ? AND user_id = ? RETURNING id, post_id, user_id",
            LIKES_TABLE
        );
        query_likes(&db, &sql, [post_id, user_id])
    }

    async fn delete_all_likes(&self) -> Result<Vec<Like>, Error> {
        let db = self.lock()?;
        let sql = format!("DELETE FROM {} RETURNING id, post_id, user_id", LIKES_TABLE);
        query_likes(&db, &sql, [])
    }

    async fn find_single_like(&self, post_id: &str, user_id: &str) -> Result<Like, Error> {
        let db = self.lock()?;
        let sql = format!(
            "SELECT id, post_id, user_id FROM {} WHERE post_id = ? AND user_id = ?",
            LIKES_TABLE
        );
        let mut likes = query_likes(&db, &sql, [post_id, user_id])?;
        if likes.len() == 1 {
            Ok(likes.remove(0))
        } else {
            Err(Error::not_single_row(likes.len()))
        }
    }
}

fn row_to_like(row: &Row) -> rusqlite::Result<Like> {
    Ok(Like {
        id: row.get(0)?,
        post_id: row.get(1)?,
        user_id: row.get(2)?,
    })
}

fn query_likes<P: Params>(db: &Connection, sql: &str, params: P) -> Result<Vec<Like>, Error> {
    let mut stmt = db.prepare(sql)?;
    let rows = stmt.query_map(params, row_to_like)?;
    let mut likes: Vec<Like> = Vec::new();
    for like in rows {
        likes.push(like?);
    }
    Ok(likes)
}

//
// Create the database tables if they do not exist.
//
fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                post_id TEXT NOT NULL,
                user_id TEXT NOT NULL
            )",
            LIKES_TABLE
        ),
        (),
    )?;
    Ok(())
}
