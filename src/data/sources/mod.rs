//
// Copyright (c) 2024 Nathan Fiedler
//
use crate::domain::entities::Like;
use crate::Error;
use async_trait::async_trait;
#[cfg(test)]
use mockall::{automock, predicate::*};
use std::fmt;
use std::sync::Arc;

mod postgrest;
mod sqlite;

pub use postgrest::PostgrestLikeDataSource;
pub use sqlite::SqliteLikeDataSource;

/// Name of the table holding like records.
pub const LIKES_TABLE: &str = "likes_for_mdx_blog_2";

///
/// Data source for like records.
///
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LikeDataSource: Send + Sync {
    /// Return the number of likes recorded for the given post.
    async fn count_likes(&self, post_id: &str) -> Result<u64, Error>;

    /// Insert a like for the pair, returning the inserted rows.
    async fn insert_like(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>, Error>;

    /// Delete likes matching both identifiers, returning the removed rows.
    async fn delete_likes(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>, Error>;

    /// Delete every like record, returning the removed rows.
    async fn delete_all_likes(&self) -> Result<Vec<Like>, Error>;

    /// Retrieve the one like matching both identifiers.
    ///
    /// Returns `Error::NotSingleRow` if zero or several records match.
    async fn find_single_like(&self, post_id: &str, user_id: &str) -> Result<Like, Error>;
}

///
/// Type for creating the desired type of data source.
///
#[derive(Clone, PartialEq)]
pub enum DataSourceType {
    /// Hosted PostgREST service at the given base URL, using the access key.
    Postgrest { url: String, api_key: String },
    /// SQLite resident in memory, not persistent.
    SqliteMemory,
    /// SQLite stored persistently to the given file path.
    SqliteFile(String),
}

impl fmt::Display for DataSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceType::Postgrest { url, .. } => write!(f, "PostgREST at {}", url),
            DataSourceType::SqliteMemory => write!(f, "SQLite in memory"),
            DataSourceType::SqliteFile(path) => write!(f, "SQLite at {}", path),
        }
    }
}

// keep the access key out of debug output
impl fmt::Debug for DataSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataSourceType({})", self)
    }
}

///
/// Construct a data source appropriate for the given type.
///
pub fn build_data_source(dstype: DataSourceType) -> Result<Arc<dyn LikeDataSource>, Error> {
    match dstype {
        DataSourceType::Postgrest { url, api_key } => {
            let source: Arc<dyn LikeDataSource> =
                Arc::new(PostgrestLikeDataSource::new(&url, &api_key)?);
            Ok(source)
        }
        DataSourceType::SqliteMemory => {
            let source: Arc<dyn LikeDataSource> =
                Arc::new(SqliteLikeDataSource::new_in_memory()?);
            Ok(source)
        }
        DataSourceType::SqliteFile(path) => {
            let source: Arc<dyn LikeDataSource> = Arc::new(SqliteLikeDataSource::new(path)?);
            Ok(source)
        }
    }
}
