//
// Copyright (c) 2024 Nathan Fiedler
//
use crate::domain::entities::Like;
use crate::Error;
use async_trait::async_trait;
#[cfg(test)]
use mockall::{automock, predicate::*};

///
/// Repository for like records.
///
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Return the number of likes recorded for the given post.
    async fn count_likes(&self, post_id: &str) -> Result<u64, Error>;

    /// Record that the user likes the post, returning the inserted rows.
    ///
    /// No check is made for an existing like of the same pair.
    async fn insert_like(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>, Error>;

    /// Delete every like matching both identifiers, returning the removed rows.
    async fn delete_likes(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>, Error>;

    /// Delete all like records, returning the removed rows.
    async fn delete_all_likes(&self) -> Result<Vec<Like>, Error>;

    /// Retrieve the one like matching both identifiers.
    ///
    /// Fails if zero or more than one record matches.
    async fn find_single_like(&self, post_id: &str, user_id: &str) -> Result<Like, Error>;
}
