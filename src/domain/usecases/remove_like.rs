//
// Copyright (c) 2024 Nathan Fiedler
//
use crate::domain::entities::Like;
use crate::domain::repositories::LikeRepository;
use crate::Error;
use async_trait::async_trait;
use std::cmp;
use std::fmt;
use std::sync::Arc;

///
/// Use case to remove a user's like of a post.
///
/// Every row matching both identifiers is deleted, duplicates included.
///
pub struct RemoveLike {
    records: Arc<dyn LikeRepository>,
}

impl RemoveLike {
    pub fn new(records: Arc<dyn LikeRepository>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl super::UseCase<Vec<Like>, Params> for RemoveLike {
    async fn call(&self, params: Params) -> Result<Vec<Like>, Error> {
        super::require_identifiers(&params.post_id, &params.user_id)?;
        self.records
            .delete_likes(&params.post_id, &params.user_id)
            .await
    }
}

pub struct Params {
    /// Identifier of the post.
    pub post_id: String,
    /// Identifier of the user withdrawing the like.
    pub user_id: String,
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Params(post: {}, user: {})", self.post_id, self.user_id)
    }
}

impl cmp::PartialEq for Params {
    fn eq(&self, other: &Self) -> bool {
        self.post_id == other.post_id && self.user_id == other.user_id
    }
}

impl cmp::Eq for Params {}
