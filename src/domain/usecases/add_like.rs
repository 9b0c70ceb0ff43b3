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
/// Use case to record that a user likes a post.
///
/// Both identifiers must be non-empty. Existing likes for the same pair are
/// not checked, so repeated calls produce duplicate rows unless the store
/// enforces uniqueness.
///
pub struct AddLike {
    records: Arc<dyn LikeRepository>,
}

impl AddLike {
    pub fn new(records: Arc<dyn LikeRepository>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl super::UseCase<Vec<Like>, Params> for AddLike {
    async fn call(&self, params: Params) -> Result<Vec<Like>, Error> {
        super::require_identifiers(&params.post_id, &params.user_id)?;
        self.records
            .insert_like(&params.post_id, &params.user_id)
            .await
    }
}

pub struct Params {
    /// Identifier of the liked post.
    pub post_id: String,
    /// Identifier of the user who likes the post.
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
