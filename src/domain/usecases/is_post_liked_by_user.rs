//
// Copyright (c) 2024 Nathan Fiedler
//
use crate::domain::repositories::LikeRepository;
use crate::Error;
use async_trait::async_trait;
use std::cmp;
use std::fmt;
use std::sync::Arc;

///
/// Use case to determine if a user has liked a post.
///
/// Returns `true` when exactly one like matches. No match, or more than one,
/// surfaces as the error from the single-row lookup.
///
pub struct IsPostLikedByUser {
    records: Arc<dyn LikeRepository>,
}

impl IsPostLikedByUser {
    pub fn new(records: Arc<dyn LikeRepository>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl super::UseCase<bool, Params> for IsPostLikedByUser {
    async fn call(&self, params: Params) -> Result<bool, Error> {
        let _like = self
            .records
            .find_single_like(&params.post_id, &params.user_id)
            .await?;
        Ok(true)
    }
}

pub struct Params {
    /// Identifier of the post.
    pub post_id: String,
    /// Identifier of the user.
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
