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
/// Use case to count the likes recorded for a post.
///
/// The post identifier is passed through as given, even when empty.
///
pub struct CountLikes {
    records: Arc<dyn LikeRepository>,
}

impl CountLikes {
    pub fn new(records: Arc<dyn LikeRepository>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl super::UseCase<u64, Params> for CountLikes {
    async fn call(&self, params: Params) -> Result<u64, Error> {
        self.records.count_likes(&params.post_id).await
    }
}

pub struct Params {
    /// Identifier of the post whose likes are counted.
    pub post_id: String,
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Params(post: {})", self.post_id)
    }
}

impl cmp::PartialEq for Params {
    fn eq(&self, other: &Self) -> bool {
        self.post_id == other.post_id
    }
}

impl cmp::Eq for Params {}
