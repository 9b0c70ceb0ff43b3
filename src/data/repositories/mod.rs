//
// Copyright (c) 2024 Nathan Fiedler
//
use crate::data::sources::LikeDataSource;
use crate::domain::entities::Like;
use crate::domain::repositories::LikeRepository;
use crate::Error;
use async_trait::async_trait;
use std::sync::Arc;

///
/// Default implementation of the like repository.
///
pub struct LikeRepositoryImpl {
    datasource: Arc<dyn LikeDataSource>,
}

impl LikeRepositoryImpl {
    pub fn new(datasource: Arc<dyn LikeDataSource>) -> Self {
        Self { datasource }
    }
}

#[async_trait]
impl LikeRepository for LikeRepositoryImpl {
    async fn count_likes(&self, post_id: &str) -> Result<u64, Error> {
        self.datasource.count_likes(post_id).await
    }

    async fn insert_like(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>, Error> {
        self.datasource.insert_like(post_id, user_id).await
    }

    async fn delete_likes(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>, Error> {
        self.datasource.delete_likes(post_id, user_id).await
    }

    async fn delete_all_likes(&self) -> Result<Vec<Like>, Error> {
        self.datasource.delete_all_likes().await
    }

    async fn find_single_like(&self, post_id: &str, user_id: &str) -> Result<Like, Error> {
        self.datasource.find_single_like(post_id, user_id).await
    }
}
