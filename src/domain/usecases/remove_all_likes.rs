//
// Copyright (c) 2024 Nathan Fiedler
//
use super::NoParams;
use crate::domain::entities::Like;
use crate::domain::repositories::LikeRepository;
use crate::Error;
use async_trait::async_trait;
use std::sync::Arc;

///
/// Use case to delete every like record, for every post.
///
/// There is no filter and no way to undo it.
///
pub struct RemoveAllLikes {
    records: Arc<dyn LikeRepository>,
}

impl RemoveAllLikes {
    pub fn new(records: Arc<dyn LikeRepository>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl super::UseCase<Vec<Like>, NoParams> for RemoveAllLikes {
    async fn call(&self, _params: NoParams) -> Result<Vec<Like>, Error> {
        self.records.delete_all_likes().await
    }
}
