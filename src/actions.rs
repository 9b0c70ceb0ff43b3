//
// Copyright (c) 2024 Nathan Fiedler
//
use crate::domain::entities::Like;
use crate::domain::repositories::LikeRepository;
use crate::domain::usecases::add_like::{self, AddLike};
use crate::domain::usecases::count_likes::{self, CountLikes};
use crate::domain::usecases::is_post_liked_by_user::{self, IsPostLikedByUser};
use crate::domain::usecases::remove_all_likes::RemoveAllLikes;
use crate::domain::usecases::remove_like::{self, RemoveLike};
use crate::domain::usecases::{NoParams, UseCase};
use crate::{Error, ErrorKind};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

///
/// Result envelope returned by every like action. Callers inspect `success`
/// rather than catching errors.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    /// Number of likes, from `count_likes`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Rows affected by an insert or delete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Like>>,
    /// Whether the user likes the post, from `is_post_liked_by_user`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
    /// Error message when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Classification of the error when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl Envelope {
    pub fn with_count(count: u64) -> Self {
        Self {
            success: true,
            count: Some(count),
            ..Default::default()
        }
    }

    pub fn with_data(data: Vec<Like>) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn with_liked(liked: bool) -> Self {
        Self {
            success: true,
            liked: Some(liked),
            ..Default::default()
        }
    }

    pub fn failure(err: &Error) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            kind: Some(err.kind()),
            ..Default::default()
        }
    }
}

///
/// Entry points for the like operations. Each one logs its invocation, runs
/// the matching use case, and folds any error into a failure envelope.
///
#[derive(Clone)]
pub struct LikeActions {
    records: Arc<dyn LikeRepository>,
}

impl LikeActions {
    pub fn new(records: Arc<dyn LikeRepository>) -> Self {
        Self { records }
    }

    pub async fn count_likes(&self, post_id: &str) -> Envelope {
        let usecase = CountLikes::new(self.records.clone());
        let params = count_likes::Params {
            post_id: post_id.to_owned(),
        };
        info!("count_likes {}", params);
        match usecase.call(params).await {
            Ok(count) => Envelope::with_count(count),
            Err(err) => failure("count_likes", &err),
        }
    }

    pub async fn add_like(&self, post_id: &str, user_id: &str) -> Envelope {
        let usecase = AddLike::new(self.records.clone());
        let params = add_like::Params {
            post_id: post_id.to_owned(),
            user_id: user_id.to_owned(),
        };
        info!("add_like {}", params);
        match usecase.call(params).await {
            Ok(rows) => Envelope::with_data(rows),
            Err(err) => failure("add_like", &err),
        }
    }

    pub async fn remove_like(&self, post_id: &str, user_id: &str) -> Envelope {
        let usecase = RemoveLike::new(self.records.clone());
        let params = remove_like::Params {
            post_id: post_id.to_owned(),
            user_id: user_id.to_owned(),
        };
        info!("remove_like {}", params);
        match usecase.call(params).await {
            Ok(rows) => Envelope::with_data(rows),
            Err(err) => failure("remove_like", &err),
        }
    }

    ///
    /// Delete every like for every post. Administrative use only.
    ///
    pub async fn remove_all_likes(&self) -> Envelope {
        info!("remove_all_likes");
        let usecase = RemoveAllLikes::new(self.records.clone());
        match usecase.call(NoParams {}).await {
            Ok(rows) => Envelope::with_data(rows),
            Err(err) => failure("remove_all_likes", &err),
        }
    }

    ///
    /// A missing like and an ambiguous one (several rows) both come back as
    /// a failure with `liked` set to false.
    ///
    pub async fn is_post_liked_by_user(&self, post_id: &str, user_id: &str) -> Envelope {
        let usecase = IsPostLikedByUser::new(self.records.clone());
        let params = is_post_liked_by_user::Params {
            post_id: post_id.to_owned(),
            user_id: user_id.to_owned(),
        };
        info!("is_post_liked_by_user {}", params);
        match usecase.call(params).await {
            Ok(liked) => Envelope::with_liked(liked),
            Err(err) => Envelope {
                liked: Some(false),
                ..failure("is_post_liked_by_user", &err)
            },
        }
    }
}

fn failure(action: &str, err: &Error) -> Envelope {
    error!("Error in {}: {}", action, err);
    Envelope::failure(err)
}
