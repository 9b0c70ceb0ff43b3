//
// Copyright (c) 2024 Nathan Fiedler
//
use crate::Error;
use async_trait::async_trait;
use std::cmp;
use std::fmt;

pub mod add_like;
pub mod count_likes;
pub mod is_post_liked_by_user;
pub mod remove_all_likes;
pub mod remove_like;

/// `UseCase` is the interface by which all use cases are invoked.
#[async_trait]
pub trait UseCase<Type, Params> {
    async fn call(&self, params: Params) -> Result<Type, Error>;
}

/// `NoParams` is the type for use cases that do not take arguments.
pub struct NoParams {}

impl fmt::Display for NoParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoParams()")
    }
}

impl cmp::PartialEq for NoParams {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl cmp::Eq for NoParams {}

///
/// Reject a post/user pair where either identifier is empty.
///
pub(crate) fn require_identifiers(post_id: &str, user_id: &str) -> Result<(), Error> {
    if post_id.is_empty() || user_id.is_empty() {
        Err(Error::MissingIdentifier)
    } else {
        Ok(())
    }
}
