//
// Copyright (c) 2024 Nathan Fiedler
//
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Like entity, associating a user with a blog post.
///
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Like {
    /// Primary key assigned by the store.
    pub id: i64,
    /// Identifier of the liked post.
    pub post_id: String,
    /// Identifier of the user who liked the post.
    pub user_id: String,
}

impl fmt::Display for Like {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Like({}, {})", self.post_id, self.user_id)
    }
}

///
/// Row to be inserted; the store assigns the `id`.
///
#[derive(Debug, Serialize)]
pub struct NewLike<'a> {
    pub post_id: &'a str,
    pub user_id: &'a str,
}
