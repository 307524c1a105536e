//! Author - the public profile attached to posts and comments

use serde::{Deserialize, Serialize};

use crate::value_objects::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: EntityId,
    pub username: String,
    pub avatar: Option<String>,
}

impl Author {
    pub fn new(id: EntityId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            avatar: None,
        }
    }
}
