use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A discussion thread with its replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDiscussion {
    pub title: String,
    pub author: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReply {
    pub author: String,
    pub content: String,
}
