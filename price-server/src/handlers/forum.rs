use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use price_core::RepositoryError;
use price_core::models::{Discussion, NewDiscussion, NewReply, Reply};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyDto {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Reply> for ReplyDto {
    fn from(reply: Reply) -> Self {
        Self {
            id: reply.id,
            author: reply.author,
            content: reply.content,
            likes: reply.likes,
            created_at: reply.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub replies: Vec<ReplyDto>,
}

impl From<Discussion> for DiscussionDto {
    fn from(discussion: Discussion) -> Self {
        Self {
            replies: discussion.replies.into_iter().map(ReplyDto::from).collect(),
            id: discussion.id,
            title: discussion.title,
            author: discussion.author,
            content: discussion.content,
            likes: discussion.likes,
            created_at: discussion.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateDiscussionRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateReplyRequest {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
}

pub async fn list_discussions(
    State(state): State<AppState>,
) -> Result<Json<Vec<DiscussionDto>>, ApiError> {
    let discussions = state.store.list_discussions().await?;
    Ok(Json(
        discussions.into_iter().map(DiscussionDto::from).collect(),
    ))
}

pub async fn create_discussion(
    State(state): State<AppState>,
    Json(req): Json<CreateDiscussionRequest>,
) -> Result<(StatusCode, Json<DiscussionDto>), ApiError> {
    if req.title.trim().is_empty() || req.author.trim().is_empty() || req.content.trim().is_empty()
    {
        return Err(ApiError::Validation(
            "title, author and content are required".to_string(),
        ));
    }

    let discussion = state
        .store
        .create_discussion(NewDiscussion {
            title: req.title,
            author: req.author,
            content: req.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(discussion.into())))
}

pub async fn add_reply(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CreateReplyRequest>,
) -> Result<(StatusCode, Json<ReplyDto>), ApiError> {
    if req.author.trim().is_empty() || req.content.trim().is_empty() {
        return Err(ApiError::Validation(
            "author and content are required".to_string(),
        ));
    }

    let reply = state
        .store
        .add_reply(
            id,
            NewReply {
                author: req.author,
                content: req.content,
            },
        )
        .await
        .map_err(not_found_as_discussion)?;

    Ok((StatusCode::CREATED, Json(reply.into())))
}

pub async fn like_discussion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let likes = state
        .store
        .like_discussion(id)
        .await
        .map_err(not_found_as_discussion)?;
    Ok(Json(json!({ "likes": likes })))
}

pub async fn like_reply(
    State(state): State<AppState>,
    Path((id, reply_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, ApiError> {
    let likes = state
        .store
        .like_reply(id, reply_id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => ApiError::NotFound("Reply".to_string()),
            other => other.into(),
        })?;
    Ok(Json(json!({ "likes": likes })))
}

fn not_found_as_discussion(err: RepositoryError) -> ApiError {
    match err {
        RepositoryError::NotFound => ApiError::NotFound("Discussion".to_string()),
        other => other.into(),
    }
}
