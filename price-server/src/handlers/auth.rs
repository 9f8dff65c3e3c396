use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use price_core::models::{Credentials, NewUser, User};

use crate::error::ApiError;
use crate::state::AppState;

/// Wire shape for a user. Built from [`User`], which never carries the
/// password, so credentials cannot leak into a response by accident.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.trim().is_empty() {
        return Err(ApiError::Validation(
            "name, email and password are required".to_string(),
        ));
    }

    let user = state
        .store
        .register(NewUser {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state
        .store
        .authenticate(&creds.email, &creds.password)
        .await?;
    Ok(Json(user.into()))
}
