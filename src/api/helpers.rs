use actix_web::{error, web, HttpRequest};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{database::models::users, errors::AppError};

#[derive(Serialize, ToSchema, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public projection of a user row; the password digest is never part of it.
#[derive(Serialize, ToSchema, Clone, Debug)]
pub struct UserView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for UserView {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            phone: user.phone,
            location: user.location,
            created_at: user.created_at,
        }
    }
}

/// JSON extractor settings: size limit, and malformed bodies answered in
/// the same `{code, error}` shape as every other failure.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err: error::JsonPayloadError, req: &HttpRequest| {
            log::debug!("rejected JSON body on {}: {}", req.path(), err);
            AppError::InvalidInput(format!("Invalid JSON body: {}", err)).into()
        })
}
