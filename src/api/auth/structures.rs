use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::helpers::UserView;

// Required fields are optional here so that an absent field is answered
// with our own 400 instead of the extractor's.
#[derive(Deserialize, ToSchema, Clone, Default)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// `user` (default) or `recruiter`.
    pub role: Option<String>,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct SignupResponse {
    pub message: String,
    pub user_id: i32,
}

#[derive(Deserialize, ToSchema, Clone, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserView,
}
