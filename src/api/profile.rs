use actix_web::{get, put, web, HttpResponse};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::{
        helpers::{MessageResponse, UserView},
        validation::{ensure_max_len, required_text, sanitize_phone, MAX_NAME_LEN},
    },
    app_state::AppState,
    database::models::users,
    errors::AppError,
};

// --- DTOs ---

#[derive(Deserialize, ToSchema, Clone, Default)]
pub struct UpdateProfileRequest {
    pub user_id: Option<i32>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct ProfileResponse {
    pub user: UserView,
}

// --- Route Handlers ---

#[utoipa::path(
    get,
    path = "/profile/{userId}",
    tag = "Profile",
    params(
        ("userId" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Profile of the user", body = ProfileResponse),
        (status = 404, description = "User not found")
    )
)]
#[get("/{user_id}")]
pub async fn get_profile(
    app_state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let user = users::Entity::find_by_id(user_id)
        .one(&app_state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        user: UserView::from(user),
    }))
}

/// Overwrites name, phone and location. Blank phone/location clear the column.
#[utoipa::path(
    put,
    path = "/profile",
    tag = "Profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Missing user_id or name"),
        (status = 404, description = "User not found")
    )
)]
#[put("")]
pub async fn update_profile(
    app_state: web::Data<AppState>,
    body: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(user_id), Some(name)) = (body.user_id, required_text(body.name.as_deref())) else {
        return Err(AppError::MissingFields(
            "user_id and name are required".to_string(),
        ));
    };
    if !ensure_max_len(&name, MAX_NAME_LEN) {
        return Err(AppError::InvalidInput(format!(
            "Name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }

    let phone = match required_text(body.phone.as_deref()) {
        Some(raw) => Some(
            sanitize_phone(&raw)
                .ok_or_else(|| AppError::InvalidInput("Invalid phone number".to_string()))?,
        ),
        None => None,
    };

    let user = users::Entity::find_by_id(user_id)
        .one(&app_state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut active_model = user.into_active_model();
    active_model.name = Set(name);
    active_model.phone = Set(phone);
    active_model.location = Set(required_text(body.location.as_deref()));
    active_model.update(&app_state.db).await?;

    log::info!("Updated profile of user id={}", user_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Profile updated successfully")))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .service(get_profile)
            .service(update_profile),
    );
}
