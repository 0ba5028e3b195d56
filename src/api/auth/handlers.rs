use actix_web::{post, web, HttpResponse};
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::{
    api::{
        helpers::UserView,
        validation::{
            ensure_max_len, normalize_email, required_text, sanitize_phone, validate_email,
            MAX_NAME_LEN, MAX_PASSWORD_LEN,
        },
    },
    app_state::AppState,
    database::{models::users, UserRole},
    errors::AppError,
};

use super::structures::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};

#[utoipa::path(
    post,
    path = "/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = SignupResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Email already exists"),
    )
)]
#[post("/signup")]
pub async fn signup(
    app_state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let (Some(name), Some(email), Some(password)) = (
        required_text(body.name.as_deref()),
        required_text(body.email.as_deref()),
        body.password.filter(|p| !p.trim().is_empty()),
    ) else {
        return Err(AppError::MissingFields(
            "All fields are required".to_string(),
        ));
    };

    let email = normalize_email(&email);
    if !validate_email(&email) {
        return Err(AppError::InvalidInput("Invalid email format".to_string()));
    }
    if !ensure_max_len(&name, MAX_NAME_LEN) {
        return Err(AppError::InvalidInput(format!(
            "Name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    // bcrypt ignores everything past 72 bytes
    if !ensure_max_len(&password, MAX_PASSWORD_LEN) {
        return Err(AppError::InvalidInput(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_LEN
        )));
    }

    let role = match required_text(body.role.as_deref()) {
        Some(role) => role.parse::<UserRole>().map_err(AppError::InvalidInput)?,
        None => UserRole::User,
    };
    if role == UserRole::Admin {
        return Err(AppError::InvalidInput(
            "Admin accounts cannot be self-registered".to_string(),
        ));
    }

    let phone = match required_text(body.phone.as_deref()) {
        Some(raw) => Some(
            sanitize_phone(&raw)
                .ok_or_else(|| AppError::InvalidInput("Invalid phone number".to_string()))?,
        ),
        None => None,
    };

    let hasher = app_state.hasher;
    let digest = web::block(move || hasher.hash_password(&password))
        .await
        .map_err(|e| {
            log::error!("password hashing task failed: {}", e);
            AppError::Internal
        })??;

    let new_user = users::ActiveModel {
        name: Set(name),
        email: Set(email),
        password_hash: Set(digest),
        role: Set(role.to_string()),
        phone: Set(phone),
        location: Set(required_text(body.location.as_deref())),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = users::Entity::insert(new_user)
        .exec(&app_state.db)
        .await
        .map_err(AppError::on_constraint_violation("Email already exists"))?;

    log::info!("Registered {} account id={}", role, inserted.last_insert_id);
    Ok(HttpResponse::Created().json(SignupResponse {
        message: "User registered successfully".to_string(),
        user_id: inserted.last_insert_id,
    }))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid email or password"),
    )
)]
#[post("/login")]
pub async fn login(
    app_state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let (Some(email), Some(password)) = (
        required_text(body.email.as_deref()),
        body.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::MissingFields(
            "Email and password are required".to_string(),
        ));
    };
    let email = normalize_email(&email);

    let Some(user) = users::Entity::find()
        .filter(users::Column::Email.eq(email.as_str()))
        .one(&app_state.db)
        .await?
    else {
        log::warn!("Login rejected: no account for {}", email);
        return Err(AppError::InvalidCredentials);
    };

    let hasher = app_state.hasher;
    let digest = user.password_hash.clone();
    let matches = web::block(move || hasher.verify_password(&password, &digest))
        .await
        .map_err(|e| {
            log::error!("password verification task failed: {}", e);
            AppError::Internal
        })?;

    if !matches {
        log::warn!("Login rejected: wrong password for user id={}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    log::info!("User id={} logged in as {}", user.id, user.role);
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        user: UserView::from(user),
    }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(signup).service(login);
}
