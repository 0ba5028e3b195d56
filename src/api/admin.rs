use actix_web::{delete, get, web, HttpResponse};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    api::helpers::{MessageResponse, UserView},
    app_state::AppState,
    database::{
        models::{applications, jobs, users},
        UserRole,
    },
    errors::AppError,
};

// Nothing checks that the caller is an admin; see DESIGN.md.

#[derive(Serialize, ToSchema, Clone)]
pub struct UserListResponse {
    pub users: Vec<UserView>,
}

#[derive(Serialize, ToSchema, Clone, Debug, PartialEq, Eq)]
pub struct AdminStats {
    /// Accounts with the `user` role.
    pub users: u64,
    pub recruiters: u64,
    pub jobs: u64,
    pub applications: u64,
}

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    responses(
        (status = 200, description = "All registered users, newest first", body = UserListResponse)
    )
)]
#[get("/users")]
pub async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = users::Entity::find()
        .order_by_desc(users::Column::CreatedAt)
        .order_by_desc(users::Column::Id)
        .all(&app_state.db)
        .await?
        .into_iter()
        .map(UserView::from)
        .collect();

    Ok(HttpResponse::Ok().json(UserListResponse { users }))
}

#[utoipa::path(
    delete,
    path = "/admin/user/{id}",
    tag = "Admin",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found")
    )
)]
#[delete("/user/{id}")]
pub async fn delete_user(
    app_state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let result = users::Entity::delete_by_id(user_id)
        .exec(&app_state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    log::info!("Deleted user id={}", user_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Aggregate counts", body = AdminStats)
    )
)]
#[get("/stats")]
pub async fn get_stats(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = &app_state.db;

    let stats = AdminStats {
        users: users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::User.as_str()))
            .count(db)
            .await?,
        recruiters: users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Recruiter.as_str()))
            .count(db)
            .await?,
        jobs: jobs::Entity::find().count(db).await?,
        applications: applications::Entity::find().count(db).await?,
    };

    Ok(HttpResponse::Ok().json(stats))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(list_users)
            .service(delete_user)
            .service(get_stats),
    );
}
