use actix_web::{get, web, HttpResponse};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    app_state::AppState,
    database::models::{categories, companies},
    errors::AppError,
};

#[derive(Serialize, ToSchema, Clone)]
pub struct CompanyListResponse {
    pub companies: Vec<companies::Model>,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct CategoryListResponse {
    pub categories: Vec<categories::Model>,
}

#[utoipa::path(
    get,
    path = "/companies",
    tag = "Catalog",
    responses(
        (status = 200, description = "All companies by name", body = CompanyListResponse)
    )
)]
#[get("/companies")]
pub async fn list_companies(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let companies = companies::Entity::find()
        .order_by_asc(companies::Column::Name)
        .all(&app_state.db)
        .await?;
    Ok(HttpResponse::Ok().json(CompanyListResponse { companies }))
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Catalog",
    responses(
        (status = 200, description = "All job categories by name", body = CategoryListResponse)
    )
)]
#[get("/categories")]
pub async fn list_categories(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = categories::Entity::find()
        .order_by_asc(categories::Column::Name)
        .all(&app_state.db)
        .await?;
    Ok(HttpResponse::Ok().json(CategoryListResponse { categories }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_companies).service(list_categories);
}
