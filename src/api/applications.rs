use actix_web::{get, post, put, web, HttpResponse};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::{
        helpers::{MessageResponse, UserView},
        validation::required_text,
    },
    app_state::AppState,
    database::{
        models::{applications, jobs, users},
        ApplicationStatus,
    },
    errors::AppError,
};

// --- DTOs ---

#[derive(Deserialize, ToSchema, Clone, Default)]
pub struct ApplyRequest {
    pub job_id: Option<i32>,
    pub user_id: Option<i32>,
    pub cover_letter: Option<String>,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct ApplicationCreatedResponse {
    pub message: String,
    pub application_id: i32,
}

#[derive(Deserialize, ToSchema, Clone, Default)]
pub struct UpdateStatusRequest {
    /// `pending`, `selected` or `rejected`.
    pub status: Option<String>,
}

/// An application as the applicant sees it: with the job it targets.
#[derive(Serialize, ToSchema, Clone)]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: applications::Model,
    pub job: Option<jobs::Model>,
}

/// An application as the recruiter sees it: with who sent it.
#[derive(Serialize, ToSchema, Clone)]
pub struct ApplicationWithApplicant {
    #[serde(flatten)]
    pub application: applications::Model,
    pub applicant: Option<UserView>,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct UserApplicationsResponse {
    pub applications: Vec<ApplicationWithJob>,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct JobApplicationsResponse {
    pub applications: Vec<ApplicationWithApplicant>,
}

// --- Route Handlers ---

#[utoipa::path(
    post,
    path = "/apply",
    tag = "Applications",
    request_body = ApplyRequest,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationCreatedResponse),
        (status = 400, description = "Missing job_id/user_id or unknown job/user"),
        (status = 409, description = "Already applied for this job")
    )
)]
#[post("/apply")]
pub async fn apply(
    app_state: web::Data<AppState>,
    body: web::Json<ApplyRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(job_id), Some(user_id)) = (body.job_id, body.user_id) else {
        return Err(AppError::MissingFields(
            "job_id and user_id are required".to_string(),
        ));
    };

    let application = applications::ActiveModel {
        job_id: Set(job_id),
        user_id: Set(user_id),
        status: Set(ApplicationStatus::default().to_string()),
        cover_letter: Set(required_text(body.cover_letter.as_deref())),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };

    let inserted = applications::Entity::insert(application)
        .exec(&app_state.db)
        .await
        .map_err(AppError::on_constraint_violation(
            "You have already applied for this job",
        ))?;

    log::info!(
        "User id={} applied for job id={} (application id={})",
        user_id,
        job_id,
        inserted.last_insert_id
    );
    Ok(HttpResponse::Created().json(ApplicationCreatedResponse {
        message: "Application submitted successfully".to_string(),
        application_id: inserted.last_insert_id,
    }))
}

#[utoipa::path(
    get,
    path = "/applications/user/{userId}",
    tag = "Applications",
    params(
        ("userId" = i32, Path, description = "Applicant user ID")
    ),
    responses(
        (status = 200, description = "Applications of the user, newest first", body = UserApplicationsResponse)
    )
)]
#[get("/applications/user/{user_id}")]
pub async fn list_user_applications(
    app_state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let applications = applications::Entity::find()
        .filter(applications::Column::UserId.eq(user_id))
        .find_also_related(jobs::Entity)
        .order_by_desc(applications::Column::CreatedAt)
        .order_by_desc(applications::Column::Id)
        .all(&app_state.db)
        .await?
        .into_iter()
        .map(|(application, job)| ApplicationWithJob { application, job })
        .collect();

    Ok(HttpResponse::Ok().json(UserApplicationsResponse { applications }))
}

#[utoipa::path(
    get,
    path = "/applications/job/{jobId}",
    tag = "Applications",
    params(
        ("jobId" = i32, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Applications received for the job, newest first", body = JobApplicationsResponse)
    )
)]
#[get("/applications/job/{job_id}")]
pub async fn list_job_applications(
    app_state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let job_id = path.into_inner();
    let applications = applications::Entity::find()
        .filter(applications::Column::JobId.eq(job_id))
        .find_also_related(users::Entity)
        .order_by_desc(applications::Column::CreatedAt)
        .order_by_desc(applications::Column::Id)
        .all(&app_state.db)
        .await?
        .into_iter()
        .map(|(application, user)| ApplicationWithApplicant {
            application,
            applicant: user.map(UserView::from),
        })
        .collect();

    Ok(HttpResponse::Ok().json(JobApplicationsResponse { applications }))
}

#[utoipa::path(
    put,
    path = "/application/{id}/status",
    tag = "Applications",
    params(
        ("id" = i32, Path, description = "Application ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = MessageResponse),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Application not found")
    )
)]
#[put("/application/{id}/status")]
pub async fn update_application_status(
    app_state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let application_id = path.into_inner();
    let status = required_text(body.status.as_deref())
        .ok_or_else(|| AppError::MissingFields("status is required".to_string()))?
        .parse::<ApplicationStatus>()
        .map_err(AppError::InvalidInput)?;

    let application = applications::Entity::find_by_id(application_id)
        .one(&app_state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    let mut active_model = application.into_active_model();
    active_model.status = Set(status.to_string());
    active_model.updated_at = Set(Some(Utc::now()));
    active_model.update(&app_state.db).await?;

    log::info!("Application id={} marked {}", application_id, status);
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Application {}",
        status
    ))))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(apply)
        .service(list_user_applications)
        .service(list_job_applications)
        .service(update_application_status);
}
