use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use crate::{
    api::{helpers::MessageResponse, resumes::latest_resume, validation::required_text},
    app_state::AppState,
    database::models::jobs,
    errors::AppError,
};

use super::{
    functions::{
        job_fields, listing_condition, rank_matches, skill_tags, skills_condition,
        with_company_and_category,
    },
    structures::{
        JobCreatedResponse, JobListQuery, JobListResponse, JobMatch, JobMatchQuery,
        JobMatchResponse, JobPayload, JobResponse, JobSort,
    },
};

const DEFAULT_MATCH_LIMIT: u64 = 6;
const MAX_MATCH_LIMIT: u64 = 50;

#[utoipa::path(
    get,
    path = "/jobs",
    tag = "Jobs",
    params(JobListQuery),
    responses(
        (status = 200, description = "Active jobs with company and category, newest first", body = JobListResponse),
        (status = 400, description = "Unknown sort or malformed filter")
    )
)]
#[get("")]
pub async fn list_jobs(
    app_state: web::Data<AppState>,
    query: web::Query<JobListQuery>,
) -> Result<HttpResponse, AppError> {
    let mut select = jobs::Entity::find().filter(listing_condition(&query));
    if query.sort == JobSort::Salary {
        select = select.order_by_desc(jobs::Column::SalaryMax);
    }
    let rows = select
        .order_by_desc(jobs::Column::CreatedAt)
        .order_by_desc(jobs::Column::Id)
        .all(&app_state.db)
        .await?;

    let jobs = with_company_and_category(&app_state.db, rows).await?;
    Ok(HttpResponse::Ok().json(JobListResponse { jobs }))
}

/// Active jobs sharing skills with the caller, most shared skills first.
#[utoipa::path(
    get,
    path = "/jobs/match",
    tag = "Jobs",
    params(JobMatchQuery),
    responses(
        (status = 200, description = "Matching active jobs", body = JobMatchResponse),
        (status = 400, description = "Neither skills nor user_id given"),
        (status = 404, description = "The user has no resume")
    )
)]
#[get("/match")]
pub async fn match_jobs(
    app_state: web::Data<AppState>,
    query: web::Query<JobMatchQuery>,
) -> Result<HttpResponse, AppError> {
    let skills = match (required_text(query.skills.as_deref()), query.user_id) {
        (Some(skills), _) => skill_tags(&skills),
        (None, Some(user_id)) => {
            let resume = latest_resume(&app_state.db, user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("No resume found".to_string()))?;
            resume
                .parsed_skills
                .as_deref()
                .map(skill_tags)
                .unwrap_or_default()
        }
        (None, None) => {
            return Err(AppError::MissingFields(
                "skills or user_id is required".to_string(),
            ));
        }
    };
    if skills.is_empty() {
        return Err(AppError::InvalidInput(
            "No skills to match against".to_string(),
        ));
    }
    let limit = query
        .limit
        .unwrap_or(DEFAULT_MATCH_LIMIT)
        .clamp(1, MAX_MATCH_LIMIT) as usize;

    let rows = jobs::Entity::find()
        .filter(jobs::Column::IsActive.eq(true))
        .filter(skills_condition(&skills))
        .order_by_desc(jobs::Column::CreatedAt)
        .order_by_desc(jobs::Column::Id)
        .all(&app_state.db)
        .await?;

    let (ranked, matched): (Vec<jobs::Model>, Vec<Vec<String>>) =
        rank_matches(rows, &skills, limit).into_iter().unzip();
    let jobs = with_company_and_category(&app_state.db, ranked)
        .await?
        .into_iter()
        .zip(matched)
        .map(|(details, matched_skills)| JobMatch {
            details,
            matched_skills,
        })
        .collect();

    Ok(HttpResponse::Ok().json(JobMatchResponse { skills, jobs }))
}

#[utoipa::path(
    get,
    path = "/jobs/{id}",
    tag = "Jobs",
    params(
        ("id" = i32, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job with company and category", body = JobResponse),
        (status = 404, description = "Job not found")
    )
)]
#[get("/{id}")]
pub async fn get_job(
    app_state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let job_id = path.into_inner();
    let row = jobs::Entity::find_by_id(job_id)
        .one(&app_state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job with id {} not found", job_id)))?;

    let job = with_company_and_category(&app_state.db, vec![row])
        .await?
        .pop()
        .ok_or(AppError::Internal)?;
    Ok(HttpResponse::Ok().json(JobResponse { job }))
}

#[utoipa::path(
    post,
    path = "/jobs",
    tag = "Jobs",
    request_body = JobPayload,
    responses(
        (status = 201, description = "Job posted", body = JobCreatedResponse),
        (status = 400, description = "Missing title/posted_by or invalid values")
    )
)]
#[post("")]
pub async fn create_job(
    app_state: web::Data<AppState>,
    body: web::Json<JobPayload>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();
    let posted_by = payload.posted_by.ok_or_else(|| {
        AppError::MissingFields("Title and posted_by are required".to_string())
    })?;
    let fields = job_fields(&payload)?;

    let job = jobs::ActiveModel {
        title: Set(fields.title),
        description: Set(fields.description),
        requirements: Set(fields.requirements),
        salary_min: Set(fields.salary_min),
        salary_max: Set(fields.salary_max),
        location: Set(fields.location),
        job_type: Set(fields.job_type),
        category_id: Set(fields.category_id),
        company_id: Set(fields.company_id),
        posted_by: Set(posted_by),
        skills: Set(fields.skills),
        is_active: Set(true),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    };

    let inserted = jobs::Entity::insert(job)
        .exec(&app_state.db)
        .await
        .map_err(AppError::on_constraint_violation("Job already exists"))?;

    log::info!(
        "Job id={} posted by user id={}",
        inserted.last_insert_id,
        posted_by
    );
    Ok(HttpResponse::Created().json(JobCreatedResponse {
        message: "Job posted successfully".to_string(),
        job_id: inserted.last_insert_id,
    }))
}

/// Replaces the editable columns. The poster never changes; the active flag
/// is only touched when the body carries it.
#[utoipa::path(
    put,
    path = "/jobs/{id}",
    tag = "Jobs",
    params(
        ("id" = i32, Path, description = "Job ID")
    ),
    request_body = JobPayload,
    responses(
        (status = 200, description = "Job updated", body = MessageResponse),
        (status = 400, description = "Invalid values"),
        (status = 404, description = "Job not found")
    )
)]
#[put("/{id}")]
pub async fn update_job(
    app_state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<JobPayload>,
) -> Result<HttpResponse, AppError> {
    let job_id = path.into_inner();
    let payload = body.into_inner();
    let fields = job_fields(&payload)?;

    let job = jobs::Entity::find_by_id(job_id)
        .one(&app_state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job with id {} not found", job_id)))?;

    let mut active_model = job.into_active_model();
    active_model.title = Set(fields.title);
    active_model.description = Set(fields.description);
    active_model.requirements = Set(fields.requirements);
    active_model.salary_min = Set(fields.salary_min);
    active_model.salary_max = Set(fields.salary_max);
    active_model.location = Set(fields.location);
    active_model.job_type = Set(fields.job_type);
    active_model.category_id = Set(fields.category_id);
    active_model.company_id = Set(fields.company_id);
    active_model.skills = Set(fields.skills);
    if let Some(is_active) = payload.is_active {
        active_model.is_active = Set(is_active);
    }
    active_model.updated_at = Set(Some(Utc::now()));

    active_model
        .update(&app_state.db)
        .await
        .map_err(AppError::on_constraint_violation("Job already exists"))?;

    log::info!("Job id={} updated", job_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Job updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    tag = "Jobs",
    params(
        ("id" = i32, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job deleted", body = MessageResponse),
        (status = 404, description = "Job not found")
    )
)]
#[delete("/{id}")]
pub async fn delete_job(
    app_state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let job_id = path.into_inner();
    let result = jobs::Entity::delete_by_id(job_id)
        .exec(&app_state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("Job with id {} not found", job_id)));
    }

    log::info!("Job id={} deleted", job_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Job deleted successfully")))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/jobs")
            .service(list_jobs)
            .service(match_jobs)
            .service(get_job)
            .service(create_job)
            .service(update_job)
            .service(delete_job),
    );
}
