use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::{
        jobs::{normalize_skills, SkillsInput},
        validation::{ensure_max_len, required_text},
    },
    app_state::AppState,
    database::models::resumes,
    errors::AppError,
};

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];
const MAX_FILE_NAME_LEN: usize = 255;

// --- DTOs ---

/// Metadata of an uploaded resume. The file itself lives in external storage;
/// the parsed fields are whatever the client extracted from it.
#[derive(Deserialize, ToSchema, Clone, Default)]
pub struct ResumeRequest {
    pub user_id: Option<i32>,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub raw_text: Option<String>,
    pub parsed_skills: Option<SkillsInput>,
    pub parsed_education: Option<String>,
    pub parsed_experience: Option<String>,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct ResumeCreatedResponse {
    pub message: String,
    pub resume_id: i32,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct ResumeResponse {
    pub resume: resumes::Model,
}

// --- Helpers ---

pub fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// The most recently stored resume of a user.
pub async fn latest_resume(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Option<resumes::Model>, DbErr> {
    resumes::Entity::find()
        .filter(resumes::Column::UserId.eq(user_id))
        .order_by_desc(resumes::Column::CreatedAt)
        .order_by_desc(resumes::Column::Id)
        .one(db)
        .await
}

// --- Route Handlers ---

#[utoipa::path(
    post,
    path = "/resume",
    tag = "Resumes",
    request_body = ResumeRequest,
    responses(
        (status = 201, description = "Resume stored", body = ResumeCreatedResponse),
        (status = 400, description = "Missing user_id/file_name, unsupported file type or unknown user")
    )
)]
#[post("/resume")]
pub async fn upload_resume(
    app_state: web::Data<AppState>,
    body: web::Json<ResumeRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(user_id), Some(file_name)) = (body.user_id, required_text(body.file_name.as_deref()))
    else {
        return Err(AppError::MissingFields(
            "user_id and file_name are required".to_string(),
        ));
    };
    if !has_allowed_extension(&file_name) {
        return Err(AppError::InvalidInput(
            "Only PDF, DOC, DOCX files allowed".to_string(),
        ));
    }
    if !ensure_max_len(&file_name, MAX_FILE_NAME_LEN) {
        return Err(AppError::InvalidInput(format!(
            "file_name must be at most {} characters",
            MAX_FILE_NAME_LEN
        )));
    }

    let resume = resumes::ActiveModel {
        user_id: Set(user_id),
        file_name: Set(file_name),
        file_url: Set(required_text(body.file_url.as_deref())),
        parsed_skills: Set(normalize_skills(body.parsed_skills.as_ref())),
        parsed_education: Set(required_text(body.parsed_education.as_deref())),
        parsed_experience: Set(required_text(body.parsed_experience.as_deref())),
        raw_text: Set(required_text(body.raw_text.as_deref())),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = resumes::Entity::insert(resume)
        .exec(&app_state.db)
        .await
        .map_err(AppError::on_constraint_violation("Resume already exists"))?;

    log::info!(
        "Resume id={} stored for user id={}",
        inserted.last_insert_id,
        user_id
    );
    Ok(HttpResponse::Created().json(ResumeCreatedResponse {
        message: "Resume uploaded successfully".to_string(),
        resume_id: inserted.last_insert_id,
    }))
}

#[utoipa::path(
    get,
    path = "/resume/user/{userId}",
    tag = "Resumes",
    params(
        ("userId" = i32, Path, description = "Owner user ID")
    ),
    responses(
        (status = 200, description = "Latest resume of the user", body = ResumeResponse),
        (status = 404, description = "The user has no resume")
    )
)]
#[get("/resume/user/{user_id}")]
pub async fn get_user_resume(
    app_state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let resume = latest_resume(&app_state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No resume found".to_string()))?;

    Ok(HttpResponse::Ok().json(ResumeResponse { resume }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_resume).service(get_user_resume);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_document_extensions_only() {
        assert!(has_allowed_extension("cv.pdf"));
        assert!(has_allowed_extension("Jane Doe.DOCX"));
        assert!(has_allowed_extension("resume.v2.doc"));
        assert!(!has_allowed_extension("photo.png"));
        assert!(!has_allowed_extension("pdf"));
        assert!(!has_allowed_extension("archive.pdf.zip"));
    }
}
