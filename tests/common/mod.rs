#![allow(dead_code)]

use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use jobboard::app_state::AppState;
use jobboard::config::DatabaseSettings;
use jobboard::database::{
    self,
    models::{applications, categories, companies, jobs, resumes, users},
    UserRole, DB,
};
use jobboard::services::PasswordHasher;

/// Builds an actix test service wired like the real server.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(jobboard::api::middleware::RequestId)
                .app_data(actix_web::web::Data::new($state.clone()))
                .app_data(jobboard::api::helpers::json_config(64 * 1024))
                .configure(jobboard::api::configure),
        )
        .await
    };
}

/// Fresh in-memory database with every table created, and the cheapest
/// bcrypt cost so tests stay fast.
pub async fn test_state() -> AppState {
    let db = database::connect_with_settings(&DatabaseSettings::in_memory_sqlite())
        .await
        .expect("in-memory sqlite should open");
    database::create_schema(&db)
        .await
        .expect("schema should be created");
    AppState::new(db, PasswordHasher::new(4))
}

pub async fn insert_user(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
    role: UserRole,
) -> i32 {
    let digest = state.hasher.hash_password(password).unwrap();
    users::Entity::insert(users::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(digest),
        role: Set(role.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    })
    .exec(&state.db)
    .await
    .unwrap()
    .last_insert_id
}

pub async fn insert_job(db: &DB, posted_by: i32, title: &str, is_active: bool) -> i32 {
    jobs::Entity::insert(jobs::ActiveModel {
        title: Set(title.to_string()),
        posted_by: Set(posted_by),
        is_active: Set(is_active),
        created_at: Set(Utc::now()),
        ..Default::default()
    })
    .exec(db)
    .await
    .unwrap()
    .last_insert_id
}

/// Column values for `insert_job_from`; unset fields stay NULL.
#[derive(Default)]
pub struct JobSeed<'a> {
    pub title: &'a str,
    pub job_type: Option<&'a str>,
    pub location: Option<&'a str>,
    pub skills: Option<&'a str>,
    pub salary_max: Option<i32>,
    pub company_id: Option<i32>,
    pub category_id: Option<i32>,
}

pub async fn insert_job_from(db: &DB, posted_by: i32, seed: JobSeed<'_>) -> i32 {
    jobs::Entity::insert(jobs::ActiveModel {
        title: Set(seed.title.to_string()),
        job_type: Set(seed.job_type.map(str::to_string)),
        location: Set(seed.location.map(str::to_string)),
        skills: Set(seed.skills.map(str::to_string)),
        salary_max: Set(seed.salary_max),
        company_id: Set(seed.company_id),
        category_id: Set(seed.category_id),
        posted_by: Set(posted_by),
        is_active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    })
    .exec(db)
    .await
    .unwrap()
    .last_insert_id
}

pub async fn insert_application(db: &DB, job_id: i32, user_id: i32) -> i32 {
    applications::Entity::insert(applications::ActiveModel {
        job_id: Set(job_id),
        user_id: Set(user_id),
        status: Set("pending".to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    })
    .exec(db)
    .await
    .unwrap()
    .last_insert_id
}

pub async fn insert_company(db: &DB, name: &str) -> i32 {
    companies::Entity::insert(companies::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    })
    .exec(db)
    .await
    .unwrap()
    .last_insert_id
}

pub async fn insert_category(db: &DB, name: &str, slug: &str) -> i32 {
    categories::Entity::insert(categories::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    })
    .exec(db)
    .await
    .unwrap()
    .last_insert_id
}

pub async fn resume_count(db: &DB) -> u64 {
    resumes::Entity::find().count(db).await.unwrap()
}

pub async fn user_count(db: &DB) -> u64 {
    users::Entity::find().count(db).await.unwrap()
}

pub async fn find_user_by_email(db: &DB, email: &str) -> Option<users::Model> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
        .unwrap()
}
