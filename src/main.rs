use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use jobboard::api::{
    self, admin, applications, auth, catalog, health, helpers, jobs, profile, resumes,
};
use jobboard::app_state::AppState;
use jobboard::config::Config;
use jobboard::database::{self, models, ApplicationStatus, UserRole};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::signup,
        auth::login,
        // Profile
        profile::get_profile,
        profile::update_profile,
        // Jobs
        jobs::list_jobs,
        jobs::match_jobs,
        jobs::get_job,
        jobs::create_job,
        jobs::update_job,
        jobs::delete_job,
        // Applications
        applications::apply,
        applications::list_user_applications,
        applications::list_job_applications,
        applications::update_application_status,
        // Resumes
        resumes::upload_resume,
        resumes::get_user_resume,
        // Catalog
        catalog::list_companies,
        catalog::list_categories,
        // Admin
        admin::list_users,
        admin::delete_user,
        admin::get_stats,
        // Health
        health::health_check,
    ),
    components(
        schemas(
            // --- Models ---
            models::jobs::Model,
            models::applications::Model,
            models::companies::Model,
            models::categories::Model,
            models::resumes::Model,
            UserRole,
            ApplicationStatus,

            // --- DTOs & API Structs ---
            helpers::MessageResponse,
            helpers::UserView,
            auth::SignupRequest,
            auth::SignupResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            profile::UpdateProfileRequest,
            profile::ProfileResponse,
            jobs::JobPayload,
            jobs::SkillsInput,
            jobs::JobSort,
            jobs::JobDetails,
            jobs::JobMatch,
            jobs::JobMatchResponse,
            jobs::JobListResponse,
            jobs::JobResponse,
            jobs::JobCreatedResponse,
            applications::ApplyRequest,
            applications::ApplicationCreatedResponse,
            applications::UpdateStatusRequest,
            applications::ApplicationWithJob,
            applications::ApplicationWithApplicant,
            applications::UserApplicationsResponse,
            applications::JobApplicationsResponse,
            resumes::ResumeRequest,
            resumes::ResumeCreatedResponse,
            resumes::ResumeResponse,
            catalog::CompanyListResponse,
            catalog::CategoryListResponse,
            admin::UserListResponse,
            admin::AdminStats,
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Profile", description = "User profile endpoints"),
        (name = "Jobs", description = "Job posting and listing"),
        (name = "Applications", description = "Job applications"),
        (name = "Resumes", description = "Resume metadata and parsed fields"),
        (name = "Catalog", description = "Companies and job categories"),
        (name = "Admin", description = "Admin dashboard endpoints (no access control)"),
        (name = "Health", description = "Liveness probe")
    )
)]
struct ApiDoc;

fn build_cors(config: &Config) -> Cors {
    let origins = config.allowed_origins();
    if origins.is_empty() {
        return Cors::permissive();
    }

    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let db = database::connect_with_settings(&config.database_settings()).await?;
    let app_state = AppState::from_config(db, &config);

    let host = config.host.clone();
    let port = config.port;

    log::info!("Starting server at http://{}:{}", host, port);
    log::info!("Swagger UI available at http://{}:{}/swagger-ui/", host, port);
    log::info!("bcrypt cost: {}", app_state.hasher.cost());

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&config))
            .wrap(api::middleware::RequestId)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(app_state.clone()))
            .app_data(helpers::json_config(config.effective_max_body_bytes()))
            .configure(api::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
