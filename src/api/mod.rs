pub mod admin;
pub mod applications;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod helpers;
pub mod jobs;
pub mod middleware;
pub mod profile;
pub mod resumes;
pub mod validation;

use actix_web::web;

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(auth::init_routes)
        .configure(profile::init_routes)
        .configure(jobs::init_routes)
        .configure(applications::init_routes)
        .configure(resumes::init_routes)
        .configure(catalog::init_routes)
        .configure(admin::init_routes)
        .configure(health::init_routes);
}
