use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::database::models::{categories, companies, jobs};

/// Skills arrive either as a list of tags or as one comma separated string.
#[derive(Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Text(String),
}

/// Body of both job creation and job update. `posted_by` is only read on
/// creation and `is_active` only on update.
#[derive(Deserialize, ToSchema, Clone, Default)]
pub struct JobPayload {
    pub title: Option<String>,
    pub posted_by: Option<i32>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub category_id: Option<i32>,
    pub company_id: Option<i32>,
    pub skills: Option<SkillsInput>,
    pub is_active: Option<bool>,
}

/// Listing order. `salary` puts the best paid (`salary_max`) first.
#[derive(Deserialize, ToSchema, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobSort {
    #[default]
    Recent,
    Salary,
}

#[derive(Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct JobListQuery {
    pub category_id: Option<i32>,
    /// Category slug, e.g. `data-science`.
    pub category: Option<String>,
    pub company_id: Option<i32>,
    pub posted_by: Option<i32>,
    /// Exact job type, e.g. `Full Time`.
    pub job_type: Option<String>,
    /// Case-insensitive match on the location.
    pub location: Option<String>,
    /// Case-insensitive match on title, skills, location or company name.
    pub q: Option<String>,
    #[serde(default)]
    #[param(inline)]
    pub sort: JobSort,
    /// Recruiter view: also return jobs whose active flag is cleared.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Skill based suggestions. Skills come from the query or, when only
/// `user_id` is given, from that user's latest resume.
#[derive(Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct JobMatchQuery {
    /// Comma separated skills.
    pub skills: Option<String>,
    pub user_id: Option<i32>,
    pub limit: Option<u64>,
}

/// A job with its company and category embedded.
#[derive(Serialize, ToSchema, Clone)]
pub struct JobDetails {
    #[serde(flatten)]
    pub job: jobs::Model,
    pub company: Option<companies::Model>,
    pub category: Option<categories::Model>,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct JobMatch {
    #[serde(flatten)]
    pub details: JobDetails,
    pub matched_skills: Vec<String>,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct JobMatchResponse {
    /// The skills the jobs were matched against.
    pub skills: Vec<String>,
    pub jobs: Vec<JobMatch>,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct JobListResponse {
    pub jobs: Vec<JobDetails>,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct JobResponse {
    pub job: JobDetails,
}

#[derive(Serialize, ToSchema, Clone)]
pub struct JobCreatedResponse {
    pub message: String,
    pub job_id: i32,
}
