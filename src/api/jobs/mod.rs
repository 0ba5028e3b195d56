pub mod functions;
pub mod handlers;
pub mod structures;

pub use handlers::{
    __path_create_job, __path_delete_job, __path_get_job, __path_list_jobs, __path_match_jobs,
    __path_update_job, create_job, delete_job, get_job, init_routes, list_jobs, match_jobs,
    update_job,
};

pub use structures::{
    JobCreatedResponse, JobDetails, JobListQuery, JobListResponse, JobMatch, JobMatchQuery,
    JobMatchResponse, JobPayload, JobResponse, JobSort, SkillsInput,
};

pub use functions::{
    check_salary_range, job_fields, listing_condition, matched_skills, normalize_skills,
    rank_matches, skill_tags, JobFields,
};
