use std::collections::HashMap;

use sea_orm::{
    sea_query::{Expr, Func, IntoColumnRef, LikeExpr, Query, SimpleExpr},
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::{
    api::validation::{ensure_max_len, required_text},
    database::models::{categories, companies, jobs},
    errors::AppError,
};

use super::structures::{JobDetails, JobListQuery, JobPayload, SkillsInput};

const MAX_TITLE_LEN: usize = 200;

/// Validated, trimmed column values shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFields {
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub category_id: Option<i32>,
    pub company_id: Option<i32>,
    pub skills: Option<String>,
}

pub fn job_fields(payload: &JobPayload) -> Result<JobFields, AppError> {
    let title = required_text(payload.title.as_deref())
        .ok_or_else(|| AppError::MissingFields("Title is required".to_string()))?;
    if !ensure_max_len(&title, MAX_TITLE_LEN) {
        return Err(AppError::InvalidInput(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    check_salary_range(payload.salary_min, payload.salary_max)?;

    Ok(JobFields {
        title,
        description: required_text(payload.description.as_deref()),
        requirements: required_text(payload.requirements.as_deref()),
        salary_min: payload.salary_min,
        salary_max: payload.salary_max,
        location: required_text(payload.location.as_deref()),
        job_type: required_text(payload.job_type.as_deref()),
        category_id: payload.category_id,
        company_id: payload.company_id,
        skills: normalize_skills(payload.skills.as_ref()),
    })
}

pub fn check_salary_range(min: Option<i32>, max: Option<i32>) -> Result<(), AppError> {
    if min.is_some_and(|v| v < 0) || max.is_some_and(|v| v < 0) {
        return Err(AppError::InvalidInput(
            "Salary must not be negative".to_string(),
        ));
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(AppError::InvalidInput(
                "salary_min must not exceed salary_max".to_string(),
            ));
        }
    }
    Ok(())
}

/// Trimmed, de-duplicated tags joined with ", ". `None` when nothing is left.
pub fn normalize_skills(skills: Option<&SkillsInput>) -> Option<String> {
    let tags = match skills? {
        SkillsInput::List(list) => dedup_tags(list.iter().map(String::as_str)),
        SkillsInput::Text(text) => skill_tags(text),
    };

    if tags.is_empty() {
        None
    } else {
        Some(tags.join(", "))
    }
}

/// Splits a comma separated skill string into trimmed, de-duplicated tags.
pub fn skill_tags(text: &str) -> Vec<String> {
    dedup_tags(text.split(','))
}

fn dedup_tags<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|seen| seen.eq_ignore_ascii_case(tag)) {
            tags.push(tag.to_string());
        }
    }
    tags
}

const LIKE_ESCAPE: char = '!';

/// `%term%`, lowercased, with the term's own wildcards matched literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn lower_contains<C: IntoColumnRef>(column: C, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(contains_pattern(term)).escape(LIKE_ESCAPE))
}

pub fn listing_condition(query: &JobListQuery) -> Condition {
    let mut condition = Condition::all();
    if !query.include_inactive {
        condition = condition.add(jobs::Column::IsActive.eq(true));
    }
    if let Some(category_id) = query.category_id {
        condition = condition.add(jobs::Column::CategoryId.eq(category_id));
    }
    if let Some(slug) = required_text(query.category.as_deref()) {
        condition = condition.add(
            jobs::Column::CategoryId.in_subquery(
                Query::select()
                    .column(categories::Column::Id)
                    .from(categories::Entity)
                    .and_where(categories::Column::Slug.eq(slug))
                    .to_owned(),
            ),
        );
    }
    if let Some(company_id) = query.company_id {
        condition = condition.add(jobs::Column::CompanyId.eq(company_id));
    }
    if let Some(posted_by) = query.posted_by {
        condition = condition.add(jobs::Column::PostedBy.eq(posted_by));
    }
    if let Some(job_type) = required_text(query.job_type.as_deref()) {
        condition = condition.add(jobs::Column::JobType.eq(job_type));
    }
    if let Some(location) = required_text(query.location.as_deref()) {
        condition = condition.add(lower_contains(
            (jobs::Entity, jobs::Column::Location),
            &location,
        ));
    }
    if let Some(q) = required_text(query.q.as_deref()) {
        condition = condition.add(search_condition(&q));
    }
    condition
}

/// Title, skills, location or the company's name contains `term`.
fn search_condition(term: &str) -> Condition {
    let companies_named = Query::select()
        .column(companies::Column::Id)
        .from(companies::Entity)
        .and_where(lower_contains(
            (companies::Entity, companies::Column::Name),
            term,
        ))
        .to_owned();

    Condition::any()
        .add(lower_contains((jobs::Entity, jobs::Column::Title), term))
        .add(lower_contains((jobs::Entity, jobs::Column::Skills), term))
        .add(lower_contains((jobs::Entity, jobs::Column::Location), term))
        .add(jobs::Column::CompanyId.in_subquery(companies_named))
}

/// Jobs whose skills mention any of `wanted`. A coarse filter; the exact
/// tag comparison is `matched_skills`.
pub fn skills_condition(wanted: &[String]) -> Condition {
    wanted.iter().fold(Condition::any(), |condition, skill| {
        condition.add(lower_contains((jobs::Entity, jobs::Column::Skills), skill))
    })
}

/// Tags of `job_skills` equal (ignoring ASCII case) to one of `wanted`.
pub fn matched_skills(wanted: &[String], job_skills: Option<&str>) -> Vec<String> {
    job_skills
        .map(skill_tags)
        .unwrap_or_default()
        .into_iter()
        .filter(|tag| wanted.iter().any(|w| w.eq_ignore_ascii_case(tag)))
        .collect()
}

/// Keeps jobs with at least one matched skill, most matches first. The sort
/// is stable, so equal scores keep the incoming order.
pub fn rank_matches(
    rows: Vec<jobs::Model>,
    wanted: &[String],
    limit: usize,
) -> Vec<(jobs::Model, Vec<String>)> {
    let mut ranked: Vec<(jobs::Model, Vec<String>)> = rows
        .into_iter()
        .map(|job| {
            let matched = matched_skills(wanted, job.skills.as_deref());
            (job, matched)
        })
        .filter(|(_, matched)| !matched.is_empty())
        .collect();
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    ranked.truncate(limit);
    ranked
}

/// Embeds company and category rows, two lookups for the whole batch.
pub async fn with_company_and_category(
    db: &DatabaseConnection,
    rows: Vec<jobs::Model>,
) -> Result<Vec<JobDetails>, DbErr> {
    let mut company_ids: Vec<i32> = rows.iter().filter_map(|job| job.company_id).collect();
    company_ids.sort_unstable();
    company_ids.dedup();
    let mut category_ids: Vec<i32> = rows.iter().filter_map(|job| job.category_id).collect();
    category_ids.sort_unstable();
    category_ids.dedup();

    let companies: HashMap<i32, companies::Model> = if company_ids.is_empty() {
        HashMap::new()
    } else {
        companies::Entity::find()
            .filter(companies::Column::Id.is_in(company_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|company| (company.id, company))
            .collect()
    };
    let categories: HashMap<i32, categories::Model> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|category| (category.id, category))
            .collect()
    };

    Ok(rows
        .into_iter()
        .map(|job| JobDetails {
            company: job.company_id.and_then(|id| companies.get(&id).cloned()),
            category: job.category_id.and_then(|id| categories.get(&id).cloned()),
            job,
        })
        .collect())
}
