use anyhow::{bail, Context};
use chrono::Utc;
use sea_orm::{EntityTrait, PaginatorTrait, Set};

use crate::api::validation::{normalize_email, validate_email, MAX_PASSWORD_LEN};
use crate::database::{
    models::{categories, companies, users},
    UserRole, DB,
};
use crate::services::PasswordHasher;

const DEMO_COMPANIES: &[(&str, &str, &str)] = &[
    ("TechNova Inc.", "TN", "San Francisco, CA"),
    ("DesignFlow", "DF", "Remote"),
    ("DataPulse AI", "DP", "New York, NY"),
];

const DEMO_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Engineering", "engineering", "code"),
    ("Design", "design", "palette"),
    ("Data Science", "data-science", "bar-chart"),
    ("Marketing", "marketing", "megaphone"),
];

/// Rows inserted by `seed_demo_data`. Zero means the table already had data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub companies: usize,
    pub categories: usize,
}

/// Fills the companies and categories tables when they are empty.
pub async fn seed_demo_data(db: &DB) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();

    if companies::Entity::find().count(db).await? == 0 {
        let rows = DEMO_COMPANIES.iter().map(|(name, logo, location)| {
            companies::ActiveModel {
                name: Set(name.to_string()),
                logo: Set(Some(logo.to_string())),
                location: Set(Some(location.to_string())),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
        });
        companies::Entity::insert_many(rows).exec(db).await?;
        report.companies = DEMO_COMPANIES.len();
    } else {
        log::info!("Companies already present, skipping");
    }

    if categories::Entity::find().count(db).await? == 0 {
        let rows = DEMO_CATEGORIES.iter().map(|(name, slug, icon)| {
            categories::ActiveModel {
                name: Set(name.to_string()),
                slug: Set(slug.to_string()),
                icon: Set(Some(icon.to_string())),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
        });
        categories::Entity::insert_many(rows).exec(db).await?;
        report.categories = DEMO_CATEGORIES.len();
    } else {
        log::info!("Categories already present, skipping");
    }

    Ok(report)
}

/// The only way to obtain the admin role; signup refuses it.
pub async fn create_admin(
    db: &DB,
    hasher: PasswordHasher,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i32> {
    let email = normalize_email(email);
    if name.trim().is_empty() || !validate_email(&email) {
        bail!("A name and a valid email are required");
    }
    if password.len() > MAX_PASSWORD_LEN {
        bail!("Password must be at most {} bytes", MAX_PASSWORD_LEN);
    }

    let digest = hasher
        .hash_password(password)
        .context("Could not hash the admin password")?;

    let admin = users::ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email),
        password_hash: Set(digest),
        role: Set(UserRole::Admin.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = users::Entity::insert(admin)
        .exec(db)
        .await
        .context("Could not insert the admin account (email already taken?)")?;

    log::info!("Admin account id={} created", inserted.last_insert_id);
    Ok(inserted.last_insert_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseSettings, MIN_BCRYPT_COST};
    use crate::database;

    async fn memory_db() -> DB {
        let db = database::connect_with_settings(&DatabaseSettings::in_memory_sqlite())
            .await
            .unwrap();
        database::create_schema(&db).await.unwrap();
        db
    }

    #[tokio::test]
    async fn creates_admin_with_hashed_password() {
        let db = memory_db().await;
        let hasher = PasswordHasher::new(MIN_BCRYPT_COST);

        let id = create_admin(&db, hasher, " Root ", "Root@JobConnect.io", "s3cret-pw")
            .await
            .unwrap();

        let admin = users::Entity::find_by_id(id).one(&db).await.unwrap().unwrap();
        assert_eq!(admin.name, "Root");
        assert_eq!(admin.email, "root@jobconnect.io");
        assert_eq!(admin.role, "admin");
        assert_ne!(admin.password_hash, "s3cret-pw");
        assert!(hasher.verify_password("s3cret-pw", &admin.password_hash));
    }

    #[tokio::test]
    async fn refuses_duplicate_or_invalid_admin() {
        let db = memory_db().await;
        let hasher = PasswordHasher::new(MIN_BCRYPT_COST);

        create_admin(&db, hasher, "Root", "root@jobconnect.io", "pw")
            .await
            .unwrap();
        assert!(create_admin(&db, hasher, "Again", "ROOT@jobconnect.io", "pw")
            .await
            .is_err());
        assert!(create_admin(&db, hasher, "Root", "not-an-email", "pw")
            .await
            .is_err());
        assert!(create_admin(&db, hasher, "  ", "other@jobconnect.io", "pw")
            .await
            .is_err());
        assert!(create_admin(&db, hasher, "Root", "other@jobconnect.io", "")
            .await
            .is_err());

        assert_eq!(users::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn seeding_only_fills_empty_tables() {
        let db = memory_db().await;

        let first = seed_demo_data(&db).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                companies: DEMO_COMPANIES.len(),
                categories: DEMO_CATEGORIES.len(),
            }
        );

        let second = seed_demo_data(&db).await.unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(
            companies::Entity::find().count(&db).await.unwrap(),
            DEMO_COMPANIES.len() as u64
        );
        assert_eq!(
            categories::Entity::find().count(&db).await.unwrap(),
            DEMO_CATEGORIES.len() as u64
        );
    }
}
