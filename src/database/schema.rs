use sea_orm::{
    sea_query::{Index, TableCreateStatement},
    ConnectionTrait, DbErr, Schema,
};

use super::{
    models::{applications, categories, companies, jobs, resumes, users},
    DB,
};

/// CREATE TABLE statements in dependency order.
pub fn table_statements(schema: &Schema) -> Vec<TableCreateStatement> {
    let mut applications_table = schema.create_table_from_entity(applications::Entity);
    applications_table.index(
        Index::create()
            .name("uq_applications_job_user")
            .col(applications::Column::JobId)
            .col(applications::Column::UserId)
            .unique(),
    );

    vec![
        schema.create_table_from_entity(users::Entity),
        schema.create_table_from_entity(companies::Entity),
        schema.create_table_from_entity(categories::Entity),
        schema.create_table_from_entity(jobs::Entity),
        applications_table,
        schema.create_table_from_entity(resumes::Entity),
    ]
}

/// Creates every table that does not exist yet.
pub async fn create_schema(db: &DB) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    for mut statement in table_statements(&schema) {
        statement.if_not_exists();
        db.execute(backend.build(&statement)).await?;
    }

    log::info!("Schema is up to date");
    Ok(())
}

/// Drops every table, children first.
pub async fn drop_schema(db: &DB) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let tables = [
        "resumes",
        "applications",
        "jobs",
        "categories",
        "companies",
        "users",
    ];

    for table in tables {
        let statement = sea_orm::sea_query::Table::drop()
            .table(sea_orm::sea_query::Alias::new(table))
            .if_exists()
            .to_owned();
        db.execute(backend.build(&statement)).await?;
        log::info!("Dropped table {}", table);
    }

    Ok(())
}
