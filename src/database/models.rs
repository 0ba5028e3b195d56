use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Users ---
// The digest never leaves the crate: handlers answer with `api::helpers::UserView`.
pub mod users {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        #[sea_orm(unique)]
        pub email: String,
        #[sea_orm(column_name = "password")]
        pub password_hash: String,
        pub role: String,
        pub phone: Option<String>,
        pub location: Option<String>,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::jobs::Entity")]
        Job,
        #[sea_orm(has_many = "super::applications::Entity")]
        Application,
        #[sea_orm(has_many = "super::resumes::Entity")]
        Resume,
    }

    impl Related<super::jobs::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Job.def()
        }
    }

    impl Related<super::applications::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Application.def()
        }
    }

    impl Related<super::resumes::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Resume.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

// --- Companies ---
pub mod companies {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
    #[schema(as = Company)]
    #[sea_orm(table_name = "companies")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub logo: Option<String>,
        pub website: Option<String>,
        #[sea_orm(column_type = "Text", nullable)]
        pub description: Option<String>,
        pub location: Option<String>,
        #[schema(value_type = String, format = DateTime)]
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::jobs::Entity")]
        Job,
    }

    impl Related<super::jobs::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Job.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

// --- Categories ---
pub mod categories {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
    #[schema(as = Category)]
    #[sea_orm(table_name = "categories")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        #[sea_orm(unique)]
        pub slug: String,
        pub icon: Option<String>,
        #[schema(value_type = String, format = DateTime)]
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::jobs::Entity")]
        Job,
    }

    impl Related<super::jobs::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Job.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

// --- Jobs ---
pub mod jobs {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
    #[schema(as = Job)]
    #[sea_orm(table_name = "jobs")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub title: String,
        #[sea_orm(column_type = "Text", nullable)]
        pub description: Option<String>,
        #[sea_orm(column_type = "Text", nullable)]
        pub requirements: Option<String>,
        pub salary_min: Option<i32>,
        pub salary_max: Option<i32>,
        pub location: Option<String>,
        pub job_type: Option<String>,
        pub category_id: Option<i32>,
        pub company_id: Option<i32>,
        pub posted_by: i32,
        /// Comma separated skill tags.
        #[sea_orm(column_type = "Text", nullable)]
        pub skills: Option<String>,
        pub is_active: bool,
        #[schema(value_type = String, format = DateTime)]
        pub created_at: DateTimeUtc,
        #[schema(value_type = Option<String>, format = DateTime)]
        pub updated_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::users::Entity",
            from = "Column::PostedBy",
            to = "super::users::Column::Id",
            on_delete = "Cascade"
        )]
        PostedBy,
        #[sea_orm(
            belongs_to = "super::companies::Entity",
            from = "Column::CompanyId",
            to = "super::companies::Column::Id",
            on_delete = "SetNull"
        )]
        Company,
        #[sea_orm(
            belongs_to = "super::categories::Entity",
            from = "Column::CategoryId",
            to = "super::categories::Column::Id",
            on_delete = "SetNull"
        )]
        Category,
        #[sea_orm(has_many = "super::applications::Entity")]
        Application,
    }

    impl Related<super::users::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::PostedBy.def()
        }
    }

    impl Related<super::companies::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Company.def()
        }
    }

    impl Related<super::categories::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Category.def()
        }
    }

    impl Related<super::applications::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Application.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

// --- Applications ---
// (job_id, user_id) is unique; see `database::schema`.
pub mod applications {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
    #[schema(as = Application)]
    #[sea_orm(table_name = "applications")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub job_id: i32,
        pub user_id: i32,
        pub status: String,
        #[sea_orm(column_type = "Text", nullable)]
        pub cover_letter: Option<String>,
        #[schema(value_type = String, format = DateTime)]
        pub created_at: DateTimeUtc,
        #[schema(value_type = Option<String>, format = DateTime)]
        pub updated_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::jobs::Entity",
            from = "Column::JobId",
            to = "super::jobs::Column::Id",
            on_delete = "Cascade"
        )]
        Job,
        #[sea_orm(
            belongs_to = "super::users::Entity",
            from = "Column::UserId",
            to = "super::users::Column::Id",
            on_delete = "Cascade"
        )]
        User,
    }

    impl Related<super::jobs::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Job.def()
        }
    }

    impl Related<super::users::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

// --- Resumes ---
// Parsed fields are whatever the client extracted; nothing is parsed here.
pub mod resumes {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
    #[schema(as = Resume)]
    #[sea_orm(table_name = "resumes")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub user_id: i32,
        pub file_name: String,
        pub file_url: Option<String>,
        /// Comma separated skill tags.
        #[sea_orm(column_type = "Text", nullable)]
        pub parsed_skills: Option<String>,
        #[sea_orm(column_type = "Text", nullable)]
        pub parsed_education: Option<String>,
        #[sea_orm(column_type = "Text", nullable)]
        pub parsed_experience: Option<String>,
        #[sea_orm(column_type = "Text", nullable)]
        pub raw_text: Option<String>,
        #[schema(value_type = String, format = DateTime)]
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::users::Entity",
            from = "Column::UserId",
            to = "super::users::Column::Id",
            on_delete = "Cascade"
        )]
        User,
    }

    impl Related<super::users::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
