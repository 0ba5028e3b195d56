pub mod connector;
pub mod models;
pub mod schema;
pub mod types;

// Re-export the primary DB types and connect helpers for convenient access as `database::connect_with_settings()`
pub use connector::{DB, connect_with_settings, ping};
pub use schema::{create_schema, drop_schema};
pub use types::{ApplicationStatus, UserRole};
