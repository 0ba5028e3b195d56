pub mod admin;
pub mod credentials;

pub use credentials::{CredentialError, PasswordHasher};
