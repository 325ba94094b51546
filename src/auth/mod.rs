//! Reference credentials provider
//!
//! The actions only depend on [`crate::core::auth::Authenticator`]; this
//! module supplies the email/password implementation used by the server.

pub mod credentials;
pub mod password;

pub use credentials::{Credentials, CredentialsAuthenticator, DEFAULT_SIGN_IN_REDIRECT};
pub use password::{hash_password, verify_password};
