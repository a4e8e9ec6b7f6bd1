//! Account authentication: password hashing, JWT sessions carried in the
//! `token` cookie, and Redis-backed revocation on logout and password reset.

pub mod extract;
pub mod handlers;
pub mod password;
pub mod queries;
pub mod session;
pub mod token;

pub use extract::{AuthAdmin, AuthHr};
