//! Users and bearer-token authentication.
//!
//! Provides:
//! - the `users` table accessors
//! - HS256 JWT issuing and verification
//! - `Authorization` header parsing

pub mod jwt;
pub mod users;

pub use jwt::{extract_bearer, Claims, JwtAuth, MIN_SECRET_LEN};
pub use users::User;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(
        "jwt secret must be at least {min} bytes; set auth.jwt_secret or DAYLOG_JWT_SECRET",
        min = MIN_SECRET_LEN
    )]
    WeakSecret,

    #[error("missing bearer token")]
    MissingToken,

    #[error("token expired")]
    Expired,

    #[error("invalid token")]
    InvalidToken,

    #[error("token refers to an unknown user")]
    UnknownUser,

    #[error("failed to issue token: {0}")]
    Issue(String),
}
