use crate::{error::ApiError, model::role::Role};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

pub const USER_HEADER: &str = "X-User";
pub const ROLE_HEADER: &str = "X-Role";

/// Caller identity. Stub context: trusts the `X-User` / `X-Role` headers set
/// by the front-end shell.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
}

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let role = match header(req, ROLE_HEADER).map(str::parse::<Role>) {
            Some(Ok(role)) => role,
            _ => return ready(Err(ApiError::Unauthorized)),
        };

        ready(Ok(AuthUser {
            username: header(req, USER_HEADER).unwrap_or("anonymous").to_string(),
            role,
        }))
    }
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Admin only".into()))
        }
    }

    pub fn require_hr_or_admin(&self) -> Result<(), ApiError> {
        if matches!(self.role, Role::Admin | Role::Hr) {
            Ok(())
        } else {
            Err(ApiError::Forbidden("HR/Admin only".into()))
        }
    }
}
