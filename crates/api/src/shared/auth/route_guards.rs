use super::policy::Policy;
use crate::error::BookliError;
use actix_web::HttpRequest;
use bookli_infra::BookliContext;
use bookli_domain::ID;

/// Identity of the caller is established by the upstream auth
/// collaborator, which places the authenticated user id in this header.
pub const USER_ID_HEADER: &str = "bookli-user-id";
/// Secret shared with operational tooling. Callers presenting it act
/// with an elevated `Policy`.
pub const ADMIN_SECRET_HEADER: &str = "bookli-admin-secret";

fn header_value(http_req: &HttpRequest, name: &str) -> Option<String> {
    http_req
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

fn is_admin(http_req: &HttpRequest, ctx: &BookliContext) -> bool {
    match header_value(http_req, ADMIN_SECRET_HEADER) {
        Some(secret) => secret == ctx.config.admin_api_secret,
        None => false,
    }
}

/// Resolves the authenticated requester and their policy.
pub fn protect_route(
    http_req: &HttpRequest,
    ctx: &BookliContext,
) -> Result<(ID, Policy), BookliError> {
    let requester_id = match header_value(http_req, USER_ID_HEADER) {
        Some(value) => value.parse::<ID>().map_err(|_| {
            BookliError::Unauthorized(format!(
                "The provided {} header is not a valid id",
                USER_ID_HEADER
            ))
        })?,
        None => {
            return Err(BookliError::Unauthorized(format!(
                "Missing {} header",
                USER_ID_HEADER
            )))
        }
    };

    let policy = if is_admin(http_req, ctx) {
        Policy::elevated()
    } else {
        Policy::default()
    };

    Ok((requester_id, policy))
}

/// Guards routes that only operational tooling may call.
pub fn protect_admin_route(
    http_req: &HttpRequest,
    ctx: &BookliContext,
) -> Result<(), BookliError> {
    if is_admin(http_req, ctx) {
        Ok(())
    } else {
        Err(BookliError::Unauthorized(format!(
            "Missing or invalid {} header",
            ADMIN_SECRET_HEADER
        )))
    }
}
