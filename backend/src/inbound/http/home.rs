//! Home page handler.

use actix_web::web;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ApiResult, Role};

use super::auth::current_user;
use super::session::SessionContext;
use super::state::AppState;

/// Signed-in user summary shown on the home page.
///
/// Deliberately excludes email and credential fields.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummary {
    /// Store identifier.
    pub id: i32,
    /// Short initials shown alongside the surname.
    pub initials: String,
    /// Family name.
    pub surname: String,
    /// Account role.
    pub role: Role,
}

/// Home page: who is signed in.
///
/// Registered for both GET and POST; the page has always accepted either.
#[utoipa::path(
    get,
    path = "/",
    tags = ["home"],
    responses(
        (status = 200, description = "Signed-in user summary", body = UserSummary),
        (status = 401, description = "No session", body = crate::domain::Error)
    )
)]
pub async fn home(
    state: web::Data<AppState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserSummary>> {
    let user = current_user(&session, &state).await?;
    Ok(web::Json(UserSummary {
        id: user.id.get(),
        initials: user.initials,
        surname: user.surname,
        role: user.role,
    }))
}
