//! Authentication, sign-up and access-check handlers.
//!
//! Login compares the submitted password with the stored value verbatim and
//! routes each role to its landing page. Sign-up is public; the access check
//! is the gate operator's lookup of a submitted user id.

use actix_web::{HttpResponse, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::week::access_check_week;
use crate::domain::{
    ApiResult, Error, LoginCredentials, LoginValidationError, Role, SignUpDetails, SignUpError,
    User, UserId,
};

use super::notice::{Notice, PageInfo};
use super::session::SessionContext;
use super::state::AppState;

/// Load the user behind the current session or fail with `401`.
///
/// # Errors
///
/// Returns [`Error::unauthorized`] when no session is present or the session
/// user no longer exists.
pub(crate) async fn current_user(
    session: &SessionContext,
    state: &AppState,
) -> ApiResult<User> {
    let id = session.require_user_id()?;
    state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::unauthorized("login required"))
}

/// Load the current user and require a specific role.
///
/// # Errors
///
/// Returns [`Error::forbidden`] when the session user holds another role.
pub(crate) async fn require_role(
    session: &SessionContext,
    state: &AppState,
    role: Role,
) -> ApiResult<User> {
    let user = current_user(session, state).await?;
    if user.role == role {
        Ok(user)
    } else {
        Err(Error::forbidden(format!(
            "this page is restricted to {role} accounts"
        )))
    }
}

/// Landing page each role is sent to after login.
const fn landing_page(role: Role) -> &'static str {
    match role {
        Role::Student => "/student/",
        Role::Manager => "/manager/",
        Role::Accommodation => "/accommodation/",
        Role::Access => "/access",
    }
}

/// Login form body for `POST /login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    /// Login email address.
    pub email: String,
    /// Submitted password.
    pub password: String,
}

/// Successful login outcome.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginOutcome {
    /// Flash-style notice text.
    pub notice: String,
    /// Role-specific landing page to continue on.
    #[schema(example = "/student/")]
    pub redirect: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

/// Login page descriptor.
#[utoipa::path(
    get,
    path = "/login",
    tags = ["auth"],
    security([]),
    responses((status = 200, description = "Login page", body = PageInfo))
)]
#[get("/login")]
pub async fn login_page() -> web::Json<PageInfo> {
    web::Json(PageInfo::new("login"))
}

/// Authenticate and establish a session.
///
/// The two failure messages are distinct on purpose; they are part of the
/// long-standing page contract.
#[utoipa::path(
    post,
    path = "/login",
    tags = ["auth"],
    security([]),
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login success", body = LoginOutcome),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown email or wrong password", body = Error)
    )
)]
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<web::Json<LoginOutcome>> {
    let credentials = LoginCredentials::try_from_parts(&form.email, &form.password)
        .map_err(map_login_validation_error)?;

    let user = state
        .users
        .find_by_email(credentials.email())
        .await?
        .ok_or_else(|| Error::unauthorized("Email does not exist."))?;

    if !credentials.matches(&user) {
        return Err(Error::unauthorized("Incorrect password, try again."));
    }

    session.persist_user(user.id)?;
    Ok(web::Json(LoginOutcome {
        notice: "Logged in successfully!".to_owned(),
        redirect: landing_page(user.role).to_owned(),
    }))
}

/// Drop the session and return to the login page.
#[utoipa::path(
    get,
    path = "/logout",
    tags = ["auth"],
    responses(
        (status = 303, description = "Session cleared, redirecting to login"),
        (status = 401, description = "No session", body = Error)
    )
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    session.purge();
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/login"))
        .finish())
}

/// Sign-up form body for `POST /accommodation/sign-up`.
///
/// Field names match the historical form inputs.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignUpForm {
    /// Submitted initials.
    pub initials: String,
    /// Submitted surname.
    pub surname: String,
    /// First email entry.
    pub email1: String,
    /// Confirmation email entry.
    pub email2: String,
    /// First password entry.
    pub password1: String,
    /// Confirmation password entry.
    pub password2: String,
    /// Requested account role.
    pub role: String,
}

fn map_sign_up_error(err: &SignUpError) -> Error {
    let (field, code) = match err {
        SignUpError::EmailTaken => ("email1", "email_taken"),
        SignUpError::InvalidInitials => ("initials", "invalid_initials"),
        SignUpError::InvalidSurname => ("surname", "invalid_surname"),
        SignUpError::EmailMismatch => ("email2", "email_mismatch"),
        SignUpError::InvalidEmail => ("email1", "invalid_email"),
        SignUpError::PasswordMismatch => ("password2", "password_mismatch"),
        SignUpError::PasswordTooShort => ("password1", "password_too_short"),
        SignUpError::InvalidRole => ("role", "invalid_role"),
    };
    let base = match err {
        SignUpError::EmailTaken => Error::conflict(err.to_string()),
        _ => Error::invalid_request(err.to_string()),
    };
    base.with_details(json!({ "field": field, "code": code }))
}

/// Sign-up page descriptor.
#[utoipa::path(
    get,
    path = "/accommodation/sign-up",
    tags = ["auth"],
    security([]),
    responses((status = 200, description = "Sign-up page", body = PageInfo))
)]
#[get("/accommodation/sign-up")]
pub async fn sign_up_page() -> web::Json<PageInfo> {
    web::Json(PageInfo::new("sign_up"))
}

/// Create a user profile.
///
/// Rules run in their fixed order and stop at the first failure; the
/// duplicate-email rule runs first because it needs a store lookup.
#[utoipa::path(
    post,
    path = "/accommodation/sign-up",
    tags = ["auth"],
    security([]),
    request_body(content = SignUpForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Profile created", body = LoginOutcome),
        (status = 400, description = "A field rule failed", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    )
)]
#[post("/accommodation/sign-up")]
pub async fn sign_up(
    state: web::Data<AppState>,
    form: web::Form<SignUpForm>,
) -> ApiResult<web::Json<LoginOutcome>> {
    if state.users.find_by_email(&form.email1).await?.is_some() {
        return Err(map_sign_up_error(&SignUpError::EmailTaken));
    }

    let submission = crate::domain::auth::SignUpSubmission {
        initials: &form.initials,
        surname: &form.surname,
        email_first: &form.email1,
        email_confirm: &form.email2,
        password_first: &form.password1,
        password_confirm: &form.password2,
        role: &form.role,
    };
    let details =
        SignUpDetails::validate(&submission).map_err(|err| map_sign_up_error(&err))?;

    state.users.insert(details.into_new_user()).await?;

    Ok(web::Json(LoginOutcome {
        notice: "User profile created!".to_owned(),
        redirect: "/login".to_owned(),
    }))
}

/// Access-check form body for `POST /access`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AccessForm {
    /// User id read from the submitted card or typed at the gate.
    pub user_id: i32,
}

/// Outcome of an access check.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessDecision {
    /// Whether access is granted.
    pub granted: bool,
    /// Flash-style notice text.
    pub notice: String,
}

/// Access-check page descriptor.
#[utoipa::path(
    get,
    path = "/access",
    tags = ["access"],
    responses(
        (status = 200, description = "Access page", body = PageInfo),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not an access account", body = Error)
    )
)]
#[get("/access")]
pub async fn access_page(
    state: web::Data<AppState>,
    session: SessionContext,
) -> ApiResult<web::Json<PageInfo>> {
    require_role(&session, &state, Role::Access).await?;
    Ok(web::Json(PageInfo::new("access")))
}

/// Check whether a user holds a booking and grant or deny access.
///
/// The lookup week sits one week beyond the bookable week.
#[utoipa::path(
    post,
    path = "/access",
    tags = ["access"],
    request_body(content = AccessForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Decision made", body = AccessDecision),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not an access account", body = Error)
    )
)]
#[post("/access")]
pub async fn access_check(
    state: web::Data<AppState>,
    session: SessionContext,
    form: web::Form<AccessForm>,
) -> ApiResult<web::Json<AccessDecision>> {
    require_role(&session, &state, Role::Access).await?;

    let week = access_check_week(state.clock.today());
    let granted = state
        .bookings
        .exists_for_user_week(UserId::new(form.user_id), week)
        .await?;

    let notice = if granted {
        "Booking confirmed, access granted"
    } else {
        "Booking not found, contact management for enquiries, Access Denied"
    };
    Ok(web::Json(AccessDecision {
        granted,
        notice: notice.to_owned(),
    }))
}
