//! Accommodation handlers: the staff dashboard and account deletion.

use actix_web::{get, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{ApiResult, Error, Role, UserId};

use super::auth::require_role;
use super::notice::{Notice, PageInfo};
use super::session::SessionContext;
use super::state::AppState;

/// Accommodation dashboard descriptor.
#[utoipa::path(
    get,
    path = "/accommodation/",
    tags = ["accommodation"],
    operation_id = "accommodationDashboard",
    responses(
        (status = 200, description = "Accommodation dashboard", body = PageInfo),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not an accommodation account", body = Error)
    )
)]
#[get("/accommodation/")]
pub async fn dashboard(
    state: web::Data<AppState>,
    session: SessionContext,
) -> ApiResult<web::Json<PageInfo>> {
    require_role(&session, &state, Role::Accommodation).await?;
    Ok(web::Json(PageInfo::new("accommodation")))
}

/// Deletion form body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteForm {
    /// Id of the account to remove.
    pub user_id: i32,
}

/// Deletion page descriptor.
#[utoipa::path(
    get,
    path = "/accommodation/delete/",
    tags = ["accommodation"],
    responses(
        (status = 200, description = "Deletion page", body = PageInfo),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not an accommodation account", body = Error)
    )
)]
#[get("/accommodation/delete/")]
pub async fn delete_page(
    state: web::Data<AppState>,
    session: SessionContext,
) -> ApiResult<web::Json<PageInfo>> {
    require_role(&session, &state, Role::Accommodation).await?;
    Ok(web::Json(PageInfo::new("delete")))
}

/// Delete a user account by id.
///
/// Dependent booking/card/reminder rows are left in place; the schema holds
/// no foreign keys, so they simply dangle.
#[utoipa::path(
    post,
    path = "/accommodation/delete/",
    tags = ["accommodation"],
    request_body(content = DeleteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Account removed", body = Notice),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not an accommodation account", body = Error),
        (status = 404, description = "No such account", body = Error)
    )
)]
#[post("/accommodation/delete/")]
pub async fn delete_user(
    state: web::Data<AppState>,
    session: SessionContext,
    form: web::Form<DeleteForm>,
) -> ApiResult<web::Json<Notice>> {
    require_role(&session, &state, Role::Accommodation).await?;

    let removed = state.users.delete(UserId::new(form.user_id)).await?;
    if !removed {
        return Err(Error::not_found("User not found"));
    }

    Ok(web::Json(Notice::new("Deletion successful")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    use crate::domain::ports::BookingStore;
    use crate::domain::{BookingStatus, MealPlan, NewBooking};
    use crate::test_support::{seed_user, test_session_middleware, test_state, TestStores};

    async fn accommodation_app_and_stores() -> (
        impl actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
        TestStores,
    ) {
        let (state, stores) = test_state();
        seed_user(&stores, "acc@example.com", "password123", Role::Accommodation).await;
        seed_user(&stores, "st@example.com", "password123", Role::Student).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .service(crate::inbound::http::auth::login)
                .service(dashboard)
                .service(delete_page)
                .service(delete_user),
        )
        .await;
        (app, stores)
    }

    async fn login_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        email: &str,
    ) -> actix_web::cookie::Cookie<'static> {
        let response = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/login")
                .set_form([("email", email), ("password", "password123")])
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn deletion_leaves_the_users_bookings_behind() {
        let (app, stores) = accommodation_app_and_stores().await;
        stores
            .bookings
            .insert(NewBooking {
                user_id: crate::domain::UserId::new(2),
                week: 30,
                meal_record: MealPlan::empty().encode(),
                status: BookingStatus::Confirmed,
            })
            .await
            .expect("seed booking");

        let cookie = login_cookie(&app, "acc@example.com").await;
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/accommodation/delete/")
                .cookie(cookie)
                .set_form([("user_id", "2")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = test::read_body_json(response).await;
        assert_eq!(
            value.get("notice").and_then(Value::as_str),
            Some("Deletion successful")
        );

        // The account is gone; its booking row dangles.
        assert!(!stores.users.users().iter().any(|user| user.id.get() == 2));
        assert_eq!(stores.bookings.bookings().len(), 1);
        assert_eq!(stores.bookings.bookings()[0].user_id.get(), 2);
    }

    #[actix_web::test]
    async fn deleting_an_unknown_account_is_not_found() {
        let (app, _stores) = accommodation_app_and_stores().await;
        let cookie = login_cookie(&app, "acc@example.com").await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/accommodation/delete/")
                .cookie(cookie)
                .set_form([("user_id", "99")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let value: Value = test::read_body_json(response).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("User not found")
        );
    }

    #[actix_web::test]
    async fn deletion_requires_the_accommodation_role() {
        let (app, _stores) = accommodation_app_and_stores().await;
        let cookie = login_cookie(&app, "st@example.com").await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/accommodation/delete/")
                .cookie(cookie)
                .set_form([("user_id", "1")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
