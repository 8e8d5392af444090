//! Student booking handlers: book, review and modify a week's meals.

use actix_web::{get, post, route, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::week::bookable_week;
use crate::domain::{
    ApiResult, BookingStatus, Error, MealPlan, MenuContent, NewBooking, Role, ScheduleEntry,
};

use super::auth::require_role;
use super::notice::Notice;
use super::session::SessionContext;
use super::state::AppState;

/// Meal selection form body.
///
/// One field per slot, named after the historical checkbox inputs; a slot is
/// selected when its field arrives with the value `1`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MealSelectionForm {
    /// Monday breakfast flag.
    #[serde(default)]
    pub breakfast_monday: Option<String>,
    /// Tuesday breakfast flag.
    #[serde(default)]
    pub breakfast_tuesday: Option<String>,
    /// Wednesday breakfast flag.
    #[serde(default)]
    pub breakfast_wednesday: Option<String>,
    /// Thursday breakfast flag.
    #[serde(default)]
    pub breakfast_thursday: Option<String>,
    /// Friday breakfast flag.
    #[serde(default)]
    pub breakfast_friday: Option<String>,
    /// Monday lunch flag.
    #[serde(default)]
    pub lunch_monday: Option<String>,
    /// Tuesday lunch flag.
    #[serde(default)]
    pub lunch_tuesday: Option<String>,
    /// Wednesday lunch flag.
    #[serde(default)]
    pub lunch_wednesday: Option<String>,
    /// Thursday lunch flag.
    #[serde(default)]
    pub lunch_thursday: Option<String>,
    /// Friday lunch flag.
    #[serde(default)]
    pub lunch_friday: Option<String>,
    /// Saturday brunch flag.
    #[serde(default)]
    pub brunch_saturday: Option<String>,
    /// Sunday brunch flag.
    #[serde(default)]
    pub brunch_sunday: Option<String>,
    /// Monday supper flag.
    #[serde(default)]
    pub supper_monday: Option<String>,
    /// Tuesday supper flag.
    #[serde(default)]
    pub supper_tuesday: Option<String>,
    /// Wednesday supper flag.
    #[serde(default)]
    pub supper_wednesday: Option<String>,
    /// Thursday supper flag.
    #[serde(default)]
    pub supper_thursday: Option<String>,
    /// Friday supper flag.
    #[serde(default)]
    pub supper_friday: Option<String>,
    /// Saturday supper flag.
    #[serde(default)]
    pub supper_saturday: Option<String>,
    /// Sunday supper flag.
    #[serde(default)]
    pub supper_sunday: Option<String>,
}

fn flag(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("1"))
}

impl MealSelectionForm {
    /// Assemble the submitted flags into a meal plan.
    pub fn to_plan(&self) -> MealPlan {
        MealPlan::new(
            [
                flag(&self.breakfast_monday),
                flag(&self.breakfast_tuesday),
                flag(&self.breakfast_wednesday),
                flag(&self.breakfast_thursday),
                flag(&self.breakfast_friday),
            ],
            [
                flag(&self.lunch_monday),
                flag(&self.lunch_tuesday),
                flag(&self.lunch_wednesday),
                flag(&self.lunch_thursday),
                flag(&self.lunch_friday),
            ],
            [flag(&self.brunch_saturday), flag(&self.brunch_sunday)],
            [
                flag(&self.supper_monday),
                flag(&self.supper_tuesday),
                flag(&self.supper_wednesday),
                flag(&self.supper_thursday),
                flag(&self.supper_friday),
                flag(&self.supper_saturday),
                flag(&self.supper_sunday),
            ],
        )
    }
}

/// Booking page state for the bookable week.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingPage {
    /// Week the booking form writes to.
    pub week: i32,
    /// Whether a menu has been published for that week.
    pub menu_published: bool,
    /// Published menu content, when present and readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<MenuContent>,
}

async fn booking_page_state(state: &AppState) -> ApiResult<BookingPage> {
    let week = bookable_week(state.clock.today());
    let menu_row = state.menus.find_by_week(week).await?;
    let menu = match &menu_row {
        Some(row) => Some(MenuContent::decode(&row.menu_content).map_err(|err| {
            Error::internal(format!("stored menu record unreadable: {err}"))
        })?),
        None => None,
    };
    Ok(BookingPage {
        week,
        menu_published: menu_row.is_some(),
        menu,
    })
}

/// Booking page: the bookable week and its menu, if published.
#[utoipa::path(
    get,
    path = "/student/",
    tags = ["student"],
    responses(
        (status = 200, description = "Booking page state", body = BookingPage),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not a student account", body = Error)
    )
)]
#[get("/student/")]
pub async fn booking_page(
    state: web::Data<AppState>,
    session: SessionContext,
) -> ApiResult<web::Json<BookingPage>> {
    require_role(&session, &state, Role::Student).await?;
    Ok(web::Json(booking_page_state(&state).await?))
}

/// Book the week's meals.
///
/// A published menu for the bookable week blocks the submission with the
/// long-standing "already booked" notice; the menu row doubles as the week's
/// booking guard.
#[utoipa::path(
    post,
    path = "/student/",
    tags = ["student"],
    request_body(content = MealSelectionForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Booking stored", body = Notice),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not a student account", body = Error),
        (status = 409, description = "Week already closed for booking", body = Error)
    )
)]
#[post("/student/")]
pub async fn book(
    state: web::Data<AppState>,
    session: SessionContext,
    form: web::Form<MealSelectionForm>,
) -> ApiResult<web::Json<Notice>> {
    let user = require_role(&session, &state, Role::Student).await?;
    let week = bookable_week(state.clock.today());

    if state.menus.find_by_week(week).await?.is_some() {
        return Err(Error::conflict("You have already booked for this week!"));
    }

    let plan = form.to_plan();
    state
        .bookings
        .insert(NewBooking {
            user_id: user.id,
            week,
            meal_record: plan.encode(),
            status: BookingStatus::Confirmed,
        })
        .await?;

    Ok(web::Json(Notice::new("Your booking was successful")))
}

/// A decoded booking for display.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingView {
    /// Week the booking applies to.
    pub week: i32,
    /// Lifecycle state of the booking.
    pub status: BookingStatus,
    /// Day/status pairs in stored slot order.
    pub schedule: Vec<ScheduleEntry>,
}

/// Review the most recently created booking.
#[utoipa::path(
    get,
    path = "/student/view_bookings/",
    tags = ["student"],
    responses(
        (status = 200, description = "Latest booking", body = BookingView),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not a student account", body = Error),
        (status = 404, description = "No bookings recorded", body = Error)
    )
)]
#[route("/student/view_bookings/", method = "GET", method = "POST")]
pub async fn view_bookings(
    state: web::Data<AppState>,
    session: SessionContext,
) -> ApiResult<web::Json<BookingView>> {
    let user = require_role(&session, &state, Role::Student).await?;

    let mine = state.bookings.for_user(user.id).await?;
    let latest = mine
        .last()
        .ok_or_else(|| Error::not_found("No bookings found"))?;

    let plan = MealPlan::decode(&latest.meal_record)
        .map_err(|err| Error::internal(format!("stored booking record unreadable: {err}")))?;

    Ok(web::Json(BookingView {
        week: latest.week,
        status: latest.status,
        schedule: plan.schedule(),
    }))
}

/// Modify page: same state as the booking page.
#[utoipa::path(
    get,
    path = "/student/modify_bookings/",
    tags = ["student"],
    responses(
        (status = 200, description = "Modify page state", body = BookingPage),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not a student account", body = Error)
    )
)]
#[get("/student/modify_bookings/")]
pub async fn modify_page(
    state: web::Data<AppState>,
    session: SessionContext,
) -> ApiResult<web::Json<BookingPage>> {
    require_role(&session, &state, Role::Student).await?;
    Ok(web::Json(booking_page_state(&state).await?))
}

/// Replace the current user's booking for the bookable week.
///
/// The old row is deleted and a fresh one inserted; there is no update in
/// place. Modifying with no existing booking simply creates one.
#[utoipa::path(
    post,
    path = "/student/modify_bookings/",
    tags = ["student"],
    request_body(content = MealSelectionForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Booking replaced", body = Notice),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not a student account", body = Error)
    )
)]
#[post("/student/modify_bookings/")]
pub async fn modify(
    state: web::Data<AppState>,
    session: SessionContext,
    form: web::Form<MealSelectionForm>,
) -> ApiResult<web::Json<Notice>> {
    let user = require_role(&session, &state, Role::Student).await?;
    let week = bookable_week(state.clock.today());

    let removed = state.bookings.delete_for_user_week(user.id, week).await?;
    if removed == 0 {
        debug!(user = %user.id, week, "no existing booking to replace");
    }

    let plan = form.to_plan();
    state
        .bookings
        .insert(NewBooking {
            user_id: user.id,
            week,
            meal_record: plan.encode(),
            status: BookingStatus::Confirmed,
        })
        .await?;

    Ok(web::Json(Notice::new("Your booking was successfully Updated")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    use crate::domain::ports::MenuStore;
    use crate::domain::{NewWeeklyMenu, SlotStatus, UserId};
    use crate::test_support::{seed_user, test_session_middleware, test_state, TestStores};

    async fn student_app_and_stores() -> (
        impl actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
        TestStores,
    ) {
        let (state, stores) = test_state();
        seed_user(&stores, "st@example.com", "password123", Role::Student).await;
        seed_user(&stores, "st2@example.com", "password123", Role::Student).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .service(crate::inbound::http::auth::login)
                .service(booking_page)
                .service(book)
                .service(view_bookings)
                .service(modify_page)
                .service(modify),
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

    const SELECTION: [(&str, &str); 4] = [
        ("breakfast_monday", "1"),
        ("breakfast_wednesday", "1"),
        ("brunch_saturday", "1"),
        ("supper_sunday", "1"),
    ];

    #[actix_web::test]
    async fn booking_succeeds_when_no_menu_is_published() {
        let (app, stores) = student_app_and_stores().await;
        let cookie = login_cookie(&app, "st@example.com").await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/student/")
                .cookie(cookie)
                .set_form(SELECTION)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = test::read_body_json(response).await;
        assert_eq!(
            value.get("notice").and_then(Value::as_str),
            Some("Your booking was successful")
        );

        let bookings = stores.bookings.bookings();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].user_id, UserId::new(1));
        assert_eq!(bookings[0].week, 30); // fixed today is ISO week 29
        assert_eq!(bookings[0].status, BookingStatus::Confirmed);

        let plan = MealPlan::decode(&bookings[0].meal_record).expect("stored record decodes");
        let booked: Vec<_> = plan
            .schedule()
            .into_iter()
            .filter(|entry| entry.status == SlotStatus::Booked)
            .collect();
        assert_eq!(booked.len(), 4);
    }

    #[actix_web::test]
    async fn a_published_menu_blocks_booking() {
        let (app, stores) = student_app_and_stores().await;
        stores
            .menus
            .insert(NewWeeklyMenu {
                week: 30,
                menu_content: MenuContent::default().encode(),
            })
            .await
            .expect("seed menu");

        let cookie = login_cookie(&app, "st@example.com").await;
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/student/")
                .cookie(cookie)
                .set_form(SELECTION)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let value: Value = test::read_body_json(response).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("You have already booked for this week!")
        );
        assert!(stores.bookings.bookings().is_empty());
    }

    #[actix_web::test]
    async fn booking_page_reports_the_published_menu() {
        let (app, stores) = student_app_and_stores().await;
        let cookie = login_cookie(&app, "st@example.com").await;

        let before = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/student/")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        let value: Value = test::read_body_json(before).await;
        assert_eq!(value.get("week").and_then(Value::as_i64), Some(30));
        assert_eq!(
            value.get("menu_published").and_then(Value::as_bool),
            Some(false)
        );

        stores
            .menus
            .insert(NewWeeklyMenu {
                week: 30,
                menu_content: MenuContent::default().encode(),
            })
            .await
            .expect("seed menu");

        let after = test::call_service(
            &app,
            test::TestRequest::get().uri("/student/").cookie(cookie).to_request(),
        )
        .await;
        let value: Value = test::read_body_json(after).await;
        assert_eq!(
            value.get("menu_published").and_then(Value::as_bool),
            Some(true)
        );
        assert!(value.get("menu").is_some());
    }

    #[actix_web::test]
    async fn view_bookings_decodes_the_most_recent_booking() {
        let (app, _stores) = student_app_and_stores().await;
        let cookie = login_cookie(&app, "st@example.com").await;

        let book_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/student/")
                .cookie(cookie.clone())
                .set_form(SELECTION)
                .to_request(),
        )
        .await;
        assert!(book_res.status().is_success());

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/student/view_bookings/")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = test::read_body_json(response).await;
        assert_eq!(value.get("week").and_then(Value::as_i64), Some(30));
        let schedule = value
            .get("schedule")
            .and_then(Value::as_array)
            .expect("schedule array");
        assert_eq!(schedule.len(), 19);
        assert_eq!(
            schedule[0].get("status").and_then(Value::as_str),
            Some("Booked")
        );
        assert_eq!(
            schedule[1].get("status").and_then(Value::as_str),
            Some("Not Booked")
        );
    }

    #[actix_web::test]
    async fn view_bookings_with_none_recorded_is_not_found() {
        let (app, _stores) = student_app_and_stores().await;
        let cookie = login_cookie(&app, "st@example.com").await;

        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/student/view_bookings/")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let value: Value = test::read_body_json(response).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("No bookings found")
        );
    }

    #[actix_web::test]
    async fn modify_replaces_only_the_callers_booking() {
        let (app, stores) = student_app_and_stores().await;
        let first = login_cookie(&app, "st@example.com").await;
        let second = login_cookie(&app, "st2@example.com").await;

        for cookie in [first.clone(), second] {
            let response = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/student/")
                    .cookie(cookie)
                    .set_form(SELECTION)
                    .to_request(),
            )
            .await;
            assert!(response.status().is_success());
        }
        assert_eq!(stores.bookings.bookings().len(), 2);

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/student/modify_bookings/")
                .cookie(first)
                .set_form([("supper_friday", "1")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = test::read_body_json(response).await;
        assert_eq!(
            value.get("notice").and_then(Value::as_str),
            Some("Your booking was successfully Updated")
        );

        let bookings = stores.bookings.bookings();
        assert_eq!(bookings.len(), 2);
        // The other student's booking is untouched.
        assert!(bookings
            .iter()
            .any(|booking| booking.user_id == UserId::new(2) && booking.id == 2));
        // The caller's booking was replaced with the new selection.
        let replaced = bookings
            .iter()
            .find(|booking| booking.user_id == UserId::new(1))
            .expect("caller still has a booking");
        let plan = MealPlan::decode(&replaced.meal_record).expect("stored record decodes");
        let booked: Vec<_> = plan
            .schedule()
            .into_iter()
            .filter(|entry| entry.status == SlotStatus::Booked)
            .collect();
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].day, "Friday");
    }
}
