//! Manager handlers: publish the weekly menu and review the week's bookings.

use actix_web::{get, post, route, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::menu::{FullWeekDishes, WeekdayDishes, WeekendDishes};
use crate::domain::week::bookable_week;
use crate::domain::{
    ApiResult, Error, MealPlan, MenuContent, NewWeeklyMenu, Role, ScheduleEntry, UserId,
};

use super::auth::require_role;
use super::notice::{Notice, PageInfo};
use super::session::SessionContext;
use super::state::AppState;

/// Manager dashboard descriptor.
#[utoipa::path(
    get,
    path = "/manager/",
    tags = ["manager"],
    operation_id = "managerDashboard",
    responses(
        (status = 200, description = "Manager dashboard", body = PageInfo),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not a manager account", body = Error)
    )
)]
#[route("/manager/", method = "GET", method = "POST")]
pub async fn dashboard(
    state: web::Data<AppState>,
    session: SessionContext,
) -> ApiResult<web::Json<PageInfo>> {
    require_role(&session, &state, Role::Manager).await?;
    Ok(web::Json(PageInfo::new("manager")))
}

/// Menu form body, one named dish field per slot.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MenuForm {
    /// Monday breakfast dish.
    #[serde(default)]
    pub breakfast_monday: String,
    /// Tuesday breakfast dish.
    #[serde(default)]
    pub breakfast_tuesday: String,
    /// Wednesday breakfast dish.
    #[serde(default)]
    pub breakfast_wednesday: String,
    /// Thursday breakfast dish.
    #[serde(default)]
    pub breakfast_thursday: String,
    /// Friday breakfast dish.
    #[serde(default)]
    pub breakfast_friday: String,
    /// Saturday brunch dish.
    #[serde(default)]
    pub brunch_saturday: String,
    /// Sunday brunch dish.
    #[serde(default)]
    pub brunch_sunday: String,
    /// Monday supper dish.
    #[serde(default)]
    pub supper_monday: String,
    /// Tuesday supper dish.
    #[serde(default)]
    pub supper_tuesday: String,
    /// Wednesday supper dish.
    #[serde(default)]
    pub supper_wednesday: String,
    /// Thursday supper dish.
    #[serde(default)]
    pub supper_thursday: String,
    /// Friday supper dish.
    #[serde(default)]
    pub supper_friday: String,
    /// Saturday supper dish.
    #[serde(default)]
    pub supper_saturday: String,
    /// Sunday supper dish.
    #[serde(default)]
    pub supper_sunday: String,
}

impl MenuForm {
    /// Assemble the submitted dishes into menu content.
    pub fn into_content(self) -> MenuContent {
        MenuContent {
            breakfast: WeekdayDishes {
                monday: self.breakfast_monday,
                tuesday: self.breakfast_tuesday,
                wednesday: self.breakfast_wednesday,
                thursday: self.breakfast_thursday,
                friday: self.breakfast_friday,
            },
            brunch: WeekendDishes {
                saturday: self.brunch_saturday,
                sunday: self.brunch_sunday,
            },
            supper: FullWeekDishes {
                monday: self.supper_monday,
                tuesday: self.supper_tuesday,
                wednesday: self.supper_wednesday,
                thursday: self.supper_thursday,
                friday: self.supper_friday,
                saturday: self.supper_saturday,
                sunday: self.supper_sunday,
            },
        }
    }
}

/// Menu page descriptor.
#[utoipa::path(
    get,
    path = "/manager/menu/",
    tags = ["manager"],
    responses(
        (status = 200, description = "Menu page", body = PageInfo),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not a manager account", body = Error)
    )
)]
#[get("/manager/menu/")]
pub async fn menu_page(
    state: web::Data<AppState>,
    session: SessionContext,
) -> ApiResult<web::Json<PageInfo>> {
    require_role(&session, &state, Role::Manager).await?;
    let week = bookable_week(state.clock.today());
    Ok(web::Json(PageInfo::new("menu").with_week(week)))
}

/// Publish the menu for the bookable week.
///
/// There is no duplicate-week guard; publishing again adds another row and
/// the earliest row wins on reads.
#[utoipa::path(
    post,
    path = "/manager/menu/",
    tags = ["manager"],
    request_body(content = MenuForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Menu stored", body = Notice),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not a manager account", body = Error)
    )
)]
#[post("/manager/menu/")]
pub async fn publish_menu(
    state: web::Data<AppState>,
    session: SessionContext,
    form: web::Form<MenuForm>,
) -> ApiResult<web::Json<Notice>> {
    require_role(&session, &state, Role::Manager).await?;
    let week = bookable_week(state.clock.today());

    let content = form.into_inner().into_content();
    state
        .menus
        .insert(NewWeeklyMenu {
            week,
            menu_content: content.encode(),
        })
        .await?;

    Ok(web::Json(Notice::new("Menu update was successful")))
}

/// One student's decoded schedule in the weekly overview.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentWeek {
    /// Owning user id.
    pub user_id: UserId,
    /// Day/status pairs in stored slot order.
    pub schedule: Vec<ScheduleEntry>,
}

/// All decoded bookings for the bookable week.
#[derive(Debug, Serialize, ToSchema)]
pub struct WeekBookings {
    /// Week the overview covers.
    pub week: i32,
    /// Per-student schedules, ordered by user id.
    pub students: Vec<StudentWeek>,
}

/// Review the bookable week's bookings, grouped per student.
#[utoipa::path(
    get,
    path = "/manager/bookings/",
    tags = ["manager"],
    responses(
        (status = 200, description = "Week overview", body = WeekBookings),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Not a manager account", body = Error)
    )
)]
#[get("/manager/bookings/")]
pub async fn week_bookings(
    state: web::Data<AppState>,
    session: SessionContext,
) -> ApiResult<web::Json<WeekBookings>> {
    require_role(&session, &state, Role::Manager).await?;
    let week = bookable_week(state.clock.today());

    let rows = state.bookings.for_week(week).await?;

    // Rows arrive ordered by user id then age; only a user's first booking
    // for the week is shown. Unreadable records are skipped, not fatal.
    let mut students: Vec<StudentWeek> = Vec::new();
    let mut last_user: Option<UserId> = None;
    for booking in rows {
        if last_user == Some(booking.user_id) {
            continue;
        }
        last_user = Some(booking.user_id);
        match MealPlan::decode(&booking.meal_record) {
            Ok(plan) => students.push(StudentWeek {
                user_id: booking.user_id,
                schedule: plan.schedule(),
            }),
            Err(err) => {
                warn!(booking = booking.id, error = %err, "skipping unreadable booking record");
            }
        }
    }

    Ok(web::Json(WeekBookings { week, students }))
}
