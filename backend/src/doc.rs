//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

/// Public OpenAPI surface used by tooling and the debug docs route.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::auth::login_page,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::sign_up_page,
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::access_page,
        crate::inbound::http::auth::access_check,
        crate::inbound::http::home::home,
        crate::inbound::http::student::booking_page,
        crate::inbound::http::student::book,
        crate::inbound::http::student::view_bookings,
        crate::inbound::http::student::modify_page,
        crate::inbound::http::student::modify,
        crate::inbound::http::manager::dashboard,
        crate::inbound::http::manager::menu_page,
        crate::inbound::http::manager::publish_menu,
        crate::inbound::http::manager::week_bookings,
        crate::inbound::http::accommodation::dashboard,
        crate::inbound::http::accommodation::delete_page,
        crate::inbound::http::accommodation::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::Role,
        crate::domain::UserId,
        crate::domain::BookingStatus,
        crate::domain::MenuContent,
        crate::domain::meal_plan::MealKind,
        crate::domain::meal_plan::ScheduleEntry,
        crate::domain::meal_plan::SlotStatus,
        crate::domain::menu::FullWeekDishes,
        crate::domain::menu::WeekdayDishes,
        crate::domain::menu::WeekendDishes,
        crate::inbound::http::accommodation::DeleteForm,
        crate::inbound::http::auth::AccessDecision,
        crate::inbound::http::auth::AccessForm,
        crate::inbound::http::auth::LoginForm,
        crate::inbound::http::auth::LoginOutcome,
        crate::inbound::http::auth::SignUpForm,
        crate::inbound::http::home::UserSummary,
        crate::inbound::http::manager::MenuForm,
        crate::inbound::http::manager::StudentWeek,
        crate::inbound::http::manager::WeekBookings,
        crate::inbound::http::notice::Notice,
        crate::inbound::http::notice::PageInfo,
        crate::inbound::http::student::BookingPage,
        crate::inbound::http::student::BookingView,
        crate::inbound::http::student::MealSelectionForm,
    )),
    tags(
        (name = "auth", description = "Login, sign-up and session endpoints"),
        (name = "home", description = "Signed-in landing page"),
        (name = "student", description = "Meal booking endpoints"),
        (name = "manager", description = "Menu publishing and booking review"),
        (name = "accommodation", description = "Account administration"),
        (name = "access", description = "Dining-hall access checks"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/login",
            "/logout",
            "/accommodation/sign-up",
            "/access",
            "/",
            "/student/",
            "/student/view_bookings/",
            "/student/modify_bookings/",
            "/manager/",
            "/manager/menu/",
            "/manager/bookings/",
            "/accommodation/",
            "/accommodation/delete/",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|path| *path == expected),
                "missing path {expected}"
            );
        }
    }
}
