//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use utoipa::OpenApi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::AppState;
use crate::inbound::http::{accommodation, auth, home, manager, student};

/// Build the cookie-backed session middleware.
pub fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build()
}

/// Register every application route.
///
/// Shared between the real server and the integration-test harness so the
/// two cannot drift apart.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login_page)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::sign_up_page)
        .service(auth::sign_up)
        .service(auth::access_page)
        .service(auth::access_check)
        .service(student::booking_page)
        .service(student::book)
        .service(student::view_bookings)
        .service(student::modify_page)
        .service(student::modify)
        .service(manager::dashboard)
        .service(manager::menu_page)
        .service(manager::publish_menu)
        .service(manager::week_bookings)
        .service(accommodation::dashboard)
        .service(accommodation::delete_page)
        .service(accommodation::delete_user)
        .route("/", web::get().to(home::home))
        .route("/", web::post().to(home::home));
}

#[cfg(debug_assertions)]
async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}

/// Bind and start the HTTP server.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the listen address cannot be bound.
pub fn run(config: ServerConfig, state: AppState) -> std::io::Result<Server> {
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let app_state = web::Data::new(state);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(app_state.clone())
            .wrap(session_middleware(key.clone(), cookie_secure, same_site))
            .configure(configure_routes)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app = app.route("/api-docs/openapi.json", web::get().to(openapi_json));

        app
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    Ok(server.run())
}
