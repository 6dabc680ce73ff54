use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod backend;
pub mod catalog;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod quiz;
pub mod services;

pub use config::Config;
pub use services::AppState;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    let protected = Router::new()
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route(
            "/preferences",
            get(handlers::preferences::get_preferences)
                .put(handlers::preferences::update_preferences),
        )
        .route(
            "/preferences/avatar.svg",
            get(handlers::preferences::current_avatar),
        )
        .route("/lessons", post(handlers::lessons::generate_lesson_plan))
        .route("/doubts", post(handlers::lessons::resolve_doubt))
        .route("/videos", get(handlers::lessons::search_videos))
        .nest("/quizzes", quiz_routes())
        .route("/dashboard", get(handlers::dashboard::get_dashboard))
        .nest("/groups", group_routes())
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            middlewares::auth::auth_middleware,
        ));

    let public = Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/signup", post(handlers::auth::signup))
        .nest("/catalog", catalog_routes());

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(handlers::metrics_handler).layer(middleware::from_fn_with_state(
                app_state.clone(),
                handlers::metrics_auth_middleware,
            )),
        )
        .nest("/api/v1", public.merge(protected))
        .with_state(app_state)
        .layer(cors)
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(middleware::from_fn(
            middlewares::trace::trace_context_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/themes", get(handlers::catalog::list_themes))
        .route("/themes/{id}/css", get(handlers::catalog::theme_css))
        .route("/avatars", get(handlers::catalog::list_avatars))
        .route("/avatars/{id}/svg", get(handlers::catalog::avatar_svg))
}

fn quiz_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(handlers::quizzes::create_quiz))
        .route(
            "/{id}",
            get(handlers::quizzes::get_quiz).delete(handlers::quizzes::discard_quiz),
        )
        .route("/{id}/answers", post(handlers::quizzes::select_answer))
        .route("/{id}/advance", post(handlers::quizzes::advance))
        .route("/{id}/retreat", post(handlers::quizzes::retreat))
        .route("/{id}/submit", post(handlers::quizzes::submit))
        .route("/{id}/stream", get(handlers::sse::quiz_stream))
}

fn group_routes() -> Router<Arc<AppState>> {
    let teacher_only = Router::new()
        .route("/{id}/members", post(handlers::groups::add_member))
        .route_layer(middleware::from_fn(
            middlewares::auth::teacher_guard_middleware,
        ));

    Router::new()
        .route(
            "/",
            get(handlers::groups::list_groups).post(handlers::groups::create_group),
        )
        .route("/{id}", get(handlers::groups::get_group))
        .merge(teacher_only)
}
