pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::avatar::handlers as avatar;
use crate::contact::handlers as contact;
use crate::projects::handlers as projects;
use crate::site::handlers as site;
use crate::state::AppState;
use crate::upload::MAX_UPLOAD_BYTES;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Page
        .route("/", get(site::handle_index))
        .route("/static/site.css", get(site::handle_stylesheet))
        .route("/static/site.js", get(site::handle_script))
        // Projects API
        .route("/api/v1/projects", get(projects::handle_get_projects))
        .route(
            "/api/v1/projects/username",
            put(projects::handle_set_username),
        )
        .route(
            "/api/v1/projects/selection",
            put(projects::handle_set_selection),
        )
        .route(
            "/api/v1/projects/:id/toggle",
            post(projects::handle_toggle_selection),
        )
        .route(
            "/api/v1/projects/:id/image",
            put(projects::handle_upload_project_image)
                .delete(projects::handle_remove_project_image),
        )
        .route(
            "/api/v1/projects/:id/description",
            put(projects::handle_set_description),
        )
        .route(
            "/api/v1/project-descriptions/generate",
            post(projects::handle_generate_description),
        )
        // Avatar API
        .route(
            "/api/v1/avatar",
            get(avatar::handle_get_avatar)
                .put(avatar::handle_upload_avatar)
                .delete(avatar::handle_reset_avatar),
        )
        .route(
            "/api/v1/avatar/generate",
            post(avatar::handle_generate_avatar),
        )
        // Contact API
        .route("/api/v1/contact", post(contact::handle_contact))
        // Reference photos arrive base64-encoded inside JSON, so allow headroom over the raw cap.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES * 2))
        .with_state(state)
}
