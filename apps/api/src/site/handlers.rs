use axum::{extract::State, http::header, response::Html, response::IntoResponse};
use chrono::{Datelike, Utc};

use crate::avatar::service::current_avatar;
use crate::errors::AppError;
use crate::projects::service::refresh_projects;
use crate::site::render::{render_page, PageModel};
use crate::state::AppState;

const SITE_CSS: &str = include_str!("../../static/site.css");
const SITE_JS: &str = include_str!("../../static/site.js");

/// GET /
///
/// Renders the whole page. The gallery is refreshed on every render; the
/// repository cache keeps that to one upstream call per TTL.
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let projects = refresh_projects(
        state.prefs.as_ref(),
        state.repos.as_ref(),
        &state.config.default_github_username,
    )
    .await?;
    let avatar_url = current_avatar(state.prefs.as_ref()).await?;

    Ok(Html(render_page(&PageModel {
        avatar_url: &avatar_url,
        projects: &projects,
        year: Utc::now().year(),
    })))
}

/// GET /static/site.css
pub async fn handle_stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], SITE_CSS)
}

/// GET /static/site.js
pub async fn handle_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SITE_JS,
    )
}
