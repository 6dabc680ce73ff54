use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::catalog::{
    self, Avatar, CatalogPage, CatalogQuery, Theme, AVATARS, AVATAR_CATEGORIES, THEMES,
    THEME_CATEGORIES,
};

/// GET /api/v1/catalog/themes?search=&category=
pub async fn list_themes(Query(query): Query<CatalogQuery>) -> Json<CatalogPage<Theme>> {
    let items = catalog::filter(THEMES, &query);
    Json(CatalogPage {
        categories: THEME_CATEGORIES,
        total: items.len(),
        items,
    })
}

/// GET /api/v1/catalog/themes/{id}/css
pub async fn theme_css(Path(id): Path<String>) -> Result<impl IntoResponse, (StatusCode, String)> {
    let theme = catalog::find_theme(&id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Theme not found: {}", id)))?;
    Ok((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        catalog::render_theme_css(theme),
    ))
}

/// GET /api/v1/catalog/avatars?search=&category=
pub async fn list_avatars(Query(query): Query<CatalogQuery>) -> Json<CatalogPage<Avatar>> {
    let items = catalog::filter(AVATARS, &query);
    Json(CatalogPage {
        categories: AVATAR_CATEGORIES,
        total: items.len(),
        items,
    })
}

/// GET /api/v1/catalog/avatars/{id}/svg
pub async fn avatar_svg(Path(id): Path<String>) -> Result<impl IntoResponse, (StatusCode, String)> {
    let avatar = catalog::find_avatar(&id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Avatar not found: {}", id)))?;
    Ok(svg_response(avatar))
}

pub(crate) fn svg_response(avatar: &Avatar) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        catalog::render_avatar(avatar),
    )
}
