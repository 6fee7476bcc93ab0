// src/presentation/http/controllers/sites.rs
//! Public path handling in front of the rendered site: paths that moved are
//! answered with their redirect, everything else is not found.
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    state::HttpState,
};
use axum::{
    Extension,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

pub async fn resolve_path(
    Extension(state): Extension<HttpState>,
    Path((tenant, path)): Path<(String, String)>,
) -> HttpResult<Response> {
    lookup(&state, &tenant, &format!("/{path}")).await
}

pub async fn resolve_home(
    Extension(state): Extension<HttpState>,
    Path(tenant): Path<String>,
) -> HttpResult<Response> {
    lookup(&state, &tenant, "/").await
}

async fn lookup(state: &HttpState, tenant_slug: &str, path: &str) -> HttpResult<Response> {
    let (tenant, _) = state
        .services
        .tenant_resolver()
        .by_slug(tenant_slug)
        .await
        .into_http()?;

    let target = state
        .services
        .redirect_lookup()
        .resolve(tenant.id, path)
        .await
        .into_http()?;

    let Some(target) = target else {
        debug!(tenant = tenant_slug, path, "no redirect for path");
        return Err(HttpError::not_found(format!("no content at {path}")));
    };

    let status =
        StatusCode::from_u16(target.status_code).unwrap_or(StatusCode::MOVED_PERMANENTLY);
    Ok((status, [(header::LOCATION, target.location)]).into_response())
}
