//! Tile request handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::Response,
};
use tracing::{error, info, instrument};

use tile_common::TileError;

use crate::rendering;
use crate::state::AppState;
use crate::validation::{parse_tile_segment, validate_coord};

/// Hard ceiling on one tile render, upstream fetch included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// `GET /{provider}/{z}/{y}/{x}.png`
#[instrument(skip(state))]
pub async fn tile_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((provider_name, z, y, x_segment)): Path<(String, u32, u32, String)>,
) -> Response {
    let started = Instant::now();

    let Some(provider) = state.provider(&provider_name) else {
        return error_response(TileError::Validation(format!(
            "unknown provider '{provider_name}'"
        )));
    };

    let coord = match parse_tile_segment(&x_segment)
        .and_then(|(x, ext)| match ext {
            "png" => Ok(x),
            other => Err(TileError::Validation(format!(
                "unsupported extension '{other}'"
            ))),
        })
        .and_then(|x| validate_coord(provider.as_ref(), z, y, x))
    {
        Ok(coord) => coord,
        Err(err) => return error_response(err),
    };

    let rendered = match tokio::time::timeout(
        REQUEST_TIMEOUT,
        rendering::render_tile(&state, provider.as_ref(), coord),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(TileError::Canceled),
    };

    let elapsed_ms = started.elapsed().as_millis() as u64;

    match rendered {
        Ok(png) => {
            info!(
                provider = provider.name(),
                z = coord.z,
                y = coord.y,
                x = coord.x,
                elapsed_ms,
                bytes = png.len(),
                "rendered tile"
            );
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, "image/png")
                .header(header::CACHE_CONTROL, "public, max-age=86400")
                .body(png.into())
                .unwrap()
        }
        Err(err) => {
            error!(
                provider = provider.name(),
                z = coord.z,
                y = coord.y,
                x = coord.x,
                elapsed_ms,
                error = %err,
                "tile request failed"
            );
            error_response(err)
        }
    }
}

/// Health check.
pub async fn health_handler() -> &'static str {
    "OK"
}

fn error_response(err: TileError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    // A canceled request gets no body.
    let body = match err {
        TileError::Canceled => String::new(),
        other => other.to_string(),
    };

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(body.into())
        .unwrap()
}
