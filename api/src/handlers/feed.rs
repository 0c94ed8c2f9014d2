//! Feed handlers
//!
//! Front page, fetch cycle trigger and the per-feed read endpoints.
//! Listings support content negotiation: Accept: application/json for JSON,
//! otherwise HTML or plain text.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use quick_xml::escape::escape;

use crate::domain::entities::{Fetch, FetchSummary};
use crate::error::AppError;
use crate::transcode::{read_activity_feed, render_preview_page};
use crate::AppState;

/// How long clients may cache a served feed, counted from its fetch time
const FEED_TTL_MINUTES: i64 = 5;

/// Check if the client wants JSON response
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

/// Format a timestamp as an HTTP date (RFC 1123, GMT)
fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// True if the client's copy, per If-Modified-Since, is at least as new as `modified`
fn not_modified_since(headers: &HeaderMap, modified: DateTime<Utc>) -> bool {
    headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
        .map(|since| modified.timestamp() <= since.timestamp())
        .unwrap_or(false)
}

async fn latest_or_404(state: &AppState, feed_id: &str) -> Result<Fetch, AppError> {
    state
        .fetch_service
        .latest(feed_id)
        .await?
        .ok_or_else(|| AppError::NotFound("no such feed".to_string()))
}

/// GET / and GET /feed/
///
/// Lists recently fetched feeds, newest first.
pub async fn front_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let fetches = state.fetch_service.recent(state.recent_limit).await?;

    if wants_json(&headers) {
        return Ok(Json(fetches).into_response());
    }

    Ok(Html(render_front_page(&fetches)).into_response())
}

fn render_front_page(fetches: &[FetchSummary]) -> String {
    let mut buf = String::from("<pre>\n");
    for fetch in fetches {
        buf.push_str(&format!(
            "<a href='/feed/{}'>{}</a> {}\n",
            urlencoding::encode(&fetch.feed_id),
            escape(&fetch.feed_id),
            fetch.fetched_at.to_rfc3339()
        ));
    }
    buf.push_str("</pre>\n");
    buf
}

/// GET /feed/cron
///
/// Runs one fetch cycle over the configured feeds.
pub async fn run_cron(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let fetches = state.fetch_service.run_cycle(&state.feed_ids).await?;

    if wants_json(&headers) {
        let summaries: Vec<FetchSummary> = fetches.iter().map(Fetch::summary).collect();
        return Ok(Json(summaries).into_response());
    }

    let body: String = fetches
        .iter()
        .map(|f| format!("ok {} {}\n", f.feed_id, f.fetched_at.to_rfc3339()))
        .collect();

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response())
}

/// GET /feed/:id
///
/// Serves the latest Atom document for a feed with caching headers.
pub async fn get_feed(
    State(state): State<AppState>,
    Path(feed_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let fetch = latest_or_404(&state, &feed_id).await?;

    let cache_headers = [
        (header::CACHE_CONTROL, "public".to_string()),
        (
            header::EXPIRES,
            http_date(fetch.fetched_at + Duration::minutes(FEED_TTL_MINUTES)),
        ),
        (header::LAST_MODIFIED, http_date(fetch.fetched_at)),
    ];

    if not_modified_since(&headers, fetch.fetched_at) {
        return Ok((StatusCode::NOT_MODIFIED, cache_headers).into_response());
    }

    Ok((
        [(header::CONTENT_TYPE, "application/atom+xml")],
        cache_headers,
        fetch.feed,
    )
        .into_response())
}

/// GET /feed/:id/raw
///
/// Serves the latest raw activity JSON for a feed.
pub async fn get_raw(
    State(state): State<AppState>,
    Path(feed_id): Path<String>,
) -> Result<Response, AppError> {
    let fetch = latest_or_404(&state, &feed_id).await?;

    Ok(([(header::CONTENT_TYPE, "text/plain")], fetch.raw).into_response())
}

/// GET /feed/:id/preview
///
/// Renders the latest posts of a feed as a standalone HTML page.
pub async fn get_preview(
    State(state): State<AppState>,
    Path(feed_id): Path<String>,
) -> Result<Response, AppError> {
    let fetch = latest_or_404(&state, &feed_id).await?;
    let feed = read_activity_feed(fetch.raw.as_slice())?;

    Ok(Html(render_preview_page(&feed)).into_response())
}
