//! Agenda endpoint

use axum::{
    Json, Router,
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
};
use calfeed_core::agenda::display_source;
use calfeed_core::{AgendaOptions, AgendaResult, build_agenda};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::feed::normalize_feed_url;
use crate::routes::AppError;
use crate::state::AppState;

const API_KEY_HEADER: &str = "x-api-key";

pub fn router() -> Router<AppState> {
    Router::new().route("/agenda", get(get_agenda))
}

/// Query parameters for GET /agenda
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaQuery {
    pub url: Option<String>,
    pub days: Option<String>,
    pub timezone: Option<String>,
    pub start_from: Option<String>,
    /// API key, for clients that cannot set headers
    pub key: Option<String>,
}

#[derive(Serialize)]
pub struct AgendaResponse {
    pub success: bool,
    #[serde(flatten)]
    pub agenda: AgendaResult,
}

/// GET /agenda - Fetch a feed and return it grouped by day
async fn get_agenda(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AgendaQuery>,
) -> Result<Json<AgendaResponse>, AppError> {
    let header_key = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    state.authorize(header_key.or(query.key.as_deref()))?;

    let raw_url = query
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Missing required parameter: url"))?;
    let url = normalize_feed_url(raw_url)?;

    let options = AgendaOptions::from_query(
        query.days.as_deref(),
        query.timezone.as_deref(),
        query.start_from.as_deref(),
    )?;

    info!(
        source = %display_source(url.as_str()),
        days = options.days,
        timezone = options.timezone.name(),
        "building agenda"
    );

    let text = state.feed.fetch(&url).await?;
    let agenda = build_agenda(&text, &options, url.as_str());

    info!(segments = agenda.segment_count(), days_with_events = agenda.agenda.len(), "agenda ready");

    Ok(Json(AgendaResponse {
        success: true,
        agenda,
    }))
}
