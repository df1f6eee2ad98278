//! Chart and configuration endpoints for the dashboard views.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::chart::LineChart;
use crate::routes::{ApiError, api_error, process as process_routes};
use crate::series;
use crate::services::database::{self, ConnectionDocument, DatabaseConfigError, DatabaseKind};
use crate::services::mill::{self, MillError};
use crate::services::stockpile::{self, FillingView, RefreshInterval};
use crate::state::AppState;
use crate::views::{View, ViewSummary};

// =============================================================================
// VIEWS
// =============================================================================

/// `GET /api/views` — sidebar entries in order.
pub async fn list_views() -> Json<Vec<ViewSummary>> {
    Json(View::ALL.into_iter().map(ViewSummary::from).collect())
}

/// `GET /api/views/:slug` — default payload of one view.
pub async fn view(State(state): State<AppState>, jar: CookieJar, Path(slug): Path<String>) -> Response {
    let Some(view) = View::from_slug(&slug) else {
        return api_error(StatusCode::NOT_FOUND, format!("unknown view '{slug}'")).into_response();
    };
    view_payload(&state, &jar, view).await
}

async fn view_payload(state: &AppState, jar: &CookieJar, view: View) -> Response {
    let now = OffsetDateTime::now_utc();
    let summary = ViewSummary::from(view);
    match view {
        View::StockpileFilling => {
            let content = stockpile::filling_view(RefreshInterval::default(), now);
            Json(serde_json::json!({ "view": summary, "content": content })).into_response()
        }
        View::MillForecast => match mill_forecast(state, now) {
            Ok(content) => Json(serde_json::json!({ "view": summary, "content": content })).into_response(),
            Err(e) => e.into_response(),
        },
        View::ProcessParameters => {
            let content = process_routes::current_view(state, jar).await;
            Json(serde_json::json!({ "view": summary, "content": content })).into_response()
        }
        View::DatabaseConnection => match database_document(DatabaseKind::default()) {
            Ok(content) => Json(serde_json::json!({ "view": summary, "content": content })).into_response(),
            Err(e) => e.into_response(),
        },
    }
}

#[derive(Serialize)]
pub struct MillForecast {
    pub throughput: LineChart,
    pub feed: LineChart,
    /// `None` when no prediction table is loaded.
    pub prediction: Option<LineChart>,
    pub stockpiles: Vec<&'static str>,
    pub attributes: Vec<String>,
    pub mills: Vec<&'static str>,
    /// Refresh-interval choices, shared with the stockpile view.
    pub interval: RefreshInterval,
    pub intervals: Vec<&'static str>,
}

fn mill_forecast(state: &AppState, now: OffsetDateTime) -> Result<MillForecast, ApiError> {
    let generator = state.generator();
    let set = series::generate(&generator, &mill::weekly_dates()).map_err(mill_error)?;
    let feed = mill::feed_chart(&set, &owned(&mill::DEFAULT_STOCKPILE_SELECTION), mill::DEFAULT_ATTRIBUTE, now)
        .map_err(mill_error)?;
    let prediction = state
        .predictions
        .as_deref()
        .map(|table| mill::prediction_chart(table, &owned(&mill::DEFAULT_MILL_SELECTION), now))
        .transpose()
        .map_err(mill_error)?;

    Ok(MillForecast {
        throughput: mill::throughput_chart(now),
        feed,
        prediction,
        stockpiles: series::STOCKPILES.to_vec(),
        attributes: generator.attributes.into_iter().map(|a| a.name).collect(),
        mills: mill::MILLS.to_vec(),
        interval: RefreshInterval::default(),
        intervals: RefreshInterval::ALL.iter().map(|i| i.as_str()).collect(),
    })
}

// =============================================================================
// STOCKPILES
// =============================================================================

#[derive(Deserialize)]
pub struct FillingQuery {
    pub interval: Option<String>,
}

/// `GET /api/stockpiles/filling` — compartment fill levels.
pub async fn stockpile_filling(Query(q): Query<FillingQuery>) -> Result<Json<FillingView>, ApiError> {
    let interval = match q.interval.as_deref() {
        None => RefreshInterval::default(),
        Some(raw) => RefreshInterval::parse(raw)
            .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, format!("unknown refresh interval '{raw}'")))?,
    };
    Ok(Json(stockpile::filling_view(interval, OffsetDateTime::now_utc())))
}

// =============================================================================
// MILL
// =============================================================================

/// `GET /api/mill/throughput` — weekly tph per mill.
pub async fn mill_throughput() -> Json<LineChart> {
    Json(mill::throughput_chart(OffsetDateTime::now_utc()))
}

#[derive(Deserialize)]
pub struct FeedQuery {
    /// Comma-separated stockpile names; absent means the default selection.
    pub stockpiles: Option<String>,
    pub attribute: Option<String>,
}

/// `GET /api/mill/feed` — feed quality for the selected stockpiles.
pub async fn mill_feed(State(state): State<AppState>, Query(q): Query<FeedQuery>) -> Result<Json<LineChart>, ApiError> {
    let stockpiles = selection(q.stockpiles.as_deref(), &mill::DEFAULT_STOCKPILE_SELECTION);
    let attribute = q.attribute.as_deref().unwrap_or(mill::DEFAULT_ATTRIBUTE).trim();

    let set = series::generate(&state.generator(), &mill::weekly_dates()).map_err(mill_error)?;
    let chart = mill::feed_chart(&set, &stockpiles, attribute, OffsetDateTime::now_utc()).map_err(mill_error)?;
    Ok(Json(chart))
}

#[derive(Deserialize)]
pub struct PredictionQuery {
    /// Comma-separated mill names; absent means the default selection.
    pub mills: Option<String>,
}

/// `GET /api/mill/prediction` — measured vs. predicted throughput.
pub async fn mill_prediction(
    State(state): State<AppState>,
    Query(q): Query<PredictionQuery>,
) -> Result<Json<LineChart>, ApiError> {
    let Some(table) = state.predictions.as_deref() else {
        return Err(api_error(StatusCode::SERVICE_UNAVAILABLE, "mill prediction table not loaded"));
    };
    let mills = selection(q.mills.as_deref(), &mill::DEFAULT_MILL_SELECTION);
    let chart = mill::prediction_chart(table, &mills, OffsetDateTime::now_utc()).map_err(mill_error)?;
    Ok(Json(chart))
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// Split a comma-separated selection. An empty string selects nothing.
pub(crate) fn selection(raw: Option<&str>, default: &[&str]) -> Vec<String> {
    match raw {
        None => owned(default),
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect(),
    }
}

pub(crate) fn mill_error_to_status(err: &MillError) -> StatusCode {
    match err {
        MillError::UnknownMill(_)
        | MillError::UnknownStockpile(_)
        | MillError::UnknownAttribute(_)
        | MillError::MissingColumn(_) => StatusCode::BAD_REQUEST,
        MillError::Parse { .. } | MillError::Io(_) | MillError::Series(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn mill_error(err: impl Into<MillError>) -> ApiError {
    let err = err.into();
    let status = mill_error_to_status(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "mill chart failed");
    }
    api_error(status, err)
}

// =============================================================================
// DATABASE CONNECTION
// =============================================================================

#[derive(Deserialize)]
pub struct DatabaseQuery {
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DatabaseDocumentView {
    pub kinds: Vec<&'static str>,
    pub document: ConnectionDocument,
    /// Editable text, four-space indented.
    pub text: String,
}

fn database_document(kind: DatabaseKind) -> Result<DatabaseDocumentView, ApiError> {
    let document = ConnectionDocument::for_kind(kind);
    let text = document
        .to_pretty_json()
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;
    Ok(DatabaseDocumentView { kinds: DatabaseKind::ALL.iter().map(|k| k.as_str()).collect(), document, text })
}

/// `GET /api/database/config` — default connection document for a type.
pub async fn database_config(Query(q): Query<DatabaseQuery>) -> Result<Json<DatabaseDocumentView>, ApiError> {
    let kind = match q.kind.as_deref() {
        None => DatabaseKind::default(),
        Some(raw) => DatabaseKind::parse(raw)
            .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, format!("unsupported database type '{raw}'")))?,
    };
    Ok(Json(database_document(kind)?))
}

#[derive(Deserialize)]
pub struct EditedDocumentBody {
    pub text: String,
}

/// `POST /api/database/config` — accept edited JSON text.
pub async fn confirm_database_config(Json(body): Json<EditedDocumentBody>) -> Result<Json<serde_json::Value>, ApiError> {
    match database::parse_edited(&body.text) {
        Ok(data) => {
            tracing::info!("database connection document updated");
            Ok(Json(serde_json::json!({ "message": database::UPDATED_MESSAGE, "data": data })))
        }
        Err(e @ DatabaseConfigError::InvalidJson(_)) => Err(api_error(StatusCode::BAD_REQUEST, e)),
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
