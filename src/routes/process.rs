//! Process-parameter routes: read and confirm transport delays.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::routes::{ApiError, api_error, session};
use crate::services::process::{self, DelayField, Delays, OverlayLabel, ProcessState};
use crate::services::session::SessionState;
use crate::state::AppState;

/// Flowsheet image, form fields, and overlay for one session.
#[derive(Debug, Serialize)]
pub struct ProcessView {
    pub image: &'static str,
    pub fields: Vec<DelayField>,
    /// Labels to draw over the image; absent until a change is confirmed.
    pub overlay: Option<Vec<OverlayLabel>>,
}

impl From<&ProcessState> for ProcessView {
    fn from(state: &ProcessState) -> Self {
        Self {
            image: process::FLOWSHEET_IMAGE,
            fields: process::delay_fields(&state.delays),
            overlay: state.overlay.clone(),
        }
    }
}

/// Defaults unless the cookie names a live session.
pub(crate) async fn current_view(state: &AppState, jar: &CookieJar) -> ProcessView {
    let snapshot = match session::known(state, jar).await {
        Some(token) => state.sessions.snapshot(&token).await,
        None => SessionState::default(),
    };
    ProcessView::from(&snapshot.process)
}

/// `GET /api/process/delays` — the session's confirmed delays.
pub async fn get_delays(State(state): State<AppState>, jar: CookieJar) -> Json<ProcessView> {
    Json(current_view(&state, &jar).await)
}

#[derive(Deserialize)]
pub struct ConfirmDelaysBody {
    /// t1..t10 in seconds.
    pub delays: Delays,
}

#[derive(Debug, Serialize)]
pub struct ConfirmDelaysResponse {
    /// Whether the submission differed from the stored delays.
    pub changed: bool,
    #[serde(flatten)]
    pub view: ProcessView,
}

/// `POST /api/process/delays` — confirm edited delays.
pub async fn confirm_delays(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<ConfirmDelaysBody>,
) -> Result<(CookieJar, Json<ConfirmDelaysResponse>), ApiError> {
    body.delays.validate().map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;

    let (jar, token) = session::resolve(&state, jar).await;
    let (next, changed) = state
        .sessions
        .confirm_delays(&token, body.delays)
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;

    if changed {
        tracing::info!(delays = ?next.delays.0, "transport delays updated");
    }
    Ok((jar, Json(ConfirmDelaysResponse { changed, view: ProcessView::from(&next) })))
}

#[cfg(test)]
#[path = "process_test.rs"]
mod tests;
