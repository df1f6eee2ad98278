use super::*;
use crate::routes::session::COOKIE_NAME;
use crate::state::test_helpers::test_app_state;

fn edited(n: usize, value: f64) -> Delays {
    let mut delays = Delays::default();
    delays.0[n - 1] = value;
    delays
}

#[tokio::test]
async fn get_delays_without_cookie_reads_defaults() {
    let state = test_app_state();
    let Json(view) = get_delays(State(state.clone()), CookieJar::new()).await;

    assert_eq!(view.fields.len(), process::DELAY_COUNT);
    assert_eq!(view.image, process::FLOWSHEET_IMAGE);
    assert!(view.overlay.is_none());
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn anonymous_reads_never_grow_the_store() {
    let state = test_app_state();
    for _ in 0..500 {
        let _ = get_delays(State(state.clone()), CookieJar::new()).await;
    }
    assert_eq!(state.sessions.len().await, 0);
}

#[tokio::test]
async fn confirm_then_read_back_in_same_session() {
    let state = test_app_state();
    let (jar, Json(resp)) = confirm_delays(
        State(state.clone()),
        CookieJar::new(),
        Json(ConfirmDelaysBody { delays: edited(3, 9.5) }),
    )
    .await
    .unwrap();
    assert!(jar.get(COOKIE_NAME).is_some());
    assert!(resp.changed);
    assert_eq!(resp.view.overlay.as_ref().unwrap()[2].text, "t3=9.5s");

    let Json(view) = get_delays(State(state.clone()), jar).await;
    assert!((view.fields[2].value - 9.5).abs() < f64::EPSILON);
    assert!(view.overlay.is_some());
    assert_eq!(state.sessions.len().await, 1);
}

#[tokio::test]
async fn confirming_defaults_reports_unchanged() {
    let state = test_app_state();
    let (_, Json(resp)) = confirm_delays(State(state), CookieJar::new(), Json(ConfirmDelaysBody { delays: Delays::default() }))
        .await
        .unwrap();
    assert!(!resp.changed);
    assert!(resp.view.overlay.is_none());
}

#[tokio::test]
async fn negative_delay_is_bad_request() {
    let state = test_app_state();
    let err = confirm_delays(
        State(state.clone()),
        CookieJar::new(),
        Json(ConfirmDelaysBody { delays: edited(7, -1.0) }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.0, StatusCode::BAD_REQUEST);
    assert!(err.1.0["error"].as_str().unwrap().contains("t7"));
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn other_sessions_do_not_see_changes() {
    let state = test_app_state();
    confirm_delays(State(state.clone()), CookieJar::new(), Json(ConfirmDelaysBody { delays: edited(1, 20.0) }))
        .await
        .unwrap();

    let Json(view_b) = get_delays(State(state), CookieJar::new()).await;
    assert!((view_b.fields[0].value - 2.0).abs() < f64::EPSILON);
}

#[test]
fn confirm_response_flattens_view() {
    let resp = ConfirmDelaysResponse { changed: true, view: ProcessView::from(&ProcessState::default()) };
    let json = serde_json::to_value(resp).unwrap();
    assert_eq!(json["changed"], true);
    assert!(json["fields"].is_array());
    assert!(json["overlay"].is_null());
}
