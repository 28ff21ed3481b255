//! Request handlers for the API endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::monitor::SettingsUpdate;

use super::types::{
    AlertRecord, ApplianceRecord, ErrorResponse, GroupRecord, SettingsBody, ShedRecord,
    StateResponse, TickRecord, ToggleResponse,
};
use super::{AppState, lock};

/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let service = lock(&state);
    Json(StateResponse::from(service.state_snapshot()))
}

/// `GET /appliances` → 200 + `Vec<ApplianceRecord>` JSON
pub async fn get_appliances(State(state): State<AppState>) -> Json<Vec<ApplianceRecord>> {
    let service = lock(&state);
    Json(service.appliances().iter().map(ApplianceRecord::from).collect())
}

/// `GET /groups` → 200 + `Vec<GroupRecord>` JSON
pub async fn get_groups(State(state): State<AppState>) -> Json<Vec<GroupRecord>> {
    let service = lock(&state);
    Json(service.socket_groups().iter().map(GroupRecord::from).collect())
}

/// `GET /alerts` → 200 + `Vec<AlertRecord>` JSON, newest first
pub async fn get_alerts(State(state): State<AppState>) -> Json<Vec<AlertRecord>> {
    let service = lock(&state);
    Json(service.alerts().entries().iter().map(AlertRecord::from).collect())
}

/// `GET /shedding` → 200 + `Vec<ShedRecord>` JSON
pub async fn get_shedding(State(state): State<AppState>) -> Json<Vec<ShedRecord>> {
    let service = lock(&state);
    Json(service.shed_plan().iter().map(ShedRecord::from).collect())
}

/// `POST /start` → 200 + `StateResponse` JSON
pub async fn post_start(State(state): State<AppState>) -> Json<StateResponse> {
    let mut service = lock(&state);
    service.start();
    Json(StateResponse::from(service.state_snapshot()))
}

/// `POST /stop` → 200 + `StateResponse` JSON
pub async fn post_stop(State(state): State<AppState>) -> Json<StateResponse> {
    let mut service = lock(&state);
    service.stop();
    Json(StateResponse::from(service.state_snapshot()))
}

/// Runs one monitoring cycle on demand.
///
/// `POST /tick` → 200 + `TickRecord` JSON
/// `POST /tick` while stopped → 409 + `ErrorResponse`
pub async fn post_tick(State(state): State<AppState>) -> impl IntoResponse {
    let mut service = lock(&state);
    match service.tick() {
        Some(snapshot) => Ok(Json(TickRecord::from(&snapshot))),
        None => Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse::single("monitoring service is not running")),
        )),
    }
}

/// `POST /alerts/clear` → 204
pub async fn post_clear_alerts(State(state): State<AppState>) -> StatusCode {
    let mut service = lock(&state);
    service.clear_alerts();
    StatusCode::NO_CONTENT
}

/// Flips an appliance on or off by name (case-insensitive).
///
/// `POST /appliances/{name}/toggle` → 200 + `ToggleResponse` JSON
/// Unknown name → 404 + `ErrorResponse`
pub async fn post_toggle(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let mut service = lock(&state);
    match service.toggle_appliance(&name) {
        Some(is_on) => Ok(Json(ToggleResponse {
            appliance: name,
            is_on,
        })),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::single(format!("no appliance named \"{name}\""))),
        )),
    }
}

/// Applies a validated settings update.
///
/// `PUT /settings` → 200 + `StateResponse` JSON
/// Invalid values → 422 + `ErrorResponse`; nothing is applied.
pub async fn put_settings(
    State(state): State<AppState>,
    Json(body): Json<SettingsBody>,
) -> impl IntoResponse {
    let update = SettingsUpdate {
        voltage_v: body.voltage_v,
        main_limit_a: body.main_limit_a,
        surge_threshold_a: body.surge_threshold_a,
        tariff_per_kwh: body.tariff_per_kwh,
        mode: body.mode,
    };

    let mut service = lock(&state);
    match service.update_settings(&update) {
        Ok(()) => Ok(Json(StateResponse::from(service.state_snapshot()))),
        Err(errors) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                errors: errors.iter().map(ToString::to_string).collect(),
            }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::model::{SimulationMode, SystemSettings};
    use crate::monitor::MonitoringService;

    fn make_test_state() -> AppState {
        let settings = SystemSettings {
            simulation_mode: SimulationMode::Scripted,
            ..SystemSettings::default()
        };
        Arc::new(Mutex::new(MonitoringService::new(settings, 42)))
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn state_returns_200_with_run_state() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/state")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["running"], false);
        assert_eq!(json["tick"], 0);
    }

    #[tokio::test]
    async fn appliances_lists_default_catalog() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/appliances")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json.as_array().map(Vec::len), Some(9));
        assert!(json[0].get("priority").is_some());
    }

    #[tokio::test]
    async fn groups_lists_default_circuits() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/groups")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json.as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn start_then_tick_returns_snapshot() {
        let state = make_test_state();

        let resp = router(state.clone())
            .oneshot(Request::builder().method("POST").uri("/start").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["running"], true);

        let resp = router(state)
            .oneshot(Request::builder().method("POST").uri("/tick").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["tick"], 0);
        assert!(json["total_current_a"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn tick_while_stopped_returns_409() {
        let app = router(make_test_state());

        let req = Request::builder()
            .method("POST")
            .uri("/tick")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn toggle_unknown_appliance_returns_404() {
        let app = router(make_test_state());

        let req = Request::builder()
            .method("POST")
            .uri("/appliances/Toaster/toggle")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn toggle_known_appliance_returns_new_state() {
        let app = router(make_test_state());

        let req = Request::builder()
            .method("POST")
            .uri("/appliances/Microwave/toggle")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["is_on"], true);
    }

    #[tokio::test]
    async fn invalid_settings_returns_422() {
        let app = router(make_test_state());

        let body = serde_json::json!({
            "voltage_v": -230.0,
            "main_limit_a": 40.0,
            "surge_threshold_a": 3.0,
            "tariff_per_kwh": 0.50,
            "mode": "replay",
        });
        let req = Request::builder()
            .method("PUT")
            .uri("/settings")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(resp).await;
        assert_eq!(json["errors"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn valid_settings_are_applied() {
        let state = make_test_state();

        let body = serde_json::json!({
            "voltage_v": 240.0,
            "main_limit_a": 63.0,
            "surge_threshold_a": 4.0,
            "tariff_per_kwh": 0.75,
            "mode": "random",
        });
        let req = Request::builder()
            .method("PUT")
            .uri("/settings")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = router(state.clone()).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let service = state.lock().unwrap();
        assert_eq!(service.settings().main_limit_a, 63.0);
        assert_eq!(service.settings().simulation_mode, SimulationMode::Random);
    }

    #[tokio::test]
    async fn clear_alerts_returns_204() {
        let state = make_test_state();
        state.lock().unwrap().start();

        let req = Request::builder()
            .method("POST")
            .uri("/alerts/clear")
            .body(Body::empty())
            .unwrap();
        let resp = router(state.clone()).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(state.lock().unwrap().alerts().is_empty());
    }
}
