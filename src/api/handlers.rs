//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, ModeRequest, StateResponse, TelemetryQuery, TelemetryRecord};
use crate::sim::recommend::{Recommendation, recommendations};
use crate::sim::types::TickOutput;

fn bad_request(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// Runs one tick.
///
/// `POST /tick` → 200 + `TickOutput` JSON
pub async fn post_tick(State(state): State<Arc<AppState>>) -> Json<TickOutput> {
    Json(state.tick().await)
}

/// Returns mode, battery level, latest tick, and run summary.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let sim = state.lock().await;
    Json(StateResponse {
        mode: sim.engine.mode(),
        battery_level: sim.engine.battery_level(),
        ticks: sim.ticks(),
        latest: sim.latest().cloned(),
        summary: sim.summary().clone(),
    })
}

/// Returns retained energy records, optionally filtered by tick index range.
///
/// Indices count from the start of the run, so they stay stable as old
/// ticks are evicted.
///
/// `GET /telemetry` → 200 + `Vec<TelemetryRecord>` JSON
/// `GET /telemetry?from=N&to=M` → filtered range (inclusive)
/// `GET /telemetry?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_telemetry(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TelemetryQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err(bad_request(format!(
            "`from` ({from}) must be <= `to` ({to})"
        )));
    }

    let sim = state.lock().await;
    let first = sim.first_index();
    let records: Vec<TelemetryRecord> = sim
        .history()
        .iter()
        .enumerate()
        .map(|(i, o)| (first + i, o))
        .filter(|(i, _)| *i >= from && *i <= to)
        .map(|(index, o)| TelemetryRecord {
            index,
            record: o.energy_record.clone(),
        })
        .collect();

    Ok(Json(records))
}

/// Switches the engine mode; effective from the next tick.
///
/// `PUT /mode` → 200 + `{"mode": ...}`
/// unknown mode → 400 + `ErrorResponse`
pub async fn put_mode(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ModeRequest>,
) -> impl IntoResponse {
    let mut sim = state.lock().await;
    match sim.engine.set_mode(&req.mode, req.api_key) {
        Ok(()) => Ok(Json(serde_json::json!({ "mode": sim.engine.mode() }))),
        Err(e) => Err(bad_request(e.to_string())),
    }
}

/// Returns advisories for the latest tick, or an empty list before the first.
///
/// `GET /recommendations` → 200 + `Vec<Recommendation>` JSON
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<Recommendation>> {
    let sim = state.lock().await;
    let recs = sim
        .latest()
        .map(|o| recommendations(&o.energy_record, &o.weather_sample, &o.prediction))
        .unwrap_or_default();
    Json(recs)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::devices::BatteryBank;
    use crate::sim::clock::{SimClock, month_start};
    use crate::sim::engine::{Engine, Integrator};

    fn make_test_state(ticks: usize) -> Arc<AppState> {
        let engine = Engine::new(
            Integrator::default(),
            BatteryBank::default(),
            SimClock::simulated(month_start(2025, 5).unwrap(), 60),
            StdRng::seed_from_u64(42),
        );
        let state = Arc::new(AppState::new(engine));
        {
            let mut sim = state.sim.try_lock().unwrap();
            for _ in 0..ticks {
                let out = sim.engine.tick();
                sim.record(out);
            }
        }
        state
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn tick_returns_output_and_grows_history() {
        let state = make_test_state(0);
        let app = router(Arc::clone(&state));

        let req = Request::builder()
            .method("POST")
            .uri("/tick")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert!(json.get("energyRecord").is_some());
        assert!(json.get("weatherSample").is_some());
        assert_eq!(state.lock().await.history().len(), 1);
    }

    #[tokio::test]
    async fn state_reports_summary() {
        let app = router(make_test_state(24));
        let req = Request::builder()
            .uri("/state")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["ticks"], 24);
        assert_eq!(json["mode"], "online");
        assert_eq!(json["summary"]["ticks"], 24);
        assert!(json["latest"].is_object());
    }

    #[tokio::test]
    async fn telemetry_range_query() {
        let app = router(make_test_state(24));
        let req = Request::builder()
            .uri("/telemetry?from=5&to=10")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 6); // indices 5..=10
        assert_eq!(rows[0]["index"], 5);
        assert_eq!(rows[5]["index"], 10);
    }

    #[tokio::test]
    async fn state_summary_counts_evicted_ticks() {
        let state = Arc::new(AppState::with_history(
            Engine::new(
                Integrator::default(),
                BatteryBank::default(),
                SimClock::simulated(month_start(2025, 5).unwrap(), 60),
                StdRng::seed_from_u64(42),
            ),
            Vec::new(),
            3,
        ));
        let mut records = Vec::new();
        for _ in 0..10 {
            records.push(state.tick().await.energy_record);
        }
        let sim = state.lock().await;
        assert_eq!(sim.history().len(), 3);
        assert_eq!(sim.first_index(), 7);
        assert_eq!(*sim.summary(), crate::sim::kpi::RunSummary::from_records(&records, 1.0));
    }

    #[tokio::test]
    async fn telemetry_invalid_range_returns_400() {
        let app = router(make_test_state(3));
        let req = Request::builder()
            .uri("/telemetry?from=10&to=5")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await.get("error").is_some());
    }

    #[tokio::test]
    async fn put_mode_switches_and_rejects_unknown() {
        let state = make_test_state(0);

        let req = Request::builder()
            .method("PUT")
            .uri("/mode")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"mode":"offline"}"#))
            .unwrap();
        let resp = router(Arc::clone(&state)).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["mode"], "offline");

        let req = Request::builder()
            .method("PUT")
            .uri("/mode")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"mode":"solar"}"#))
            .unwrap();
        let resp = router(Arc::clone(&state)).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let out = state.tick().await;
        assert!(out.sensor_sample.is_some());
    }

    #[tokio::test]
    async fn recommendations_empty_before_first_tick() {
        let req = Request::builder()
            .uri("/recommendations")
            .body(Body::empty())
            .unwrap();
        let resp = router(make_test_state(0)).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn recommendations_after_tick() {
        let req = Request::builder()
            .uri("/recommendations")
            .body(Body::empty())
            .unwrap();
        let resp = router(make_test_state(1)).oneshot(req).await.unwrap();
        let json = body_json(resp).await;
        let recs = json.as_array().unwrap();
        assert!(!recs.is_empty());
        assert!(recs[0].get("priority").is_some());
    }
}
