//! REST API over a live simulation engine.
//!
//! Endpoints:
//! - `POST /tick` runs one tick and returns its output
//! - `GET /state` reports mode, battery level, latest tick, and run summary
//! - `GET /telemetry` returns emitted records with optional index range
//! - `PUT /mode` switches between online and offline mode
//! - `GET /recommendations` lists advisories for the latest tick
//!
//! A background ticker can drive the engine at a fixed interval; request
//! handlers and the ticker share the engine through one async mutex, so
//! ticks are serialized. Only the most recent ticks are retained; the run
//! summary keeps counting every tick.

mod handlers;
mod types;

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post, put};
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::sim::engine::Engine;
use crate::sim::kpi::RunSummary;
use crate::sim::types::TickOutput;
use crate::telemetry::shutdown_signal;

pub use types::{ErrorResponse, ModeRequest, StateResponse, TelemetryQuery, TelemetryRecord};

/// Ticks retained for `/telemetry` unless configured otherwise.
pub const DEFAULT_HISTORY_CAP: usize = 8_760;

/// Engine plus a bounded window of the ticks it has produced.
#[derive(Debug)]
pub struct Simulation {
    pub engine: Engine<StdRng>,
    history: VecDeque<TickOutput>,
    cap: usize,
    ticks: usize,
    summary: RunSummary,
}

impl Simulation {
    fn new(engine: Engine<StdRng>, cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            engine,
            history: VecDeque::with_capacity(cap.min(DEFAULT_HISTORY_CAP)),
            cap,
            ticks: 0,
            summary: RunSummary::default(),
        }
    }

    /// Appends a tick, evicting the oldest once the window is full.
    pub fn record(&mut self, out: TickOutput) {
        let step_hours = self.engine.clock().step_hours();
        self.summary.record(&out.energy_record, step_hours);
        self.ticks += 1;
        if self.history.len() == self.cap {
            self.history.pop_front();
        }
        self.history.push_back(out);
    }

    /// Retained ticks, oldest first.
    pub fn history(&self) -> &VecDeque<TickOutput> {
        &self.history
    }

    /// Run index of the oldest retained tick.
    pub fn first_index(&self) -> usize {
        self.ticks - self.history.len()
    }

    /// Ticks produced so far, including evicted ones.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn latest(&self) -> Option<&TickOutput> {
        self.history.back()
    }

    /// Summary over every tick produced so far.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }
}

/// Application state shared across request handlers and the ticker.
#[derive(Debug)]
pub struct AppState {
    sim: Mutex<Simulation>,
}

impl AppState {
    pub fn new(engine: Engine<StdRng>) -> Self {
        Self::with_history(engine, Vec::new(), DEFAULT_HISTORY_CAP)
    }

    /// Wraps an engine that has already produced `history`, retaining at
    /// most `cap` ticks.
    pub fn with_history(engine: Engine<StdRng>, history: Vec<TickOutput>, cap: usize) -> Self {
        let mut sim = Simulation::new(engine, cap);
        for out in history {
            sim.record(out);
        }
        Self {
            sim: Mutex::new(sim),
        }
    }

    /// Runs one tick under the lock and records its output.
    pub async fn tick(&self) -> TickOutput {
        let mut sim = self.sim.lock().await;
        let out = sim.engine.tick();
        sim.record(out.clone());
        out
    }

    /// Locks the simulation for inspection or mode changes.
    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, Simulation> {
        self.sim.lock().await
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tick", post(handlers::post_tick))
        .route("/state", get(handlers::get_state))
        .route("/telemetry", get(handlers::get_telemetry))
        .route("/mode", put(handlers::put_mode))
        .route("/recommendations", get(handlers::get_recommendations))
        .with_state(state)
}

/// Spawns a task that ticks the engine every `period`.
///
/// Abort the returned handle to stop scheduling further ticks.
pub fn spawn_ticker(state: Arc<AppState>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // the first interval tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let out = state.tick().await;
            debug!(
                timestamp = %out.energy_record.timestamp,
                fallback = out.fallback,
                "background tick"
            );
        }
    })
}

/// Binds to the given address and serves the API until shutdown.
///
/// When `tick_every` is set, a background ticker drives the engine for the
/// lifetime of the server.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(
    state: Arc<AppState>,
    addr: SocketAddr,
    tick_every: Option<Duration>,
) -> std::io::Result<()> {
    let ticker = tick_every.map(|p| spawn_ticker(Arc::clone(&state), p));
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(handle) = ticker {
        handle.abort();
    }
    result
}
