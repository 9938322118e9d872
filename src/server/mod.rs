//! HTTP server and refresh loop
//!
//! The server keeps exactly one piece of state: the snapshot built by the most
//! recent refresh. Refreshes come from a periodic timer or from
//! `POST /api/refresh` and never run concurrently.

pub mod pipeline;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, RwLock};
use tokio::time::MissedTickBehavior;

use crate::analysis::snapshot::DashboardSnapshot;
use crate::core::error::{DashboardError, Result};
use crate::reporting::dashboard::RenderOptions;
use crate::reporting::logging;

pub use pipeline::{LoadResult, RefreshPipeline};
pub use routes::{RefreshSummary, router};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pipeline: RefreshPipeline,
    snapshot: Arc<RwLock<Arc<DashboardSnapshot>>>,
    refresh_lock: Arc<Mutex<()>>,
    render_options: Arc<RenderOptions>,
}

impl AppState {
    /// State holding the "no data" snapshot until the first refresh
    pub fn new(pipeline: RefreshPipeline, render_options: RenderOptions) -> Self {
        let empty = DashboardSnapshot::empty(pipeline.source().data_dir().to_path_buf());
        Self {
            pipeline,
            snapshot: Arc::new(RwLock::new(Arc::new(empty))),
            refresh_lock: Arc::new(Mutex::new(())),
            render_options: Arc::new(render_options),
        }
    }

    pub async fn snapshot(&self) -> Arc<DashboardSnapshot> {
        self.snapshot.read().await.clone()
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Run the pipeline and publish its snapshot
    pub async fn refresh(&self) -> Result<Arc<DashboardSnapshot>> {
        let _guard = self.refresh_lock.lock().await;

        let pipeline = self.pipeline.clone();
        let snapshot = tokio::task::spawn_blocking(move || pipeline.refresh())
            .await
            .map_err(|e| DashboardError::Server(format!("Refresh task failed: {e}")))?;

        let snapshot = Arc::new(snapshot);
        *self.snapshot.write().await = snapshot.clone();
        Ok(snapshot)
    }
}

/// Serves the dashboard and refreshes it on a timer
pub struct DashboardServer {
    state: AppState,
    refresh_interval: Duration,
}

impl DashboardServer {
    pub fn new(pipeline: RefreshPipeline, render_options: RenderOptions) -> Self {
        let refresh_interval = Duration::from_secs(render_options.refresh_interval_secs.max(1));
        Self {
            state: AppState::new(pipeline, render_options),
            refresh_interval,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Bind `address` and serve until Ctrl-C
    pub async fn run(self, address: &str) -> Result<()> {
        let listener = TcpListener::bind(address)
            .await
            .map_err(|e| DashboardError::Server(format!("Could not bind to {address}: {e}")))?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until Ctrl-C
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        if let Err(e) = self.state.refresh().await {
            logging::log_error("Initial refresh failed", Some(&e));
        }

        let timer = tokio::spawn(refresh_loop(self.state.clone(), self.refresh_interval));

        if let Ok(addr) = listener.local_addr() {
            log::info!("🌐 Dashboard available at http://{addr}");
        }

        let result = axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DashboardError::Server(e.to_string()));

        timer.abort();
        log::info!("Dashboard stopped");
        result
    }
}

async fn refresh_loop(state: AppState, every: Duration) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // first tick completes immediately

    loop {
        interval.tick().await;
        if let Err(e) = state.refresh().await {
            logging::log_error("Scheduled refresh failed", Some(&e));
        }
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        logging::log_warning("Could not listen for Ctrl-C; stop the process to exit");
        std::future::pending::<()>().await;
    }
}
