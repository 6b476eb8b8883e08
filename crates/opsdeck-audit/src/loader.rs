//! Log sources and the simulated dashboard load

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::{AuditError, AuditResult};
use crate::normalize::normalize_records;
use crate::record::LogRecord;

/// Delay applied before a load resolves, mimicking a network round trip
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(800);

/// Supplier of raw log payloads
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetch the raw payload; only its shape matters to the normalizer
    async fn fetch(&self) -> AuditResult<Value>;
}

/// Log source backed by an in-memory payload
#[derive(Debug, Clone)]
pub struct StaticLogSource {
    payload: Value,
}

impl StaticLogSource {
    /// Serve `payload` on every fetch
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }
}

#[async_trait]
impl LogSource for StaticLogSource {
    async fn fetch(&self) -> AuditResult<Value> {
        Ok(self.payload.clone())
    }
}

/// Log source reading a JSON file on every fetch
#[derive(Debug, Clone)]
pub struct JsonFileLogSource {
    path: PathBuf,
}

impl JsonFileLogSource {
    /// Read from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LogSource for JsonFileLogSource {
    async fn fetch(&self) -> AuditResult<Value> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AuditError::SourceError {
                message: format!("failed to read {}: {}", self.path.display(), e),
            })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// State of the dashboard's data load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Initial fetch in flight; the dashboard shows a spinner
    Loading,
    /// Records are available
    Ready(Vec<LogRecord>),
    /// The fetch failed; the dashboard shows an error and does not retry
    Failed(String),
}

impl LoadState {
    /// Records when ready
    pub fn records(&self) -> Option<&[LogRecord]> {
        match self {
            LoadState::Ready(records) => Some(records),
            _ => None,
        }
    }
}

/// Loads records from a [`LogSource`] after a fixed delay.
///
/// Refreshes are fire-and-forget with no cancellation. When several overlap,
/// whichever finishes last overwrites the state.
#[derive(Clone)]
pub struct LogLoader {
    source: Arc<dyn LogSource>,
    delay: Duration,
    state: Arc<RwLock<LoadState>>,
}

impl LogLoader {
    /// Create a loader in the [`LoadState::Loading`] state
    pub fn new(source: Arc<dyn LogSource>, delay: Duration) -> Self {
        Self {
            source,
            delay,
            state: Arc::new(RwLock::new(LoadState::Loading)),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> LoadState {
        self.state.read().await.clone()
    }

    /// Initial load: enter `Loading`, wait, fetch and publish the outcome
    pub async fn load(&self) -> LoadState {
        *self.state.write().await = LoadState::Loading;
        self.fetch_and_publish().await
    }

    /// Refresh in the background; current records stay visible until it lands
    pub fn spawn_refresh(&self) -> JoinHandle<LoadState> {
        let loader = self.clone();
        tokio::spawn(async move { loader.fetch_and_publish().await })
    }

    async fn fetch_and_publish(&self) -> LoadState {
        tokio::time::sleep(self.delay).await;

        let next = match self.source.fetch().await {
            Ok(raw) => {
                let records = normalize_records(&raw);
                info!("Loaded {} audit records", records.len());
                LoadState::Ready(records)
            }
            Err(e) => {
                error!("Failed to load audit records: {}", e);
                LoadState::Failed(e.to_string())
            }
        };

        *self.state.write().await = next.clone();
        next
    }
}
