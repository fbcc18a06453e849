//! Latest - handle to a single-value cell
//!
//! The handle owns the lazily created channels to the coordination task.
//! Share it between tasks behind an `Arc`.

use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::config::LatestConfig;
use super::core::{self, PhaseCell};
use super::error::{LatestError, LatestResult};
use super::messages::{CellPhase, GetRequest, PutRequest};

/// Channels to a running coordination task
struct Channels<T> {
    /// Inbound sender; `None` once stopped
    put_tx: Mutex<Option<mpsc::Sender<PutRequest<T>>>>,

    /// Outbound request sender
    get_tx: mpsc::Sender<GetRequest<T>>,

    /// Task phase, written by the task
    phase: PhaseCell,
}

/// A thread-safe cell holding the latest value put into it
///
/// `get` returns the value of the last completed `put`, or of a `put`
/// running concurrently with it. If nothing has been put yet, `get` waits.
///
/// The coordination task is spawned on the current Tokio runtime by the
/// first call to [`put`](Self::put), [`get`](Self::get) or
/// [`stop`](Self::stop).
///
/// # Panics
///
/// The first operation panics if called outside a Tokio runtime.
///
/// # Example
///
/// ```
/// use latestcell::Latest;
///
/// # #[tokio::main]
/// # async fn main() -> latestcell::LatestResult<()> {
/// let cell = Latest::new();
/// cell.put("x").await?;
/// cell.put("y").await?;
/// assert_eq!(cell.get().await, Some("y"));
///
/// cell.stop();
/// assert_eq!(cell.get().await, None);
/// # Ok(())
/// # }
/// ```
pub struct Latest<T> {
    config: LatestConfig,
    channels: OnceLock<Channels<T>>,
}

impl<T> Latest<T> {
    /// Create an unstarted cell with the default configuration
    pub fn new() -> Self {
        Self::with_config(LatestConfig::default())
    }

    /// Create an unstarted cell with the given configuration
    pub fn with_config(config: LatestConfig) -> Self {
        debug!(?config, "Latest::with_config: called");
        Self {
            config,
            channels: OnceLock::new(),
        }
    }

    /// Configuration this cell was built with
    pub fn config(&self) -> &LatestConfig {
        &self.config
    }

    /// Whether the coordination task has been launched
    pub fn is_started(&self) -> bool {
        self.channels.get().is_some()
    }

    /// Whether `stop` has been called
    pub fn is_stopped(&self) -> bool {
        self.channels
            .get()
            .is_some_and(|channels| channels.put_tx.lock().is_none())
    }

    /// Current phase of the coordination task
    pub fn phase(&self) -> CellPhase {
        self.channels
            .get()
            .map_or(CellPhase::NotStarted, |channels| channels.phase.load())
    }
}

impl<T> Latest<T>
where
    T: Clone + Send + 'static,
{
    /// Start the coordination task exactly once
    fn channels(&self) -> &Channels<T> {
        self.channels.get_or_init(|| {
            let (put_tx, put_rx) = mpsc::channel(self.config.put_capacity());
            let (get_tx, get_rx) = mpsc::channel(self.config.get_capacity());
            let phase = PhaseCell::new(CellPhase::WaitingForFirstValue);

            tokio::spawn(core::run(put_rx, get_rx, phase.clone()));
            info!("Latest spawned");

            Channels {
                put_tx: Mutex::new(Some(put_tx)),
                get_tx,
                phase,
            }
        })
    }

    /// Replace the current value
    ///
    /// Returns once the coordination task has taken the value, so a `get`
    /// that starts afterwards sees it or something newer.
    pub async fn put(&self, value: T) -> LatestResult<()> {
        debug!("Latest::put: called");
        let tx = self.channels().put_tx.lock().clone().ok_or(LatestError::Stopped)?;

        let (ack, ack_rx) = oneshot::channel();
        tx.send(PutRequest { value, ack })
            .await
            .map_err(|_| LatestError::Stopped)?;
        // Release our sender so a concurrent stop can close the channel
        drop(tx);

        ack_rx.await.map_err(|_| LatestError::Stopped)?;
        debug!("Latest::put: accepted");
        Ok(())
    }

    /// Get the current value
    ///
    /// Waits until the first value has been put. Returns `None` once the
    /// cell is stopped, including for reads already waiting when it stops.
    pub async fn get(&self) -> Option<T> {
        debug!("Latest::get: called");
        let channels = self.channels();
        if channels.put_tx.lock().is_none() {
            debug!("Latest::get: cell stopped");
            return None;
        }

        let (reply, reply_rx) = oneshot::channel();
        channels.get_tx.send(GetRequest { reply }).await.ok()?;

        let result = reply_rx.await.ok();
        if result.is_none() {
            debug!("Latest::get: stopped while waiting");
        }
        result
    }

    /// Stop the coordination task
    ///
    /// Closes the inbound channel. The task then fails any pending reads and
    /// exits. Later puts return [`LatestError::Stopped`], later gets `None`.
    /// Calling this twice only logs a warning.
    pub fn stop(&self) {
        debug!("Latest::stop: called");
        match self.channels().put_tx.lock().take() {
            Some(tx) => {
                drop(tx);
                info!("Latest stop requested");
            }
            None => warn!("Latest::stop: already stopped"),
        }
    }
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Latest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Latest")
            .field("config", &self.config)
            .field("phase", &self.phase())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
