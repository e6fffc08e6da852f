//! Background health polling.
//!
//! [`HealthMonitor`] polls the service's health endpoint on a fixed interval,
//! independent of anything the user does, and publishes the latest
//! [`HealthSignal`] through a watch channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use sitescope_types::HealthStatus;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{AnalyzerApi, RequestError};

/// Default time between two health polls.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Online/offline state derived from the latest poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthSignal {
    pub is_online: bool,
    pub last_error: Option<String>,
    /// When the latest poll finished. None until the first poll completes.
    pub checked_at: Option<DateTime<Local>>,
}

impl HealthSignal {
    /// Derive a signal from a poll outcome.
    ///
    /// The service is online only if it answered with status `ok`. Any other
    /// status means offline without an error message.
    pub fn from_outcome(outcome: Result<HealthStatus, RequestError>) -> Self {
        let (is_online, last_error) = match outcome {
            Ok(status) => (status.is_ok(), None),
            Err(err) => (false, Some(err.to_string())),
        };
        Self {
            is_online,
            last_error,
            checked_at: Some(Local::now()),
        }
    }

    /// True until the first poll has completed.
    pub fn is_checking(&self) -> bool {
        self.checked_at.is_none()
    }
}

/// Lifecycle of a [`HealthMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Polling,
    Stopped,
}

/// Polls `check_health` on a fixed interval.
///
/// At most one poll is in flight or scheduled at a time; the next one is only
/// scheduled after the previous one finished. Dropping the monitor stops it.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use sitescope::{HealthMonitor, HttpGateway};
///
/// # tokio_test::block_on(async {
/// let gateway = HttpGateway::builder().build().unwrap();
/// let mut monitor = HealthMonitor::start(Arc::new(gateway), Duration::from_secs(60));
///
/// monitor.changed().await;
/// println!("online: {}", monitor.signal().is_online);
/// monitor.stop();
/// # });
/// ```
#[derive(Debug)]
pub struct HealthMonitor {
    signal_rx: watch::Receiver<HealthSignal>,
    stop_tx: watch::Sender<bool>,
    alive: Arc<Mutex<bool>>,
    polls: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl HealthMonitor {
    /// Start polling in the background. Must be called within a tokio
    /// runtime. The first poll is issued immediately.
    pub fn start(api: Arc<dyn AnalyzerApi>, interval: Duration) -> Self {
        let (signal_tx, signal_rx) = watch::channel(HealthSignal::default());
        let (stop_tx, stop_rx) = watch::channel(false);
        let alive = Arc::new(Mutex::new(true));
        let polls = Arc::new(AtomicU64::new(0));

        let task = tokio::spawn(poll_loop(
            api,
            interval,
            signal_tx,
            stop_rx,
            alive.clone(),
            polls.clone(),
        ));

        info!("health monitor started (every {:?})", interval);

        Self {
            signal_rx,
            stop_tx,
            alive,
            polls,
            task: Some(task),
        }
    }

    /// The latest signal.
    pub fn signal(&self) -> HealthSignal {
        self.signal_rx.borrow().clone()
    }

    /// Number of polls that have completed, including discarded ones.
    pub fn polls(&self) -> u64 {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> MonitorState {
        if self.task.is_some() {
            MonitorState::Polling
        } else {
            MonitorState::Stopped
        }
    }

    /// Wait for the next published signal.
    ///
    /// Returns false once the monitor is stopped and no more signals will
    /// arrive.
    pub async fn changed(&mut self) -> bool {
        self.signal_rx.changed().await.is_ok()
    }

    /// Stop polling.
    ///
    /// A poll in flight is abandoned and its result is never published.
    /// Calling `stop` twice is a no-op.
    pub fn stop(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };

        // Once this is false the poll loop will not publish again.
        *self.alive.lock() = false;
        let _ = self.stop_tx.send(true);
        task.abort();

        info!("health monitor stopped after {} polls", self.polls());
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop(
    api: Arc<dyn AnalyzerApi>,
    interval: Duration,
    signal_tx: watch::Sender<HealthSignal>,
    mut stop_rx: watch::Receiver<bool>,
    alive: Arc<Mutex<bool>>,
    polls: Arc<AtomicU64>,
) {
    loop {
        let outcome = tokio::select! {
            _ = stop_rx.changed() => break,
            outcome = api.check_health() => outcome,
        };
        polls.fetch_add(1, Ordering::SeqCst);

        if let Err(ref err) = outcome {
            warn!("health check failed: {}", err);
        }
        let signal = HealthSignal::from_outcome(outcome);

        {
            let alive = alive.lock();
            if !*alive {
                debug!("discarding health result received after stop");
                break;
            }

            let was_online = signal_tx.borrow().is_online;
            if was_online != signal.is_online {
                info!(
                    "service is now {}",
                    if signal.is_online { "online" } else { "offline" }
                );
            }
            let _ = signal_tx.send(signal);
        }

        tokio::select! {
            _ = stop_rx.changed() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
}
