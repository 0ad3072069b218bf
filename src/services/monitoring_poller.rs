//! Periodic monitoring snapshot poller.
//!
//! The poller fetches a snapshot immediately and then once per interval,
//! keeping only the latest snapshot and the latest error. Every poll runs in
//! its own task, so a slow poll can still be in flight when the next one
//! starts. Each poll is stamped with a generation number and its result is
//! applied only if no newer poll has been applied already.
//!
//! Stopping the poller (or dropping it) cancels the timer. Polls that are
//! already in flight are allowed to finish.

use crate::{
    config::MonitoringPollerConfig,
    models::{MonitorStatus, MonitoringSnapshot},
    services::api_client::{ApiClient, ApiError},
    usecases::get_monitoring_status,
};
use chrono::{DateTime, Utc};
use std::{
    future::Future,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, warn};

/// `tokio::time::interval` panics on a zero period.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Where snapshots come from
pub trait MonitoringSource: Send + Sync + 'static {
    fn fetch_snapshot(&self) -> impl Future<Output = Result<MonitoringSnapshot, ApiError>> + Send;
}

impl MonitoringSource for ApiClient {
    fn fetch_snapshot(&self) -> impl Future<Output = Result<MonitoringSnapshot, ApiError>> + Send {
        get_monitoring_status(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// No poll has completed yet
    Loading,
    /// The latest applied poll succeeded
    Ready,
    /// The latest applied poll failed; any earlier snapshot is retained
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct MonitoringState {
    pub snapshot: Option<MonitoringSnapshot>,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl MonitoringState {
    pub fn phase(&self) -> PollPhase {
        if self.error.is_some() {
            PollPhase::Error
        } else if self.snapshot.is_some() {
            PollPhase::Ready
        } else {
            PollPhase::Loading
        }
    }

    pub fn monitors(&self) -> &[MonitorStatus] {
        self.snapshot
            .as_ref()
            .map(|s| s.monitors.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct Shared {
    state: MonitoringState,
    applied_generation: u64,
}

impl Shared {
    fn apply(&mut self, generation: u64, result: Result<MonitoringSnapshot, ApiError>) {
        if generation < self.applied_generation {
            debug!(
                generation,
                applied = self.applied_generation,
                "Discarding stale monitoring result"
            );
            return;
        }
        self.applied_generation = generation;

        match result {
            Ok(snapshot) => {
                self.state.snapshot = Some(snapshot);
                self.state.error = None;
                self.state.last_updated = Some(Utc::now());
            }
            Err(e) => {
                warn!(generation, error = %e, "Monitoring poll failed");
                self.state.error = Some(e.to_string());
            }
        }
    }
}

pub struct MonitoringPoller<S: MonitoringSource> {
    source: Arc<S>,
    shared: Arc<Mutex<Shared>>,
    next_generation: Arc<AtomicU64>,
    timer: JoinHandle<()>,
}

impl<S: MonitoringSource> MonitoringPoller<S> {
    /// Start polling `source` every `interval`, beginning immediately.
    /// Must be called from within a tokio runtime. Intervals shorter than
    /// [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn start(source: Arc<S>, interval: Duration) -> Self {
        let interval = interval.max(MIN_POLL_INTERVAL);
        let shared = Arc::new(Mutex::new(Shared::default()));
        let next_generation = Arc::new(AtomicU64::new(1));

        let timer = tokio::spawn({
            let source = Arc::clone(&source);
            let shared = Arc::clone(&shared);
            let next_generation = Arc::clone(&next_generation);
            async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    let generation = next_generation.fetch_add(1, Ordering::SeqCst);
                    spawn_poll(Arc::clone(&source), Arc::clone(&shared), generation);
                }
            }
        });

        Self {
            source,
            shared,
            next_generation,
            timer,
        }
    }

    /// Start polling at the configured interval.
    pub fn from_config(source: Arc<S>, config: &MonitoringPollerConfig) -> Self {
        Self::start(source, config.interval())
    }

    /// Trigger an out-of-schedule poll. The handle resolves once its result
    /// has been applied or discarded.
    pub fn refresh(&self) -> JoinHandle<()> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        spawn_poll(Arc::clone(&self.source), Arc::clone(&self.shared), generation)
    }

    /// Copy of the latest state
    pub fn state(&self) -> MonitoringState {
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// Cancel the timer. In-flight polls still complete.
    pub fn stop(self) {
        self.timer.abort();
    }
}

impl<S: MonitoringSource> Drop for MonitoringPoller<S> {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

fn spawn_poll<S: MonitoringSource>(
    source: Arc<S>,
    shared: Arc<Mutex<Shared>>,
    generation: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = source.fetch_snapshot().await;
        shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(generation, result);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonitoringSummary;

    fn snapshot(total: usize) -> MonitoringSnapshot {
        MonitoringSnapshot {
            monitors: Vec::new(),
            summary: MonitoringSummary {
                total,
                ..MonitoringSummary::default()
            },
            insights: None,
        }
    }

    #[test]
    fn test_phase_transitions() {
        let mut shared = Shared::default();
        assert_eq!(shared.state.phase(), PollPhase::Loading);

        shared.apply(1, Ok(snapshot(1)));
        assert_eq!(shared.state.phase(), PollPhase::Ready);

        shared.apply(2, Err(ApiError::Timeout));
        assert_eq!(shared.state.phase(), PollPhase::Error);
        assert_eq!(shared.state.snapshot, Some(snapshot(1)));

        shared.apply(3, Ok(snapshot(2)));
        assert_eq!(shared.state.phase(), PollPhase::Ready);
        assert!(shared.state.error.is_none());
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut shared = Shared::default();
        shared.apply(5, Ok(snapshot(5)));
        shared.apply(4, Ok(snapshot(4)));
        shared.apply(3, Err(ApiError::Timeout));

        assert_eq!(shared.state.snapshot, Some(snapshot(5)));
        assert!(shared.state.error.is_none());
    }
}
