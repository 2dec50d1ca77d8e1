//! Timer-driven sync passes.

use crate::core::sync::SyncEngine;
use crate::utils::{LeadSyncError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

pub struct SyncScheduler {
    engine: Arc<SyncEngine>,
    interval: Duration,
    initial_delay: Duration,
}

impl SyncScheduler {
    pub fn new(engine: Arc<SyncEngine>, interval: Duration, initial_delay: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(LeadSyncError::config_error(
                "sync interval must be greater than zero to schedule passes",
            ));
        }

        Ok(Self {
            engine,
            interval,
            initial_delay,
        })
    }

    /// First pass after the initial delay, then one per interval counted from start.
    /// Each pass runs as its own task, so a slow pass never delays the timer and
    /// passes may overlap. Returns the number of passes started.
    pub async fn run_until<F>(self, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let initial = tokio::time::sleep(self.initial_delay);
        tokio::pin!(initial);
        let mut initial_fired = false;

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut passes = JoinSet::new();
        let mut started = 0;

        info!(
            interval_secs = self.interval.as_secs(),
            initial_delay_secs = self.initial_delay.as_secs(),
            "lead sync scheduled"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = &mut initial, if !initial_fired => {
                    initial_fired = true;
                    started += 1;
                    self.spawn_pass(&mut passes);
                }
                _ = ticker.tick() => {
                    started += 1;
                    self.spawn_pass(&mut passes);
                }
                Some(joined) = passes.join_next(), if !passes.is_empty() => {
                    if let Err(e) = joined {
                        error!(error = %e, "sync pass task failed");
                    }
                }
            }
        }

        info!(passes = started, "lead sync scheduler stopping");
        passes.shutdown().await;
        started
    }

    fn spawn_pass(&self, passes: &mut JoinSet<()>) {
        let engine = Arc::clone(&self.engine);
        passes.spawn(async move {
            // Fetch failures are already logged by the engine; the timer keeps going.
            let _ = engine.run_pass().await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::default_config;
    use crate::core::store::InMemoryDeliveredStore;
    use crate::test_utils::fakes::{FakeSource, RecordingSink};

    fn engine(source: Arc<FakeSource>) -> Arc<SyncEngine> {
        Arc::new(SyncEngine::new(
            &default_config(),
            source,
            Arc::new(RecordingSink::replying("ok")),
            InMemoryDeliveredStore::shared(),
        ))
    }

    #[test]
    fn test_zero_interval_rejected() {
        let source = Arc::new(FakeSource::new(Vec::new()));
        let result = SyncScheduler::new(engine(source), Duration::ZERO, Duration::from_secs(1));
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_pass_then_interval() {
        let source = Arc::new(FakeSource::new(Vec::new()));
        let scheduler = SyncScheduler::new(
            engine(source.clone()),
            Duration::from_secs(300),
            Duration::from_secs(30),
        )
        .unwrap();

        // Passes at 30s, 300s and 600s.
        let started = scheduler
            .run_until(tokio::time::sleep(Duration::from_secs(650)))
            .await;

        assert_eq!(started, 3);
        assert_eq!(source.fetch_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failures_do_not_stop_the_timer() {
        let source = Arc::new(FakeSource::failing());
        let scheduler = SyncScheduler::new(
            engine(source.clone()),
            Duration::from_secs(10),
            Duration::from_secs(1),
        )
        .unwrap();

        let started = scheduler
            .run_until(tokio::time::sleep(Duration::from_secs(35)))
            .await;

        assert_eq!(started, 4);
        assert_eq!(source.fetch_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_before_first_pass() {
        let source = Arc::new(FakeSource::new(Vec::new()));
        let scheduler = SyncScheduler::new(
            engine(source.clone()),
            Duration::from_secs(300),
            Duration::from_secs(30),
        )
        .unwrap();

        let started = scheduler.run_until(async {}).await;
        assert_eq!(started, 0);
        assert_eq!(source.fetch_count(), 0);
    }
}
