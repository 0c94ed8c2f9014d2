//! Background refresh loop
//!
//! Runs the fetch cycle for the configured feeds on a fixed interval, as an
//! in-process alternative to hitting `/feed/cron` from an external scheduler.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info};

use super::fetch_service::FetchService;
use crate::domain::ports::{ActivityClient, FetchStore};

pub struct RefreshScheduler<S, C>
where
    S: FetchStore + ?Sized,
    C: ActivityClient + ?Sized,
{
    service: Arc<FetchService<S, C>>,
    feed_ids: Vec<String>,
    interval: Duration,
}

impl<S, C> RefreshScheduler<S, C>
where
    S: FetchStore + ?Sized,
    C: ActivityClient + ?Sized,
{
    pub fn new(service: Arc<FetchService<S, C>>, feed_ids: Vec<String>, interval: Duration) -> Self {
        Self {
            service,
            feed_ids,
            interval,
        }
    }

    /// Run until the shutdown flag flips to `true` or its sender is dropped.
    ///
    /// A failed cycle is logged and the next one runs on schedule.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Refresh scheduler started: every {}s for {} feed(s)",
            self.interval.as_secs(),
            self.feed_ids.len()
        );

        let mut interval = tokio::time::interval(self.interval);
        // Skip the first tick (fires immediately)
        interval.tick().await;

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Refresh scheduler received shutdown signal");
                        break;
                    }
                }

                _ = interval.tick() => {
                    debug!("Running scheduled fetch cycle");
                    match self.service.run_cycle(&self.feed_ids).await {
                        Ok(fetches) => info!("Scheduled fetch cycle stored {} feed(s)", fetches.len()),
                        Err(e) => error!("Scheduled fetch cycle failed: {}", e),
                    }
                }
            }
        }
    }
}
