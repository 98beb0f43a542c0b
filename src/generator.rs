use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::cache::SnapshotCache;
use crate::constants::LEGAL_NOTICE;
use crate::forecast::{fetch_fix_snapshot, ForecastTransport};
use crate::regions::RegionCatalog;
use crate::types::{Region, RegionSnapshot, SnapshotInfo};
use crate::utils::{compact_datestring, hour_index, iso_timestamp};

/// Builds one snapshot per configured region and is the only writer of the
/// snapshot cache.
pub struct SnapshotGenerator<T> {
    transport: T,
    forecast_base_url: String,
    catalog: Arc<RegionCatalog>,
    cache: Arc<SnapshotCache>,
    running: AtomicBool,
}

impl<T: ForecastTransport> SnapshotGenerator<T> {
    pub fn new(
        transport: T,
        forecast_base_url: impl Into<String>,
        catalog: Arc<RegionCatalog>,
        cache: Arc<SnapshotCache>,
    ) -> Self {
        Self {
            transport,
            forecast_base_url: forecast_base_url.into(),
            catalog,
            cache,
            running: AtomicBool::new(false),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Regenerates every region in catalog order. The first failing region
    /// keeps its previous cache entry and ends the pass with its error.
    pub async fn generate_all(&self) -> Result<HashMap<String, Arc<RegionSnapshot>>> {
        let started = Instant::now();
        let regions = self.catalog.regions();
        info!("Generating snapshots for {} regions", regions.len());

        for region in regions {
            self.generate_region(region, Utc::now()).await?;
        }

        info!(
            "Generated {} region snapshots in {:.1}s",
            regions.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(self.cache.entries())
    }

    /// Fetches every fix of `region` for the UTC hour of `now`, one request at
    /// a time, and replaces the region's cache entry once all fixes succeeded.
    pub async fn generate_region(&self, region: &Region, now: DateTime<Utc>) -> Result<()> {
        let hour = hour_index(now);
        let mut data = IndexMap::with_capacity(region.fixes.len());

        for fix in &region.fixes {
            let snapshot = fetch_fix_snapshot(&self.transport, &self.forecast_base_url, fix, hour)
                .await
                .with_context(|| {
                    format!("Snapshot generation failed for region {}", region.identifier)
                })?;
            data.insert(fix.name.clone(), snapshot);
        }

        let snapshot = RegionSnapshot {
            info: SnapshotInfo {
                date: iso_timestamp(now),
                datestring: compact_datestring(now),
                legal: LEGAL_NOTICE.to_string(),
            },
            data,
        };
        info!(
            "Region {} snapshot {} ready ({} fixes)",
            region.identifier,
            snapshot.info.datestring,
            snapshot.data.len()
        );
        self.cache.replace(&region.identifier, snapshot);
        Ok(())
    }
}

struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Starts a detached generation pass unless one is already in flight.
/// Failures are logged and never reach the caller. Returns whether a pass was
/// started.
pub fn trigger_generation<T>(generator: Arc<SnapshotGenerator<T>>) -> bool
where
    T: ForecastTransport + 'static,
{
    if generator.running.swap(true, Ordering::AcqRel) {
        warn!("Snapshot generation still running; skipping trigger");
        return false;
    }

    tokio::spawn(async move {
        let _guard = RunningGuard(&generator.running);
        if let Err(error) = generator.generate_all().await {
            error!("Snapshot generation failed: {error:#}");
        }
    });
    true
}

pub fn spawn_refresh_worker<T>(generator: Arc<SnapshotGenerator<T>>, period: Duration)
where
    T: ForecastTransport + 'static,
{
    tokio::spawn(async move {
        refresh_loop(generator, period).await;
    });
}

async fn refresh_loop<T>(generator: Arc<SnapshotGenerator<T>>, period: Duration)
where
    T: ForecastTransport + 'static,
{
    info!("Refreshing snapshots every {}s", period.as_secs());
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        trigger_generation(generator.clone());
    }
}
