//! Tool executor: runs planned actions against the two data tiers.
//!
//! Live call first. On any live failure the fixture provider serves the
//! same logical path and the result is tagged `fallback`. Only when the
//! fixture tier also fails does the action come back unsuccessful.

use crate::data_access::DataAccess;
use crate::fixtures::FixtureProvider;
use campus_shared::{Action, ActionResult};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Per-tier outcome counters
#[derive(Debug, Default)]
pub struct ExecutorStats {
    live: AtomicU64,
    fallback: AtomicU64,
    failed: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    pub live: u64,
    pub fallback: u64,
    pub failed: u64,
}

impl StatsSnapshot {
    pub fn total(&self) -> u64 {
        self.live + self.fallback + self.failed
    }
}

impl ExecutorStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            live: self.live.load(Ordering::Relaxed),
            fallback: self.fallback.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

pub struct ToolExecutor {
    data: Arc<dyn DataAccess>,
    fixtures: Arc<dyn FixtureProvider>,
    stats: ExecutorStats,
}

impl ToolExecutor {
    pub fn new(data: Arc<dyn DataAccess>, fixtures: Arc<dyn FixtureProvider>) -> Self {
        Self {
            data,
            fixtures,
            stats: ExecutorStats::default(),
        }
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Run actions in plan order, one result per action
    pub async fn execute(&self, actions: &[Action]) -> Vec<ActionResult> {
        let mut results = Vec::with_capacity(actions.len());
        for action in actions {
            results.push(self.execute_one(action).await);
        }
        results
    }

    pub async fn execute_one(&self, action: &Action) -> ActionResult {
        let path = action.tool.path();

        let live_err = match self.data.get(path, &action.params).await {
            Ok(records) => {
                self.stats.live.fetch_add(1, Ordering::Relaxed);
                debug!(tool = %action.tool, count = records.len(), source = "live", "action ok");
                return ActionResult::live(action.tool, records);
            }
            Err(e) => e,
        };

        warn!(
            tool = %action.tool,
            error = %live_err,
            "Live data unavailable, serving fixture data (degraded)"
        );

        match self.fixtures.mock_call(path, &action.params).await {
            Ok(records) => {
                self.stats.fallback.fetch_add(1, Ordering::Relaxed);
                debug!(tool = %action.tool, count = records.len(), source = "fallback", "action ok");
                ActionResult::fallback(action.tool, records)
            }
            Err(fixture_err) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                error!(tool = %action.tool, error = %fixture_err, "Fixture fallback failed");
                ActionResult::failed(
                    action.tool,
                    format!("live: {}; fallback: {}", live_err, fixture_err),
                )
            }
        }
    }
}
