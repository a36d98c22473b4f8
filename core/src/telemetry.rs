use std::time::{Duration, SystemTime};

use serde::Serialize;
use tokio::sync::Mutex;

use crate::types::{Attrition, Prediction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub predictions: u64,
    pub leaves: u64,
    pub stays: u64,
    pub rejected: u64,
    pub uptime: String,
}

#[derive(Debug, Default)]
struct StatsCounters {
    leaves: u64,
    stays: u64,
    rejected: u64,
}

/// In-process counters for the status endpoint. Nothing here is persisted.
pub struct TelemetryStore {
    start_time: SystemTime,
    stats: Mutex<StatsCounters>,
}

impl TelemetryStore {
    pub fn new() -> Self {
        TelemetryStore {
            start_time: SystemTime::now(),
            stats: Mutex::new(StatsCounters::default()),
        }
    }

    pub async fn record_prediction(&self, prediction: &Prediction) {
        let mut stats = self.stats.lock().await;
        match prediction.attrition {
            Attrition::Leaves => stats.leaves = stats.leaves.saturating_add(1),
            Attrition::Stays => stats.stays = stats.stays.saturating_add(1),
        }
    }

    pub async fn record_rejection(&self) {
        let mut stats = self.stats.lock().await;
        stats.rejected = stats.rejected.saturating_add(1);
    }

    pub async fn snapshot_stats(&self) -> StatsSnapshot {
        let stats = self.stats.lock().await;
        StatsSnapshot {
            predictions: stats.leaves.saturating_add(stats.stays),
            leaves: stats.leaves,
            stays: stats.stays,
            rejected: stats.rejected,
            uptime: format_uptime(
                SystemTime::now()
                    .duration_since(self.start_time)
                    .unwrap_or(Duration::from_secs(0)),
            ),
        }
    }
}

fn format_uptime(duration: Duration) -> String {
    let total_minutes = duration.as_secs() / 60;
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;
    format!("{}d {}h {}m", days, hours, minutes)
}
