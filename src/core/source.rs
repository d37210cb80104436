use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{NavigationTiming, ResourceTiming};
use crate::error::{WaterfallError, WaterfallResult};

pub const TIMING_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Host performance-measurement capability.
///
/// `None` from either timing accessor means the host does not expose that
/// timing interface at all.
pub trait TimingSource {
    fn document_url(&self) -> &str;

    fn navigation_timing(&self) -> Option<NavigationTiming>;

    fn resource_timings(&self) -> Option<&[ResourceTiming]>;

    /// Wall-clock instant of navigation start, when the host reports one.
    fn navigation_started_at(&self) -> Option<DateTime<Utc>> {
        let start = self.navigation_timing()?.navigation_start;
        if !start.is_finite() || start <= 0.0 {
            return None;
        }
        DateTime::from_timestamp_millis(start as i64)
    }
}

/// Serialized copy of a host's timing data, read once per render pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingSnapshot {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub navigation: Option<NavigationTiming>,
    #[serde(default)]
    pub resources: Option<Vec<ResourceTiming>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: TimingSnapshot,
}

impl TimingSnapshot {
    #[must_use]
    pub fn new(url: impl Into<String>, navigation: NavigationTiming) -> Self {
        Self {
            url: url.into(),
            navigation: Some(navigation),
            resources: Some(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_resource(mut self, resource: ResourceTiming) -> Self {
        self.resources.get_or_insert_with(Vec::new).push(resource);
        self
    }

    pub fn to_json_contract_v1_pretty(&self) -> WaterfallResult<String> {
        let payload = TimingSnapshotJsonContractV1 {
            schema_version: TIMING_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            WaterfallError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Parses either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> WaterfallResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            WaterfallError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;

        if value.get("schemaVersion").is_none() {
            return serde_json::from_value(value).map_err(|e| {
                WaterfallError::InvalidData(format!("failed to parse snapshot: {e}"))
            });
        }

        let payload: TimingSnapshotJsonContractV1 =
            serde_json::from_value(value).map_err(|e| {
                WaterfallError::InvalidData(format!("failed to parse snapshot contract: {e}"))
            })?;
        if payload.schema_version != TIMING_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(WaterfallError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl TimingSource for TimingSnapshot {
    fn document_url(&self) -> &str {
        &self.url
    }

    fn navigation_timing(&self) -> Option<NavigationTiming> {
        self.navigation
    }

    fn resource_timings(&self) -> Option<&[ResourceTiming]> {
        self.resources.as_deref()
    }
}
