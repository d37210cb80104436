use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{PhaseInterval, TimingPhase};
use crate::error::{WaterfallError, WaterfallResult};

/// Canonical timing row: the page itself or one fetched sub-resource.
///
/// `start` and every phase offset are milliseconds from navigation start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    url: String,
    start: f64,
    duration: f64,
    redirect: PhaseInterval,
    app_cache: PhaseInterval,
    dns: PhaseInterval,
    tcp: PhaseInterval,
    ssl: PhaseInterval,
    request: PhaseInterval,
    response: PhaseInterval,
}

impl TimingRecord {
    /// Creates a record with every phase absent.
    #[must_use]
    pub fn new(url: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            url: url.into(),
            start,
            duration,
            redirect: PhaseInterval::ABSENT,
            app_cache: PhaseInterval::ABSENT,
            dns: PhaseInterval::ABSENT,
            tcp: PhaseInterval::ABSENT,
            ssl: PhaseInterval::ABSENT,
            request: PhaseInterval::ABSENT,
            response: PhaseInterval::ABSENT,
        }
    }

    /// Sets one phase. Intervals without a positive duration are stored as absent.
    #[must_use]
    pub fn with_phase(mut self, phase: TimingPhase, interval: PhaseInterval) -> Self {
        let interval = PhaseInterval::measured(interval.start, interval.duration);
        *self.phase_mut(phase) = interval;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    #[must_use]
    pub fn phase(&self, phase: TimingPhase) -> PhaseInterval {
        match phase {
            TimingPhase::Redirect => self.redirect,
            TimingPhase::AppCache => self.app_cache,
            TimingPhase::Dns => self.dns,
            TimingPhase::Tcp => self.tcp,
            TimingPhase::Ssl => self.ssl,
            TimingPhase::Request => self.request,
            TimingPhase::Response => self.response,
        }
    }

    /// Present phases in draw order.
    pub fn present_phases(&self) -> impl Iterator<Item = (TimingPhase, PhaseInterval)> + '_ {
        TimingPhase::DRAW_ORDER
            .into_iter()
            .map(|phase| (phase, self.phase(phase)))
            .filter(|(_, interval)| interval.is_present())
    }

    /// Hover text for the record's bar: non-zero `start`, `duration` and
    /// phase durations as a pretty JSON object with one decimal each.
    pub fn tooltip(&self) -> WaterfallResult<String> {
        let mut fields: IndexMap<&'static str, String> = IndexMap::new();
        if self.start != 0.0 {
            fields.insert("start", format!("{:.1}", self.start));
        }
        if self.duration != 0.0 {
            fields.insert("duration", format!("{:.1}", self.duration));
        }
        for (phase, interval) in self.present_phases() {
            fields.insert(phase.duration_key(), format!("{:.1}", interval.duration));
        }

        serde_json::to_string_pretty(&fields)
            .map_err(|e| WaterfallError::InvalidData(format!("failed to serialize tooltip: {e}")))
    }

    fn phase_mut(&mut self, phase: TimingPhase) -> &mut PhaseInterval {
        match phase {
            TimingPhase::Redirect => &mut self.redirect,
            TimingPhase::AppCache => &mut self.app_cache,
            TimingPhase::Dns => &mut self.dns,
            TimingPhase::Tcp => &mut self.tcp,
            TimingPhase::Ssl => &mut self.ssl,
            TimingPhase::Request => &mut self.request,
            TimingPhase::Response => &mut self.response,
        }
    }
}
