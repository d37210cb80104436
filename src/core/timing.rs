use serde::{Deserialize, Serialize};

use crate::core::{PhaseInterval, TimingPhase, TimingRecord};

/// Page-level navigation timing sample.
///
/// Fields are absolute epoch milliseconds as the host reports them; an unset
/// field is `0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationTiming {
    pub navigation_start: f64,
    pub redirect_start: f64,
    pub redirect_end: f64,
    pub domain_lookup_start: f64,
    pub domain_lookup_end: f64,
    pub connect_start: f64,
    pub connect_end: f64,
    pub secure_connection_start: f64,
    pub request_start: f64,
    pub response_start: f64,
    pub response_end: f64,
}

/// Sub-resource timing sample.
///
/// All offsets are already relative to navigation start.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceTiming {
    pub name: String,
    pub start_time: f64,
    pub duration: f64,
    pub redirect_start: f64,
    pub redirect_end: f64,
    pub domain_lookup_start: f64,
    pub domain_lookup_end: f64,
    pub connect_start: f64,
    pub connect_end: f64,
    pub secure_connection_start: f64,
    pub request_start: f64,
    pub response_start: f64,
    pub response_end: f64,
}

/// Connection milestones shared by both sample shapes.
#[derive(Debug, Clone, Copy)]
struct Milestones {
    redirect_start: f64,
    redirect_end: f64,
    domain_lookup_start: f64,
    domain_lookup_end: f64,
    connect_start: f64,
    connect_end: f64,
    secure_connection_start: f64,
    request_start: f64,
    response_start: f64,
    response_end: f64,
}

impl NavigationTiming {
    fn milestones(&self) -> Milestones {
        Milestones {
            redirect_start: self.redirect_start,
            redirect_end: self.redirect_end,
            domain_lookup_start: self.domain_lookup_start,
            domain_lookup_end: self.domain_lookup_end,
            connect_start: self.connect_start,
            connect_end: self.connect_end,
            secure_connection_start: self.secure_connection_start,
            request_start: self.request_start,
            response_start: self.response_start,
            response_end: self.response_end,
        }
    }

    /// Builds the page record; every offset is re-based on `navigation_start`.
    #[must_use]
    pub fn to_record(&self, url: impl Into<String>) -> TimingRecord {
        let record = TimingRecord::new(url, 0.0, self.response_end - self.navigation_start);
        apply_phases(record, self.milestones(), self.navigation_start)
    }
}

impl ResourceTiming {
    fn milestones(&self) -> Milestones {
        Milestones {
            redirect_start: self.redirect_start,
            redirect_end: self.redirect_end,
            domain_lookup_start: self.domain_lookup_start,
            domain_lookup_end: self.domain_lookup_end,
            connect_start: self.connect_start,
            connect_end: self.connect_end,
            secure_connection_start: self.secure_connection_start,
            request_start: self.request_start,
            response_start: self.response_start,
            response_end: self.response_end,
        }
    }

    #[must_use]
    pub fn to_record(&self) -> TimingRecord {
        let record = TimingRecord::new(self.name.clone(), self.start_time, self.duration);
        apply_phases(record, self.milestones(), 0.0)
    }
}

/// Derives every phase interval from raw milestones.
///
/// Milestones of `0` mean "not reported" and are never re-based.
fn apply_phases(record: TimingRecord, m: Milestones, origin: f64) -> TimingRecord {
    let rebase = |value: f64| value - origin;

    let redirect = if m.redirect_start != 0.0 {
        PhaseInterval::between(rebase(m.redirect_start), rebase(m.redirect_end))
    } else {
        PhaseInterval::ABSENT
    };

    let dns = PhaseInterval::between(
        rebase(m.domain_lookup_start),
        rebase(m.domain_lookup_end),
    );

    let has_secure_connection = m.secure_connection_start > 0.0;
    let tcp_end = if has_secure_connection {
        m.secure_connection_start
    } else {
        m.connect_end
    };
    let tcp = PhaseInterval::between(rebase(m.connect_start), rebase(tcp_end));
    let ssl = if has_secure_connection {
        PhaseInterval::between(rebase(m.secure_connection_start), rebase(m.connect_end))
    } else {
        PhaseInterval::ABSENT
    };

    let request = PhaseInterval::between(rebase(m.request_start), rebase(m.response_start));

    // Cross-origin entries report responseStart = 0 when timing is redacted.
    let response = if m.response_start == 0.0 {
        PhaseInterval::ABSENT
    } else {
        PhaseInterval::between(rebase(m.response_start), rebase(m.response_end))
    };

    record
        .with_phase(TimingPhase::Redirect, redirect)
        .with_phase(TimingPhase::AppCache, PhaseInterval::ABSENT)
        .with_phase(TimingPhase::Dns, dns)
        .with_phase(TimingPhase::Tcp, tcp)
        .with_phase(TimingPhase::Ssl, ssl)
        .with_phase(TimingPhase::Request, request)
        .with_phase(TimingPhase::Response, response)
}
