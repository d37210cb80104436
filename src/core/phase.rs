use serde::{Deserialize, Serialize};

/// Timing phases of one fetch, in draw order.
///
/// Later phases are painted over earlier ones when their bars overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimingPhase {
    Redirect,
    AppCache,
    Dns,
    Tcp,
    Ssl,
    Request,
    Response,
}

impl TimingPhase {
    pub const DRAW_ORDER: [TimingPhase; 7] = [
        TimingPhase::Redirect,
        TimingPhase::AppCache,
        TimingPhase::Dns,
        TimingPhase::Tcp,
        TimingPhase::Ssl,
        TimingPhase::Request,
        TimingPhase::Response,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Redirect => "redirect",
            Self::AppCache => "appCache",
            Self::Dns => "dns",
            Self::Tcp => "tcp",
            Self::Ssl => "ssl",
            Self::Request => "request",
            Self::Response => "response",
        }
    }

    /// Key used for this phase's duration in record tooltips.
    #[must_use]
    pub const fn duration_key(self) -> &'static str {
        match self {
            Self::Redirect => "redirectDuration",
            Self::AppCache => "appCacheDuration",
            Self::Dns => "dnsDuration",
            Self::Tcp => "tcpDuration",
            Self::Ssl => "sslDuration",
            Self::Request => "requestDuration",
            Self::Response => "responseDuration",
        }
    }
}

/// One `(offset, duration)` pair on the page timeline, in milliseconds.
///
/// The absent interval is `(0, 0)`. Anything built through
/// [`PhaseInterval::measured`] has a strictly positive duration or is absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhaseInterval {
    pub start: f64,
    pub duration: f64,
}

impl PhaseInterval {
    pub const ABSENT: Self = Self {
        start: 0.0,
        duration: 0.0,
    };

    /// Keeps a measured interval only when its duration is positive.
    #[must_use]
    pub fn measured(start: f64, duration: f64) -> Self {
        if start.is_finite() && duration.is_finite() && duration > 0.0 {
            Self { start, duration }
        } else {
            Self::ABSENT
        }
    }

    /// Interval spanning `[from, to]`, absent when `to <= from`.
    #[must_use]
    pub fn between(from: f64, to: f64) -> Self {
        Self::measured(from, to - from)
    }

    #[must_use]
    pub fn is_present(self) -> bool {
        self.duration > 0.0
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.start + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::{PhaseInterval, TimingPhase};

    #[test]
    fn non_positive_durations_collapse_to_absent() {
        assert_eq!(PhaseInterval::measured(12.0, 0.0), PhaseInterval::ABSENT);
        assert_eq!(PhaseInterval::measured(12.0, -3.5), PhaseInterval::ABSENT);
        assert_eq!(PhaseInterval::measured(f64::NAN, 4.0), PhaseInterval::ABSENT);
        assert!(!PhaseInterval::ABSENT.is_present());
    }

    #[test]
    fn between_measures_span() {
        let interval = PhaseInterval::between(15.0, 25.0);
        assert_eq!(interval.start, 15.0);
        assert_eq!(interval.duration, 10.0);
        assert_eq!(interval.end(), 25.0);
    }

    #[test]
    fn draw_order_starts_with_redirect_and_ends_with_response() {
        assert_eq!(TimingPhase::DRAW_ORDER[0], TimingPhase::Redirect);
        assert_eq!(TimingPhase::DRAW_ORDER[6], TimingPhase::Response);
        assert_eq!(TimingPhase::AppCache.key(), "appCache");
    }
}
