//! Overflow forecasting for individual bins.

use crate::bins::Bin;

/// Default number of days within which a forecast counts as critical.
pub const DEFAULT_CRITICAL_THRESHOLD: u32 = 2;

/// Outcome of projecting a bin's fill level forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowForecast {
    /// The bin is at capacity right now.
    Overflowing,
    /// The bin is expected to reach capacity in this many days (at least 1).
    Days(u32),
    /// No usable fill rate; the bin is not expected to overflow.
    Never,
}

/// Estimates when bins will overflow and classifies urgency.
#[derive(Debug, Clone)]
pub struct OverflowPredictor {
    critical_threshold: u32,
}

impl Default for OverflowPredictor {
    fn default() -> Self {
        Self::new(DEFAULT_CRITICAL_THRESHOLD)
    }
}

impl OverflowPredictor {
    /// Create a predictor that flags bins projected to overflow within
    /// `critical_threshold` days.
    pub fn new(critical_threshold: u32) -> Self {
        Self { critical_threshold }
    }

    /// Project how long until `bin` overflows.
    ///
    /// The effective fill rate prefers the recorded history average and
    /// falls back to the bin's declared rate. The projection never returns
    /// fewer than one day for a bin that is not yet overflowing.
    pub fn days_to_overflow(&self, bin: &Bin) -> OverflowForecast {
        if bin.is_overflowing() {
            return OverflowForecast::Overflowing;
        }

        let mut rate = bin.history_average();
        if rate <= 0.0 {
            rate = f64::from(bin.fill_rate());
        }
        if rate <= 0.0 {
            return OverflowForecast::Never;
        }

        let remaining = f64::from(bin.capacity() - bin.current_fill());
        let days = (remaining / rate) as u32;
        OverflowForecast::Days(days.max(1))
    }

    /// Whether `bin` is overflowing or projected to overflow within the
    /// critical threshold.
    pub fn is_critical(&self, bin: &Bin) -> bool {
        match self.days_to_overflow(bin) {
            OverflowForecast::Overflowing => true,
            OverflowForecast::Days(days) => days <= self.critical_threshold,
            OverflowForecast::Never => false,
        }
    }

    /// Urgency score for route planning; lower means more urgent.
    ///
    /// Overflowing bins score 0. A `Never` forecast maps to a large finite
    /// value so such bins still lose against every dated forecast yet remain
    /// selectable when nothing else needs service.
    pub fn overflow_risk(&self, bin: &Bin) -> f64 {
        match self.days_to_overflow(bin) {
            OverflowForecast::Overflowing => 0.0,
            OverflowForecast::Days(days) => f64::from(days),
            OverflowForecast::Never => f64::from(u32::MAX),
        }
    }
}
