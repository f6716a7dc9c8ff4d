//! Waste bins and their per-day fill accounting.

/// Number of daily fill levels retained for rate estimation.
pub const HISTORY_DAYS: usize = 7;

/// A fixed-capacity waste container placed at a road-network node.
///
/// `current_fill` never exceeds `capacity`; the daily update clamps rather
/// than tracking how far a bin would have overflowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bin {
    id: String,
    location: String,
    capacity: u32,
    current_fill: u32,
    fill_rate: u32,
    node: usize,
    history: FillHistory,
}

impl Bin {
    /// Create a bin. An initial fill beyond `capacity` is clamped.
    pub fn new(
        id: impl Into<String>,
        location: impl Into<String>,
        capacity: u32,
        current_fill: u32,
        fill_rate: u32,
        node: usize,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            capacity,
            current_fill: current_fill.min(capacity),
            fill_rate,
            node,
            history: FillHistory::default(),
        }
    }

    /// Advance the bin by one day: add `fill_rate`, clamp to capacity and
    /// record the clamped level in the history buffer.
    pub fn update_fill(&mut self) {
        self.current_fill = self.current_fill.saturating_add(self.fill_rate).min(self.capacity);
        self.history.record(self.current_fill);
    }

    /// Remove up to `amount` units of waste from the bin.
    pub fn collect(&mut self, amount: u32) {
        self.current_fill = self.current_fill.saturating_sub(amount);
    }

    /// Whether the bin has reached (or would have exceeded) its capacity.
    pub fn is_overflowing(&self) -> bool {
        self.current_fill >= self.capacity
    }

    /// Mean of the recorded daily fill levels, zeros included while the
    /// buffer is still warming up.
    pub fn history_average(&self) -> f64 {
        self.history.average()
    }

    /// Identifier string, unique within a scenario.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable placement description (display only).
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Maximum waste the bin can hold.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Waste currently held.
    pub fn current_fill(&self) -> u32 {
        self.current_fill
    }

    /// Declared units of waste added per day.
    pub fn fill_rate(&self) -> u32 {
        self.fill_rate
    }

    /// Road-network node the bin sits at.
    pub fn node(&self) -> usize {
        self.node
    }
}

/// Bounded ring buffer of the last [`HISTORY_DAYS`] recorded fill levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FillHistory {
    levels: [u32; HISTORY_DAYS],
    cursor: usize,
}

impl FillHistory {
    fn record(&mut self, level: u32) {
        self.levels[self.cursor] = level;
        self.cursor = (self.cursor + 1) % HISTORY_DAYS;
    }

    fn average(&self) -> f64 {
        let sum: u64 = self.levels.iter().map(|&level| u64::from(level)).sum();
        sum as f64 / HISTORY_DAYS as f64
    }
}
