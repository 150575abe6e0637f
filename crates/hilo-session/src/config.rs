/// Default number of records kept per variant.
pub const DEFAULT_CAPACITY: usize = 50;

/// Configuration for the per-variant history stores.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum records kept per variant (oldest dropped past this). At least 1.
    pub capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Set the history capacity (clamped to at least 1).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }
}
