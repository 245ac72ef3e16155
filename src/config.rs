/// Search limits for the prefix resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Hex digits in the first prefix tried (after the marker).
    pub min_prefix_len: usize,
    /// Longest prefix tried; 64 is the full id.
    pub max_prefix_len: usize,
    /// Digits added per step when no jump applies.
    pub step: usize,
    /// Ceiling on store queries per resolution.
    pub max_attempts: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_prefix_len: 2,
            max_prefix_len: 64,
            step: 2,
            max_attempts: 32,
        }
    }
}

impl ResolverConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min_prefix_len(mut self, len: usize) -> Self {
        self.min_prefix_len = len;
        self
    }

    #[must_use]
    pub fn max_prefix_len(mut self, len: usize) -> Self {
        self.max_prefix_len = len;
        self
    }

    #[must_use]
    pub fn step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    #[must_use]
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }
}
