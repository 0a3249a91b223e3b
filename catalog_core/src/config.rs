/// Process-wide tunables, analogous in spirit to an application config
/// struct loaded once at startup and threaded through by reference.
/// This crate has no config *file* to read (out of scope per §1); the
/// values below are defaults with override hooks for embedders.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Default budget for `Database::get_locked` when a caller doesn't
    /// specify one.
    pub default_lock_timeout_ms: Option<u64>,
    /// Column byte-length threshold under which a column's storage
    /// hint defaults to `FIXED` rather than `VARIABLE` (§4.3).
    pub fixed_length_threshold: u32,
    /// Whether `Default_::current_timestamp(true)` logs at `info` or
    /// stays silent (§9 Open Question 3 keeps this a warning, never an
    /// error; this flag only controls whether it's logged at all).
    pub log_use_on_update_warning: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_lock_timeout_ms: Some(30_000),
            fixed_length_threshold: 256,
            log_use_on_update_warning: true,
        }
    }
}

impl CatalogConfig {
    pub fn with_default_lock_timeout_ms(mut self, ms: Option<u64>) -> Self {
        self.default_lock_timeout_ms = ms;
        self
    }

    pub fn with_fixed_length_threshold(mut self, threshold: u32) -> Self {
        self.fixed_length_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = CatalogConfig::default();
        assert_eq!(config.default_lock_timeout_ms, Some(30_000));
        assert_eq!(config.fixed_length_threshold, 256);
    }

    #[test]
    fn override_hooks_compose() {
        let config = CatalogConfig::default()
            .with_default_lock_timeout_ms(None)
            .with_fixed_length_threshold(512);
        assert_eq!(config.default_lock_timeout_ms, None);
        assert_eq!(config.fixed_length_threshold, 512);
    }
}
