use std::time::Duration;

/// Default budget for a single provider call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(4);

/// Resolver tuning knobs.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wayfare_resolver::ResolverConfig;
///
/// let config = ResolverConfig::default().with_call_timeout(Duration::from_secs(2));
/// assert_eq!(config.call_timeout, Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Upper bound on each provider call; a call that overruns counts as
    /// having returned nothing.
    pub call_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl ResolverConfig {
    /// Set the per-call timeout.
    #[must_use]
    pub const fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }
}
