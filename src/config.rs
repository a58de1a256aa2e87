use std::sync::Arc;
use std::time::Duration;

use crate::credentials::CredentialsStore;
use crate::definitions::{
    DEFAULT_FIRST_RETRANS_AFTER_MS, DEFAULT_MAX_RETRANS_COUNT, DEFAULT_MAX_RETRANS_TIMER_MS,
    DEFAULT_SERVER_TRANSACTION_EXPIRY_MS,
};

/// Runtime configuration for a [`crate::transaction::StunStack`].
///
/// Built with [`ConfigBuilder`], mirroring the consuming-builder style
/// [`crate::StunMessage`] uses for its own setters.
#[derive(Clone)]
pub struct StunStackConfig {
    /// Delay from initial send to first retransmission.
    pub first_retrans_after: Duration,
    /// Cap on each inter-retransmission interval.
    pub max_retrans_timer: Duration,
    /// Number of retransmissions after the initial send.
    pub max_retrans_count: u32,
    /// Redeliver retransmitted requests to listeners instead of
    /// absorbing them server-side.
    pub propagate_received_retransmissions: bool,
    /// Keep the server-side response cache alive for retransmission
    /// absorption after sending a response.
    pub keep_cached_after_response: bool,
    /// Append MESSAGE-INTEGRITY and credentials to every outbound
    /// request.
    pub always_sign: bool,
    /// SOFTWARE attribute value added to outbound messages; empty means
    /// no SOFTWARE attribute.
    pub software: Vec<u8>,
    /// Credentials collaborator consulted for MESSAGE-INTEGRITY key
    /// derivation: outbound when `always_sign` is set, inbound whenever
    /// a decoded message carries one.
    pub credentials: Option<Arc<dyn CredentialsStore>>,
    /// USERNAME attached to outbound requests when `always_sign` is set
    /// and `credentials` is configured.
    pub signing_username: Option<String>,
    /// Quiescence before an unanswered server transaction entry or a
    /// responded one (once `keep_cached_after_response` applies) is
    /// evicted from the cache.
    pub server_transaction_expiry: Duration,
    /// Number of worker threads dispatching collector/listener
    /// callbacks.
    pub worker_threads: usize,
}

impl Default for StunStackConfig {
    fn default() -> Self {
        Self {
            first_retrans_after: Duration::from_millis(DEFAULT_FIRST_RETRANS_AFTER_MS),
            max_retrans_timer: Duration::from_millis(DEFAULT_MAX_RETRANS_TIMER_MS),
            max_retrans_count: DEFAULT_MAX_RETRANS_COUNT,
            propagate_received_retransmissions: false,
            keep_cached_after_response: false,
            always_sign: false,
            software: Vec::new(),
            credentials: None,
            signing_username: None,
            server_transaction_expiry: Duration::from_millis(
                DEFAULT_SERVER_TRANSACTION_EXPIRY_MS,
            ),
            worker_threads: 4,
        }
    }
}

impl std::fmt::Debug for StunStackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StunStackConfig")
            .field("first_retrans_after", &self.first_retrans_after)
            .field("max_retrans_timer", &self.max_retrans_timer)
            .field("max_retrans_count", &self.max_retrans_count)
            .field(
                "propagate_received_retransmissions",
                &self.propagate_received_retransmissions,
            )
            .field("keep_cached_after_response", &self.keep_cached_after_response)
            .field("always_sign", &self.always_sign)
            .field("software", &self.software)
            .field("credentials", &self.credentials.is_some())
            .field("signing_username", &self.signing_username)
            .field("server_transaction_expiry", &self.server_transaction_expiry)
            .field("worker_threads", &self.worker_threads)
            .finish()
    }
}

/// Consuming builder for [`StunStackConfig`].
#[derive(Clone, Default)]
pub struct ConfigBuilder {
    config: StunStackConfig,
}

impl std::fmt::Debug for ConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigBuilder").field("config", &self.config).finish()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_retrans_after(mut self, value: Duration) -> Self {
        self.config.first_retrans_after = value;
        self
    }

    pub fn max_retrans_timer(mut self, value: Duration) -> Self {
        self.config.max_retrans_timer = value;
        self
    }

    pub fn max_retrans_count(mut self, value: u32) -> Self {
        self.config.max_retrans_count = value;
        self
    }

    pub fn propagate_received_retransmissions(mut self, value: bool) -> Self {
        self.config.propagate_received_retransmissions = value;
        self
    }

    pub fn keep_cached_after_response(mut self, value: bool) -> Self {
        self.config.keep_cached_after_response = value;
        self
    }

    pub fn always_sign(mut self, value: bool) -> Self {
        self.config.always_sign = value;
        self
    }

    pub fn software(mut self, value: impl Into<Vec<u8>>) -> Self {
        self.config.software = value.into();
        self
    }

    pub fn credentials(mut self, store: Arc<dyn CredentialsStore>) -> Self {
        self.config.credentials = Some(store);
        self
    }

    pub fn signing_username(mut self, value: impl Into<String>) -> Self {
        self.config.signing_username = Some(value.into());
        self
    }

    pub fn server_transaction_expiry(mut self, value: Duration) -> Self {
        self.config.server_transaction_expiry = value;
        self
    }

    pub fn worker_threads(mut self, value: usize) -> Self {
        self.config.worker_threads = value;
        self
    }

    pub fn build(self) -> StunStackConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_rfc5389_schedule() {
        let config = StunStackConfig::default();
        assert_eq!(config.first_retrans_after, Duration::from_millis(100));
        assert_eq!(config.max_retrans_timer, Duration::from_millis(1600));
        assert_eq!(config.max_retrans_count, 6);
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = ConfigBuilder::new()
            .max_retrans_count(2)
            .propagate_received_retransmissions(true)
            .build();

        assert_eq!(config.max_retrans_count, 2);
        assert!(config.propagate_received_retransmissions);
        assert!(!config.keep_cached_after_response);
    }
}
