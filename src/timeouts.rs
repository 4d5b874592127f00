//! Timeout configuration for table requests.
//!
//! Covers the HTTP transports (connect and receive) and the callback-script
//! transport, which has no HTTP-level timeout of its own and fails once its
//! callback has not fired within `callback_timeout`.

use std::time::Duration;

/// Timeout configuration for fusiontables-link requests.
///
/// # Examples
///
/// ```rust
/// use fusiontables_link::FusionTablesTimeouts;
/// use std::time::Duration;
///
/// let timeouts = FusionTablesTimeouts::default();
/// assert_eq!(timeouts.callback_timeout, Duration::from_millis(3000));
///
/// let timeouts = FusionTablesTimeouts::builder()
///     .receive_timeout_secs(60)
///     .callback_timeout_ms(5000)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct FusionTablesTimeouts {
    /// Timeout for establishing connections (TCP + TLS handshake).
    /// Default: 10 seconds
    pub connection_timeout: Duration,

    /// Timeout for the whole HTTP exchange once a request is sent.
    /// Default: 30 seconds
    pub receive_timeout: Duration,

    /// How long the callback-script transport waits for its callback.
    /// Default: 3000 milliseconds
    pub callback_timeout: Duration,
}

impl Default for FusionTablesTimeouts {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(10),
            receive_timeout: Duration::from_secs(30),
            callback_timeout: Duration::from_millis(3000),
        }
    }
}

impl FusionTablesTimeouts {
    /// Create a new builder for custom timeout configuration.
    pub fn builder() -> FusionTablesTimeoutsBuilder {
        FusionTablesTimeoutsBuilder::new()
    }

    /// Short timeouts for local proxies and tests.
    pub fn fast() -> Self {
        Self {
            connection_timeout: Duration::from_secs(2),
            receive_timeout: Duration::from_secs(5),
            callback_timeout: Duration::from_millis(1000),
        }
    }

    /// Long timeouts for high-latency networks.
    pub fn relaxed() -> Self {
        Self {
            connection_timeout: Duration::from_secs(30),
            receive_timeout: Duration::from_secs(120),
            callback_timeout: Duration::from_secs(10),
        }
    }

    /// Check if a duration represents "no timeout" (zero or very large).
    pub fn is_no_timeout(duration: Duration) -> bool {
        duration.is_zero() || duration > Duration::from_secs(86400 * 365)
    }
}

/// Builder for creating custom [`FusionTablesTimeouts`] configurations.
#[derive(Debug, Clone)]
pub struct FusionTablesTimeoutsBuilder {
    timeouts: FusionTablesTimeouts,
}

impl FusionTablesTimeoutsBuilder {
    fn new() -> Self {
        Self {
            timeouts: FusionTablesTimeouts::default(),
        }
    }

    /// Set the connection timeout (TCP + TLS handshake).
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connection_timeout = timeout;
        self
    }

    pub fn connection_timeout_secs(self, secs: u64) -> Self {
        self.connection_timeout(Duration::from_secs(secs))
    }

    /// Set the receive timeout for HTTP exchanges.
    pub fn receive_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.receive_timeout = timeout;
        self
    }

    pub fn receive_timeout_secs(self, secs: u64) -> Self {
        self.receive_timeout(Duration::from_secs(secs))
    }

    /// Set how long the callback-script transport waits for its callback.
    pub fn callback_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.callback_timeout = timeout;
        self
    }

    pub fn callback_timeout_ms(self, millis: u64) -> Self {
        self.callback_timeout(Duration::from_millis(millis))
    }

    /// Build the timeout configuration.
    pub fn build(self) -> FusionTablesTimeouts {
        self.timeouts
    }
}
