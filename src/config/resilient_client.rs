//! Configuration for the resilient HTTP client
//!
//! Provides environment-based configuration for the outbound client used to
//! reach the places provider. Timeouts are always enforced; retries stay off
//! unless `RESILIENT_CLIENT_RETRY_MAX_ATTEMPTS` is raised above zero.

use super::{env_flag, env_or};
use crate::services::resilient_client::{ResilientClientConfig, RetryConfig};
use std::env;

impl ResilientClientConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            timeout_seconds: env_or("RESILIENT_CLIENT_TIMEOUT", defaults.timeout_seconds),
            connect_timeout_seconds: env_or(
                "RESILIENT_CLIENT_CONNECT_TIMEOUT",
                defaults.connect_timeout_seconds,
            ),
            retry: RetryConfig::from_env(),
            enable_detailed_logging: env_flag(
                "RESILIENT_CLIENT_DETAILED_LOGGING",
                defaults.enable_detailed_logging,
            ),
        }
    }
}

impl RetryConfig {
    /// Load retry configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        // Parse retry status codes from comma-separated values
        let retry_on_status = env::var("RESILIENT_CLIENT_RETRY_ON_STATUS")
            .ok()
            .map(|v| {
                v.split(',')
                    .filter_map(|s| s.trim().parse::<u16>().ok())
                    .collect()
            })
            .unwrap_or(defaults.retry_on_status);

        Self {
            max_attempts: env_or("RESILIENT_CLIENT_RETRY_MAX_ATTEMPTS", defaults.max_attempts),
            initial_delay_ms: env_or(
                "RESILIENT_CLIENT_RETRY_INITIAL_DELAY_MS",
                defaults.initial_delay_ms,
            ),
            max_delay_ms: env_or("RESILIENT_CLIENT_RETRY_MAX_DELAY_MS", defaults.max_delay_ms),
            retry_on_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::ENV_MUTEX;

    const VARS: &[&str] = &[
        "RESILIENT_CLIENT_TIMEOUT",
        "RESILIENT_CLIENT_CONNECT_TIMEOUT",
        "RESILIENT_CLIENT_DETAILED_LOGGING",
        "RESILIENT_CLIENT_RETRY_MAX_ATTEMPTS",
        "RESILIENT_CLIENT_RETRY_INITIAL_DELAY_MS",
        "RESILIENT_CLIENT_RETRY_MAX_DELAY_MS",
        "RESILIENT_CLIENT_RETRY_ON_STATUS",
    ];

    fn clear_vars() {
        for var in VARS {
            unsafe { env::remove_var(var) };
        }
    }

    #[test]
    fn test_resilient_client_config_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_vars();

        let config = ResilientClientConfig::from_env();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.connect_timeout_seconds, 3);
        assert!(config.enable_detailed_logging);
        assert_eq!(config.retry.max_attempts, 0);
        assert_eq!(config.retry.retry_on_status, vec![408, 429, 500, 502, 503, 504]);
    }

    #[test]
    fn test_resilient_client_config_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_vars();

        unsafe {
            env::set_var("RESILIENT_CLIENT_TIMEOUT", "4");
            env::set_var("RESILIENT_CLIENT_CONNECT_TIMEOUT", "2");
            env::set_var("RESILIENT_CLIENT_DETAILED_LOGGING", "false");
            env::set_var("RESILIENT_CLIENT_RETRY_MAX_ATTEMPTS", "2");
            env::set_var("RESILIENT_CLIENT_RETRY_ON_STATUS", "500, 503,bogus");
        }

        let config = ResilientClientConfig::from_env();
        assert_eq!(config.timeout_seconds, 4);
        assert_eq!(config.connect_timeout_seconds, 2);
        assert!(!config.enable_detailed_logging);
        assert_eq!(config.retry.max_attempts, 2);
        assert_eq!(config.retry.retry_on_status, vec![500, 503]);

        clear_vars();
    }
}
