use std::time::Duration;

use anyhow::Context;

use crate::{
    course_aggregator::LegConcurrency, session_manager::DEFAULT_SESSION_TTL,
    transport_mode::TransportMode,
};

pub const TRANSPORT_MODE_ENV_VAR: &str = "HERMES_DEFAULT_TRANSPORT_MODE";
pub const LEG_CONCURRENCY_ENV_VAR: &str = "HERMES_LEG_CONCURRENCY";
pub const SESSION_TTL_ENV_VAR: &str = "HERMES_SESSION_TTL_SECS";

/// Course preferences injected into aggregation callers. The mode is the one
/// used when a caller does not pick one explicitly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CourseConfig {
    pub default_mode: TransportMode,
    pub concurrency: LegConcurrency,
    pub session_ttl: Duration,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            default_mode: TransportMode::default(),
            concurrency: LegConcurrency::default(),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl CourseConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = CourseConfig::default();

        if let Ok(mode) = std::env::var(TRANSPORT_MODE_ENV_VAR) {
            config.default_mode = mode
                .parse::<TransportMode>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid {TRANSPORT_MODE_ENV_VAR}"))?;
        }

        if let Ok(concurrency) = std::env::var(LEG_CONCURRENCY_ENV_VAR) {
            config.concurrency = concurrency
                .parse::<LegConcurrency>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid {LEG_CONCURRENCY_ENV_VAR}"))?;
        }

        if let Ok(ttl) = std::env::var(SESSION_TTL_ENV_VAR) {
            let seconds = ttl
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid {SESSION_TTL_ENV_VAR}"))?;
            config.session_ttl = Duration::from_secs(seconds);
        }

        Ok(config)
    }

    pub fn mode_or_default(&self, mode: Option<TransportMode>) -> TransportMode {
        mode.unwrap_or(self.default_mode)
    }
}
