//! Hub configuration - timer durations and queue bounds.

use std::time::Duration;

use serde::Deserialize;

use crate::application::hub::HubConfig;

use super::error::ValidationError;

/// Serialized form of the hub's tuning knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct HubSettings {
    /// Seconds a created game waits for a human before the bot is seated
    #[serde(default = "default_join_timeout_secs")]
    pub join_timeout_secs: u64,

    /// Milliseconds of artificial delay before each automated move
    #[serde(default = "default_bot_move_delay_ms")]
    pub bot_move_delay_ms: u64,

    /// Seconds between sweeper passes
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Seconds before a game is evicted, measured from creation
    #[serde(default = "default_session_max_age_secs")]
    pub session_max_age_secs: u64,

    /// Bound of each connection's outbound queue
    #[serde(default = "default_outbound_capacity")]
    pub outbound_capacity: usize,
}

impl HubSettings {
    /// Validate hub configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.outbound_capacity == 0 {
            return Err(ValidationError::InvalidCapacity);
        }
        if self.session_max_age_secs == 0 {
            return Err(ValidationError::InvalidMaxAge);
        }
        Ok(())
    }

    /// Converts to the hub's runtime configuration.
    pub fn to_hub_config(&self) -> HubConfig {
        HubConfig {
            join_timeout: Duration::from_secs(self.join_timeout_secs),
            bot_move_delay: Duration::from_millis(self.bot_move_delay_ms),
            sweep_interval: Duration::from_secs(self.sweep_interval_secs),
            session_max_age: Duration::from_secs(self.session_max_age_secs),
            outbound_capacity: self.outbound_capacity,
        }
    }
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            join_timeout_secs: default_join_timeout_secs(),
            bot_move_delay_ms: default_bot_move_delay_ms(),
            sweep_interval_secs: default_sweep_interval_secs(),
            session_max_age_secs: default_session_max_age_secs(),
            outbound_capacity: default_outbound_capacity(),
        }
    }
}

fn default_join_timeout_secs() -> u64 {
    10
}

fn default_bot_move_delay_ms() -> u64 {
    1000
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_session_max_age_secs() -> u64 {
    3600
}

fn default_outbound_capacity() -> usize {
    256
}
