//! Dispatcher configuration.
//!
//! Defaults reproduce the reference fleet: three workers, four-slot
//! carriers, heavy items at 2000 weight units and above, floors numbered
//! from 1.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::models::{Floor, Weight, HEAVY_THRESHOLD};

/// Default number of items a carrier holds.
pub const DEFAULT_CARRIER_CAPACITY: usize = 4;
/// Default number of idle-registry slots.
pub const DEFAULT_FLEET_SIZE: usize = 3;
/// Default lowest deliverable floor.
pub const DEFAULT_LOWEST_FLOOR: Floor = 1;

/// What happens to batch items a carrier refuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Stop loading and discard the unplaced remainder.
    #[default]
    Drop,
    /// Stop loading and return the unplaced remainder to its buffers.
    Requeue,
}

/// Tunables for a [`Dispatcher`](crate::scheduler::Dispatcher).
///
/// # Example
/// ```
/// use u_dispatch::config::{DispatchConfig, OverflowPolicy};
///
/// let config = DispatchConfig::default()
///     .with_fleet_size(5)
///     .with_overflow_policy(OverflowPolicy::Requeue);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.carrier_capacity, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Weight at or above which an item is heavy.
    pub heavy_threshold: Weight,
    /// Maximum batch size per worker per tick.
    pub carrier_capacity: usize,
    /// Number of idle-registry slots.
    pub fleet_size: usize,
    /// Lowest valid destination floor (used by item validation).
    pub lowest_floor: Floor,
    /// Handling of items refused by a carrier.
    pub overflow_policy: OverflowPolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            heavy_threshold: HEAVY_THRESHOLD,
            carrier_capacity: DEFAULT_CARRIER_CAPACITY,
            fleet_size: DEFAULT_FLEET_SIZE,
            lowest_floor: DEFAULT_LOWEST_FLOOR,
            overflow_policy: OverflowPolicy::Drop,
        }
    }
}

impl DispatchConfig {
    /// Sets the heavy threshold.
    pub fn with_heavy_threshold(mut self, threshold: Weight) -> Self {
        self.heavy_threshold = threshold;
        self
    }

    /// Sets the carrier capacity (maximum batch size).
    pub fn with_carrier_capacity(mut self, capacity: usize) -> Self {
        self.carrier_capacity = capacity;
        self
    }

    /// Sets the number of registry slots.
    pub fn with_fleet_size(mut self, fleet_size: usize) -> Self {
        self.fleet_size = fleet_size;
        self
    }

    /// Sets the lowest valid floor.
    pub fn with_lowest_floor(mut self, floor: Floor) -> Self {
        self.lowest_floor = floor;
        self
    }

    /// Sets the overflow policy.
    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Rejects settings under which no dispatch can happen.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.carrier_capacity == 0 {
            return Err(ConfigError::ZeroCarrierCapacity);
        }
        if self.fleet_size == 0 {
            return Err(ConfigError::ZeroFleetSize);
        }
        if self.heavy_threshold == 0 {
            return Err(ConfigError::ZeroHeavyThreshold);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.heavy_threshold, 2000);
        assert_eq!(config.carrier_capacity, 4);
        assert_eq!(config.fleet_size, 3);
        assert_eq!(config.lowest_floor, 1);
        assert_eq!(config.overflow_policy, OverflowPolicy::Drop);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        let config = DispatchConfig::default().with_carrier_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCarrierCapacity));

        let config = DispatchConfig::default().with_fleet_size(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroFleetSize));

        let config = DispatchConfig::default().with_heavy_threshold(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroHeavyThreshold));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DispatchConfig =
            serde_json::from_str(r#"{"fleet_size": 6, "overflow_policy": "requeue"}"#).unwrap();
        assert_eq!(config.fleet_size, 6);
        assert_eq!(config.overflow_policy, OverflowPolicy::Requeue);
        assert_eq!(config.carrier_capacity, DEFAULT_CARRIER_CAPACITY);
        assert_eq!(config.heavy_threshold, HEAVY_THRESHOLD);
    }
}
