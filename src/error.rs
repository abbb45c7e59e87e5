//! Error types.
//!
//! The only runtime failure in the dispatch path is a carrier refusing an
//! item. Configuration problems are reported separately by
//! [`DispatchConfig::validate`](crate::config::DispatchConfig::validate).

use thiserror::Error;

use crate::models::DeliverableItem;

/// Failure raised by a [`BoundedCarrier`](crate::models::BoundedCarrier).
#[derive(Debug, Error)]
pub enum CarrierError {
    /// Inserting the item would exceed the carrier's fixed capacity.
    ///
    /// The rejected item is handed back so the caller decides its fate.
    #[error("carrier capacity of {capacity} exceeded by item {}", .item.id())]
    CapacityExceeded {
        capacity: usize,
        item: Box<DeliverableItem>,
    },
}

impl CarrierError {
    /// Builds a capacity error for a rejected item.
    pub fn capacity_exceeded(capacity: usize, item: DeliverableItem) -> Self {
        Self::CapacityExceeded {
            capacity,
            item: Box::new(item),
        }
    }

    /// Recovers the item the carrier refused.
    pub fn into_item(self) -> DeliverableItem {
        match self {
            Self::CapacityExceeded { item, .. } => *item,
        }
    }
}

/// Invalid dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("carrier capacity must be at least 1")]
    ZeroCarrierCapacity,

    #[error("fleet size must be at least 1")]
    ZeroFleetSize,

    #[error("heavy threshold must be positive")]
    ZeroHeavyThreshold,
}

pub type ConfigResult<T> = Result<T, ConfigError>;
