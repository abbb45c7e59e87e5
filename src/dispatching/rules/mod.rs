//! Built-in ordering rules.
//!
//! - **Arrival**: FIFO
//! - **Urgency**: PRIORITY
//! - **Route**: FLOOR
//!
//! # Convention
//! `Ordering::Less` puts the first argument ahead of the second.

use std::cmp::Ordering;

use super::OrderingRule;
use crate::models::DeliverableItem;

/// First In, First Out.
///
/// Earlier arrival tick is served first.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl OrderingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn compare(&self, a: &DeliverableItem, b: &DeliverableItem) -> Ordering {
        a.arrival_time().cmp(&b.arrival_time())
    }

    fn description(&self) -> &'static str {
        "First In, First Out"
    }
}

/// Highest priority level first.
///
/// Standard items rank below every expedited item.
#[derive(Debug, Clone, Copy)]
pub struct HighestPriority;

impl OrderingRule for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn compare(&self, a: &DeliverableItem, b: &DeliverableItem) -> Ordering {
        // Descending: swap operands.
        b.priority().cmp(&a.priority())
    }

    fn description(&self) -> &'static str {
        "Highest Priority First"
    }
}

/// Lowest destination floor first.
///
/// Used to order a batch so the worker unloads on its way up.
#[derive(Debug, Clone, Copy)]
pub struct LowestFloor;

impl OrderingRule for LowestFloor {
    fn name(&self) -> &'static str {
        "FLOOR"
    }

    fn compare(&self, a: &DeliverableItem, b: &DeliverableItem) -> Ordering {
        a.destination_floor().cmp(&b.destination_floor())
    }

    fn description(&self) -> &'static str {
        "Lowest Destination Floor First"
    }
}
