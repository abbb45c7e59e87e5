//! Ordering chain for multi-criteria item ordering.
//!
//! Rules are applied in sequence; a later rule is consulted only when every
//! earlier rule ties. Sorting is stable, so items that tie on every rule
//! keep their relative order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, OrderingRule};
use crate::models::DeliverableItem;

/// A composable sequence of ordering rules.
///
/// # Example
/// ```
/// use u_dispatch::dispatching::{rules, OrderingChain};
/// use u_dispatch::models::DeliverableItem;
///
/// let chain = OrderingChain::new()
///     .with_rule(rules::HighestPriority)
///     .with_tie_breaker(rules::Fifo);
///
/// let mut batch = vec![
///     DeliverableItem::new(1, 2, 100, 5).with_priority(1),
///     DeliverableItem::new(2, 2, 100, 3).with_priority(4),
///     DeliverableItem::new(3, 2, 100, 1).with_priority(1),
/// ];
/// chain.sort(&mut batch);
/// let ids: Vec<u64> = batch.iter().map(|i| i.id()).collect();
/// assert_eq!(ids, vec![2, 3, 1]);
/// ```
#[derive(Clone, Default)]
pub struct OrderingChain {
    rules: Vec<Arc<dyn OrderingRule>>,
}

impl OrderingChain {
    /// Creates an empty chain (every pair compares equal).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Oldest arrival first.
    pub fn fifo() -> Self {
        Self::new().with_rule(rules::Fifo)
    }

    /// Highest priority first, oldest arrival among equal priorities.
    pub fn by_priority() -> Self {
        Self::new()
            .with_rule(rules::HighestPriority)
            .with_tie_breaker(rules::Fifo)
    }

    /// Lowest destination floor first.
    pub fn by_floor() -> Self {
        Self::new().with_rule(rules::LowestFloor)
    }

    /// Appends a primary rule.
    pub fn with_rule<R: OrderingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Appends a rule consulted only when all earlier rules tie.
    pub fn with_tie_breaker<R: OrderingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Compares two items rule by rule.
    pub fn compare(&self, a: &DeliverableItem, b: &DeliverableItem) -> Ordering {
        for rule in &self.rules {
            let ordering = rule.compare(a, b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable in-place sort.
    pub fn sort(&self, items: &mut [DeliverableItem]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for OrderingChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderingChain")
            .field("rules", &self.rule_names())
            .finish()
    }
}
