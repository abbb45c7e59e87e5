//! Ordered item buffer.

use std::cmp::Ordering;
use std::collections::VecDeque;

use super::OrderingChain;
use crate::models::DeliverableItem;

/// An unbounded buffer kept sorted by an [`OrderingChain`].
///
/// Items that compare equal are served in insertion order.
#[derive(Debug, Clone)]
pub struct ItemBuffer {
    order: OrderingChain,
    items: VecDeque<DeliverableItem>,
}

impl ItemBuffer {
    /// Creates an empty buffer with the given ordering.
    pub fn new(order: OrderingChain) -> Self {
        Self {
            order,
            items: VecDeque::new(),
        }
    }

    /// Inserts an item behind every item that does not order after it.
    pub fn push(&mut self, item: DeliverableItem) {
        let position = self
            .items
            .partition_point(|held| self.order.compare(held, &item) != Ordering::Greater);
        self.items.insert(position, item);
    }

    /// Removes the first item in order.
    pub fn take_one(&mut self) -> Option<DeliverableItem> {
        self.items.pop_front()
    }

    /// The item `take_one` would return next.
    pub fn peek(&self) -> Option<&DeliverableItem> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in serving order.
    pub fn iter(&self) -> impl Iterator<Item = &DeliverableItem> {
        self.items.iter()
    }

    /// The ordering this buffer serves by.
    pub fn order(&self) -> &OrderingChain {
        &self.order
    }
}
