//! Urgency × weight classification into four buffers.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ItemBuffer, OrderingChain};
use crate::models::{DeliverableItem, Weight, WeightClass, HEAVY_THRESHOLD};

/// Identifies one of the four buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferKey {
    ExpeditedHeavy,
    ExpeditedLight,
    StandardHeavy,
    StandardLight,
}

impl BufferKey {
    /// All keys in fill order for a heavy-capable worker.
    pub const ALL: [BufferKey; 4] = [
        BufferKey::ExpeditedHeavy,
        BufferKey::ExpeditedLight,
        BufferKey::StandardHeavy,
        BufferKey::StandardLight,
    ];

    /// Key for an urgency flag and weight class.
    pub fn new(expedited: bool, class: WeightClass) -> Self {
        match (expedited, class) {
            (true, WeightClass::Heavy) => BufferKey::ExpeditedHeavy,
            (true, WeightClass::Light) => BufferKey::ExpeditedLight,
            (false, WeightClass::Heavy) => BufferKey::StandardHeavy,
            (false, WeightClass::Light) => BufferKey::StandardLight,
        }
    }

    /// Key an item routes to under the given heavy threshold.
    pub fn for_item(item: &DeliverableItem, heavy_threshold: Weight) -> Self {
        Self::new(item.is_expedited(), item.weight_class_with(heavy_threshold))
    }

    pub fn is_expedited(self) -> bool {
        matches!(self, BufferKey::ExpeditedHeavy | BufferKey::ExpeditedLight)
    }

    pub fn weight_class(self) -> WeightClass {
        match self {
            BufferKey::ExpeditedHeavy | BufferKey::StandardHeavy => WeightClass::Heavy,
            BufferKey::ExpeditedLight | BufferKey::StandardLight => WeightClass::Light,
        }
    }

    pub fn is_heavy(self) -> bool {
        self.weight_class() == WeightClass::Heavy
    }

    fn index(self) -> usize {
        match self {
            BufferKey::ExpeditedHeavy => 0,
            BufferKey::ExpeditedLight => 1,
            BufferKey::StandardHeavy => 2,
            BufferKey::StandardLight => 3,
        }
    }
}

impl fmt::Display for BufferKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BufferKey::ExpeditedHeavy => "expedited-heavy",
            BufferKey::ExpeditedLight => "expedited-light",
            BufferKey::StandardHeavy => "standard-heavy",
            BufferKey::StandardLight => "standard-light",
        };
        f.write_str(name)
    }
}

/// Routes items into four independent buffers.
///
/// Expedited buffers serve the highest priority first (oldest among equal
/// priorities); standard buffers serve the oldest arrival first. Buffers
/// are unbounded and live as long as the classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    heavy_threshold: Weight,
    buffers: [ItemBuffer; 4],
}

impl Classifier {
    /// Creates a classifier with the given heavy threshold.
    pub fn new(heavy_threshold: Weight) -> Self {
        let buffers = BufferKey::ALL.map(|key| {
            let order = if key.is_expedited() {
                OrderingChain::by_priority()
            } else {
                OrderingChain::fifo()
            };
            ItemBuffer::new(order)
        });
        Self {
            heavy_threshold,
            buffers,
        }
    }

    pub fn heavy_threshold(&self) -> Weight {
        self.heavy_threshold
    }

    /// Buffers an item and returns the key it was routed to.
    pub fn add_item(&mut self, item: DeliverableItem) -> BufferKey {
        let key = BufferKey::for_item(&item, self.heavy_threshold);
        debug!(
            item = item.id(),
            weight = item.weight(),
            floor = item.destination_floor(),
            buffer = %key,
            "item buffered"
        );
        self.buffers[key.index()].push(item);
        key
    }

    /// Number of items in one buffer.
    pub fn size_of(&self, key: BufferKey) -> usize {
        self.buffers[key.index()].len()
    }

    /// Removes the next item from one buffer.
    pub fn take_one(&mut self, key: BufferKey) -> Option<DeliverableItem> {
        self.buffers[key.index()].take_one()
    }

    /// The next item of one buffer, without removing it.
    pub fn peek(&self, key: BufferKey) -> Option<&DeliverableItem> {
        self.buffers[key.index()].peek()
    }

    /// Read access to one buffer.
    pub fn buffer(&self, key: BufferKey) -> &ItemBuffer {
        &self.buffers[key.index()]
    }

    /// Items across all buffers.
    pub fn total_len(&self) -> usize {
        self.buffers.iter().map(ItemBuffer::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.iter().all(ItemBuffer::is_empty)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(HEAVY_THRESHOLD)
    }
}
