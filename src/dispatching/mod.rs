//! Item classification, buffering, and ordering rules.
//!
//! Arriving items are split into four buffers by urgency and weight class.
//! Each buffer keeps its items ordered by an [`OrderingChain`]: expedited
//! buffers serve the highest priority first, standard buffers serve the
//! oldest arrival first.
//!
//! # Usage
//!
//! ```
//! use u_dispatch::dispatching::{BufferKey, Classifier};
//! use u_dispatch::models::DeliverableItem;
//!
//! let mut classifier = Classifier::default();
//! classifier.add_item(DeliverableItem::new(1, 3, 2400, 0));
//! classifier.add_item(DeliverableItem::new(2, 5, 120, 1).with_priority(4));
//!
//! assert_eq!(classifier.size_of(BufferKey::StandardHeavy), 1);
//! assert_eq!(classifier.size_of(BufferKey::ExpeditedLight), 1);
//! ```

mod buffer;
mod classifier;
mod engine;
pub mod rules;

pub use buffer::ItemBuffer;
pub use classifier::{BufferKey, Classifier};
pub use engine::OrderingChain;

use crate::models::DeliverableItem;
use std::cmp::Ordering;
use std::fmt::Debug;

/// A rule that orders two items.
///
/// # Convention
/// `Ordering::Less` means `a` is served before `b`. Implementations must be
/// a total order: `compare(a, b)` is the reverse of `compare(b, a)`.
pub trait OrderingRule: Send + Sync + Debug {
    /// Rule name (e.g., "FIFO").
    fn name(&self) -> &'static str;

    /// Compares two items; `Less` = `a` first.
    fn compare(&self, a: &DeliverableItem, b: &DeliverableItem) -> Ordering;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
