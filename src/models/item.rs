//! Deliverable item model.
//!
//! An item is immutable once created. Expedited items are the same type
//! with an [`Urgency::Expedited`] class, so they can be used anywhere a
//! standard item is expected while carrying a priority level on top.

use serde::{Deserialize, Serialize};

/// Unique item identifier.
pub type ItemId = u64;
/// Destination floor number.
pub type Floor = u32;
/// Weight in abstract weight units.
pub type Weight = u32;
/// Arrival time in simulation ticks.
pub type Tick = u64;
/// Urgency ranking of an expedited item (higher = more urgent).
pub type PriorityLevel = u32;

/// Default weight at or above which an item counts as heavy.
pub const HEAVY_THRESHOLD: Weight = 2000;

/// Urgency class of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    /// Served in arrival order after expedited items of the same weight class.
    Standard,
    /// Served ahead of standard items, highest priority first.
    Expedited { priority: PriorityLevel },
}

/// Weight class, derived from an item's weight and a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightClass {
    Heavy,
    Light,
}

impl WeightClass {
    /// Classifies a weight against a threshold (`weight >= threshold` is heavy).
    pub fn of(weight: Weight, threshold: Weight) -> Self {
        if weight >= threshold {
            WeightClass::Heavy
        } else {
            WeightClass::Light
        }
    }
}

/// An item waiting to be delivered.
///
/// # Example
/// ```
/// use u_dispatch::models::{DeliverableItem, WeightClass};
///
/// let letter = DeliverableItem::new(1, 4, 150, 10);
/// let parcel = DeliverableItem::new(2, 2, 2600, 11).with_priority(3);
///
/// assert!(!letter.is_expedited());
/// assert_eq!(parcel.priority(), Some(3));
/// assert_eq!(parcel.weight_class(), WeightClass::Heavy);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverableItem {
    id: ItemId,
    destination_floor: Floor,
    weight: Weight,
    arrival_time: Tick,
    urgency: Urgency,
}

impl DeliverableItem {
    /// Creates a standard item.
    pub fn new(id: ItemId, destination_floor: Floor, weight: Weight, arrival_time: Tick) -> Self {
        Self {
            id,
            destination_floor,
            weight,
            arrival_time,
            urgency: Urgency::Standard,
        }
    }

    /// Creates an expedited item with the given priority level.
    pub fn expedited(
        id: ItemId,
        destination_floor: Floor,
        weight: Weight,
        arrival_time: Tick,
        priority: PriorityLevel,
    ) -> Self {
        Self::new(id, destination_floor, weight, arrival_time).with_priority(priority)
    }

    /// Marks this item as expedited with a priority level.
    pub fn with_priority(mut self, priority: PriorityLevel) -> Self {
        self.urgency = Urgency::Expedited { priority };
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn destination_floor(&self) -> Floor {
        self.destination_floor
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn arrival_time(&self) -> Tick {
        self.arrival_time
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    /// Priority level, or `None` for a standard item.
    pub fn priority(&self) -> Option<PriorityLevel> {
        match self.urgency {
            Urgency::Expedited { priority } => Some(priority),
            Urgency::Standard => None,
        }
    }

    /// Whether the item carries an urgency ranking.
    pub fn is_expedited(&self) -> bool {
        matches!(self.urgency, Urgency::Expedited { .. })
    }

    /// Weight class against the default [`HEAVY_THRESHOLD`].
    pub fn weight_class(&self) -> WeightClass {
        self.weight_class_with(HEAVY_THRESHOLD)
    }

    /// Weight class against a custom threshold.
    pub fn weight_class_with(&self, threshold: Weight) -> WeightClass {
        WeightClass::of(self.weight, threshold)
    }
}
