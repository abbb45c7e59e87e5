//! Dispatch domain models.
//!
//! Items are the unit of work; workers carry them away in bounded carriers.
//! Workers and carriers are implemented by the surrounding simulation and
//! consumed here through traits.
//!
//! # Domain Mappings
//!
//! | u-dispatch | Mailroom | Warehouse | Hospital |
//! |------------|----------|-----------|----------|
//! | DeliverableItem | Mail item | Pick order | Specimen |
//! | Worker | Delivery robot | Picker | Porter |
//! | BoundedCarrier | Storage tube | Tote | Trolley |

mod item;
mod worker;

pub use item::{
    DeliverableItem, Floor, ItemId, PriorityLevel, Tick, Urgency, Weight, WeightClass,
    HEAVY_THRESHOLD,
};
pub use worker::{same_worker, BoundedCarrier, Worker, WorkerHandle};
