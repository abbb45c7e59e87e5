//! Worker and carrier interfaces.
//!
//! Workers and their carriers live outside this crate. The dispatcher only
//! needs a capability flag, a carrier to load, and a way to send the worker
//! off once loaded.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::CarrierError;

use super::DeliverableItem;

/// A fixed-capacity ordered container carried by a worker.
///
/// Implementations must refuse an insertion that would exceed their
/// capacity with [`CarrierError::CapacityExceeded`], handing the item back.
pub trait BoundedCarrier {
    /// Appends an item.
    fn insert(&mut self, item: DeliverableItem) -> Result<(), CarrierError>;

    /// Number of items currently held.
    fn len(&self) -> usize;

    /// Whether the carrier holds nothing.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A delivery worker as seen by the dispatcher.
pub trait Worker {
    /// Whether this worker may carry heavy items.
    fn can_carry_heavy(&self) -> bool;

    /// The worker's carrier.
    fn carrier(&self) -> &dyn BoundedCarrier;

    /// Mutable access to the worker's carrier for loading.
    fn carrier_mut(&mut self) -> &mut dyn BoundedCarrier;

    /// Commands the worker to leave with its current load.
    ///
    /// Leaving the idle registry is the worker's own business: its lifecycle
    /// is expected to call `deregister_waiting` afterwards.
    fn depart(&mut self);

    /// Label used in log output.
    fn label(&self) -> String {
        String::from("worker")
    }
}

/// Shared handle to a worker. Handles compare by identity.
pub type WorkerHandle = Rc<RefCell<dyn Worker>>;

/// Whether two handles refer to the same worker.
pub fn same_worker(a: &WorkerHandle, b: &WorkerHandle) -> bool {
    Rc::ptr_eq(a, b)
}
