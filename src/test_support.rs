//! Worker and carrier doubles shared by unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::CarrierError;
use crate::models::{BoundedCarrier, DeliverableItem, Worker, WorkerHandle};

/// Vec-backed carrier that enforces a fixed capacity.
#[derive(Debug)]
pub struct TestCarrier {
    pub capacity: usize,
    pub items: Vec<DeliverableItem>,
}

impl TestCarrier {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    pub fn ids(&self) -> Vec<u64> {
        self.items.iter().map(|i| i.id()).collect()
    }

    pub fn floors(&self) -> Vec<u32> {
        self.items.iter().map(|i| i.destination_floor()).collect()
    }
}

impl BoundedCarrier for TestCarrier {
    fn insert(&mut self, item: DeliverableItem) -> Result<(), CarrierError> {
        if self.items.len() >= self.capacity {
            return Err(CarrierError::capacity_exceeded(self.capacity, item));
        }
        self.items.push(item);
        Ok(())
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug)]
pub struct TestWorker {
    pub name: String,
    pub strong: bool,
    pub carrier: TestCarrier,
    pub departures: usize,
}

impl TestWorker {
    pub fn strong(name: &str) -> Self {
        Self::new(name, true, 4)
    }

    pub fn weak(name: &str) -> Self {
        Self::new(name, false, 4)
    }

    pub fn new(name: &str, strong: bool, capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            strong,
            carrier: TestCarrier::new(capacity),
            departures: 0,
        }
    }

    /// Preloads the carrier, bypassing the dispatcher.
    pub fn preloaded(mut self, items: Vec<DeliverableItem>) -> Self {
        self.carrier.items.extend(items);
        self
    }
}

impl Worker for TestWorker {
    fn can_carry_heavy(&self) -> bool {
        self.strong
    }

    fn carrier(&self) -> &dyn BoundedCarrier {
        &self.carrier
    }

    fn carrier_mut(&mut self) -> &mut dyn BoundedCarrier {
        &mut self.carrier
    }

    fn depart(&mut self) {
        self.departures += 1;
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

/// Wraps a worker, returning the concrete handle for inspection and the
/// type-erased handle for the dispatcher.
pub fn handle(worker: TestWorker) -> (Rc<RefCell<TestWorker>>, WorkerHandle) {
    let concrete = Rc::new(RefCell::new(worker));
    let erased: WorkerHandle = concrete.clone();
    (concrete, erased)
}
