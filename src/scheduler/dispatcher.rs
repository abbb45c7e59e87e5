//! Tick-driven batch dispatcher.
//!
//! # Algorithm
//!
//! On every tick, for each idle worker in slot order:
//!
//! 1. Pick the fill order from the worker's capability.
//! 2. Drain buffers in that order into a batch, each buffer to exhaustion,
//!    until the batch reaches carrier capacity.
//! 3. Stable-sort the batch by destination floor.
//! 4. Load the batch into the carrier; the first refusal ends loading.
//! 5. Send the worker off if its carrier holds anything.
//!
//! # Complexity
//! O(w * c * b) per tick where w=idle workers, c=carrier capacity,
//! b=buffer insertion cost.

use tracing::{debug, info, warn};

use super::registry::{IdleRegistry, Registration};
use crate::config::{DispatchConfig, OverflowPolicy};
use crate::dispatching::{BufferKey, Classifier, OrderingChain};
use crate::error::ConfigResult;
use crate::models::{DeliverableItem, WorkerHandle};

/// Fill order for a worker that may carry heavy items.
pub const HEAVY_CAPABLE_FILL_ORDER: [BufferKey; 4] = BufferKey::ALL;

/// Fill order for a worker restricted to light items.
pub const LIGHT_ONLY_FILL_ORDER: [BufferKey; 2] =
    [BufferKey::ExpeditedLight, BufferKey::StandardLight];

/// Buffers visited for a worker, in order. Heavy buffers are absent for a
/// worker that cannot carry them.
pub fn fill_order(can_carry_heavy: bool) -> &'static [BufferKey] {
    if can_carry_heavy {
        &HEAVY_CAPABLE_FILL_ORDER
    } else {
        &LIGHT_ONLY_FILL_ORDER
    }
}

/// What one `fill_and_dispatch` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Items placed in the carrier.
    pub loaded: usize,
    /// Refused items discarded under [`OverflowPolicy::Drop`].
    pub dropped: usize,
    /// Refused items returned to the buffers under [`OverflowPolicy::Requeue`].
    pub requeued: usize,
    /// Whether the worker was told to depart.
    pub departed: bool,
    /// The worker handle was already borrowed and was left alone.
    pub skipped: bool,
}

/// Classifies incoming items and loads idle workers each tick.
///
/// # Example
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use u_dispatch::error::CarrierError;
/// use u_dispatch::models::{BoundedCarrier, DeliverableItem, Worker, WorkerHandle};
/// use u_dispatch::scheduler::Dispatcher;
///
/// struct Tube(Vec<DeliverableItem>);
///
/// impl BoundedCarrier for Tube {
///     fn insert(&mut self, item: DeliverableItem) -> Result<(), CarrierError> {
///         if self.0.len() >= 4 {
///             return Err(CarrierError::capacity_exceeded(4, item));
///         }
///         self.0.push(item);
///         Ok(())
///     }
///     fn len(&self) -> usize {
///         self.0.len()
///     }
/// }
///
/// struct Robot {
///     tube: Tube,
///     away: bool,
/// }
///
/// impl Worker for Robot {
///     fn can_carry_heavy(&self) -> bool { false }
///     fn carrier(&self) -> &dyn BoundedCarrier { &self.tube }
///     fn carrier_mut(&mut self) -> &mut dyn BoundedCarrier { &mut self.tube }
///     fn depart(&mut self) { self.away = true; }
/// }
///
/// let robot = Rc::new(RefCell::new(Robot { tube: Tube(Vec::new()), away: false }));
/// let handle: WorkerHandle = robot.clone();
///
/// let mut dispatcher = Dispatcher::default();
/// dispatcher.register_waiting(handle.clone());
/// dispatcher.add_item(DeliverableItem::new(1, 6, 300, 0));
/// dispatcher.add_item(DeliverableItem::new(2, 2, 2500, 0)); // heavy, stays buffered
/// dispatcher.on_tick();
///
/// assert!(robot.borrow().away);
/// assert_eq!(robot.borrow().tube.0.len(), 1);
/// assert_eq!(dispatcher.classifier().total_len(), 1);
/// ```
#[derive(Debug)]
pub struct Dispatcher {
    config: DispatchConfig,
    classifier: Classifier,
    registry: IdleRegistry,
    batch_order: OrderingChain,
}

impl Dispatcher {
    /// Creates a dispatcher after validating the configuration.
    pub fn new(config: DispatchConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            classifier: Classifier::new(config.heavy_threshold),
            registry: IdleRegistry::new(config.fleet_size),
            batch_order: OrderingChain::by_floor(),
            config,
        })
    }

    /// Replaces the ordering applied to a batch before loading.
    pub fn with_batch_order(mut self, order: OrderingChain) -> Self {
        self.batch_order = order;
        self
    }

    /// Buffers a newly arrived item.
    pub fn add_item(&mut self, item: DeliverableItem) -> BufferKey {
        self.classifier.add_item(item)
    }

    /// Runs one scheduling cycle over every idle worker.
    pub fn on_tick(&mut self) {
        let waiting = self.registry.waiting();
        debug!(
            idle = waiting.len(),
            buffered = self.classifier.total_len(),
            "dispatch tick"
        );
        for worker in &waiting {
            self.fill_and_dispatch(worker);
        }
    }

    /// Loads one worker from the buffers and sends it off if loaded.
    pub fn fill_and_dispatch(&mut self, worker: &WorkerHandle) -> DispatchOutcome {
        let Ok(mut worker) = worker.try_borrow_mut() else {
            warn!("worker handle already borrowed, skipping this tick");
            return DispatchOutcome {
                skipped: true,
                ..DispatchOutcome::default()
            };
        };
        let label = worker.label();
        let order = fill_order(worker.can_carry_heavy());

        let mut batch = self.compose_batch(order);
        self.batch_order.sort(&mut batch);

        let mut outcome = DispatchOutcome::default();
        let mut unplaced = Vec::new();
        let mut pending = batch.into_iter();
        for item in pending.by_ref() {
            match worker.carrier_mut().insert(item) {
                Ok(()) => outcome.loaded += 1,
                Err(err) => {
                    warn!(
                        worker = %label,
                        loaded = outcome.loaded,
                        error = %err,
                        "carrier refused item, abandoning rest of batch"
                    );
                    unplaced.push(err.into_item());
                    break;
                }
            }
        }
        unplaced.extend(pending);

        if !unplaced.is_empty() {
            self.handle_unplaced(&label, unplaced, &mut outcome);
        }

        if worker.carrier().is_empty() {
            debug!(worker = %label, "nothing to carry");
        } else {
            worker.depart();
            outcome.departed = true;
            info!(
                worker = %label,
                loaded = outcome.loaded,
                carried = worker.carrier().len(),
                "worker dispatched"
            );
        }
        outcome
    }

    /// Adds a worker to the first free registry slot.
    ///
    /// A full registry or an already-registered handle is a silent no-op.
    pub fn register_waiting(&mut self, worker: WorkerHandle) {
        match self.registry.register(worker) {
            Registration::Registered(slot) => debug!(slot, "worker waiting"),
            Registration::AlreadyWaiting(slot) => debug!(slot, "worker already waiting"),
            Registration::Full => warn!(
                capacity = self.registry.capacity(),
                "idle registry full, registration dropped"
            ),
        }
    }

    /// Removes a worker from the registry; absent handles are ignored.
    pub fn deregister_waiting(&mut self, worker: &WorkerHandle) {
        if let Some(slot) = self.registry.deregister(worker) {
            debug!(slot, "worker no longer waiting");
        }
    }

    /// Whether a worker is currently registered as idle.
    pub fn is_waiting(&self, worker: &WorkerHandle) -> bool {
        self.registry.contains(worker)
    }

    /// Number of registered idle workers.
    pub fn idle_count(&self) -> usize {
        self.registry.len()
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn registry(&self) -> &IdleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Drains buffers in `order` until the batch is full or they run dry.
    fn compose_batch(&mut self, order: &[BufferKey]) -> Vec<DeliverableItem> {
        let limit = self.config.carrier_capacity;
        let mut batch = Vec::with_capacity(limit);
        for &key in order {
            while batch.len() < limit {
                match self.classifier.take_one(key) {
                    Some(item) => batch.push(item),
                    None => break,
                }
            }
            if batch.len() >= limit {
                break;
            }
        }
        batch
    }

    fn handle_unplaced(
        &mut self,
        label: &str,
        unplaced: Vec<DeliverableItem>,
        outcome: &mut DispatchOutcome,
    ) {
        match self.config.overflow_policy {
            OverflowPolicy::Drop => {
                let ids: Vec<u64> = unplaced.iter().map(DeliverableItem::id).collect();
                warn!(worker = %label, dropped = ?ids, "unplaced items dropped");
                outcome.dropped = unplaced.len();
            }
            OverflowPolicy::Requeue => {
                outcome.requeued = unplaced.len();
                for item in unplaced {
                    self.classifier.add_item(item);
                }
                debug!(worker = %label, requeued = outcome.requeued, "unplaced items requeued");
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        let config = DispatchConfig::default();
        Self {
            classifier: Classifier::new(config.heavy_threshold),
            registry: IdleRegistry::new(config.fleet_size),
            batch_order: OrderingChain::by_floor(),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::test_support::{handle, TestWorker};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn heavy(id: u64, floor: u32, arrival: u64) -> DeliverableItem {
        DeliverableItem::new(id, floor, 2500, arrival)
    }

    fn light(id: u64, floor: u32, arrival: u64) -> DeliverableItem {
        DeliverableItem::new(id, floor, 300, arrival)
    }

    #[test]
    fn test_fill_order_by_capability() {
        assert_eq!(fill_order(true), &BufferKey::ALL);
        assert_eq!(
            fill_order(false),
            &[BufferKey::ExpeditedLight, BufferKey::StandardLight]
        );
        assert!(fill_order(false).iter().all(|k| !k.is_heavy()));
    }

    #[test]
    fn test_heavy_capable_batch_capped_and_floor_sorted() {
        let mut d = Dispatcher::default();
        d.add_item(heavy(1, 6, 0).with_priority(5));
        d.add_item(heavy(2, 2, 0).with_priority(1));
        d.add_item(heavy(3, 4, 0).with_priority(3));
        d.add_item(heavy(4, 3, 1));
        d.add_item(heavy(5, 1, 2));

        let (robot, h) = handle(TestWorker::strong("strong"));
        d.register_waiting(h.clone());
        d.on_tick();

        let robot = robot.borrow();
        // Priorities 5,3,1 then the t=1 standard item; t=2 does not fit.
        assert_eq!(robot.carrier.ids(), vec![2, 4, 3, 1]);
        assert_eq!(robot.carrier.floors(), vec![2, 3, 4, 6]);
        assert_eq!(robot.departures, 1);
        assert_eq!(d.classifier().size_of(BufferKey::StandardHeavy), 1);
        assert_eq!(d.classifier().peek(BufferKey::StandardHeavy).map(|i| i.id()), Some(5));
    }

    #[test]
    fn test_larger_carrier_takes_whole_scenario() {
        let config = DispatchConfig::default().with_carrier_capacity(5);
        let mut d = Dispatcher::new(config).unwrap();
        d.add_item(heavy(1, 6, 0).with_priority(5));
        d.add_item(heavy(2, 2, 0).with_priority(1));
        d.add_item(heavy(3, 4, 0).with_priority(3));
        d.add_item(heavy(4, 3, 1));
        d.add_item(heavy(5, 1, 2));

        let (robot, h) = handle(TestWorker::new("big", true, 5));
        let outcome = d.fill_and_dispatch(&h);

        assert_eq!(outcome.loaded, 5);
        assert!(outcome.departed);
        assert_eq!(robot.borrow().carrier.ids(), vec![5, 2, 4, 3, 1]);
        assert!(d.classifier().is_empty());
    }

    #[test]
    fn test_light_only_worker_ignores_heavy_buffers() {
        let mut d = Dispatcher::default();
        d.add_item(heavy(1, 2, 0));
        d.add_item(heavy(2, 3, 0).with_priority(9));

        let (robot, h) = handle(TestWorker::weak("weak"));
        let outcome = d.fill_and_dispatch(&h);

        assert_eq!(outcome, DispatchOutcome::default());
        assert!(robot.borrow().carrier.items.is_empty());
        assert_eq!(robot.borrow().departures, 0);
        assert_eq!(d.classifier().total_len(), 2);
    }

    #[test]
    fn test_buffer_drained_before_next() {
        let mut d = Dispatcher::default();
        d.add_item(light(1, 9, 5).with_priority(1));
        d.add_item(light(2, 8, 6).with_priority(2));
        for id in 3..8 {
            d.add_item(light(id, 1, id));
        }

        let (robot, h) = handle(TestWorker::weak("weak"));
        d.fill_and_dispatch(&h);

        // Both expedited items, then the two oldest standard items.
        assert_eq!(robot.borrow().carrier.ids(), vec![3, 4, 2, 1]);
        assert_eq!(d.classifier().size_of(BufferKey::StandardLight), 3);
        assert_eq!(d.classifier().size_of(BufferKey::ExpeditedLight), 0);
    }

    #[test]
    fn test_equal_floors_keep_extraction_order() {
        let mut d = Dispatcher::default();
        d.add_item(light(1, 3, 0));
        d.add_item(light(2, 3, 1).with_priority(1));

        let (robot, h) = handle(TestWorker::strong("s"));
        d.fill_and_dispatch(&h);
        assert_eq!(robot.borrow().carrier.ids(), vec![2, 1]);
    }

    #[test]
    fn test_random_contents_respect_capability_and_capacity() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut d = Dispatcher::default();
        let mut next_id = 0;

        for tick in 0..200u64 {
            for _ in 0..rng.random_range(0..6) {
                let mut item = DeliverableItem::new(
                    next_id,
                    rng.random_range(1..=14),
                    rng.random_range(1..=4000),
                    tick,
                );
                if rng.random_bool(0.25) {
                    item = item.with_priority(rng.random_range(1..=5));
                }
                d.add_item(item);
                next_id += 1;
            }

            let strong = rng.random_bool(0.5);
            let (robot, h) = handle(TestWorker::new("r", strong, 4));
            d.register_waiting(h.clone());
            d.on_tick();
            d.deregister_waiting(&h);

            let robot = robot.borrow();
            let items = &robot.carrier.items;
            assert!(items.len() <= 4);
            if !strong {
                assert!(items.iter().all(|i| i.weight() < 2000));
            }
            let floors = robot.carrier.floors();
            assert!(floors.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(robot.departures, usize::from(!items.is_empty()));
        }
        assert_eq!(d.idle_count(), 0);
    }

    #[test]
    fn test_third_registration_is_served_fourth_dropped() {
        let mut d = Dispatcher::default();
        let (a, ha) = handle(TestWorker::strong("A"));
        let (b, hb) = handle(TestWorker::weak("B"));
        let (c, hc) = handle(TestWorker::weak("C"));
        let (e, he) = handle(TestWorker::strong("E"));

        d.register_waiting(ha);
        d.register_waiting(hb);
        d.register_waiting(hc.clone());
        assert_eq!(d.idle_count(), 3);
        assert!(d.is_waiting(&hc));

        d.register_waiting(he.clone());
        assert!(!d.is_waiting(&he));
        assert_eq!(d.idle_count(), 3);

        for id in 0..12 {
            d.add_item(light(id, 2, id));
        }
        d.on_tick();

        assert_eq!(a.borrow().carrier.ids(), vec![0, 1, 2, 3]);
        assert_eq!(b.borrow().carrier.ids(), vec![4, 5, 6, 7]);
        assert_eq!(c.borrow().carrier.ids(), vec![8, 9, 10, 11]);
        assert!(e.borrow().carrier.items.is_empty());
        assert_eq!(e.borrow().departures, 0);
    }

    #[test]
    fn test_deregister_absent_leaves_registry() {
        let mut d = Dispatcher::default();
        let (_, ha) = handle(TestWorker::strong("A"));
        let (_, stranger) = handle(TestWorker::strong("X"));
        d.register_waiting(ha.clone());

        d.deregister_waiting(&stranger);
        assert_eq!(d.idle_count(), 1);
        assert_eq!(d.registry().slot_of(&ha), Some(0));
    }

    #[test]
    fn test_depart_does_not_deregister() {
        let mut d = Dispatcher::default();
        let (robot, h) = handle(TestWorker::strong("A"));
        d.register_waiting(h.clone());
        d.add_item(light(1, 1, 0));
        d.on_tick();

        assert_eq!(robot.borrow().departures, 1);
        assert!(d.is_waiting(&h));
    }

    #[test]
    fn test_overflow_drops_remainder() {
        let mut d = Dispatcher::default();
        for id in 0..4 {
            d.add_item(light(id, id as u32 + 1, id));
        }
        let worker = TestWorker::weak("full").preloaded(vec![
            light(90, 1, 0),
            light(91, 1, 0),
            light(92, 1, 0),
        ]);
        let (robot, h) = handle(worker);

        let outcome = d.fill_and_dispatch(&h);
        assert_eq!(outcome.loaded, 1);
        assert_eq!(outcome.dropped, 3);
        assert_eq!(outcome.requeued, 0);
        assert!(outcome.departed);
        assert_eq!(robot.borrow().carrier.ids(), vec![90, 91, 92, 0]);
        assert!(d.classifier().is_empty());
    }

    #[test]
    fn test_overflow_requeue_policy() {
        let config = DispatchConfig::default().with_overflow_policy(OverflowPolicy::Requeue);
        let mut d = Dispatcher::new(config).unwrap();
        for id in 0..4 {
            d.add_item(light(id, id as u32 + 1, id));
        }
        let worker = TestWorker::weak("full").preloaded(vec![
            light(90, 1, 0),
            light(91, 1, 0),
            light(92, 1, 0),
        ]);
        let (_, h) = handle(worker);

        let outcome = d.fill_and_dispatch(&h);
        assert_eq!(outcome.loaded, 1);
        assert_eq!(outcome.requeued, 3);
        assert_eq!(outcome.dropped, 0);
        assert_eq!(d.classifier().size_of(BufferKey::StandardLight), 3);
        assert_eq!(d.classifier().peek(BufferKey::StandardLight).map(|i| i.id()), Some(1));
    }

    #[test]
    fn test_preloaded_worker_departs_with_empty_buffers() {
        let mut d = Dispatcher::default();
        let (robot, h) = handle(TestWorker::weak("w").preloaded(vec![light(1, 1, 0)]));
        let outcome = d.fill_and_dispatch(&h);
        assert_eq!(outcome.loaded, 0);
        assert!(outcome.departed);
        assert_eq!(robot.borrow().departures, 1);
    }

    #[test]
    fn test_borrowed_worker_is_skipped() {
        let mut d = Dispatcher::default();
        d.add_item(light(1, 1, 0));
        let (robot, h) = handle(TestWorker::strong("busy"));

        let guard = robot.borrow_mut();
        let outcome = d.fill_and_dispatch(&h);
        drop(guard);

        assert!(outcome.skipped);
        assert_eq!(d.classifier().total_len(), 1);
        assert!(robot.borrow().carrier.items.is_empty());
    }

    #[test]
    fn test_custom_batch_order() {
        let mut d = Dispatcher::default().with_batch_order(OrderingChain::fifo());
        d.add_item(light(1, 9, 0));
        d.add_item(light(2, 1, 1));
        let (robot, h) = handle(TestWorker::weak("w"));
        d.fill_and_dispatch(&h);
        assert_eq!(robot.borrow().carrier.ids(), vec![1, 2]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Dispatcher::new(DispatchConfig::default().with_fleet_size(0)).unwrap_err();
        assert_eq!(err, ConfigError::ZeroFleetSize);
    }

    #[test]
    fn test_registry_sized_from_config() {
        let d = Dispatcher::new(DispatchConfig::default().with_fleet_size(5)).unwrap();
        assert_eq!(d.registry().capacity(), 5);
        assert_eq!(d.config().fleet_size, 5);
        assert_eq!(d.idle_count(), 0);
    }
}
