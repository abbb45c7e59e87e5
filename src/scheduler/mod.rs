//! Tick-driven dispatcher and idle-worker registry.
//!
//! # Algorithm
//!
//! `Dispatcher` runs a greedy, capability-aware fill: each idle worker in
//! registry order takes up to a carrier's worth of items, expedited before
//! standard and heavy before light (heavy only for workers that can carry
//! them). The batch is then ordered by destination floor.
//!
//! # Registry
//!
//! `IdleRegistry` is a fixed slot array. Workers enter it through
//! `register_waiting` and leave through `deregister_waiting`; departing does
//! not remove a worker by itself.

mod dispatcher;
mod registry;

pub use dispatcher::{
    fill_order, DispatchOutcome, Dispatcher, HEAVY_CAPABLE_FILL_ORDER, LIGHT_ONLY_FILL_ORDER,
};
pub use registry::{IdleRegistry, Registration};
