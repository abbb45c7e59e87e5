//! Batch dispatching for a fleet of delivery workers.
//!
//! Items arrive continuously and are buffered by urgency and weight class.
//! On every tick the dispatcher loads each idle worker's bounded carrier
//! from those buffers, respecting what the worker is able to carry, orders
//! the batch by destination floor, and sends the worker off.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `DeliverableItem`, `Urgency`, `WeightClass`,
//!   and the `Worker` / `BoundedCarrier` interfaces implemented by the host
//! - **`dispatching`**: `Classifier` with its four ordered buffers, and the
//!   `OrderingRule` / `OrderingChain` used to order them
//! - **`scheduler`**: `Dispatcher` (tick loop, batch composition) and
//!   `IdleRegistry`
//! - **`config`**: `DispatchConfig` and `OverflowPolicy`
//! - **`validation`**: Input integrity checks (duplicate IDs, bad weights/floors)
//!
//! # Architecture
//!
//! Everything here is single-threaded and synchronous. The host simulation
//! owns the clock, item generation, and worker movement; it calls
//! `add_item`, `on_tick`, `register_waiting`, and `deregister_waiting`.

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

#[cfg(test)]
mod test_support;
