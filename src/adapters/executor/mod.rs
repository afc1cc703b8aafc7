//! Executor adapters. Implement the Executor port.

pub mod simulated;

pub use simulated::{SignRequest, Signature, SimulatedExecutor};
