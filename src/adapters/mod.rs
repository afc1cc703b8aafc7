//! Infrastructure adapters. Implement outbound ports.
//!
//! Terminal prompts, progress rendering, the demo executor. Map errors to DomainError.

pub mod executor;
pub mod ui;
