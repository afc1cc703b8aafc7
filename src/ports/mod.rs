//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by the owning view into the application
//! - Outbound: Called by the application into the executor and the collaborators

pub mod event_sink;
pub mod inbound;
pub mod outbound;

pub use event_sink::EventSink;
pub use inbound::OperationHooks;
pub use outbound::{
    Executor, NotificationPort, ProgressPort, SecretEntryPort, TokenInteractionPort,
};
