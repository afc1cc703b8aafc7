//! Application use cases. Drive the resumption protocol via ports.

pub mod attempt;
pub mod classifier;
pub mod dispatcher;
pub mod event_subscription;
pub mod input_resolver;
pub mod orchestrator;

pub use attempt::{Attempt, Phase, Resumption};
pub use classifier::{Classification, Termination, classify};
pub use dispatcher::{Dispatcher, PROGRESS_TAG, ProgressSettings};
pub use event_subscription::{EventSubscription, Foreground};
pub use input_resolver::{Collaborator, InputResolver, route};
pub use orchestrator::{AttemptOutcome, Orchestrator};
