//! The dispatch engine: a fixed pool of workers draining a closed queue of
//! built requests under a shared rate gate.
mod engine;
mod outcome;
mod transport;


pub use engine::{DispatchConfig, Dispatcher, RunPhase};
pub use outcome::{Attempt, Outcome, ResponseSummary};
pub use transport::{BodyMode, Transport};
