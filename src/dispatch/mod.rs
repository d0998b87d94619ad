//! Dispatch module: the host-facing event intake
//!
//! Turns raw touch-phase batches into state machine events.

mod dispatcher;

pub use dispatcher::Dispatcher;
