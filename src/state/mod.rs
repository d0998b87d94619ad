//! State machine module for the record/stop surface
//!
//! Provides an explicit state machine with five states:
//! - WaitingToRecord: record button shown, idle
//! - RecordButtonPressed: touch held on the record button
//! - Recording: capture running, stop button shown
//! - StopButtonPressed: touch held on the stop button
//! - Previewing: stops capture and passes straight back to WaitingToRecord

mod delegate;
mod handlers;
mod machine;

#[cfg(test)]
pub(crate) mod testing;

pub use delegate::{RecordingControl, SceneControls, SceneDelegate, TouchSurface, VisualFeedback};
pub use handlers::{Reaction, StateHandler, Transition};
pub use machine::{State, StateMachine};
