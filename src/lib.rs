//! touch-recorder: touch-gesture state machine for a record/stop surface
//!
//! Converts raw multi-touch batches into press, drag, release and cancel
//! transitions, and drives a capture lifecycle through host capabilities:
//! - `state`: the five-state machine and the capability traits it consumes
//! - `dispatch`: event intake that routes touch batches to the current state
//! - `scene`: a headless host surface with a simulated capture session
//! - `input`: newline-delimited JSON touch batches from stdin
//!
//! The machine performs no hit-testing and owns no visuals; both are asked
//! of the delegate.

pub mod config;
pub mod dispatch;
pub mod events;
pub mod input;
pub mod lifecycle;
pub mod scene;
pub mod state;
pub mod touch;
