//! Scene module: the host surface the state machine drives
//!
//! Provides a headless implementation of the visual, capture and hit-test
//! capabilities so the machine can run outside a UI toolkit.

mod capture;
mod surface;

pub use capture::{CaptureError, CaptureSession};
pub use surface::{ButtonRegion, Scene};
