//! Capabilities the state machine consumes from its host
//!
//! The machine never owns the surface: a delegate may be a `&mut` borrow of
//! the host scene, which must outlive the machine.

use crate::touch::{Touch, TouchPhase};

/// Button visibility and pressed-state visuals
pub trait VisualFeedback {
    /// Show the record button and hide the stop button
    fn show_record_button(&mut self);

    /// Show the stop button and hide the record button
    fn show_stop_button(&mut self);

    fn highlight_record(&mut self, on: bool);

    fn highlight_stop(&mut self, on: bool);

    /// Feedback for touches the current state declined
    fn touch_feedback(&mut self, _phase: TouchPhase, _touch: &Touch) {}
}

/// Screen capture control
///
/// Both commands are fire-and-forget: failures are reported by the
/// implementor through its own channel and never reach the state machine.
pub trait RecordingControl {
    fn start_capture(&mut self);

    fn stop_capture(&mut self);
}

/// Hit-testing against the interactive button region
pub trait TouchSurface {
    /// Whether the touch currently overlaps the record or stop button
    fn is_on_button(&self, touch: &Touch) -> bool;
}

/// Everything a state's entry hook and handlers are allowed to drive
pub trait SceneControls: VisualFeedback + RecordingControl {}

impl<T: VisualFeedback + RecordingControl + ?Sized> SceneControls for T {}

/// Full delegate required by the dispatcher
pub trait SceneDelegate: SceneControls + TouchSurface {}

impl<T: SceneControls + TouchSurface + ?Sized> SceneDelegate for T {}

impl<T: VisualFeedback + ?Sized> VisualFeedback for &mut T {
    fn show_record_button(&mut self) {
        (**self).show_record_button()
    }

    fn show_stop_button(&mut self) {
        (**self).show_stop_button()
    }

    fn highlight_record(&mut self, on: bool) {
        (**self).highlight_record(on)
    }

    fn highlight_stop(&mut self, on: bool) {
        (**self).highlight_stop(on)
    }

    fn touch_feedback(&mut self, phase: TouchPhase, touch: &Touch) {
        (**self).touch_feedback(phase, touch)
    }
}

impl<T: RecordingControl + ?Sized> RecordingControl for &mut T {
    fn start_capture(&mut self) {
        (**self).start_capture()
    }

    fn stop_capture(&mut self) {
        (**self).stop_capture()
    }
}

impl<T: TouchSurface + ?Sized> TouchSurface for &mut T {
    fn is_on_button(&self, touch: &Touch) -> bool {
        (**self).is_on_button(touch)
    }
}
