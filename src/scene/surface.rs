//! Headless record/stop surface
//!
//! Implements every capability the state machine needs: a single circular
//! button region shared by the record and stop buttons, visibility and
//! highlight tracking, and a simulated capture session. Every command is
//! published as a [`SurfaceEvent`].

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::events::SurfaceEvent;
use crate::state::{RecordingControl, TouchSurface, VisualFeedback};
use crate::touch::{Point, Touch, TouchPhase};

use super::capture::CaptureSession;

/// Circular hit region of the record/stop button
///
/// Coordinates have their origin at the bottom-left corner of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonRegion {
    pub center: Point,
    pub radius: f64,
}

impl ButtonRegion {
    /// Button sized to a twelfth of the surface width, centred horizontally
    /// and raised one diameter above the bottom edge
    pub fn for_surface(width: f64) -> Self {
        let radius = width / 12.0;
        Self {
            center: Point::new(width / 2.0, 2.0 * radius),
            radius,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.center.distance_to(point) <= self.radius
    }
}

/// The host scene driven by the state machine
pub struct Scene {
    button: ButtonRegion,
    record_visible: bool,
    stop_visible: bool,
    record_highlighted: bool,
    stop_highlighted: bool,
    capture: CaptureSession,
    /// Channel for publishing surface events
    event_tx: broadcast::Sender<SurfaceEvent>,
}

impl Scene {
    /// Create a scene with both buttons hidden
    pub fn new(button: ButtonRegion, event_tx: broadcast::Sender<SurfaceEvent>) -> Self {
        Self {
            button,
            record_visible: false,
            stop_visible: false,
            record_highlighted: false,
            stop_highlighted: false,
            capture: CaptureSession::new(),
            event_tx,
        }
    }

    pub fn button(&self) -> ButtonRegion {
        self.button
    }

    pub fn record_visible(&self) -> bool {
        self.record_visible
    }

    pub fn stop_visible(&self) -> bool {
        self.stop_visible
    }

    pub fn record_highlighted(&self) -> bool {
        self.record_highlighted
    }

    pub fn stop_highlighted(&self) -> bool {
        self.stop_highlighted
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_running()
    }

    fn show_buttons(&mut self, record: bool, stop: bool) {
        self.record_visible = record;
        self.stop_visible = stop;
    }

    fn emit(&self, event: SurfaceEvent) {
        debug!(%event, "emitting surface event");
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}

impl VisualFeedback for Scene {
    fn show_record_button(&mut self) {
        self.show_buttons(true, false);
        self.emit(SurfaceEvent::RecordButtonShown);
    }

    fn show_stop_button(&mut self) {
        self.show_buttons(false, true);
        self.emit(SurfaceEvent::StopButtonShown);
    }

    fn highlight_record(&mut self, on: bool) {
        self.record_highlighted = on;
        self.emit(SurfaceEvent::RecordHighlighted { on });
    }

    fn highlight_stop(&mut self, on: bool) {
        self.stop_highlighted = on;
        self.emit(SurfaceEvent::StopHighlighted { on });
    }

    fn touch_feedback(&mut self, phase: TouchPhase, touch: &Touch) {
        self.emit(SurfaceEvent::TouchFeedback {
            phase,
            x: touch.location.x,
            y: touch.location.y,
        });
    }
}

impl RecordingControl for Scene {
    fn start_capture(&mut self) {
        match self.capture.start() {
            Ok(()) => {
                info!("capture started");
                self.emit(SurfaceEvent::CaptureStarted);
            }
            Err(e) => {
                warn!(%e, "start capture failed");
                self.emit(SurfaceEvent::CaptureFailed {
                    reason: e.to_string(),
                });
            }
        }
    }

    fn stop_capture(&mut self) {
        match self.capture.stop() {
            Ok(elapsed) => {
                let duration_ms = elapsed.as_millis() as u64;
                info!(duration_ms, "capture stopped");
                self.emit(SurfaceEvent::CaptureStopped);
                self.emit(SurfaceEvent::PreviewReady { duration_ms });
            }
            Err(e) => {
                warn!(%e, "stop capture failed");
                self.emit(SurfaceEvent::CaptureFailed {
                    reason: e.to_string(),
                });
            }
        }
    }
}

impl TouchSurface for Scene {
    fn is_on_button(&self, touch: &Touch) -> bool {
        self.button.contains(touch.location)
    }
}
