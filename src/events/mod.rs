//! Events module for surface updates
//!
//! Structured events published by the host scene whenever the state machine
//! drives a visual or capture command.

use serde::{Deserialize, Serialize};

use crate::touch::TouchPhase;

/// Events emitted by the scene as the state machine drives it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// Record button visible, stop button hidden
    RecordButtonShown,

    /// Stop button visible, record button hidden
    StopButtonShown,

    /// Record button pressed-state changed
    RecordHighlighted { on: bool },

    /// Stop button pressed-state changed
    StopHighlighted { on: bool },

    /// Capture session started
    CaptureStarted,

    /// Capture session stopped
    CaptureStopped,

    /// A finished capture is ready to preview
    PreviewReady {
        /// Length of the captured session in milliseconds
        duration_ms: u64,
    },

    /// The capture backend rejected a command
    CaptureFailed { reason: String },

    /// Default feedback for a touch no state consumed
    TouchFeedback { phase: TouchPhase, x: f64, y: f64 },
}

impl std::fmt::Display for SurfaceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceEvent::RecordButtonShown => write!(f, "RECORD_BUTTON_SHOWN"),
            SurfaceEvent::StopButtonShown => write!(f, "STOP_BUTTON_SHOWN"),
            SurfaceEvent::RecordHighlighted { on } => write!(f, "RECORD_HIGHLIGHTED ({})", on),
            SurfaceEvent::StopHighlighted { on } => write!(f, "STOP_HIGHLIGHTED ({})", on),
            SurfaceEvent::CaptureStarted => write!(f, "CAPTURE_STARTED"),
            SurfaceEvent::CaptureStopped => write!(f, "CAPTURE_STOPPED"),
            SurfaceEvent::PreviewReady { duration_ms } => {
                write!(f, "PREVIEW_READY ({}ms)", duration_ms)
            }
            SurfaceEvent::CaptureFailed { reason } => write!(f, "CAPTURE_FAILED ({})", reason),
            SurfaceEvent::TouchFeedback { phase, x, y } => {
                write!(f, "TOUCH_FEEDBACK ({} at {:.1},{:.1})", phase, x, y)
            }
        }
    }
}
