//! Recording delegate used by the state and dispatch tests

use std::collections::HashSet;

use crate::touch::{Touch, TouchId, TouchPhase};

use super::delegate::{RecordingControl, TouchSurface, VisualFeedback};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ShowRecord,
    ShowStop,
    HighlightRecord(bool),
    HighlightStop(bool),
    StartCapture,
    StopCapture,
    Feedback(TouchPhase, TouchId),
}

/// Logs every command and answers hit-tests from a fixed set of touches
#[derive(Debug, Default)]
pub struct MockScene {
    pub calls: Vec<Call>,
    pub on_button: HashSet<TouchId>,
}

impl MockScene {
    pub fn with_on_button(ids: &[u64]) -> Self {
        Self {
            calls: Vec::new(),
            on_button: ids.iter().copied().map(TouchId).collect(),
        }
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    /// Last highlight value sent for the record button
    pub fn record_highlight(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::HighlightRecord(on) => Some(*on),
            _ => None,
        })
    }

    /// Last highlight value sent for the stop button
    pub fn stop_highlight(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::HighlightStop(on) => Some(*on),
            _ => None,
        })
    }
}

impl VisualFeedback for MockScene {
    fn show_record_button(&mut self) {
        self.calls.push(Call::ShowRecord);
    }

    fn show_stop_button(&mut self) {
        self.calls.push(Call::ShowStop);
    }

    fn highlight_record(&mut self, on: bool) {
        self.calls.push(Call::HighlightRecord(on));
    }

    fn highlight_stop(&mut self, on: bool) {
        self.calls.push(Call::HighlightStop(on));
    }

    fn touch_feedback(&mut self, phase: TouchPhase, touch: &Touch) {
        self.calls.push(Call::Feedback(phase, touch.id));
    }
}

impl RecordingControl for MockScene {
    fn start_capture(&mut self) {
        self.calls.push(Call::StartCapture);
    }

    fn stop_capture(&mut self) {
        self.calls.push(Call::StopCapture);
    }
}

impl TouchSurface for MockScene {
    fn is_on_button(&self, touch: &Touch) -> bool {
        self.on_button.contains(&touch.id)
    }
}
