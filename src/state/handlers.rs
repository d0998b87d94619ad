//! Per-state behavior
//!
//! Each state is a unit type implementing [`StateHandler`]. The trait's
//! default methods decline every event, so a state only spells out the rows
//! of the transition table it takes part in.

use crate::touch::TouchId;

use super::delegate::SceneControls;
use super::machine::State;

/// A requested move to another state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State to enter
    pub target: State,
    /// Touch the entered state starts tracking
    pub track: Option<TouchId>,
}

impl Transition {
    pub fn to(target: State) -> Self {
        Self {
            target,
            track: None,
        }
    }

    pub fn tracking(mut self, touch: TouchId) -> Self {
        self.track = Some(touch);
        self
    }
}

/// Result of offering an event to a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Not handled; the dispatcher falls back to default feedback
    Declined,
    /// Handled without leaving the state
    Consumed,
    /// Handled, and the machine must apply this transition
    Transition(Transition),
}

impl Reaction {
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Reaction::Declined)
    }
}

impl From<Transition> for Reaction {
    fn from(transition: Transition) -> Self {
        Reaction::Transition(transition)
    }
}

/// Touch handlers and lifecycle hooks shared by all states
pub trait StateHandler: Sync {
    /// A touch went down on a button
    fn touch_down(&self, _touch: TouchId, _controls: &mut dyn SceneControls) -> Reaction {
        Reaction::Declined
    }

    /// The tracked touch moved
    fn touch_moved(&self, _on_button: bool, _controls: &mut dyn SceneControls) -> Reaction {
        Reaction::Declined
    }

    /// The tracked touch lifted
    fn touch_ended(&self, _on_button: bool, _controls: &mut dyn SceneControls) -> Reaction {
        Reaction::Declined
    }

    /// The tracked touch was cancelled by the system
    fn touch_cancelled(&self, _on_button: bool, _controls: &mut dyn SceneControls) -> Reaction {
        Reaction::Declined
    }

    /// Entry side effects. A returned state is entered right after this
    /// hook returns.
    fn did_enter(&self, _from: Option<State>, _controls: &mut dyn SceneControls) -> Option<State> {
        None
    }

    /// Called before the state is left. The machine drops the tracked touch
    /// after this returns.
    fn will_exit(&self, _to: State) {}
}

/// Idle, record button visible
pub struct WaitingToRecord;

impl StateHandler for WaitingToRecord {
    fn touch_down(&self, touch: TouchId, _controls: &mut dyn SceneControls) -> Reaction {
        Transition::to(State::RecordButtonPressed)
            .tracking(touch)
            .into()
    }

    fn did_enter(&self, _from: Option<State>, controls: &mut dyn SceneControls) -> Option<State> {
        controls.highlight_record(false);
        controls.show_record_button();
        None
    }
}

/// Finger down on the record button, capture not started yet
pub struct RecordButtonPressed;

impl StateHandler for RecordButtonPressed {
    fn touch_moved(&self, on_button: bool, controls: &mut dyn SceneControls) -> Reaction {
        controls.highlight_record(on_button);
        Reaction::Consumed
    }

    fn touch_ended(&self, on_button: bool, _controls: &mut dyn SceneControls) -> Reaction {
        if on_button {
            Transition::to(State::Recording).into()
        } else {
            Transition::to(State::WaitingToRecord).into()
        }
    }

    fn touch_cancelled(&self, _on_button: bool, _controls: &mut dyn SceneControls) -> Reaction {
        Transition::to(State::WaitingToRecord).into()
    }

    fn did_enter(&self, _from: Option<State>, controls: &mut dyn SceneControls) -> Option<State> {
        controls.highlight_record(false);
        controls.show_record_button();
        None
    }
}

/// Capture running, stop button visible
pub struct Recording;

impl StateHandler for Recording {
    fn touch_down(&self, touch: TouchId, _controls: &mut dyn SceneControls) -> Reaction {
        Transition::to(State::StopButtonPressed)
            .tracking(touch)
            .into()
    }

    fn did_enter(&self, from: Option<State>, controls: &mut dyn SceneControls) -> Option<State> {
        controls.highlight_stop(false);
        // Returning from an abandoned stop press: capture is still running
        if from != Some(State::StopButtonPressed) {
            controls.show_stop_button();
            controls.start_capture();
        }
        None
    }
}

/// Finger down on the stop button while capturing
pub struct StopButtonPressed;

impl StateHandler for StopButtonPressed {
    fn touch_moved(&self, on_button: bool, controls: &mut dyn SceneControls) -> Reaction {
        controls.highlight_stop(on_button);
        Reaction::Consumed
    }

    fn touch_ended(&self, on_button: bool, _controls: &mut dyn SceneControls) -> Reaction {
        if on_button {
            Transition::to(State::Previewing).into()
        } else {
            Transition::to(State::Recording).into()
        }
    }

    fn touch_cancelled(&self, _on_button: bool, _controls: &mut dyn SceneControls) -> Reaction {
        Transition::to(State::Recording).into()
    }

    fn did_enter(&self, _from: Option<State>, controls: &mut dyn SceneControls) -> Option<State> {
        controls.highlight_stop(true);
        None
    }
}

/// Pass-through: stops capture and hands straight back to waiting
pub struct Previewing;

impl StateHandler for Previewing {
    fn did_enter(&self, _from: Option<State>, controls: &mut dyn SceneControls) -> Option<State> {
        controls.stop_capture();
        Some(State::WaitingToRecord)
    }
}

impl State {
    /// The behavior backing this state
    pub fn handler(self) -> &'static dyn StateHandler {
        match self {
            State::WaitingToRecord => &WaitingToRecord,
            State::RecordButtonPressed => &RecordButtonPressed,
            State::Recording => &Recording,
            State::StopButtonPressed => &StopButtonPressed,
            State::Previewing => &Previewing,
        }
    }
}
