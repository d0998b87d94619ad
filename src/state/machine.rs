//! Core state machine implementation
//!
//! Holds the single active state and its tracked touch, and sequences every
//! transition as exit hook, swap, entry hook.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::touch::TouchId;

use super::delegate::SceneControls;
use super::handlers::{Reaction, Transition};

/// The five states of the record/stop surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Record button shown, nothing pressed
    WaitingToRecord,
    /// Touch held on the record button
    RecordButtonPressed,
    /// Capture running, stop button shown
    Recording,
    /// Touch held on the stop button
    StopButtonPressed,
    /// Capture torn down, passes straight through to WaitingToRecord
    Previewing,
}

impl Default for State {
    fn default() -> Self {
        Self::WaitingToRecord
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::WaitingToRecord => write!(f, "WaitingToRecord"),
            State::RecordButtonPressed => write!(f, "RecordButtonPressed"),
            State::Recording => write!(f, "Recording"),
            State::StopButtonPressed => write!(f, "StopButtonPressed"),
            State::Previewing => write!(f, "Previewing"),
        }
    }
}

/// The state machine that drives the record/stop surface
pub struct StateMachine<D> {
    /// Current state
    state: State,
    /// Touch owned by the current state, if it armed one
    tracked_touch: Option<TouchId>,
    /// Time when the current state was entered
    state_entered_at: Instant,
    /// Host capabilities
    delegate: D,
}

impl<D: SceneControls> StateMachine<D> {
    /// Create a new state machine, already in `WaitingToRecord`
    pub fn new(delegate: D) -> Self {
        let mut machine = Self {
            state: State::WaitingToRecord,
            tracked_touch: None,
            state_entered_at: Instant::now(),
            delegate,
        };

        info!("state machine started in WaitingToRecord state");
        machine.enter(None);
        machine
    }

    /// Get the current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Touch the current state is following
    pub fn tracked_touch(&self) -> Option<TouchId> {
        self.tracked_touch
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn into_delegate(self) -> D {
        self.delegate
    }

    /// A touch went down on a button. Returns whether it was consumed.
    pub fn touch_down(&mut self, touch: TouchId) -> bool {
        let reaction = self.state.handler().touch_down(touch, &mut self.delegate);
        self.apply(reaction)
    }

    /// The tracked touch moved. Returns whether it was consumed.
    pub fn touch_moved(&mut self, on_button: bool) -> bool {
        let reaction = self
            .state
            .handler()
            .touch_moved(on_button, &mut self.delegate);
        self.apply(reaction)
    }

    /// The tracked touch lifted. Returns whether it was consumed.
    pub fn touch_ended(&mut self, on_button: bool) -> bool {
        let reaction = self
            .state
            .handler()
            .touch_ended(on_button, &mut self.delegate);
        self.apply(reaction)
    }

    /// The tracked touch was cancelled. Returns whether it was consumed.
    pub fn touch_cancelled(&mut self, on_button: bool) -> bool {
        let reaction = self
            .state
            .handler()
            .touch_cancelled(on_button, &mut self.delegate);
        self.apply(reaction)
    }

    /// Move to `target`, running exit and entry hooks
    ///
    /// If the entered state requests a follow-up, it is applied once the
    /// entry hook has returned. A follow-up requesting yet another
    /// transition is ignored.
    pub fn transition(&mut self, target: State) {
        let from = self.swap(target);
        if let Some(next) = self.enter(Some(from)) {
            let from = self.swap(next);
            if let Some(extra) = self.enter(Some(from)) {
                warn!(
                    state = %self.state,
                    requested = %extra,
                    "chained pass-through transition ignored"
                );
            }
        }
    }

    fn apply(&mut self, reaction: Reaction) -> bool {
        if let Reaction::Transition(Transition { target, track }) = reaction {
            self.transition(target);
            // A pass-through target has already moved on and cannot own a touch
            if let Some(touch) = track.filter(|_| self.state == target) {
                debug!(%touch, state = %self.state, "tracking touch");
                self.tracked_touch = Some(touch);
            }
        }
        reaction.is_consumed()
    }

    /// Exit the current state and make `target` current without entering it.
    /// Returns the state that was left.
    fn swap(&mut self, target: State) -> State {
        let old_state = self.state;
        let duration_ms = self.state_entered_at.elapsed().as_millis() as u64;

        info!(
            from = %old_state,
            to = %target,
            duration_ms = duration_ms,
            "state transition"
        );

        old_state.handler().will_exit(target);
        self.tracked_touch = None;

        self.state = target;
        self.state_entered_at = Instant::now();
        old_state
    }

    /// Run the current state's entry hook
    fn enter(&mut self, from: Option<State>) -> Option<State> {
        self.state.handler().did_enter(from, &mut self.delegate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{Call, MockScene};

    fn create_state_machine() -> StateMachine<MockScene> {
        StateMachine::new(MockScene::default())
    }

    /// Drive a fresh machine into `Recording`, then forget the calls so far
    fn recording_machine() -> StateMachine<MockScene> {
        let mut sm = create_state_machine();
        assert!(sm.touch_down(TouchId(1)));
        assert!(sm.touch_ended(true));
        assert_eq!(sm.state(), State::Recording);
        sm.delegate_mut().calls.clear();
        sm
    }

    #[test]
    fn test_initial_state() {
        let sm = create_state_machine();
        assert_eq!(sm.state(), State::WaitingToRecord);
        assert_eq!(sm.tracked_touch(), None);
        assert_eq!(
            sm.delegate().calls,
            vec![Call::HighlightRecord(false), Call::ShowRecord]
        );
    }

    #[test]
    fn test_unhandled_events_leave_state_unchanged() {
        let mut sm = create_state_machine();
        for on_button in [true, false] {
            assert!(!sm.touch_moved(on_button));
            assert!(!sm.touch_ended(on_button));
            assert!(!sm.touch_cancelled(on_button));
        }
        assert_eq!(sm.state(), State::WaitingToRecord);

        let mut sm = recording_machine();
        for on_button in [true, false] {
            assert!(!sm.touch_moved(on_button));
            assert!(!sm.touch_ended(on_button));
            assert!(!sm.touch_cancelled(on_button));
        }
        assert_eq!(sm.state(), State::Recording);
        assert!(sm.delegate().calls.is_empty());
    }

    #[test]
    fn test_pressed_states_decline_touch_down() {
        let mut sm = create_state_machine();
        sm.touch_down(TouchId(1));
        assert!(!sm.touch_down(TouchId(2)));
        assert_eq!(sm.state(), State::RecordButtonPressed);
        assert_eq!(sm.tracked_touch(), Some(TouchId(1)));
    }

    #[test]
    fn test_waiting_to_record_press() {
        let mut sm = create_state_machine();
        sm.delegate_mut().calls.clear();

        assert!(sm.touch_down(TouchId(42)));
        assert_eq!(sm.state(), State::RecordButtonPressed);
        assert_eq!(sm.tracked_touch(), Some(TouchId(42)));
        assert_eq!(sm.delegate().record_highlight(), Some(false));
    }

    #[test]
    fn test_record_press_drag() {
        let mut sm = create_state_machine();
        sm.touch_down(TouchId(1));

        assert!(sm.touch_moved(false));
        assert_eq!(sm.delegate().record_highlight(), Some(false));
        assert!(sm.touch_moved(true));
        assert_eq!(sm.delegate().record_highlight(), Some(true));
        assert_eq!(sm.state(), State::RecordButtonPressed);
        assert_eq!(sm.tracked_touch(), Some(TouchId(1)));
    }

    #[test]
    fn test_release_on_record_starts_capture() {
        let mut sm = create_state_machine();
        sm.touch_down(TouchId(1));
        sm.delegate_mut().calls.clear();

        assert!(sm.touch_ended(true));
        assert_eq!(sm.state(), State::Recording);
        assert_eq!(sm.tracked_touch(), None);
        assert_eq!(sm.delegate().count(&Call::StartCapture), 1);
        assert_eq!(sm.delegate().count(&Call::ShowStop), 1);
        assert_eq!(sm.delegate().stop_highlight(), Some(false));
    }

    #[test]
    fn test_release_off_record_returns_to_waiting() {
        let mut sm = create_state_machine();
        sm.touch_down(TouchId(1));

        assert!(sm.touch_ended(false));
        assert_eq!(sm.state(), State::WaitingToRecord);
        assert_eq!(sm.tracked_touch(), None);
        assert_eq!(sm.delegate().count(&Call::StartCapture), 0);
    }

    #[test]
    fn test_cancel_record_press() {
        for on_button in [true, false] {
            let mut sm = create_state_machine();
            sm.touch_down(TouchId(1));

            assert!(sm.touch_cancelled(on_button));
            assert_eq!(sm.state(), State::WaitingToRecord);
            assert_eq!(sm.tracked_touch(), None);
            assert_eq!(sm.delegate().count(&Call::StartCapture), 0);
            assert_eq!(sm.delegate().count(&Call::StopCapture), 0);
        }
    }

    #[test]
    fn test_stop_press_highlights() {
        let mut sm = recording_machine();

        assert!(sm.touch_down(TouchId(9)));
        assert_eq!(sm.state(), State::StopButtonPressed);
        assert_eq!(sm.tracked_touch(), Some(TouchId(9)));
        assert_eq!(sm.delegate().calls, vec![Call::HighlightStop(true)]);

        assert!(sm.touch_moved(false));
        assert_eq!(sm.delegate().stop_highlight(), Some(false));
    }

    #[test]
    fn test_release_on_stop_passes_through_previewing() {
        let mut sm = recording_machine();
        sm.touch_down(TouchId(2));
        sm.delegate_mut().calls.clear();

        assert!(sm.touch_ended(true));
        assert_eq!(sm.state(), State::WaitingToRecord);
        assert_eq!(sm.tracked_touch(), None);
        assert_eq!(
            sm.delegate().calls,
            vec![
                Call::StopCapture,
                Call::HighlightRecord(false),
                Call::ShowRecord,
            ]
        );
    }

    #[test]
    fn test_release_off_stop_keeps_recording() {
        let mut sm = recording_machine();
        sm.touch_down(TouchId(2));
        sm.delegate_mut().calls.clear();

        assert!(sm.touch_ended(false));
        assert_eq!(sm.state(), State::Recording);
        assert_eq!(sm.tracked_touch(), None);
        assert_eq!(sm.delegate().calls, vec![Call::HighlightStop(false)]);
    }

    #[test]
    fn test_cancel_stop_press() {
        for on_button in [true, false] {
            let mut sm = recording_machine();
            sm.touch_down(TouchId(2));

            assert!(sm.touch_cancelled(on_button));
            assert_eq!(sm.state(), State::Recording);
            assert_eq!(sm.tracked_touch(), None);
            assert_eq!(sm.delegate().count(&Call::StartCapture), 0);
            assert_eq!(sm.delegate().count(&Call::StopCapture), 0);
        }
    }

    #[test]
    fn test_waiting_entry_is_idempotent() {
        let sources = [
            State::WaitingToRecord,
            State::RecordButtonPressed,
            State::Recording,
            State::StopButtonPressed,
        ];
        for source in sources {
            let mut sm = create_state_machine();
            sm.transition(source);
            sm.delegate_mut().calls.clear();

            sm.transition(State::WaitingToRecord);
            assert_eq!(
                sm.delegate().calls,
                vec![Call::HighlightRecord(false), Call::ShowRecord],
                "entered from {source}"
            );
        }
    }

    #[test]
    fn test_transition_clears_tracked_touch() {
        let mut sm = create_state_machine();
        sm.touch_down(TouchId(5));
        sm.transition(State::RecordButtonPressed);
        assert_eq!(sm.state(), State::RecordButtonPressed);
        assert_eq!(sm.tracked_touch(), None);
    }

    #[test]
    fn test_full_cycle_twice() {
        let mut sm = create_state_machine();
        for round in 0..2u64 {
            sm.touch_down(TouchId(round * 2));
            sm.touch_ended(true);
            sm.touch_down(TouchId(round * 2 + 1));
            sm.touch_ended(true);
            assert_eq!(sm.state(), State::WaitingToRecord);
        }
        let scene = sm.into_delegate();
        assert_eq!(scene.count(&Call::StartCapture), 2);
        assert_eq!(scene.count(&Call::StopCapture), 2);
    }
}
