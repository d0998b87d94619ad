//! Touch batch routing
//!
//! Picks the one touch in a batch that matters to the current state, offers
//! it to the state machine, and falls back to default feedback for the whole
//! batch when the state declines.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::state::{SceneDelegate, State, StateMachine};
use crate::touch::{Touch, TouchBatch, TouchPhase};

/// Event intake for the host UI runtime
pub struct Dispatcher<D> {
    machine: StateMachine<D>,
}

impl<D: SceneDelegate> Dispatcher<D> {
    /// Create a dispatcher around a fresh state machine
    pub fn new(delegate: D) -> Self {
        Self {
            machine: StateMachine::new(delegate),
        }
    }

    pub fn machine(&self) -> &StateMachine<D> {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut StateMachine<D> {
        &mut self.machine
    }

    /// Current state of the underlying machine
    pub fn state(&self) -> State {
        self.machine.state()
    }

    /// Run the dispatcher, processing touch batches until the sender closes
    ///
    /// This is the single consumer that serializes touches arriving from
    /// other threads into the machine.
    pub async fn run(&mut self, mut batch_rx: mpsc::Receiver<TouchBatch>) {
        info!(state = %self.machine.state(), "dispatcher started");

        while let Some(batch) = batch_rx.recv().await {
            let consumed = self.dispatch(&batch);
            debug!(
                phase = %batch.phase,
                touches = batch.touches.len(),
                consumed,
                state = %self.machine.state(),
                "touch batch dispatched"
            );
        }

        info!("dispatcher stopped");
    }

    /// Route one batch by phase. Returns whether the state consumed it.
    pub fn dispatch(&mut self, batch: &TouchBatch) -> bool {
        match batch.phase {
            TouchPhase::Began => self.handle_touches_began(&batch.touches),
            TouchPhase::Moved => self.handle_touches_moved(&batch.touches),
            TouchPhase::Ended => self.handle_touches_ended(&batch.touches),
            TouchPhase::Cancelled => self.handle_touches_cancelled(&batch.touches),
        }
    }

    pub fn handle_touches_began(&mut self, touches: &[Touch]) -> bool {
        if let Some(touch) = self.find_button_touch(touches) {
            if self.machine.touch_down(touch.id) {
                return true;
            }
        }
        self.default_feedback(TouchPhase::Began, touches);
        false
    }

    pub fn handle_touches_moved(&mut self, touches: &[Touch]) -> bool {
        if let Some(on_button) = self.tracked_on_button(touches) {
            if self.machine.touch_moved(on_button) {
                return true;
            }
        }
        self.default_feedback(TouchPhase::Moved, touches);
        false
    }

    pub fn handle_touches_ended(&mut self, touches: &[Touch]) -> bool {
        if let Some(on_button) = self.tracked_on_button(touches) {
            if self.machine.touch_ended(on_button) {
                return true;
            }
        }
        self.default_feedback(TouchPhase::Ended, touches);
        false
    }

    pub fn handle_touches_cancelled(&mut self, touches: &[Touch]) -> bool {
        if let Some(on_button) = self.tracked_on_button(touches) {
            if self.machine.touch_cancelled(on_button) {
                return true;
            }
        }
        self.default_feedback(TouchPhase::Cancelled, touches);
        false
    }

    /// First touch on a button that the current state may accept
    fn find_button_touch<'t>(&self, touches: &'t [Touch]) -> Option<&'t Touch> {
        let tracked = self.machine.tracked_touch();
        let surface = self.machine.delegate();

        touches.iter().find(|touch| {
            tracked.map_or(true, |id| id == touch.id) && surface.is_on_button(touch)
        })
    }

    /// Hit-test result for the tracked touch, if it is part of this batch
    fn tracked_on_button(&self, touches: &[Touch]) -> Option<bool> {
        let tracked = self.machine.tracked_touch()?;
        let touch = touches.iter().find(|touch| touch.id == tracked)?;
        Some(self.machine.delegate().is_on_button(touch))
    }

    fn default_feedback(&mut self, phase: TouchPhase, touches: &[Touch]) {
        let delegate = self.machine.delegate_mut();
        for touch in touches {
            delegate.touch_feedback(phase, touch);
        }
    }
}
