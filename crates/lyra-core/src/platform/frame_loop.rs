// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scheduling contracts and the cancellable frame loop driver.
//!
//! The host offers two scheduling primitives: a one-shot animation-frame
//! callback ([`FrameScheduler`]) and a recurring timer
//! ([`IntervalScheduler`]). [`FrameLoop`] turns the one-shot primitive into
//! the engine's per-frame driver by rescheduling itself after every
//! callback, with an explicit cancellation handle instead of running until
//! page unload.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// The host's one-shot frame scheduling primitive.
///
/// An implementation runs the callback once, at the host's next frame
/// presentation opportunity, on the same thread as every other host
/// callback.
pub trait FrameScheduler {
    /// Schedules `callback` to run at the next frame opportunity.
    fn schedule(&self, callback: Box<dyn FnOnce()>);
}

/// The host's recurring timer primitive.
pub trait IntervalScheduler {
    /// Runs `callback` every `period` until the returned guard is stopped
    /// or dropped.
    fn start(&self, period: Duration, callback: Box<dyn FnMut()>) -> IntervalGuard;
}

/// Stops a recurring timer when stopped explicitly or dropped.
pub struct IntervalGuard {
    stop: Option<Box<dyn FnOnce()>>,
}

impl IntervalGuard {
    /// Creates a guard that runs `stop` once when stopped or dropped.
    pub fn new(stop: impl FnOnce() + 'static) -> Self {
        Self {
            stop: Some(Box::new(stop)),
        }
    }

    /// Creates a guard with nothing to stop.
    ///
    /// Adapters hand this out when starting the host timer failed and the
    /// failure was absorbed.
    pub fn noop() -> Self {
        Self { stop: None }
    }

    /// Stops the recurrence now instead of at drop time.
    pub fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl Drop for IntervalGuard {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

struct LoopState {
    scheduler: Rc<dyn FrameScheduler>,
    callback: RefCell<Box<dyn FnMut()>>,
    cancelled: Rc<Cell<bool>>,
}

/// A self-rescheduling frame loop over a [`FrameScheduler`].
pub struct FrameLoop;

impl FrameLoop {
    /// Starts the loop: runs `callback` once immediately, then again on
    /// every scheduled frame until the returned handle is cancelled.
    pub fn spawn(
        scheduler: Rc<dyn FrameScheduler>,
        callback: impl FnMut() + 'static,
    ) -> FrameLoopHandle {
        let cancelled = Rc::new(Cell::new(false));
        let state = Rc::new(LoopState {
            scheduler,
            callback: RefCell::new(Box::new(callback)),
            cancelled: Rc::clone(&cancelled),
        });
        Self::pump(state);
        FrameLoopHandle { cancelled }
    }

    fn pump(state: Rc<LoopState>) {
        // The flag is checked when the scheduled frame fires, so a cancel
        // issued between frames suppresses the next callback entirely.
        if state.cancelled.get() {
            return;
        }
        (state.callback.borrow_mut())();
        let next = Rc::clone(&state);
        state
            .scheduler
            .schedule(Box::new(move || Self::pump(next)));
    }
}

/// Cancels a running [`FrameLoop`].
#[derive(Clone)]
pub struct FrameLoopHandle {
    cancelled: Rc<Cell<bool>>,
}

impl FrameLoopHandle {
    /// Stops the loop before its next iteration. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Whether the loop has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
