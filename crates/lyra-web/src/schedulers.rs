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

//! Host scheduling primitives: animation frames and intervals.

use lyra_core::platform::{FrameScheduler, IntervalGuard, IntervalScheduler};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// A `FrameScheduler` over `requestAnimationFrame`.
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    /// Creates a scheduler for the given window.
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn schedule(&self, callback: Box<dyn FnOnce()>) {
        let closure = Closure::once_into_js(callback);
        if let Err(err) = self
            .window
            .request_animation_frame(closure.unchecked_ref())
        {
            log::warn!("requestAnimationFrame failed: {err:?}");
        }
    }
}

/// An `IntervalScheduler` over `setInterval`/`clearInterval`.
pub struct WebIntervalScheduler {
    window: Window,
}

impl WebIntervalScheduler {
    /// Creates a scheduler for the given window.
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl IntervalScheduler for WebIntervalScheduler {
    fn start(&self, period: Duration, callback: Box<dyn FnMut()>) -> IntervalGuard {
        let closure = Closure::wrap(callback);
        let handle = match self.window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period.as_millis() as i32,
        ) {
            Ok(handle) => handle,
            Err(err) => {
                log::warn!("setInterval failed: {err:?}");
                return IntervalGuard::noop();
            }
        };
        let window = self.window.clone();
        // The guard owns the closure; dropping it after clearInterval is
        // what finally releases the callback.
        IntervalGuard::new(move || {
            window.clear_interval_with_handle(handle);
            drop(closure);
        })
    }
}
