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

//! The web backend boot path.
//!
//! Ties the adapters together: installs the console logger and panic hook,
//! looks up the canvas, resolves the capability probe lists, starts the
//! surface pump on the host interval timer, and hands out frame loops and
//! audio graphs.

use crate::audio::WebAudioGraph;
use crate::fullscreen::fullscreen_probes;
use crate::orientation::orientation_probes;
use crate::schedulers::{AnimationFrameScheduler, WebIntervalScheduler};
use crate::surface::WebSurface;
use anyhow::{anyhow, Result};
use lyra_core::audio::AudioGraphError;
use lyra_core::platform::{FrameLoop, FrameLoopHandle, IntervalGuard, SurfaceConfig, SurfacePump};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

/// Configuration for [`WebBackend::init`].
#[derive(Debug, Clone)]
pub struct WebBackendConfig {
    canvas_id: String,
    progress_id: String,
    surface: SurfaceConfig,
}

impl WebBackendConfig {
    /// Creates a configuration with the default page element ids
    /// (`lyra-canvas`, `lyra-progress-screen`) and surface settings.
    pub fn new() -> Self {
        Self {
            canvas_id: "lyra-canvas".to_string(),
            progress_id: "lyra-progress-screen".to_string(),
            surface: SurfaceConfig::new(),
        }
    }

    /// Sets the id of the canvas element to attach to.
    pub fn with_canvas_id(mut self, canvas_id: impl Into<String>) -> Self {
        self.canvas_id = canvas_id.into();
        self
    }

    /// Sets the id of the loading placeholder element.
    pub fn with_progress_id(mut self, progress_id: impl Into<String>) -> Self {
        self.progress_id = progress_id.into();
        self
    }

    /// Sets the surface pump configuration.
    pub fn with_surface(mut self, surface: SurfaceConfig) -> Self {
        self.surface = surface;
        self
    }
}

impl Default for WebBackendConfig {
    /// Creates a configuration with default settings.
    fn default() -> Self {
        Self::new()
    }
}

/// The engine's web backend.
///
/// Owns the surface pump (and the interval keeping it ticking) for the
/// lifetime of the backend; dropping the backend stops the pump.
pub struct WebBackend {
    pump: Rc<SurfacePump>,
    frame_scheduler: Rc<AnimationFrameScheduler>,
    _poll: IntervalGuard,
}

impl WebBackend {
    /// Boots the backend on the current page.
    ///
    /// Installs the panic hook and console logger, attaches to the
    /// configured canvas, and starts the surface pump.
    pub fn init(config: WebBackendConfig) -> Result<Self> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
        let document = window.document().ok_or_else(|| anyhow!("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(&config.canvas_id)
            .ok_or_else(|| anyhow!("missing '#{}'", config.canvas_id))?
            .dyn_into()
            .map_err(|_| anyhow!("'#{}' is not a canvas", config.canvas_id))?;
        let screen = window
            .screen()
            .map_err(|err| anyhow!("no screen: {err:?}"))?;

        let fullscreen = fullscreen_probes(&document, canvas.as_ref());
        let orientation = orientation_probes(&screen);
        let surface = Rc::new(WebSurface::new(document, canvas, config.progress_id));
        let pump = Rc::new(SurfacePump::new(
            surface,
            fullscreen,
            orientation,
            config.surface,
        ));
        let poll = Rc::clone(&pump).attach(&WebIntervalScheduler::new(window.clone()));
        log::info!("Web backend attached to '#{}'.", config.canvas_id);

        Ok(Self {
            pump,
            frame_scheduler: Rc::new(AnimationFrameScheduler::new(window)),
            _poll: poll,
        })
    }

    /// The surface pump driving resize and orientation sync.
    pub fn pump(&self) -> &SurfacePump {
        &self.pump
    }

    /// Hides the loading placeholder and shows the canvas.
    pub fn reveal(&self) {
        self.pump.reveal();
    }

    /// Whether the host currently reports the canvas fullscreen.
    pub fn is_fullscreen(&self) -> bool {
        self.pump.is_fullscreen()
    }

    /// Requests or cancels fullscreen presentation.
    pub fn set_fullscreen(&self, fullscreen: bool) {
        self.pump.set_fullscreen(fullscreen);
    }

    /// Starts the per-frame callback loop on the host's animation frames.
    pub fn run_frame_loop(&self, callback: impl FnMut() + 'static) -> FrameLoopHandle {
        FrameLoop::spawn(self.frame_scheduler.clone(), callback)
    }

    /// Creates a Web Audio graph device.
    pub fn create_audio_graph(&self) -> Result<WebAudioGraph, AudioGraphError> {
        WebAudioGraph::new()
    }
}
