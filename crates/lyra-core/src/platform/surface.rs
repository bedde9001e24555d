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

//! The surface lifecycle pump.
//!
//! Keeps a [`DisplaySurface`]'s backing buffer sized to its displayed size
//! times a configured scale factor, and keeps the device orientation lock in
//! step with the fullscreen state. The pump is driven from an
//! [`IntervalScheduler`] tick; each tick is idempotent and re-derives
//! everything from current host state.

use std::rc::Rc;
use std::time::Duration;

use crate::platform::capability::{
    CapabilityChain, FullscreenCapability, Orientation, OrientationCapability,
};
use crate::platform::display::DisplaySurface;
use crate::platform::frame_loop::{IntervalGuard, IntervalScheduler};

/// Computes the backing-buffer size for a displayed size and scale factor.
///
/// Component-wise `floor(client * scale)`. Non-finite or negative products
/// clamp to zero through Rust's saturating float-to-int conversion.
pub fn backing_size(client: (f64, f64), scale: f64) -> (u32, u32) {
    (
        (client.0 * scale).floor() as u32,
        (client.1 * scale).floor() as u32,
    )
}

/// Configuration for a [`SurfacePump`].
///
/// The scale factor is an explicit per-pump value rather than ambient
/// process state, so two surfaces can be pumped at different densities.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Ratio of backing pixels to displayed CSS pixels.
    pub scale: f64,
    /// How often the pump re-derives backing size and orientation lock.
    pub poll_interval: Duration,
    /// The orientation to hold while the surface is fullscreen.
    pub fullscreen_orientation: Orientation,
}

impl SurfaceConfig {
    /// Creates a configuration with default settings: scale 1.0, a 100 ms
    /// poll interval, and a landscape fullscreen lock.
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            poll_interval: Duration::from_millis(100),
            fullscreen_orientation: Orientation::Landscape,
        }
    }

    /// Sets the backing-to-displayed scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Sets the orientation held while fullscreen.
    pub fn with_fullscreen_orientation(mut self, orientation: Orientation) -> Self {
        self.fullscreen_orientation = orientation;
        self
    }
}

impl Default for SurfaceConfig {
    /// Creates a configuration with default settings.
    fn default() -> Self {
        Self::new()
    }
}

/// Synchronizes a surface and the device orientation with host display state.
///
/// Owns the surface, the probed fullscreen variants, and the probed
/// orientation-lock variants. Fullscreen *state* is read across every
/// variant (a host sets whichever flag it owns), while fullscreen and
/// orientation *calls* go through the variant resolved once at
/// construction.
pub struct SurfacePump {
    surface: Rc<dyn DisplaySurface>,
    fullscreen: CapabilityChain<dyn FullscreenCapability>,
    orientation: CapabilityChain<dyn OrientationCapability>,
    config: SurfaceConfig,
}

impl SurfacePump {
    /// Creates a pump over the given surface and capability probe lists.
    ///
    /// Probe lists are ordered most-preferred first; resolution happens
    /// here, once.
    pub fn new(
        surface: Rc<dyn DisplaySurface>,
        fullscreen_probes: Vec<Box<dyn FullscreenCapability>>,
        orientation_probes: Vec<Box<dyn OrientationCapability>>,
        config: SurfaceConfig,
    ) -> Self {
        Self {
            surface,
            fullscreen: CapabilityChain::resolve(fullscreen_probes),
            orientation: CapabilityChain::resolve(orientation_probes),
            config,
        }
    }

    /// The pump's configuration.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Runs one synchronization pass.
    ///
    /// Re-applies `floor(client_size * scale)` to the backing buffer and
    /// re-asserts the orientation lock for the current fullscreen state.
    /// Never fails; orientation errors are absorbed here.
    pub fn tick(&self) {
        let (width, height) = backing_size(self.surface.client_size(), self.config.scale);
        self.surface.set_backing_size(width, height);
        self.sync_orientation();
    }

    /// Runs a tick now, then on every poll interval until the guard stops.
    pub fn attach(self: Rc<Self>, scheduler: &dyn IntervalScheduler) -> IntervalGuard {
        self.tick();
        let period = self.config.poll_interval;
        scheduler.start(period, Box::new(move || self.tick()))
    }

    /// Whether the host currently reports the surface fullscreen.
    ///
    /// True iff any probed variant's fullscreen-element flag is set.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.iter().any(|variant| variant.is_active())
    }

    /// Requests or cancels fullscreen via the resolved variant.
    ///
    /// A host without any supported fullscreen variant, or one that rejects
    /// the call, degrades to a logged no-op.
    pub fn set_fullscreen(&self, fullscreen: bool) {
        let Some(provider) = self.fullscreen.resolved() else {
            log::debug!("Fullscreen change ignored: no supported host variant.");
            return;
        };
        let outcome = if fullscreen {
            provider.request()
        } else {
            provider.cancel()
        };
        if let Err(err) = outcome {
            log::debug!("Fullscreen change via '{}' ignored: {err}", provider.api_name());
        }
    }

    /// Hides the loading placeholder and shows the surface.
    pub fn reveal(&self) {
        self.surface.reveal();
    }

    fn sync_orientation(&self) {
        let Some(provider) = self.orientation.resolved() else {
            return;
        };
        let outcome = if self.is_fullscreen() {
            provider.lock(self.config.fullscreen_orientation)
        } else {
            provider.unlock()
        };
        if let Err(err) = outcome {
            log::debug!(
                "Orientation sync via '{}' ignored: {err}",
                provider.api_name()
            );
        }
    }
}
