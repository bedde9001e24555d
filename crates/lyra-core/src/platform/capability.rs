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

//! Capability probing for vendor-variant host APIs.
//!
//! Browsers expose the same feature under differently named accessors
//! depending on vendor and age (`requestFullscreen`, `mozRequestFullScreen`,
//! `webkitRequestFullscreen`, ...). Instead of re-probing accessor chains on
//! every call, the backend probes an ordered list of [`HostCapability`]
//! providers once and holds on to the first supported one via
//! [`CapabilityChain`].

use crate::platform::error::PlatformError;

/// A probeable variant of a host API.
///
/// Implementations represent one named accessor family on the host (for
/// example the `moz`-prefixed fullscreen API) and answer whether that
/// family is present at all.
pub trait HostCapability {
    /// The host-side name of this variant, for logging.
    fn api_name(&self) -> &'static str;

    /// Whether this variant's accessors exist on the current host.
    fn is_supported(&self) -> bool;
}

/// One vendor variant of the fullscreen API.
pub trait FullscreenCapability: HostCapability {
    /// Whether this variant's fullscreen-element flag is currently set.
    ///
    /// Must report `false` when the variant is unsupported, so that a
    /// whole-chain query can OR over every probe unconditionally.
    fn is_active(&self) -> bool;

    /// Requests fullscreen presentation of the backend's surface element.
    fn request(&self) -> Result<(), PlatformError>;

    /// Leaves fullscreen presentation.
    fn cancel(&self) -> Result<(), PlatformError>;
}

/// A device orientation the backend may ask the host to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Wide orientation, the usual choice while fullscreen.
    #[default]
    Landscape,
    /// Tall orientation.
    Portrait,
}

impl Orientation {
    /// The name the host APIs use for this orientation.
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
        }
    }
}

/// One variant of the screen orientation-lock API.
///
/// Covers the three legacy prefixed accessors as well as the modern
/// promise-based `screen.orientation` API; adapters for the latter swallow
/// the promise rejection themselves so that `lock` only reports failures
/// that are observable synchronously.
pub trait OrientationCapability: HostCapability {
    /// Asks the host to hold the given orientation.
    fn lock(&self, orientation: Orientation) -> Result<(), PlatformError>;

    /// Releases a previously requested orientation hold.
    fn unlock(&self) -> Result<(), PlatformError>;
}

/// An ordered probe list with the supported variant resolved up front.
///
/// The chain keeps every probe (some queries, like the fullscreen-state
/// check, must look at all variants) but resolves the provider used for
/// *calls* exactly once, at construction.
pub struct CapabilityChain<C: ?Sized> {
    probes: Vec<Box<C>>,
    resolved: Option<usize>,
}

impl<C: HostCapability + ?Sized> CapabilityChain<C> {
    /// Probes the given variants in order and selects the first supported one.
    pub fn resolve(probes: Vec<Box<C>>) -> Self {
        let resolved = probes.iter().position(|probe| probe.is_supported());
        match resolved {
            Some(index) => log::info!(
                "Resolved host capability to '{}' (probe {} of {}).",
                probes[index].api_name(),
                index + 1,
                probes.len()
            ),
            None => log::info!(
                "No supported host capability among {} probed variants.",
                probes.len()
            ),
        }
        Self { probes, resolved }
    }

    /// The provider selected at resolution time, if any variant was supported.
    pub fn resolved(&self) -> Option<&C> {
        self.resolved.map(|index| self.probes[index].as_ref())
    }

    /// Iterates over every probed variant, supported or not.
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.probes.iter().map(|probe| probe.as_ref())
    }
}
