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

//! Provides abstractions over the hosting page's platform capabilities.
//!
//! This module contains traits and types that define a common interface for
//! interacting with the host environment: the drawing surface, the
//! fullscreen and orientation-lock APIs (including their vendor-prefixed
//! variants), and the host's frame and timer scheduling primitives.
//!
//! Everything here runs on the host's single cooperative event-loop thread;
//! none of the contracts require `Send` or `Sync`.

pub mod capability;
pub mod display;
pub mod error;
pub mod frame_loop;
pub mod surface;

pub use capability::{
    CapabilityChain, FullscreenCapability, HostCapability, Orientation, OrientationCapability,
};
pub use display::DisplaySurface;
pub use error::PlatformError;
pub use frame_loop::{FrameLoop, FrameLoopHandle, FrameScheduler, IntervalGuard, IntervalScheduler};
pub use surface::{backing_size, SurfaceConfig, SurfacePump};
