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

//! # Lyra Core
//!
//! Contract crate for the Lyra engine's web backend. It defines the
//! capability traits through which the backend talks to the hosting page
//! (display surface, fullscreen, orientation lock, frame and timer
//! scheduling, audio graph) and the backend logic built on top of them:
//! the surface lifecycle pump, the cancellable frame loop, and the
//! playback-position audio source.
//!
//! Nothing in this crate touches a browser API directly. Every host
//! interaction goes through a trait, so the whole crate compiles and is
//! tested on any target; the `lyra-web` crate provides the `wasm32`
//! implementations.

#![warn(missing_docs)]

pub mod audio;
pub mod platform;

pub use audio::PlaybackPositionSource;
pub use platform::{SurfaceConfig, SurfacePump};
