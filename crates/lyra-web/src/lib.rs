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

//! # Lyra Web
//!
//! `web-sys` implementations of the `lyra-core` platform contracts: the
//! canvas display surface, the fullscreen and orientation-lock vendor
//! variants, the animation-frame and interval schedulers, and the Web
//! Audio graph device. [`backend::WebBackend`] ties them together into the
//! engine's web backend boot path.
//!
//! The crate body only exists on `wasm32`; on every other target it
//! compiles to nothing.

#![cfg(target_arch = "wasm32")]
#![warn(missing_docs)]

pub mod audio;
pub mod backend;
pub mod fullscreen;
pub mod orientation;
pub mod schedulers;
pub mod surface;

pub use backend::{WebBackend, WebBackendConfig};
