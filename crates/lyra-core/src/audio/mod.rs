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

//! Audio-graph contracts and composite nodes built on them.
//!
//! The host audio graph is abstracted behind the [`AudioGraphDevice`]
//! trait, which creates buffers and nodes identified by opaque handles and
//! wires them together. [`playback_position`] composes those primitives
//! into a buffer source that can also report how far playback has
//! progressed, a reading the host graph does not natively expose.

pub mod graph;
pub mod playback_position;

pub use graph::{
    AudioBufferDesc, AudioBufferId, AudioBufferInfo, AudioGraphDevice, AudioGraphError,
    AudioNodeId,
};
pub use playback_position::PlaybackPositionSource;
