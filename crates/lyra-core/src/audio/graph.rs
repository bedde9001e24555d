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

//! Defines the abstract `AudioGraphDevice` trait and its handle types.
//!
//! The contract mirrors the host audio graph's object model (buffers,
//! buffer sources, channel splitters, channel mergers, analysers) but
//! through opaque handles, so backend logic stays host-free and tests can
//! substitute a recording device.

use std::fmt;

/// A handle to an audio buffer owned by an [`AudioGraphDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioBufferId(pub u32);

/// A handle to an audio node owned by an [`AudioGraphDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioNodeId(pub u32);

/// Describes an audio buffer to be created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioBufferDesc {
    /// Number of channels.
    pub channels: u32,
    /// Number of sample frames per channel.
    pub length: usize,
    /// Sample frames per second.
    pub sample_rate: f32,
}

/// Properties of an existing audio buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioBufferInfo {
    /// Number of channels.
    pub channels: u32,
    /// Number of sample frames per channel.
    pub length: usize,
    /// Sample frames per second.
    pub sample_rate: f32,
}

impl AudioBufferInfo {
    /// The buffer's play time in seconds at its native rate.
    pub fn duration(&self) -> f64 {
        self.length as f64 / self.sample_rate as f64
    }
}

/// An error produced by an [`AudioGraphDevice`] operation.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioGraphError {
    /// The buffer handle does not identify a live buffer on this device.
    UnknownBuffer(AudioBufferId),
    /// The node handle does not identify a live node on this device.
    UnknownNode(AudioNodeId),
    /// The channel index is outside the buffer's channel count.
    ChannelOutOfRange {
        /// The buffer being accessed.
        buffer: AudioBufferId,
        /// The out-of-range channel index.
        channel: u32,
    },
    /// The operation is not valid for the node the handle refers to.
    WrongNodeKind {
        /// The node the operation was attempted on.
        node: AudioNodeId,
        /// The node kind the operation requires.
        expected: &'static str,
    },
    /// The buffer descriptor cannot be realized by the host.
    InvalidDescriptor(String),
    /// An error originating from the host audio implementation.
    Backend(String),
}

impl fmt::Display for AudioGraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioGraphError::UnknownBuffer(id) => {
                write!(f, "Unknown audio buffer handle: {id:?}")
            }
            AudioGraphError::UnknownNode(id) => {
                write!(f, "Unknown audio node handle: {id:?}")
            }
            AudioGraphError::ChannelOutOfRange { buffer, channel } => {
                write!(f, "Channel {channel} is out of range for buffer {buffer:?}")
            }
            AudioGraphError::WrongNodeKind { node, expected } => {
                write!(f, "Node {node:?} is not a {expected}")
            }
            AudioGraphError::InvalidDescriptor(msg) => {
                write!(f, "Invalid audio buffer descriptor: {msg}")
            }
            AudioGraphError::Backend(msg) => {
                write!(f, "Host audio backend error: {msg}")
            }
        }
    }
}

impl std::error::Error for AudioGraphError {}

/// The abstract contract for the host audio graph.
///
/// This trait is the boundary between backend audio logic (node
/// composition, position tracking) and the platform-specific
/// infrastructure that owns the real graph objects. Handles returned by
/// the `create_*` methods stay valid for the life of the device.
pub trait AudioGraphDevice {
    /// Creates an audio buffer per the descriptor.
    fn create_buffer(&mut self, desc: &AudioBufferDesc) -> Result<AudioBufferId, AudioGraphError>;

    /// Reads a buffer's properties.
    fn buffer_info(&self, buffer: AudioBufferId) -> Result<AudioBufferInfo, AudioGraphError>;

    /// Copies one channel of a buffer out.
    fn read_channel(
        &self,
        buffer: AudioBufferId,
        channel: u32,
    ) -> Result<Vec<f32>, AudioGraphError>;

    /// Copies `data` into one channel of a buffer.
    fn write_channel(
        &mut self,
        buffer: AudioBufferId,
        channel: u32,
        data: &[f32],
    ) -> Result<(), AudioGraphError>;

    /// Creates a buffer source node.
    fn create_source(&mut self) -> Result<AudioNodeId, AudioGraphError>;

    /// Creates a channel splitter node with the given output fan.
    fn create_splitter(&mut self, outputs: u32) -> Result<AudioNodeId, AudioGraphError>;

    /// Creates a channel merger node with the given input fan.
    fn create_merger(&mut self, inputs: u32) -> Result<AudioNodeId, AudioGraphError>;

    /// Creates an analyser node.
    fn create_analyser(&mut self) -> Result<AudioNodeId, AudioGraphError>;

    /// Assigns a buffer to a source node.
    fn assign_buffer(
        &mut self,
        source: AudioNodeId,
        buffer: AudioBufferId,
    ) -> Result<(), AudioGraphError>;

    /// Connects `from`'s output `output` to `to`'s input `input`.
    fn connect(
        &mut self,
        from: AudioNodeId,
        to: AudioNodeId,
        output: u32,
        input: u32,
    ) -> Result<(), AudioGraphError>;

    /// Connects a node to the graph's final destination.
    fn connect_to_output(&mut self, node: AudioNodeId) -> Result<(), AudioGraphError>;

    /// Disconnects all of a node's outgoing connections.
    fn disconnect(&mut self, node: AudioNodeId) -> Result<(), AudioGraphError>;

    /// Sets whether a source loops over its buffer.
    fn set_loop(&mut self, source: AudioNodeId, looped: bool) -> Result<(), AudioGraphError>;

    /// Whether a source loops over its buffer.
    fn loop_enabled(&self, source: AudioNodeId) -> Result<bool, AudioGraphError>;

    /// Sets a source's playback rate (1.0 is native speed).
    fn set_playback_rate(
        &mut self,
        source: AudioNodeId,
        rate: f32,
    ) -> Result<(), AudioGraphError>;

    /// A source's playback rate.
    fn playback_rate(&self, source: AudioNodeId) -> Result<f32, AudioGraphError>;

    /// Starts a source, optionally at a host-clock time.
    fn start(&mut self, source: AudioNodeId, when: Option<f64>) -> Result<(), AudioGraphError>;

    /// Stops a source, optionally at a host-clock time.
    fn stop(&mut self, source: AudioNodeId, when: Option<f64>) -> Result<(), AudioGraphError>;

    /// An analyser's most recent time-domain sample.
    ///
    /// Single-sample read; the backing value is overwritten by the host on
    /// every call and never retained.
    fn latest_sample(&mut self, analyser: AudioNodeId) -> Result<f32, AudioGraphError>;
}
