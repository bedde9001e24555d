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

//! A buffer source that reports its playback position.
//!
//! The host audio graph does not expose how far a buffer source has
//! played. [`PlaybackPositionSource`] recovers that reading by writing a
//! timing track into an extra buffer channel: a linear ramp from zero to
//! the buffer's duration. During playback the extra channel is routed to an
//! analyser instead of the output, so its most recent time-domain sample
//! *is* the current position in seconds. The audible channels pass through
//! a splitter/merger pair unchanged.

use crate::audio::graph::{
    AudioBufferDesc, AudioBufferId, AudioGraphDevice, AudioGraphError, AudioNodeId,
};

/// Channel fan of the splitter and merger created at construction, matching
/// the host graph's default node width. Buffers with more original channels
/// than `DEFAULT_CHANNEL_FAN - 1` cannot carry the extra timing track.
pub const DEFAULT_CHANNEL_FAN: u32 = 6;

/// A composite buffer source with a synthetic playback-position output.
///
/// Composes four device nodes: the underlying buffer source, a channel
/// splitter, a channel merger (the audible output), and, once a buffer is
/// assigned, an analyser fed by the timing track.
pub struct PlaybackPositionSource {
    source: AudioNodeId,
    splitter: AudioNodeId,
    merger: AudioNodeId,
    analyser: Option<AudioNodeId>,
}

impl PlaybackPositionSource {
    /// Creates the composite node's source, splitter, and merger.
    ///
    /// The analyser is created on buffer assignment, since the timing track
    /// does not exist before then.
    pub fn new(device: &mut dyn AudioGraphDevice) -> Result<Self, AudioGraphError> {
        Ok(Self {
            source: device.create_source()?,
            splitter: device.create_splitter(DEFAULT_CHANNEL_FAN)?,
            merger: device.create_merger(DEFAULT_CHANNEL_FAN)?,
            analyser: None,
        })
    }

    /// Builds the augmented buffer and wires the composite graph.
    ///
    /// The augmented buffer has one channel more than `buffer`, same length
    /// and rate: the original channels copied unchanged, then the timing
    /// ramp. The source sees the augmented buffer only after every channel
    /// is written.
    pub fn set_buffer(
        &mut self,
        device: &mut dyn AudioGraphDevice,
        buffer: AudioBufferId,
    ) -> Result<(), AudioGraphError> {
        let info = device.buffer_info(buffer)?;
        let augmented = device.create_buffer(&AudioBufferDesc {
            channels: info.channels + 1,
            length: info.length,
            sample_rate: info.sample_rate,
        })?;
        for channel in 0..info.channels {
            let data = device.read_channel(buffer, channel)?;
            device.write_channel(augmented, channel, &data)?;
        }
        let ramp = position_ramp(info.length, info.duration());
        device.write_channel(augmented, info.channels, &ramp)?;

        device.assign_buffer(self.source, augmented)?;

        device.connect(self.source, self.splitter, 0, 0)?;
        for channel in 0..info.channels {
            device.connect(self.splitter, self.merger, channel, channel)?;
        }
        let analyser = device.create_analyser()?;
        device.connect(self.splitter, analyser, info.channels, 0)?;
        self.analyser = Some(analyser);
        Ok(())
    }

    /// The current playback position in seconds.
    ///
    /// Meaningful only while the source is playing; between ticks of
    /// playback the reading is the last sample the analyser saw. Before any
    /// buffer has been assigned there is no analyser and the reading is
    /// `0.0`.
    pub fn position(&self, device: &mut dyn AudioGraphDevice) -> f64 {
        let Some(analyser) = self.analyser else {
            return 0.0;
        };
        match device.latest_sample(analyser) {
            Ok(sample) => f64::from(sample),
            Err(err) => {
                log::debug!("Playback position read failed: {err}");
                0.0
            }
        }
    }

    /// Sets whether the underlying source loops.
    pub fn set_loop(
        &self,
        device: &mut dyn AudioGraphDevice,
        looped: bool,
    ) -> Result<(), AudioGraphError> {
        device.set_loop(self.source, looped)
    }

    /// Whether the underlying source loops.
    pub fn loop_enabled(&self, device: &dyn AudioGraphDevice) -> Result<bool, AudioGraphError> {
        device.loop_enabled(self.source)
    }

    /// Sets the underlying source's playback rate.
    pub fn set_playback_rate(
        &self,
        device: &mut dyn AudioGraphDevice,
        rate: f32,
    ) -> Result<(), AudioGraphError> {
        device.set_playback_rate(self.source, rate)
    }

    /// The underlying source's playback rate.
    pub fn playback_rate(&self, device: &dyn AudioGraphDevice) -> Result<f32, AudioGraphError> {
        device.playback_rate(self.source)
    }

    /// Starts the underlying source.
    pub fn start(
        &self,
        device: &mut dyn AudioGraphDevice,
        when: Option<f64>,
    ) -> Result<(), AudioGraphError> {
        device.start(self.source, when)
    }

    /// Stops the underlying source.
    pub fn stop(
        &self,
        device: &mut dyn AudioGraphDevice,
        when: Option<f64>,
    ) -> Result<(), AudioGraphError> {
        device.stop(self.source, when)
    }

    /// Connects the audible output to another node.
    pub fn connect(
        &self,
        device: &mut dyn AudioGraphDevice,
        to: AudioNodeId,
        output: u32,
        input: u32,
    ) -> Result<(), AudioGraphError> {
        device.connect(self.merger, to, output, input)
    }

    /// Connects the audible output to the graph's destination.
    pub fn connect_to_output(
        &self,
        device: &mut dyn AudioGraphDevice,
    ) -> Result<(), AudioGraphError> {
        device.connect_to_output(self.merger)
    }

    /// Disconnects the audible output.
    pub fn disconnect(&self, device: &mut dyn AudioGraphDevice) -> Result<(), AudioGraphError> {
        device.disconnect(self.merger)
    }
}

/// Generates the timing track: `sample[i] = i * duration / length`.
pub fn position_ramp(length: usize, duration: f64) -> Vec<f32> {
    (0..length)
        .map(|i| (i as f64 * duration / length as f64) as f32)
        .collect()
}
