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

//! A Web Audio implementation of the `AudioGraphDevice` trait.

use lyra_core::audio::{
    AudioBufferDesc, AudioBufferId, AudioBufferInfo, AudioGraphDevice, AudioGraphError,
    AudioNodeId,
};
use std::collections::HashMap;
use wasm_bindgen::JsValue;
use web_sys::{
    AnalyserNode, AudioBuffer, AudioBufferSourceNode, AudioContext, AudioNode, ChannelMergerNode,
    ChannelSplitterNode,
};

fn backend_error(err: JsValue) -> AudioGraphError {
    AudioGraphError::Backend(format!("{err:?}"))
}

enum WebNode {
    Source(AudioBufferSourceNode),
    Splitter(ChannelSplitterNode),
    Merger(ChannelMergerNode),
    Analyser(AnalyserNode),
}

impl WebNode {
    fn as_node(&self) -> &AudioNode {
        match self {
            WebNode::Source(node) => node.as_ref(),
            WebNode::Splitter(node) => node.as_ref(),
            WebNode::Merger(node) => node.as_ref(),
            WebNode::Analyser(node) => node.as_ref(),
        }
    }
}

/// An `AudioGraphDevice` that owns real Web Audio objects.
///
/// Handles index into internal maps; the `web-sys` objects live as long as
/// the device does (connections keep playing even for handles the backend
/// logic no longer holds).
pub struct WebAudioGraph {
    context: AudioContext,
    buffers: HashMap<u32, AudioBuffer>,
    nodes: HashMap<u32, WebNode>,
    next_id: u32,
    // Single-sample scratch for position reads, overwritten every call.
    scratch: [f32; 1],
}

impl WebAudioGraph {
    /// Creates the device over a fresh audio context.
    ///
    /// Hosts gate audio behind a user gesture; construct this from an input
    /// event handler or the context starts suspended.
    pub fn new() -> Result<Self, AudioGraphError> {
        let context = AudioContext::new().map_err(backend_error)?;
        Ok(Self {
            context,
            buffers: HashMap::new(),
            nodes: HashMap::new(),
            next_id: 0,
            scratch: [0.0],
        })
    }

    /// The underlying audio context.
    pub fn context(&self) -> &AudioContext {
        &self.context
    }

    fn fresh_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn insert_node(&mut self, node: WebNode) -> AudioNodeId {
        let id = self.fresh_id();
        self.nodes.insert(id, node);
        AudioNodeId(id)
    }

    fn buffer(&self, id: AudioBufferId) -> Result<&AudioBuffer, AudioGraphError> {
        self.buffers
            .get(&id.0)
            .ok_or(AudioGraphError::UnknownBuffer(id))
    }

    fn node(&self, id: AudioNodeId) -> Result<&WebNode, AudioGraphError> {
        self.nodes.get(&id.0).ok_or(AudioGraphError::UnknownNode(id))
    }

    fn source(&self, id: AudioNodeId) -> Result<&AudioBufferSourceNode, AudioGraphError> {
        match self.node(id)? {
            WebNode::Source(node) => Ok(node),
            _ => Err(AudioGraphError::WrongNodeKind {
                node: id,
                expected: "buffer source",
            }),
        }
    }

    fn check_channel(
        buffer: &AudioBuffer,
        id: AudioBufferId,
        channel: u32,
    ) -> Result<(), AudioGraphError> {
        if channel >= buffer.number_of_channels() {
            return Err(AudioGraphError::ChannelOutOfRange {
                buffer: id,
                channel,
            });
        }
        Ok(())
    }
}

impl AudioGraphDevice for WebAudioGraph {
    fn create_buffer(&mut self, desc: &AudioBufferDesc) -> Result<AudioBufferId, AudioGraphError> {
        if desc.channels == 0 || desc.sample_rate <= 0.0 {
            return Err(AudioGraphError::InvalidDescriptor(format!("{desc:?}")));
        }
        let buffer = self
            .context
            .create_buffer(desc.channels, desc.length as u32, desc.sample_rate)
            .map_err(backend_error)?;
        let id = self.fresh_id();
        self.buffers.insert(id, buffer);
        Ok(AudioBufferId(id))
    }

    fn buffer_info(&self, buffer: AudioBufferId) -> Result<AudioBufferInfo, AudioGraphError> {
        let buffer = self.buffer(buffer)?;
        Ok(AudioBufferInfo {
            channels: buffer.number_of_channels(),
            length: buffer.length() as usize,
            sample_rate: buffer.sample_rate(),
        })
    }

    fn read_channel(
        &self,
        buffer: AudioBufferId,
        channel: u32,
    ) -> Result<Vec<f32>, AudioGraphError> {
        let handle = self.buffer(buffer)?;
        Self::check_channel(handle, buffer, channel)?;
        handle.get_channel_data(channel).map_err(backend_error)
    }

    fn write_channel(
        &mut self,
        buffer: AudioBufferId,
        channel: u32,
        data: &[f32],
    ) -> Result<(), AudioGraphError> {
        let handle = self.buffer(buffer)?;
        Self::check_channel(handle, buffer, channel)?;
        let mut data = data.to_vec();
        handle
            .copy_to_channel(&mut data, channel as i32)
            .map_err(backend_error)
    }

    fn create_source(&mut self) -> Result<AudioNodeId, AudioGraphError> {
        let node = self.context.create_buffer_source().map_err(backend_error)?;
        Ok(self.insert_node(WebNode::Source(node)))
    }

    fn create_splitter(&mut self, outputs: u32) -> Result<AudioNodeId, AudioGraphError> {
        let node = self
            .context
            .create_channel_splitter_with_number_of_outputs(outputs)
            .map_err(backend_error)?;
        Ok(self.insert_node(WebNode::Splitter(node)))
    }

    fn create_merger(&mut self, inputs: u32) -> Result<AudioNodeId, AudioGraphError> {
        let node = self
            .context
            .create_channel_merger_with_number_of_inputs(inputs)
            .map_err(backend_error)?;
        Ok(self.insert_node(WebNode::Merger(node)))
    }

    fn create_analyser(&mut self) -> Result<AudioNodeId, AudioGraphError> {
        let node = self.context.create_analyser().map_err(backend_error)?;
        Ok(self.insert_node(WebNode::Analyser(node)))
    }

    fn assign_buffer(
        &mut self,
        source: AudioNodeId,
        buffer: AudioBufferId,
    ) -> Result<(), AudioGraphError> {
        let handle = self.buffer(buffer)?.clone();
        self.source(source)?.set_buffer(Some(&handle));
        Ok(())
    }

    fn connect(
        &mut self,
        from: AudioNodeId,
        to: AudioNodeId,
        output: u32,
        input: u32,
    ) -> Result<(), AudioGraphError> {
        let target = self.node(to)?.as_node().clone();
        self.node(from)?
            .as_node()
            .connect_with_audio_node_and_output_and_input(&target, output, input)
            .map(|_| ())
            .map_err(backend_error)
    }

    fn connect_to_output(&mut self, node: AudioNodeId) -> Result<(), AudioGraphError> {
        let destination = self.context.destination();
        self.node(node)?
            .as_node()
            .connect_with_audio_node(destination.as_ref())
            .map(|_| ())
            .map_err(backend_error)
    }

    fn disconnect(&mut self, node: AudioNodeId) -> Result<(), AudioGraphError> {
        self.node(node)?.as_node().disconnect().map_err(backend_error)
    }

    fn set_loop(&mut self, source: AudioNodeId, looped: bool) -> Result<(), AudioGraphError> {
        self.source(source)?.set_loop(looped);
        Ok(())
    }

    fn loop_enabled(&self, source: AudioNodeId) -> Result<bool, AudioGraphError> {
        Ok(self.source(source)?.loop_())
    }

    fn set_playback_rate(
        &mut self,
        source: AudioNodeId,
        rate: f32,
    ) -> Result<(), AudioGraphError> {
        self.source(source)?.playback_rate().set_value(rate);
        Ok(())
    }

    fn playback_rate(&self, source: AudioNodeId) -> Result<f32, AudioGraphError> {
        Ok(self.source(source)?.playback_rate().value())
    }

    fn start(&mut self, source: AudioNodeId, when: Option<f64>) -> Result<(), AudioGraphError> {
        let node = self.source(source)?;
        match when {
            Some(when) => node.start_with_when(when),
            None => node.start(),
        }
        .map_err(backend_error)
    }

    fn stop(&mut self, source: AudioNodeId, when: Option<f64>) -> Result<(), AudioGraphError> {
        let node = self.source(source)?;
        match when {
            Some(when) => node.stop_with_when(when),
            None => node.stop(),
        }
        .map_err(backend_error)
    }

    fn latest_sample(&mut self, analyser: AudioNodeId) -> Result<f32, AudioGraphError> {
        let node = match self.node(analyser)? {
            WebNode::Analyser(node) => node.clone(),
            _ => {
                return Err(AudioGraphError::WrongNodeKind {
                    node: analyser,
                    expected: "analyser",
                })
            }
        };
        node.get_float_time_domain_data(&mut self.scratch);
        Ok(self.scratch[0])
    }
}
