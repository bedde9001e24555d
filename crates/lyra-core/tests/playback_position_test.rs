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

use lyra_core::audio::{
    AudioBufferDesc, AudioBufferId, AudioBufferInfo, AudioGraphDevice, AudioGraphError,
    AudioNodeId, PlaybackPositionSource,
};
use std::collections::HashMap;

// --- Test Setup: a recording in-memory audio graph ---

#[derive(Debug, PartialEq)]
enum NodeKind {
    Source,
    Splitter(u32),
    Merger(u32),
    Analyser,
}

struct BufferState {
    desc: AudioBufferDesc,
    channels: Vec<Vec<f32>>,
}

#[derive(Default)]
struct RecordingAudioGraph {
    buffers: HashMap<u32, BufferState>,
    nodes: HashMap<u32, NodeKind>,
    next_id: u32,
    /// Ordered trace of data and assignment operations.
    trace: Vec<String>,
    connections: Vec<(AudioNodeId, AudioNodeId, u32, u32)>,
    output_connections: Vec<AudioNodeId>,
    disconnected: Vec<AudioNodeId>,
    assigned: HashMap<u32, AudioBufferId>,
    looped: HashMap<u32, bool>,
    rates: HashMap<u32, f32>,
    starts: Vec<(AudioNodeId, Option<f64>)>,
    stops: Vec<(AudioNodeId, Option<f64>)>,
    analyser_sample: f32,
}

impl RecordingAudioGraph {
    fn fresh_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn node(&self, id: AudioNodeId) -> Result<&NodeKind, AudioGraphError> {
        self.nodes.get(&id.0).ok_or(AudioGraphError::UnknownNode(id))
    }

    fn source(&self, id: AudioNodeId) -> Result<(), AudioGraphError> {
        match self.node(id)? {
            NodeKind::Source => Ok(()),
            _ => Err(AudioGraphError::WrongNodeKind {
                node: id,
                expected: "buffer source",
            }),
        }
    }

    fn buffer(&self, id: AudioBufferId) -> Result<&BufferState, AudioGraphError> {
        self.buffers
            .get(&id.0)
            .ok_or(AudioGraphError::UnknownBuffer(id))
    }
}

impl AudioGraphDevice for RecordingAudioGraph {
    fn create_buffer(&mut self, desc: &AudioBufferDesc) -> Result<AudioBufferId, AudioGraphError> {
        if desc.channels == 0 || desc.sample_rate <= 0.0 {
            return Err(AudioGraphError::InvalidDescriptor(format!("{desc:?}")));
        }
        let id = self.fresh_id();
        self.buffers.insert(
            id,
            BufferState {
                desc: *desc,
                channels: vec![vec![0.0; desc.length]; desc.channels as usize],
            },
        );
        Ok(AudioBufferId(id))
    }

    fn buffer_info(&self, buffer: AudioBufferId) -> Result<AudioBufferInfo, AudioGraphError> {
        let state = self.buffer(buffer)?;
        Ok(AudioBufferInfo {
            channels: state.desc.channels,
            length: state.desc.length,
            sample_rate: state.desc.sample_rate,
        })
    }

    fn read_channel(
        &self,
        buffer: AudioBufferId,
        channel: u32,
    ) -> Result<Vec<f32>, AudioGraphError> {
        let state = self.buffer(buffer)?;
        state
            .channels
            .get(channel as usize)
            .cloned()
            .ok_or(AudioGraphError::ChannelOutOfRange { buffer, channel })
    }

    fn write_channel(
        &mut self,
        buffer: AudioBufferId,
        channel: u32,
        data: &[f32],
    ) -> Result<(), AudioGraphError> {
        self.trace.push(format!("write:{}:{channel}", buffer.0));
        let state = self
            .buffers
            .get_mut(&buffer.0)
            .ok_or(AudioGraphError::UnknownBuffer(buffer))?;
        let slot = state
            .channels
            .get_mut(channel as usize)
            .ok_or(AudioGraphError::ChannelOutOfRange { buffer, channel })?;
        slot.clear();
        slot.extend_from_slice(data);
        Ok(())
    }

    fn create_source(&mut self) -> Result<AudioNodeId, AudioGraphError> {
        let id = self.fresh_id();
        self.nodes.insert(id, NodeKind::Source);
        self.looped.insert(id, false);
        self.rates.insert(id, 1.0);
        Ok(AudioNodeId(id))
    }

    fn create_splitter(&mut self, outputs: u32) -> Result<AudioNodeId, AudioGraphError> {
        let id = self.fresh_id();
        self.nodes.insert(id, NodeKind::Splitter(outputs));
        Ok(AudioNodeId(id))
    }

    fn create_merger(&mut self, inputs: u32) -> Result<AudioNodeId, AudioGraphError> {
        let id = self.fresh_id();
        self.nodes.insert(id, NodeKind::Merger(inputs));
        Ok(AudioNodeId(id))
    }

    fn create_analyser(&mut self) -> Result<AudioNodeId, AudioGraphError> {
        let id = self.fresh_id();
        self.nodes.insert(id, NodeKind::Analyser);
        Ok(AudioNodeId(id))
    }

    fn assign_buffer(
        &mut self,
        source: AudioNodeId,
        buffer: AudioBufferId,
    ) -> Result<(), AudioGraphError> {
        self.source(source)?;
        self.buffer(buffer)?;
        self.trace.push(format!("assign:{}", buffer.0));
        self.assigned.insert(source.0, buffer);
        Ok(())
    }

    fn connect(
        &mut self,
        from: AudioNodeId,
        to: AudioNodeId,
        output: u32,
        input: u32,
    ) -> Result<(), AudioGraphError> {
        self.node(from)?;
        self.node(to)?;
        self.connections.push((from, to, output, input));
        Ok(())
    }

    fn connect_to_output(&mut self, node: AudioNodeId) -> Result<(), AudioGraphError> {
        self.node(node)?;
        self.output_connections.push(node);
        Ok(())
    }

    fn disconnect(&mut self, node: AudioNodeId) -> Result<(), AudioGraphError> {
        self.node(node)?;
        self.disconnected.push(node);
        Ok(())
    }

    fn set_loop(&mut self, source: AudioNodeId, looped: bool) -> Result<(), AudioGraphError> {
        self.source(source)?;
        self.looped.insert(source.0, looped);
        Ok(())
    }

    fn loop_enabled(&self, source: AudioNodeId) -> Result<bool, AudioGraphError> {
        self.source(source)?;
        Ok(self.looped[&source.0])
    }

    fn set_playback_rate(
        &mut self,
        source: AudioNodeId,
        rate: f32,
    ) -> Result<(), AudioGraphError> {
        self.source(source)?;
        self.rates.insert(source.0, rate);
        Ok(())
    }

    fn playback_rate(&self, source: AudioNodeId) -> Result<f32, AudioGraphError> {
        self.source(source)?;
        Ok(self.rates[&source.0])
    }

    fn start(&mut self, source: AudioNodeId, when: Option<f64>) -> Result<(), AudioGraphError> {
        self.source(source)?;
        self.starts.push((source, when));
        Ok(())
    }

    fn stop(&mut self, source: AudioNodeId, when: Option<f64>) -> Result<(), AudioGraphError> {
        self.source(source)?;
        self.stops.push((source, when));
        Ok(())
    }

    fn latest_sample(&mut self, analyser: AudioNodeId) -> Result<f32, AudioGraphError> {
        match self.node(analyser)? {
            NodeKind::Analyser => Ok(self.analyser_sample),
            _ => Err(AudioGraphError::WrongNodeKind {
                node: analyser,
                expected: "analyser",
            }),
        }
    }
}

// ---

/// A stereo test buffer with distinct, recognizable channel content.
fn stereo_buffer(device: &mut RecordingAudioGraph, length: usize) -> AudioBufferId {
    let buffer = device
        .create_buffer(&AudioBufferDesc {
            channels: 2,
            length,
            sample_rate: 8000.0,
        })
        .unwrap();
    let left: Vec<f32> = (0..length).map(|i| i as f32).collect();
    let right: Vec<f32> = (0..length).map(|i| -(i as f32)).collect();
    device.write_channel(buffer, 0, &left).unwrap();
    device.write_channel(buffer, 1, &right).unwrap();
    device.trace.clear();
    buffer
}

fn wired_source(
    device: &mut RecordingAudioGraph,
    length: usize,
) -> (PlaybackPositionSource, AudioBufferId) {
    let buffer = stereo_buffer(device, length);
    let mut source = PlaybackPositionSource::new(device).unwrap();
    source.set_buffer(device, buffer).unwrap();
    (source, buffer)
}

/// The buffer `set_buffer` created, i.e. the one that is not the original.
fn augmented_id(device: &RecordingAudioGraph, original: AudioBufferId) -> AudioBufferId {
    AudioBufferId(
        *device
            .buffers
            .keys()
            .find(|&&id| id != original.0)
            .expect("no augmented buffer was created"),
    )
}

fn node_of_kind(
    device: &RecordingAudioGraph,
    matcher: impl Fn(&NodeKind) -> bool,
) -> AudioNodeId {
    AudioNodeId(*device.nodes.iter().find(|(_, kind)| matcher(kind)).unwrap().0)
}

#[test]
fn test_augmented_buffer_gains_one_channel() {
    let mut device = RecordingAudioGraph::default();
    let (_source, original) = wired_source(&mut device, 800);

    let augmented = augmented_id(&device, original);
    let info = device.buffer_info(augmented).unwrap();
    let original_info = device.buffer_info(original).unwrap();
    assert_eq!(info.channels, original_info.channels + 1);
    assert_eq!(info.length, original_info.length);
    assert_eq!(info.sample_rate, original_info.sample_rate);
}

#[test]
fn test_original_channels_are_copied_unchanged() {
    let mut device = RecordingAudioGraph::default();
    let (_source, original) = wired_source(&mut device, 512);

    let augmented = augmented_id(&device, original);
    for channel in 0..2 {
        assert_eq!(
            device.read_channel(augmented, channel).unwrap(),
            device.read_channel(original, channel).unwrap(),
        );
    }
}

#[test]
fn test_timing_track_is_a_linear_ramp() {
    let mut device = RecordingAudioGraph::default();
    let length = 8000;
    let (_source, original) = wired_source(&mut device, length);

    let augmented = augmented_id(&device, original);
    let ramp = device.read_channel(augmented, 2).unwrap();
    let duration = 1.0; // 8000 frames at 8 kHz

    assert_eq!(ramp[0], 0.0);
    let expected_last = duration * (length - 1) as f64 / length as f64;
    assert!((f64::from(ramp[length - 1]) - expected_last).abs() < 1e-4);
    assert!(ramp.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_buffer_assigned_only_after_all_channels_written() {
    let mut device = RecordingAudioGraph::default();
    let (_source, original) = wired_source(&mut device, 64);

    // The source got the augmented buffer, not the original.
    let source_node = node_of_kind(&device, |kind| matches!(kind, NodeKind::Source));
    assert_eq!(
        device.assigned.get(&source_node.0),
        Some(&augmented_id(&device, original))
    );

    let assign_at = device
        .trace
        .iter()
        .position(|entry| entry.starts_with("assign:"))
        .expect("source was never assigned a buffer");
    let last_write = device
        .trace
        .iter()
        .rposition(|entry| entry.starts_with("write:"))
        .expect("no channel writes recorded");
    assert!(last_write < assign_at);
}

#[test]
fn test_wiring_routes_audio_to_merger_and_timing_to_analyser() {
    let mut device = RecordingAudioGraph::default();
    let (source, _original) = wired_source(&mut device, 64);

    let source_node = node_of_kind(&device, |kind| matches!(kind, NodeKind::Source));
    let splitter = node_of_kind(&device, |kind| matches!(kind, NodeKind::Splitter(_)));
    let merger = node_of_kind(&device, |kind| matches!(kind, NodeKind::Merger(_)));
    let analyser = node_of_kind(&device, |kind| matches!(kind, NodeKind::Analyser));

    // Splitter and merger carry the host default fan.
    let fan = lyra_core::audio::playback_position::DEFAULT_CHANNEL_FAN;
    assert_eq!(device.nodes[&splitter.0], NodeKind::Splitter(fan));
    assert_eq!(device.nodes[&merger.0], NodeKind::Merger(fan));

    let connections = &device.connections;
    // Source feeds the splitter.
    assert!(connections.contains(&(source_node, splitter, 0, 0)));
    // Each audible channel goes straight through, index-preserving.
    assert!(connections.contains(&(splitter, merger, 0, 0)));
    assert!(connections.contains(&(splitter, merger, 1, 1)));
    // The extra channel feeds the analyser, not the merger.
    assert!(connections.contains(&(splitter, analyser, 2, 0)));
    assert!(!connections
        .iter()
        .any(|&(_, to, output, _)| to == merger && output == 2));

    // The composite's output is the merger.
    source.connect_to_output(&mut device).unwrap();
    assert_eq!(device.output_connections, vec![merger]);
}

#[test]
fn test_position_before_buffer_assignment_is_zero() {
    let mut device = RecordingAudioGraph::default();
    let source = PlaybackPositionSource::new(&mut device).unwrap();

    device.analyser_sample = 0.42;
    assert_eq!(source.position(&mut device), 0.0);
}

#[test]
fn test_position_reads_latest_analyser_sample() {
    let mut device = RecordingAudioGraph::default();
    let (source, _original) = wired_source(&mut device, 64);

    device.analyser_sample = 1.5;
    assert_eq!(source.position(&mut device), 1.5);
    device.analyser_sample = 1.6;
    assert_eq!(source.position(&mut device), 1.6);
}

#[test]
fn test_start_stop_forward_arguments_unchanged() {
    let mut device = RecordingAudioGraph::default();
    let (source, _original) = wired_source(&mut device, 64);

    source.start(&mut device, Some(0.25)).unwrap();
    source.start(&mut device, None).unwrap();
    source.stop(&mut device, Some(3.5)).unwrap();

    let id = device.starts[0].0;
    assert_eq!(device.starts, vec![(id, Some(0.25)), (id, None)]);
    assert_eq!(device.stops, vec![(id, Some(3.5))]);
}

#[test]
fn test_loop_and_rate_forward_to_the_source_node() {
    let mut device = RecordingAudioGraph::default();
    let (source, _original) = wired_source(&mut device, 64);

    assert!(!source.loop_enabled(&device).unwrap());
    source.set_loop(&mut device, true).unwrap();
    assert!(source.loop_enabled(&device).unwrap());

    assert_eq!(source.playback_rate(&device).unwrap(), 1.0);
    source.set_playback_rate(&mut device, 1.25).unwrap();
    assert_eq!(source.playback_rate(&device).unwrap(), 1.25);
}

#[test]
fn test_connect_and_disconnect_forward_from_the_merger() {
    let mut device = RecordingAudioGraph::default();
    let (source, _original) = wired_source(&mut device, 64);
    let sink = device.create_merger(2).unwrap();

    source.connect(&mut device, sink, 1, 0).unwrap();
    let merger = *device.connections.last().map(|(from, ..)| from).unwrap();
    assert_eq!(device.connections.last(), Some(&(merger, sink, 1, 0)));

    source.disconnect(&mut device).unwrap();
    assert_eq!(device.disconnected, vec![merger]);
}

#[test]
fn test_output_can_be_connected_before_buffer_assignment() {
    let mut device = RecordingAudioGraph::default();
    let source = PlaybackPositionSource::new(&mut device).unwrap();

    // The merger exists from construction, so wiring up the destination
    // ahead of the first buffer is valid.
    source.connect_to_output(&mut device).unwrap();
    assert_eq!(device.output_connections.len(), 1);
}
