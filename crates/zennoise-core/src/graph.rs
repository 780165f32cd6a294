//! Explicit node-graph description of a layer and the host audio seam.
//!
//! A [`Topology`] is a plain value listing named stages and the directed
//! connections between them. [`realize`] turns one into live nodes on any
//! [`AudioHost`]: the browser's `AudioContext` in the web front-end, or
//! the in-memory `MockHost` in tests.

use crate::error::{EngineError, EngineResult};
use crate::layers::LayerKind;

/// Primitive processing stage with its initial parameter values.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeSpec {
    /// Looping buffer playback of pre-generated mono samples.
    NoiseLoop { samples: Vec<f32>, sample_rate: f32 },
    Sine { frequency: f32 },
    Lowpass { frequency: f32, q: f32 },
    Bandpass { frequency: f32, q: f32 },
    Gain { level: f32 },
}

impl NodeSpec {
    /// Time-based sources must be started and, exactly once, stopped.
    pub fn is_source(&self) -> bool {
        matches!(self, NodeSpec::NoiseLoop { .. } | NodeSpec::Sine { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeSpec::NoiseLoop { .. } => "noise",
            NodeSpec::Sine { .. } => "oscillator",
            NodeSpec::Lowpass { .. } => "lowpass",
            NodeSpec::Bandpass { .. } => "bandpass",
            NodeSpec::Gain { .. } => "gain",
        }
    }
}

/// Automatable parameter on a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamKind {
    Gain,
    Frequency,
    Q,
}

/// Name of a stage within one layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Source,
    Filter,
    Amp,
    Lfo,
    LfoDepth,
}

/// Directed connection between two stages of a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Signal output of `from` feeds the signal input of `to`.
    Audio { from: Role, to: Role },
    /// Signal output of `from` is summed into `param` of `to`.
    Modulate {
        from: Role,
        to: Role,
        param: ParamKind,
    },
}

/// Fixed signal chain for one layer. Pure data; nothing is allocated on a
/// host until [`realize`] runs.
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    pub kind: LayerKind,
    pub stages: Vec<(Role, NodeSpec)>,
    pub edges: Vec<Edge>,
    /// Stage whose output leaves the layer.
    pub output: Role,
}

impl Topology {
    pub fn stage(&self, role: Role) -> Option<&NodeSpec> {
        self.stages.iter().find(|(r, _)| *r == role).map(|(_, s)| s)
    }
}

/// The host audio subsystem: node factory, wiring and parameter automation.
///
/// Times are in the host's clock (seconds, as returned by `current_time`).
pub trait AudioHost {
    type Node: Clone;

    fn current_time(&self) -> f64;
    fn sample_rate(&self) -> f32;
    fn is_suspended(&self) -> bool;

    fn create(&mut self, spec: &NodeSpec) -> EngineResult<Self::Node>;
    fn connect(&mut self, from: &Self::Node, to: &Self::Node) -> EngineResult<()>;
    fn connect_param(
        &mut self,
        from: &Self::Node,
        to: &Self::Node,
        param: ParamKind,
    ) -> EngineResult<()>;
    /// Route a node to the output device.
    fn connect_output(&mut self, node: &Self::Node) -> EngineResult<()>;
    fn disconnect(&mut self, node: &Self::Node);

    fn start(&mut self, node: &Self::Node) -> EngineResult<()>;
    /// Fails with [`EngineError::AlreadyStopped`] on a second call.
    fn stop(&mut self, node: &Self::Node) -> EngineResult<()>;

    fn param_value(&self, node: &Self::Node, param: ParamKind) -> f32;
    /// Jump immediately with no smoothing.
    fn set_param(&mut self, node: &Self::Node, param: ParamKind, value: f32);
    fn set_value_at_time(
        &mut self,
        node: &Self::Node,
        param: ParamKind,
        value: f32,
        time: f64,
    ) -> EngineResult<()>;
    fn linear_ramp_to_value_at_time(
        &mut self,
        node: &Self::Node,
        param: ParamKind,
        value: f32,
        end_time: f64,
    ) -> EngineResult<()>;
    /// Exponential approach towards `target` with time constant `tau`.
    fn set_target_at_time(
        &mut self,
        node: &Self::Node,
        param: ParamKind,
        target: f32,
        start_time: f64,
        tau: f64,
    ) -> EngineResult<()>;
    fn cancel_scheduled_values(
        &mut self,
        node: &Self::Node,
        param: ParamKind,
        from_time: f64,
    ) -> EngineResult<()>;
}

/// Live nodes for one layer, owned by the session that built them.
#[derive(Clone, Debug)]
pub struct LayerHandle<N> {
    pub kind: LayerKind,
    nodes: Vec<(Role, N)>,
    sources: Vec<N>,
    output: N,
}

impl<N> LayerHandle<N> {
    pub fn node(&self, role: Role) -> EngineResult<&N> {
        self.nodes
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, n)| n)
            .ok_or(EngineError::MissingStage(role))
    }

    pub fn sources(&self) -> &[N] {
        &self.sources
    }

    pub fn output(&self) -> &N {
        &self.output
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter().map(|(_, n)| n)
    }
}

/// Create every stage of `topology` on `host` and wire its internal edges.
///
/// The returned layer is neither started nor connected to any output.
pub fn realize<H: AudioHost>(
    host: &mut H,
    topology: &Topology,
) -> EngineResult<LayerHandle<H::Node>> {
    let mut nodes: Vec<(Role, H::Node)> = Vec::with_capacity(topology.stages.len());
    let mut sources: Vec<H::Node> = Vec::new();
    for (role, spec) in &topology.stages {
        let node = host.create(spec)?;
        if spec.is_source() {
            sources.push(node.clone());
        }
        nodes.push((*role, node));
    }

    let lookup = |role: Role| -> EngineResult<H::Node> {
        nodes
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, n)| n.clone())
            .ok_or(EngineError::MissingStage(role))
    };
    for edge in &topology.edges {
        match *edge {
            Edge::Audio { from, to } => {
                let (a, b) = (lookup(from)?, lookup(to)?);
                host.connect(&a, &b)?;
            }
            Edge::Modulate { from, to, param } => {
                let (a, b) = (lookup(from)?, lookup(to)?);
                host.connect_param(&a, &b, param)?;
            }
        }
    }
    let output = lookup(topology.output)?;

    log::debug!(
        "[graph] realized {:?}: {} stages, {} edges",
        topology.kind,
        nodes.len(),
        topology.edges.len()
    );
    Ok(LayerHandle {
        kind: topology.kind,
        nodes,
        sources,
        output,
    })
}
