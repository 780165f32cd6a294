//! In-memory stand-ins for the host collaborators.
//!
//! [`MockHost`] records every node, connection and automation event and can
//! evaluate a parameter at its (manually advanced) clock, so layer wiring and
//! the fade choreography are observable without a browser. [`MockSurface`]
//! plays the part of the UI controls.

use crate::error::{EngineError, EngineResult};
use crate::graph::{AudioHost, NodeSpec, ParamKind};
use crate::session::PlaybackStatus;
use crate::surface::{ControlSurface, Notice};
use crate::settings::{Param, Settings};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MockNodeId(pub usize);

/// One scheduled change on a parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Automation {
    SetValueAtTime { value: f32, time: f64 },
    LinearRamp { value: f32, end_time: f64 },
    SetTarget { target: f32, start_time: f64, tau: f64 },
}

impl Automation {
    fn time(&self) -> f64 {
        match *self {
            Automation::SetValueAtTime { time, .. } => time,
            Automation::LinearRamp { end_time, .. } => end_time,
            Automation::SetTarget { start_time, .. } => start_time,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockParam {
    pub base: f32,
    pub events: Vec<Automation>,
    pub cancels: usize,
}

impl MockParam {
    fn new(base: f32) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }

    /// Keep events ordered by time; equal times keep insertion order.
    fn schedule(&mut self, ev: Automation) {
        let at = self
            .events
            .iter()
            .position(|e| e.time() > ev.time())
            .unwrap_or(self.events.len());
        self.events.insert(at, ev);
    }

    /// Value at `now`, following WebAudio's event semantics closely enough
    /// for ramps, holds and exponential approaches.
    pub fn value_at(&self, now: f64) -> f32 {
        let mut value = self.base;
        let mut last_time = 0.0_f64;
        for ev in &self.events {
            match *ev {
                Automation::SetValueAtTime { value: v, time } => {
                    if now < time {
                        break;
                    }
                    value = v;
                    last_time = time;
                }
                Automation::LinearRamp { value: v, end_time } => {
                    if now >= end_time {
                        value = v;
                        last_time = end_time;
                    } else {
                        let span = end_time - last_time;
                        if span > 0.0 && now > last_time {
                            let frac = ((now - last_time) / span) as f32;
                            value += (v - value) * frac;
                        }
                        break;
                    }
                }
                Automation::SetTarget {
                    target,
                    start_time,
                    tau,
                } => {
                    if now < start_time {
                        break;
                    }
                    let k = (-(now - start_time) / tau).exp() as f32;
                    value = target + (value - target) * k;
                    last_time = start_time;
                }
            }
        }
        value
    }
}

#[derive(Clone, Debug)]
pub struct MockNode {
    pub kind: &'static str,
    pub buffer_len: usize,
    pub params: BTreeMap<ParamKind, MockParam>,
    pub started: bool,
    pub stop_calls: usize,
    pub disconnected: bool,
}

impl MockNode {
    pub fn is_running(&self) -> bool {
        self.started && self.stop_calls == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockLink {
    Node(MockNodeId),
    Param(MockNodeId, ParamKind),
    Output,
}

#[derive(Clone, Debug)]
pub struct MockHost {
    pub nodes: Vec<MockNode>,
    pub links: Vec<(MockNodeId, MockLink)>,
    pub time: f64,
    pub sample_rate: f32,
    pub suspended: bool,
    /// Node kind whose creation should fail, to exercise error paths.
    pub fail_create: Option<&'static str>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new(8_000.0)
    }
}

impl MockHost {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            time: 0.0,
            sample_rate,
            suspended: false,
            fail_create: None,
        }
    }

    pub fn advance(&mut self, seconds: f64) {
        self.time += seconds;
    }

    pub fn node(&self, id: &MockNodeId) -> &MockNode {
        &self.nodes[id.0]
    }

    pub fn param(&self, id: &MockNodeId, param: ParamKind) -> &MockParam {
        &self.node(id).params[&param]
    }

    pub fn value(&self, id: &MockNodeId, param: ParamKind) -> f32 {
        self.param_value(id, param)
    }

    pub fn links_from(&self, id: &MockNodeId) -> Vec<MockLink> {
        self.links
            .iter()
            .filter(|(from, _)| from == id)
            .map(|(_, to)| *to)
            .collect()
    }

    pub fn running_sources(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_running()).count()
    }

    fn param_mut(&mut self, id: &MockNodeId, param: ParamKind) -> EngineResult<&mut MockParam> {
        self.nodes[id.0]
            .params
            .get_mut(&param)
            .ok_or_else(|| EngineError::Scheduling(format!("node {} has no {:?}", id.0, param)))
    }
}

impl AudioHost for MockHost {
    type Node = MockNodeId;

    fn current_time(&self) -> f64 {
        self.time
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn create(&mut self, spec: &NodeSpec) -> EngineResult<MockNodeId> {
        if self.fail_create == Some(spec.label()) {
            return Err(EngineError::NodeCreation {
                stage: spec.label(),
                reason: "mock failure".to_string(),
            });
        }
        let mut params = BTreeMap::new();
        let mut buffer_len = 0;
        match spec {
            NodeSpec::NoiseLoop { samples, .. } => buffer_len = samples.len(),
            NodeSpec::Sine { frequency } => {
                params.insert(ParamKind::Frequency, MockParam::new(*frequency));
            }
            NodeSpec::Lowpass { frequency, q } | NodeSpec::Bandpass { frequency, q } => {
                params.insert(ParamKind::Frequency, MockParam::new(*frequency));
                params.insert(ParamKind::Q, MockParam::new(*q));
            }
            NodeSpec::Gain { level } => {
                params.insert(ParamKind::Gain, MockParam::new(*level));
            }
        }
        self.nodes.push(MockNode {
            kind: spec.label(),
            buffer_len,
            params,
            started: false,
            stop_calls: 0,
            disconnected: false,
        });
        Ok(MockNodeId(self.nodes.len() - 1))
    }

    fn connect(&mut self, from: &MockNodeId, to: &MockNodeId) -> EngineResult<()> {
        self.links.push((*from, MockLink::Node(*to)));
        Ok(())
    }

    fn connect_param(
        &mut self,
        from: &MockNodeId,
        to: &MockNodeId,
        param: ParamKind,
    ) -> EngineResult<()> {
        if !self.node(to).params.contains_key(&param) {
            return Err(EngineError::Connection(format!(
                "node {} has no {:?}",
                to.0, param
            )));
        }
        self.links.push((*from, MockLink::Param(*to, param)));
        Ok(())
    }

    fn connect_output(&mut self, node: &MockNodeId) -> EngineResult<()> {
        self.links.push((*node, MockLink::Output));
        Ok(())
    }

    fn disconnect(&mut self, node: &MockNodeId) {
        self.nodes[node.0].disconnected = true;
    }

    fn start(&mut self, node: &MockNodeId) -> EngineResult<()> {
        let n = &mut self.nodes[node.0];
        if n.started {
            return Err(EngineError::SourceStart("already started".to_string()));
        }
        n.started = true;
        Ok(())
    }

    fn stop(&mut self, node: &MockNodeId) -> EngineResult<()> {
        let n = &mut self.nodes[node.0];
        n.stop_calls += 1;
        if n.stop_calls > 1 {
            return Err(EngineError::AlreadyStopped);
        }
        Ok(())
    }

    fn param_value(&self, node: &MockNodeId, param: ParamKind) -> f32 {
        self.node(node)
            .params
            .get(&param)
            .map(|p| p.value_at(self.time))
            .unwrap_or(0.0)
    }

    fn set_param(&mut self, node: &MockNodeId, param: ParamKind, value: f32) {
        if let Ok(p) = self.param_mut(node, param) {
            p.base = value;
            p.events.clear();
        }
    }

    fn set_value_at_time(
        &mut self,
        node: &MockNodeId,
        param: ParamKind,
        value: f32,
        time: f64,
    ) -> EngineResult<()> {
        self.param_mut(node, param)?
            .schedule(Automation::SetValueAtTime { value, time });
        Ok(())
    }

    fn linear_ramp_to_value_at_time(
        &mut self,
        node: &MockNodeId,
        param: ParamKind,
        value: f32,
        end_time: f64,
    ) -> EngineResult<()> {
        self.param_mut(node, param)?
            .schedule(Automation::LinearRamp { value, end_time });
        Ok(())
    }

    fn set_target_at_time(
        &mut self,
        node: &MockNodeId,
        param: ParamKind,
        target: f32,
        start_time: f64,
        tau: f64,
    ) -> EngineResult<()> {
        self.param_mut(node, param)?.schedule(Automation::SetTarget {
            target,
            start_time,
            tau,
        });
        Ok(())
    }

    fn cancel_scheduled_values(
        &mut self,
        node: &MockNodeId,
        param: ParamKind,
        from_time: f64,
    ) -> EngineResult<()> {
        let now = self.time;
        let p = self.param_mut(node, param)?;
        // Fold events that already took effect into the base value
        let settled = p.value_at(now);
        p.events.retain(|ev| ev.time() < from_time);
        if p.events.iter().all(|ev| ev.time() <= now) {
            p.base = settled;
            p.events.clear();
        }
        p.cancels += 1;
        Ok(())
    }
}

/// Control panel held in memory, recording everything shown to the user.
#[derive(Clone, Debug, Default)]
pub struct MockSurface {
    pub values: Settings,
    pub status: Option<PlaybackStatus>,
    pub presets: Vec<String>,
    pub notices: Vec<Notice>,
}

impl ControlSurface for MockSurface {
    fn value(&self, param: Param) -> f32 {
        self.values.get(param)
    }

    fn set_value(&mut self, param: Param, value: f32) {
        self.values.set(param, value);
    }

    fn show_status(&mut self, status: PlaybackStatus) {
        self.status = Some(status);
    }

    fn show_presets(&mut self, names: &[String]) {
        self.presets = names.to_vec();
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
