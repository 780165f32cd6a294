use web_sys as web;
use zennoise_core::{AudioHost, EngineError, EngineResult, NodeSpec, ParamKind};

/// One WebAudio node created for a layer stage.
#[derive(Clone)]
pub enum WebNode {
    Buffer(web::AudioBufferSourceNode),
    Oscillator(web::OscillatorNode),
    Filter(web::BiquadFilterNode),
    Gain(web::GainNode),
}

impl WebNode {
    fn audio_node(&self) -> &web::AudioNode {
        match self {
            WebNode::Buffer(n) => n,
            WebNode::Oscillator(n) => n,
            WebNode::Filter(n) => n,
            WebNode::Gain(n) => n,
        }
    }

    fn param(&self, kind: ParamKind) -> Option<web::AudioParam> {
        match (self, kind) {
            (WebNode::Gain(g), ParamKind::Gain) => Some(g.gain()),
            (WebNode::Oscillator(o), ParamKind::Frequency) => Some(o.frequency()),
            (WebNode::Filter(f), ParamKind::Frequency) => Some(f.frequency()),
            (WebNode::Filter(f), ParamKind::Q) => Some(f.q()),
            _ => None,
        }
    }

    fn require_param(&self, kind: ParamKind) -> EngineResult<web::AudioParam> {
        self.param(kind)
            .ok_or_else(|| EngineError::Scheduling(format!("node has no {:?} param", kind)))
    }
}

/// [`AudioHost`] backed by the page's `AudioContext`.
pub struct WebAudioHost {
    audio_ctx: web::AudioContext,
}

impl WebAudioHost {
    pub fn new(audio_ctx: web::AudioContext) -> Self {
        Self { audio_ctx }
    }
}

fn creation_error(stage: &'static str, e: wasm_bindgen::JsValue) -> EngineError {
    log::error!("{} node error: {:?}", stage, e);
    EngineError::NodeCreation {
        stage,
        reason: format!("{:?}", e),
    }
}

fn scheduling_error(e: wasm_bindgen::JsValue) -> EngineError {
    EngineError::Scheduling(format!("{:?}", e))
}

fn create_filter(
    audio_ctx: &web::AudioContext,
    filter_type: web::BiquadFilterType,
    frequency: f32,
    q: f32,
    label: &'static str,
) -> EngineResult<web::BiquadFilterNode> {
    let f = web::BiquadFilterNode::new(audio_ctx).map_err(|e| creation_error(label, e))?;
    f.set_type(filter_type);
    f.frequency().set_value(frequency);
    f.q().set_value(q);
    Ok(f)
}

impl AudioHost for WebAudioHost {
    type Node = WebNode;

    fn current_time(&self) -> f64 {
        self.audio_ctx.current_time()
    }

    fn sample_rate(&self) -> f32 {
        self.audio_ctx.sample_rate()
    }

    fn is_suspended(&self) -> bool {
        self.audio_ctx.state() == web::AudioContextState::Suspended
    }

    fn create(&mut self, spec: &NodeSpec) -> EngineResult<WebNode> {
        let label = spec.label();
        match spec {
            NodeSpec::NoiseLoop {
                samples,
                sample_rate,
            } => {
                let buffer = self
                    .audio_ctx
                    .create_buffer(1, samples.len() as u32, *sample_rate)
                    .map_err(|e| creation_error(label, e))?;
                let mut channel = samples.clone();
                buffer
                    .copy_to_channel(&mut channel, 0)
                    .map_err(|e| creation_error(label, e))?;
                let src = web::AudioBufferSourceNode::new(&self.audio_ctx)
                    .map_err(|e| creation_error(label, e))?;
                src.set_buffer(Some(&buffer));
                src.set_loop(true);
                Ok(WebNode::Buffer(src))
            }
            NodeSpec::Sine { frequency } => {
                let osc = web::OscillatorNode::new(&self.audio_ctx)
                    .map_err(|e| creation_error(label, e))?;
                osc.set_type(web::OscillatorType::Sine);
                osc.frequency().set_value(*frequency);
                Ok(WebNode::Oscillator(osc))
            }
            NodeSpec::Lowpass { frequency, q } => create_filter(
                &self.audio_ctx,
                web::BiquadFilterType::Lowpass,
                *frequency,
                *q,
                label,
            )
            .map(WebNode::Filter),
            NodeSpec::Bandpass { frequency, q } => create_filter(
                &self.audio_ctx,
                web::BiquadFilterType::Bandpass,
                *frequency,
                *q,
                label,
            )
            .map(WebNode::Filter),
            NodeSpec::Gain { level } => {
                let g = web::GainNode::new(&self.audio_ctx)
                    .map_err(|e| creation_error(label, e))?;
                g.gain().set_value(*level);
                Ok(WebNode::Gain(g))
            }
        }
    }

    fn connect(&mut self, from: &WebNode, to: &WebNode) -> EngineResult<()> {
        from.audio_node()
            .connect_with_audio_node(to.audio_node())
            .map(|_| ())
            .map_err(|e| EngineError::Connection(format!("{:?}", e)))
    }

    fn connect_param(&mut self, from: &WebNode, to: &WebNode, param: ParamKind) -> EngineResult<()> {
        let target = to.require_param(param)?;
        from.audio_node()
            .connect_with_audio_param(&target)
            .map_err(|e| EngineError::Connection(format!("{:?}", e)))
    }

    fn connect_output(&mut self, node: &WebNode) -> EngineResult<()> {
        node.audio_node()
            .connect_with_audio_node(&self.audio_ctx.destination())
            .map(|_| ())
            .map_err(|e| EngineError::Connection(format!("{:?}", e)))
    }

    fn disconnect(&mut self, node: &WebNode) {
        _ = node.audio_node().disconnect();
    }

    fn start(&mut self, node: &WebNode) -> EngineResult<()> {
        let res = match node {
            WebNode::Buffer(src) => src.start(),
            WebNode::Oscillator(osc) => osc.start(),
            _ => return Ok(()),
        };
        res.map_err(|e| EngineError::SourceStart(format!("{:?}", e)))
    }

    fn stop(&mut self, node: &WebNode) -> EngineResult<()> {
        let res = match node {
            WebNode::Buffer(src) => src.stop(),
            WebNode::Oscillator(osc) => osc.stop(),
            _ => return Ok(()),
        };
        // Older engines throw InvalidStateError on a repeated stop()
        res.map_err(|e| {
            log::debug!("stop() rejected: {:?}", e);
            EngineError::AlreadyStopped
        })
    }

    fn param_value(&self, node: &WebNode, param: ParamKind) -> f32 {
        node.param(param).map(|p| p.value()).unwrap_or(0.0)
    }

    fn set_param(&mut self, node: &WebNode, param: ParamKind, value: f32) {
        if let Some(p) = node.param(param) {
            p.set_value(value);
        }
    }

    fn set_value_at_time(
        &mut self,
        node: &WebNode,
        param: ParamKind,
        value: f32,
        time: f64,
    ) -> EngineResult<()> {
        node.require_param(param)?
            .set_value_at_time(value, time)
            .map(|_| ())
            .map_err(scheduling_error)
    }

    fn linear_ramp_to_value_at_time(
        &mut self,
        node: &WebNode,
        param: ParamKind,
        value: f32,
        end_time: f64,
    ) -> EngineResult<()> {
        node.require_param(param)?
            .linear_ramp_to_value_at_time(value, end_time)
            .map(|_| ())
            .map_err(scheduling_error)
    }

    fn set_target_at_time(
        &mut self,
        node: &WebNode,
        param: ParamKind,
        target: f32,
        start_time: f64,
        tau: f64,
    ) -> EngineResult<()> {
        node.require_param(param)?
            .set_target_at_time(target, start_time, tau)
            .map(|_| ())
            .map_err(scheduling_error)
    }

    fn cancel_scheduled_values(
        &mut self,
        node: &WebNode,
        param: ParamKind,
        from_time: f64,
    ) -> EngineResult<()> {
        node.require_param(param)?
            .cancel_scheduled_values(from_time)
            .map(|_| ())
            .map_err(scheduling_error)
    }
}
