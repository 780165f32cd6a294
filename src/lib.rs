#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;
use zennoise_core::{EngineConfig, PresetConfig, ZenNoise};

mod audio;
mod constants;
mod controls;
mod dom;
mod events;
mod storage;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("zennoise starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Created suspended; the play button resumes it from a user gesture
    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let host = audio::WebAudioHost::new(audio_ctx.clone());
    let storage = storage::LocalStorageStore::new()?;
    let surface = controls::DomSurface::new(document.clone());

    let app = Rc::new(RefCell::new(ZenNoise::new(
        host,
        storage,
        surface,
        EngineConfig::default(),
        PresetConfig::default(),
        rand::random(),
    )));
    log::info!(
        "[audio] sample rate {} Hz, {} presets stored",
        audio_ctx.sample_rate(),
        app.borrow().presets().list().map(|m| m.len()).unwrap_or(0)
    );

    events::wire_all(&document, app, audio_ctx);
    Ok(())
}
