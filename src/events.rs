use crate::audio::WebAudioHost;
use crate::constants::*;
use crate::controls::DomSurface;
use crate::dom;
use crate::storage::LocalStorageStore;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;
use zennoise_core::{Param, Teardown, ZenNoise};

pub type App = ZenNoise<WebAudioHost, LocalStorageStore, DomSurface>;
pub type AppRef = Rc<RefCell<App>>;

pub fn wire_all(document: &web::Document, app: AppRef, audio_ctx: web::AudioContext) {
    wire_transport(document, &app, audio_ctx);
    wire_params(document, &app);
    wire_presets(document, &app);
}

fn wire_transport(document: &web::Document, app: &AppRef, audio_ctx: web::AudioContext) {
    let app_play = app.clone();
    dom::add_click_listener(document, PLAY_BUTTON_ID, move || {
        let app = app_play.clone();
        let audio_ctx = audio_ctx.clone();
        // Browsers keep the context suspended until a gesture resumes it
        spawn_local(async move {
            if audio_ctx.state() == web::AudioContextState::Suspended {
                match audio_ctx.resume() {
                    Ok(p) => {
                        if let Err(e) = JsFuture::from(p).await {
                            log::error!("[audio] resume failed: {:?}", e);
                        }
                    }
                    Err(e) => log::error!("[audio] resume error: {:?}", e),
                }
            }
            let outcome = app.borrow_mut().play();
            log::info!("[audio] play -> {:?}", outcome);
        });
    });

    let app_stop = app.clone();
    dom::add_click_listener(document, STOP_BUTTON_ID, move || {
        let token = app_stop.borrow_mut().stop();
        if let Some(token) = token {
            schedule_teardown(app_stop.clone(), token);
        }
    });

    let app_random = app.clone();
    dom::add_click_listener(document, RANDOMIZE_BUTTON_ID, move || {
        let settings = app_random.borrow_mut().randomize(&mut rand::thread_rng());
        log::info!("[ui] randomized {:?}", settings);
    });
}

fn schedule_teardown(app: AppRef, token: Teardown) {
    let delay_ms = token.delay.as_millis() as i32;
    dom::set_timeout(delay_ms, move || {
        app.borrow_mut().finish_stop(token);
    });
}

fn wire_params(document: &web::Document, app: &AppRef) {
    for param in Param::ALL {
        let app = app.clone();
        dom::add_input_listener(document, param.key(), move || {
            let mut app = app.borrow_mut();
            app.surface().sync_readout(param);
            app.param_changed();
        });
    }
}

fn wire_presets(document: &web::Document, app: &AppRef) {
    let app_save = app.clone();
    dom::add_click_listener(document, SAVE_BUTTON_ID, move || {
        let mut app = app_save.borrow_mut();
        let name = app.surface().preset_name();
        app.save_preset(&name);
    });

    let app_load = app.clone();
    dom::add_click_listener(document, LOAD_BUTTON_ID, move || {
        let mut app = app_load.borrow_mut();
        let name = app.surface().selected_preset();
        app.load_preset(&name);
    });

    let app_delete = app.clone();
    dom::add_click_listener(document, DELETE_BUTTON_ID, move || {
        let mut app = app_delete.borrow_mut();
        let name = app.surface().selected_preset();
        app.delete_preset(&name);
    });
}
