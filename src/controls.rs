use crate::constants::{readout_id, readout_precision, PRESET_NAME_ID, PRESET_SELECT_ID, STATUS_ID};
use crate::dom;
use web_sys as web;
use zennoise_core::{ControlSurface, Notice, Param, PlaybackStatus, Settings};

/// [`ControlSurface`] over the page's sliders, status line and preset list.
pub struct DomSurface {
    document: web::Document,
}

impl DomSurface {
    pub fn new(document: web::Document) -> Self {
        let surface = Self { document };
        for param in Param::ALL {
            surface.sync_readout(param);
        }
        surface
    }

    pub fn preset_name(&self) -> String {
        dom::input_by_id(&self.document, PRESET_NAME_ID)
            .map(|el| el.value())
            .unwrap_or_default()
    }

    /// Name of the preset highlighted in the list.
    pub fn selected_preset(&self) -> String {
        dom::select_by_id(&self.document, PRESET_SELECT_ID)
            .map(|el| el.value())
            .unwrap_or_default()
    }

    /// Refresh the numeric readout next to a slider.
    pub fn sync_readout(&self, param: Param) {
        let key = param.key();
        let text = format!("{:.*}", readout_precision(key), self.value(param));
        dom::set_text(&self.document, &readout_id(key), &text);
    }
}

impl ControlSurface for DomSurface {
    fn value(&self, param: Param) -> f32 {
        dom::input_by_id(&self.document, param.key())
            .and_then(|el| el.value().parse::<f32>().ok())
            .unwrap_or_else(|| Settings::default().get(param))
    }

    fn set_value(&mut self, param: Param, value: f32) {
        if let Some(el) = dom::input_by_id(&self.document, param.key()) {
            el.set_value(&value.to_string());
        }
        self.sync_readout(param);
    }

    fn show_status(&mut self, status: PlaybackStatus) {
        dom::set_text(&self.document, STATUS_ID, &status.to_string());
    }

    fn show_presets(&mut self, names: &[String]) {
        let Some(select) = dom::select_by_id(&self.document, PRESET_SELECT_ID) else {
            return;
        };
        let previous = select.value();
        select.set_inner_html("");
        for name in names {
            match web::HtmlOptionElement::new_with_text_and_value(name, name) {
                Ok(opt) => {
                    _ = select.append_child(&opt);
                }
                Err(e) => log::error!("[dom] option error: {:?}", e),
            }
        }
        if names.iter().any(|n| *n == previous) {
            select.set_value(&previous);
        }
    }

    fn notify(&mut self, notice: Notice) {
        if notice.is_error() {
            dom::alert(&notice.to_string());
        } else {
            log::info!("[ui] {}", notice);
        }
    }
}
