// DOM element ids the page must provide.
//
// Parameter sliders use the parameter's storage key as their id
// (`rainVol`, `rainDamp`, ...) and may have a sibling readout element whose
// id is the key plus `READOUT_SUFFIX`.

// Transport
pub const PLAY_BUTTON_ID: &str = "play";
pub const STOP_BUTTON_ID: &str = "stop";
pub const RANDOMIZE_BUTTON_ID: &str = "randomize";
pub const STATUS_ID: &str = "status";

// Presets
pub const PRESET_NAME_ID: &str = "preset-name";
pub const PRESET_SELECT_ID: &str = "preset-list";
pub const SAVE_BUTTON_ID: &str = "save-preset";
pub const LOAD_BUTTON_ID: &str = "load-preset";
pub const DELETE_BUTTON_ID: &str = "delete-preset";

pub const READOUT_SUFFIX: &str = "-value";

#[inline]
pub fn readout_id(control_id: &str) -> String {
    format!("{}{}", control_id, READOUT_SUFFIX)
}

/// Decimal places shown in a readout: frequencies as whole Hz, levels and
/// rates with two decimals.
#[inline]
pub fn readout_precision(control_id: &str) -> usize {
    match control_id {
        "rainDamp" | "padFreq" => 0,
        _ => 2,
    }
}
