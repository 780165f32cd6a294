//! The UI seam: numeric controls, the status line, the preset list and
//! user-facing notices.

use crate::session::PlaybackStatus;
use crate::settings::{Param, Settings};
use std::fmt;

/// Something the user must be told about, shown as a blocking alert in the
/// browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Save was attempted without a preset name.
    EmptyName,
    /// Load or delete named a preset that is not stored.
    NotFound(String),
    Saved(String),
    Deleted(String),
    /// Preset storage could not be read or written.
    StorageFailed(String),
    /// The audio device could not be driven.
    AudioFailed(String),
}

impl Notice {
    /// Errors interrupt the user; confirmations only reach the log.
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Saved(_) | Notice::Deleted(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EmptyName => f.write_str("Please enter a preset name."),
            Notice::NotFound(name) => write!(f, "Preset \"{}\" not found.", name),
            Notice::Saved(name) => write!(f, "Saved preset \"{}\".", name),
            Notice::Deleted(name) => write!(f, "Deleted preset \"{}\".", name),
            Notice::StorageFailed(reason) => write!(f, "Preset storage error: {}", reason),
            Notice::AudioFailed(reason) => write!(f, "Audio error: {}", reason),
        }
    }
}

/// UI controls collaborator.
pub trait ControlSurface {
    fn value(&self, param: Param) -> f32;
    fn set_value(&mut self, param: Param, value: f32);
    fn show_status(&mut self, status: PlaybackStatus);
    fn show_presets(&mut self, names: &[String]);
    fn notify(&mut self, notice: Notice);
}

/// Snapshot the current control values.
pub fn read_settings<U: ControlSurface + ?Sized>(surface: &U) -> Settings {
    let mut s = Settings::default();
    for param in Param::ALL {
        s.set(param, surface.value(param));
    }
    s
}

/// Move every control to the value in `settings`.
pub fn apply_settings<U: ControlSurface + ?Sized>(surface: &mut U, settings: &Settings) {
    for param in Param::ALL {
        surface.set_value(param, settings.get(param));
    }
}
