pub mod app;
pub mod bridge;
pub mod config;
pub mod constants;
pub mod error;
pub mod graph;
pub mod layers;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod noise;
pub mod presets;
pub mod session;
pub mod settings;
pub mod surface;

pub use app::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use graph::*;
pub use layers::LayerKind;
pub use presets::*;
pub use session::*;
pub use settings::*;
pub use surface::*;
