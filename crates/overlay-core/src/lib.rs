pub mod config;
pub mod constants;
pub mod content;
pub mod controller;
pub mod error;
pub mod presets;
pub mod renderer;
pub mod session;
pub mod surface;
pub mod timer;

pub use config::*;
pub use content::*;
pub use controller::*;
pub use error::OverlayError;
pub use renderer::*;
pub use session::*;
pub use surface::*;
pub use timer::*;
