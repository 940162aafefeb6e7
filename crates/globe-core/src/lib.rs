pub mod camera;
pub mod config;
pub mod constants;
pub mod distribution;
pub mod picking;
pub mod presenter;
pub mod registry;
pub mod rotation;
pub mod session;

pub use camera::*;
pub use config::*;
pub use constants::*;
pub use distribution::*;
pub use picking::*;
pub use presenter::*;
pub use registry::*;
pub use rotation::*;
pub use session::*;
