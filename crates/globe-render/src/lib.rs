//! wgpu renderer for the marker globe, shared by the web and native frontends.

pub mod gpu;
pub mod helpers;
pub mod mesh;
pub mod texture;

pub use gpu::GpuState;
pub use texture::{decode_marker_image, MarkerImage, MAX_MARKER_TEXTURE_SIZE};

pub static GLOBE_WGSL: &str = include_str!("../shaders/globe.wgsl");
