//! Marker image decoding and GPU upload.

use globe_core::LoadError;

/// Longest side kept for a marker texture; larger images are downscaled.
pub const MAX_MARKER_TEXTURE_SIZE: u32 = 1024;

/// Decoded RGBA8 marker image, the loaded asset type of the frontends.
#[derive(Clone)]
pub struct MarkerImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for MarkerImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Decode PNG/JPEG bytes into an RGBA marker image.
pub fn decode_marker_image(bytes: &[u8]) -> Result<MarkerImage, LoadError> {
    let img = image::load_from_memory(bytes).map_err(|e| LoadError::Decode(e.to_string()))?;
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return Err(LoadError::Decode(format!("empty image {w}x{h}")));
    }
    let img = if w.max(h) > MAX_MARKER_TEXTURE_SIZE {
        log::debug!("[load] downscaling {w}x{h} marker image");
        img.thumbnail(MAX_MARKER_TEXTURE_SIZE, MAX_MARKER_TEXTURE_SIZE)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    Ok(MarkerImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

pub fn upload_marker_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    image: &MarkerImage,
) -> (wgpu::Texture, wgpu::TextureView) {
    let size = wgpu::Extent3d {
        width: image.width,
        height: image.height,
        depth_or_array_layers: 1,
    };
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &image.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width),
            rows_per_image: Some(image.height),
        },
        size,
    );
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    (tex, view)
}
