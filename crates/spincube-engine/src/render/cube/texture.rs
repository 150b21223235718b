//! Texture decode (CPU) and upload (GPU).

use std::path::Path;

use image::RgbaImage;

use crate::error::StartupError;

use super::mipmap::MipmapGenerator;

/// Format of the cube texture. Linear, to match the linear surface format.
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Reads and decodes an image file into tightly packed RGBA8.
pub fn decode_rgba(path: impl AsRef<Path>) -> Result<RgbaImage, StartupError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| StartupError::AssetDecode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let rgba = img.into_rgba8();
    log::info!("decoded {} ({}x{})", path.display(), rgba.width(), rgba.height());
    Ok(rgba)
}

/// Rejects empty images and images past the device's 2D limit.
pub(crate) fn check_dimensions(
    width: u32,
    height: u32,
    max_dimension: u32,
    origin: &Path,
) -> Result<(), StartupError> {
    if width == 0 || height == 0 || width > max_dimension || height > max_dimension {
        return Err(StartupError::AssetDecode {
            path: origin.to_path_buf(),
            reason: format!("{width}x{height} is outside the supported range 1..={max_dimension}"),
        });
    }
    Ok(())
}

/// Number of levels in a full mip chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// A sampled 2D texture with its view and sampler.
pub struct CubeTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl CubeTexture {
    /// Uploads `image` as mip level 0 and fills the rest of the chain on the GPU.
    ///
    /// Wrap is repeat on both axes; filtering is linear for min, mag and mip.
    /// `origin` is the file the image came from, named in errors.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        origin: &Path,
        max_dimension: u32,
    ) -> Result<Self, StartupError> {
        let (width, height) = image.dimensions();
        check_dimensions(width, height, max_dimension, origin)?;

        let mip_count = mip_level_count(width, height);
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("spincube texture"),
            size,
            mip_level_count: mip_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("spincube mipmap encoder"),
        });
        MipmapGenerator::new(device, TEXTURE_FORMAT).generate(
            device,
            &mut encoder,
            &texture,
            mip_count,
        );
        queue.submit(std::iter::once(encoder.finish()));

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("spincube sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        log::debug!("uploaded texture {width}x{height} with {mip_count} mip levels");

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }
}
