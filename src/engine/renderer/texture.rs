// Logo texture loading

use anyhow::{Context, Result};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use log::{info, warn};
use std::path::Path;

/// Size of the generated placeholder logo
const PLACEHOLDER_SIZE: (u32, u32) = (150, 75);

/// A loaded texture with GPU resources
pub struct Texture {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from image bytes
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        Self::from_image(device, queue, &img, Some(label))
    }

    /// Create a texture from an image
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &DynamicImage,
        label: Option<&str>,
    ) -> Result<Self> {
        let rgba = img.to_rgba8();
        let dimensions = img.dimensions();

        let size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            _texture: texture,
            view,
            sampler,
            width: dimensions.0,
            height: dimensions.1,
        })
    }

    /// Load the logo image, falling back to a generated one
    ///
    /// A missing path or an unreadable file is not fatal: the animation
    /// still runs with the placeholder.
    pub fn load_logo(device: &wgpu::Device, queue: &wgpu::Queue, path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            match read_logo(device, queue, path) {
                Ok(texture) => {
                    info!(
                        "Loaded logo {} ({}x{})",
                        path.display(),
                        texture.width,
                        texture.height
                    );
                    return Ok(texture);
                }
                Err(e) => warn!("Could not load logo {}: {:#}", path.display(), e),
            }
        }

        let img = DynamicImage::ImageRgba8(placeholder_logo(PLACEHOLDER_SIZE.0, PLACEHOLDER_SIZE.1));
        Self::from_image(device, queue, &img, Some("Placeholder Logo"))
    }
}

fn read_logo(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Result<Texture> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Texture::from_bytes(device, queue, &bytes, &path.to_string_lossy())
}

/// A filled ellipse with a thin ring cut out, on a transparent background
pub fn placeholder_logo(width: u32, height: u32) -> RgbaImage {
    let fill = Rgba([235, 235, 245, 255]);
    let clear = Rgba([0, 0, 0, 0]);
    let (rx, ry) = (width as f32 / 2.0, height as f32 / 2.0);

    RgbaImage::from_fn(width, height, |x, y| {
        let dx = (x as f32 + 0.5 - rx) / rx;
        let dy = (y as f32 + 0.5 - ry) / ry;
        let d = dx * dx + dy * dy;

        if d > 1.0 || (0.55..0.65).contains(&d) {
            clear
        } else {
            fill
        }
    })
}
