use image::imageops::FilterType;
use image::RgbaImage;

pub const CHECKER_SIZE: u32 = 64;
pub const CHECKER_BLOCKS: u32 = 4;

#[derive(Debug)]
pub struct TextureBundle {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

/// The default 64×64 black/white checkerboard, 4 blocks per axis, RGBA8.
pub fn checkerboard_pixels() -> Vec<u8> {
    let mut pixels = vec![0u8; (4 * CHECKER_SIZE * CHECKER_SIZE) as usize];
    let patch = CHECKER_SIZE / CHECKER_BLOCKS;

    for i in 0..CHECKER_SIZE {
        for j in 0..CHECKER_SIZE {
            let c = if ((i / patch) % 2) ^ ((j / patch) % 2) == 1 {
                255
            } else {
                0
            };
            let idx = (4 * (i * CHECKER_SIZE + j)) as usize;
            pixels[idx] = c;
            pixels[idx + 1] = c;
            pixels[idx + 2] = c;
            pixels[idx + 3] = 255;
        }
    }
    pixels
}

fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).leading_zeros()
}

/// Uploads RGBA pixels as a mip-mapped 2D texture. Rows are flipped
/// vertically before upload, the mip chain is generated on the CPU, and the
/// sampler uses nearest magnification with nearest-mipmap-linear
/// minification, matching the booth's blocky look.
pub struct MipmappedTextureFactory;

impl MipmappedTextureFactory {
    pub fn build(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        rgba: &[u8],
        label: &str,
    ) -> TextureBundle {
        let base = RgbaImage::from_raw(width, height, rgba.to_vec())
            .expect("pixel slice does not match dimensions");
        let base = image::imageops::flip_vertical(&base);

        let mip_count = mip_level_count(width, height);
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: mip_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let mut level_image = base;
        for level in 0..mip_count {
            if level > 0 {
                let w = (width >> level).max(1);
                let h = (height >> level).max(1);
                level_image = image::imageops::resize(&level_image, w, h, FilterType::Triangle);
            }

            queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &texture,
                    mip_level: level,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                level_image.as_raw(),
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * level_image.width()),
                    rows_per_image: Some(level_image.height()),
                },
                wgpu::Extent3d {
                    width: level_image.width(),
                    height: level_image.height(),
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        TextureBundle {
            texture,
            view,
            sampler,
        }
    }
}

pub struct DepthTextureFactory;

impl DepthTextureFactory {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
        label: &str,
    ) -> TextureBundle {
        let size = wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        TextureBundle {
            texture,
            view,
            sampler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_is_opaque_and_sized() {
        let pixels = checkerboard_pixels();
        assert_eq!(pixels.len(), (4 * CHECKER_SIZE * CHECKER_SIZE) as usize);
        for px in pixels.chunks(4) {
            assert_eq!(px[3], 255);
            assert!(px[0] == 0 || px[0] == 255);
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn checkerboard_alternates_per_block() {
        let pixels = checkerboard_pixels();
        let patch = (CHECKER_SIZE / CHECKER_BLOCKS) as usize;
        let at = |i: usize, j: usize| pixels[4 * (i * CHECKER_SIZE as usize + j)];

        assert_eq!(at(0, 0), 0);
        assert_eq!(at(0, patch), 255);
        assert_eq!(at(patch, 0), 255);
        assert_eq!(at(patch, patch), 0);
    }

    #[test]
    fn mip_chain_covers_down_to_one_pixel() {
        assert_eq!(mip_level_count(64, 64), 7);
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(320, 240), 9);
    }
}
