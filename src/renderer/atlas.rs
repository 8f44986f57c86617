use wgpu::util::DeviceExt;

use crate::surface::{AtlasTexture, ImageAtlas};

/// Atlas image uploaded to the GPU, sampled with nearest filtering.
pub struct Atlas {
    pub texture_view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    width: u32,
    height: u32,
}

impl Atlas {
    pub fn from_image(device: &wgpu::Device, queue: &wgpu::Queue, atlas: &ImageAtlas) -> Self {
        let img = atlas.image();
        let (width, height) = img.dimensions();

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("atlas"),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            img.as_raw(),
        );

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self { texture_view, sampler, width, height }
    }
}

impl AtlasTexture for Atlas {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
