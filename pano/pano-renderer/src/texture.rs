//! Video texture: the GPU destination the decoder's frames are uploaded into.
//! Recreated when the decoded frame size changes, reused otherwise.

use media_api::VideoFrame;

pub struct VideoTexture {
    texture: wgpu::Texture,
    width: u32,
    height: u32,
}

impl VideoTexture {
    /// Reuse `existing` when it already matches `width x height`, otherwise
    /// allocate a fresh texture of that size.
    pub fn ensure_size(
        device: &wgpu::Device,
        existing: Option<Self>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        if width == 0 || height == 0 {
            return Err("VideoTexture: width and height must be > 0".to_string());
        }
        if let Some(t) = existing {
            if t.width == width && t.height == height {
                return Ok(t);
            }
        }
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("pano_video_texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        Ok(Self {
            texture,
            width,
            height,
        })
    }

    /// Upload one decoded frame. The frame must match this texture's size.
    pub fn upload(&self, queue: &wgpu::Queue, frame: &VideoFrame<'_>) -> Result<(), String> {
        if frame.width != self.width || frame.height != self.height {
            return Err(format!(
                "VideoTexture: frame {}x{} does not match texture {}x{}",
                frame.width, frame.height, self.width, self.height
            ));
        }
        if !frame.is_well_formed() {
            return Err(format!(
                "VideoTexture: frame payload {} bytes, expected {}",
                frame.data.len(),
                VideoFrame::expected_len(frame.width, frame.height)
            ));
        }
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            frame.data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn view(&self) -> wgpu::TextureView {
        self.texture.create_view(&Default::default())
    }
}
