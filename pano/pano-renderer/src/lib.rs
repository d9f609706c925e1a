//! Pano renderer: 360° equirectangular video on the inside of a sphere.
//! Sphere tessellation + drag-look camera + per-frame view-projection
//! synthesis feeding one textured indexed draw, with the texture refreshed
//! from an external decoder.

pub mod camera;
pub mod config;
pub mod error;
pub mod mesh;
pub mod sphere_pass;
pub mod texture;
pub mod view;

pub use camera::{CameraOrientation, PITCH_LIMIT_DEG, SENSITIVITY};
pub use config::PanoConfig;
pub use error::CompileError;
pub use mesh::SphereMesh;
pub use sphere_pass::{SphereBuffers, SpherePass};
pub use texture::VideoTexture;

use std::sync::Arc;

use media_api::MediaDecoder;

pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: PanoConfig,
    camera: Arc<CameraOrientation>,
    sphere_pass: SpherePass,
    sphere: SphereBuffers,
    video: Option<VideoTexture>,
}

impl Renderer {
    /// Build the sphere mesh, upload it, and compile the sphere pipeline.
    /// This is the surface-creation step; a shader build failure is fatal
    /// here rather than at draw time. The orientation state is supplied by
    /// the caller so pointer input can be wired up before the surface exists.
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        config: PanoConfig,
        camera: Arc<CameraOrientation>,
    ) -> Result<Self, String> {
        config.validate()?;
        let mesh = SphereMesh::build(config.lat_segments, config.lon_segments, config.radius);
        log::debug!(
            "sphere mesh: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        let sphere = SphereBuffers::upload(&device, &queue, &mesh);
        let sphere_pass = SpherePass::new(&device, config.swapchain_format)?;
        Ok(Self {
            device,
            queue,
            config,
            camera,
            sphere_pass,
            sphere,
            video: None,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
    pub fn config(&self) -> &PanoConfig {
        &self.config
    }

    /// Shared orientation state. Hand this to the pointer-input side; the
    /// render tick reads it once per frame.
    pub fn camera(&self) -> Arc<CameraOrientation> {
        Arc::clone(&self.camera)
    }

    pub fn orientation(&self) -> (f32, f32) {
        self.camera.yaw_pitch()
    }

    /// Encode one frame into the given encoder: pull the newest decoded
    /// frame into the video texture, synthesize the view-projection from the
    /// live orientation and viewport, draw the sphere.
    pub fn encode_frame(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        decoder: Option<&mut (dyn MediaDecoder + 'static)>,
        width: u32,
        height: u32,
        output_view: &wgpu::TextureView,
    ) -> Result<(), String> {
        if let Some(dec) = decoder {
            if let Some(frame) = dec.next_frame() {
                let existing = self.video.take();
                let video =
                    VideoTexture::ensure_size(&self.device, existing, frame.width, frame.height)?;
                video.upload(&self.queue, &frame)?;
                self.video = Some(video);
            }
        }
        // Until the first frame arrives there is nothing to texture with;
        // bind a zeroed 1x1 stand-in so the pass stays uniform.
        if self.video.is_none() {
            self.video = Some(VideoTexture::ensure_size(&self.device, None, 1, 1)?);
        }
        let video = self.video.as_ref().unwrap();

        let aspect = if height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
        let (yaw, pitch) = self.camera.yaw_pitch();
        let view_proj = view::view_projection(
            yaw,
            pitch,
            aspect,
            self.config.fov_y_deg,
            self.config.near,
            self.config.far,
        );

        self.sphere_pass.encode(
            encoder,
            &self.device,
            &self.queue,
            output_view,
            &self.sphere,
            &video.view(),
            &view_proj,
            self.config.clear_color,
        )
    }

    /// Encode one frame into a fresh command buffer. Caller submits.
    pub fn render_frame(
        &mut self,
        decoder: Option<&mut (dyn MediaDecoder + 'static)>,
        width: u32,
        height: u32,
        output_view: &wgpu::TextureView,
    ) -> Result<wgpu::CommandBuffer, String> {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("pano_frame"),
            });
        self.encode_frame(&mut encoder, decoder, width, height, output_view)?;
        Ok(encoder.finish())
    }

    pub fn submit(&self, command_buffers: impl IntoIterator<Item = wgpu::CommandBuffer>) {
        self.queue.submit(command_buffers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Callers own `Option<Box<dyn MediaDecoder>>` and pass `as_deref_mut()`;
    // the decoder parameter must accept the boxed object's full lifetime, not
    // one tied to the borrow. Compile-time check, never invoked.
    fn _render_from_owned_decoder(
        renderer: &mut Renderer,
        decoder: &mut Option<Box<dyn MediaDecoder>>,
        output_view: &wgpu::TextureView,
    ) -> Result<wgpu::CommandBuffer, String> {
        renderer.render_frame(decoder.as_deref_mut(), 16, 16, output_view)
    }
}
