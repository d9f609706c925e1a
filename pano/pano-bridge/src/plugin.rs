//! Pano plugin: the host-facing surface lifecycle. Owns the renderer and the
//! decoder; hands out `Controls` for everything other threads may touch.

use std::sync::Arc;

use media_api::{MediaDecoder, MediaSource};
use pano_renderer::{CameraOrientation, PanoConfig, Renderer};

use crate::controls::{Controls, SharedPlayback};

/// Surface lifecycle. Created surfaces render; a lost surface must be
/// recreated before rendering again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfacePhase {
    Uninitialized,
    Ready,
    Lost,
}

/// Owns renderer + decoder on the rendering thread. `Controls` (camera and
/// playback atomics) may be cloned out before the surface exists and stay
/// valid across surface loss.
pub struct PanoPlugin {
    config: PanoConfig,
    camera: Arc<CameraOrientation>,
    playback: Arc<SharedPlayback>,
    renderer: Option<Renderer>,
    decoder: Option<Box<dyn MediaDecoder>>,
    phase: SurfacePhase,
    viewport: (u32, u32),
}

impl PanoPlugin {
    pub fn new(config: PanoConfig) -> Self {
        Self {
            config,
            camera: Arc::new(CameraOrientation::new()),
            playback: Arc::new(SharedPlayback::default()),
            renderer: None,
            decoder: None,
            phase: SurfacePhase::Uninitialized,
            viewport: (0, 0),
        }
    }

    /// Control surface for the UI collaborator. Any thread, never blocks.
    pub fn controls(&self) -> Controls {
        Controls::new(Arc::clone(&self.playback), Arc::clone(&self.camera))
    }

    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    /// Open the media source this plugin will render. May be called before
    /// or after surface creation; playback starts on the next tick.
    pub fn open_media(&mut self, source: &dyn MediaSource, uri: &str) -> Result<(), String> {
        let mut decoder = source.open(uri)?;
        decoder.set_looping(true);
        log::info!(
            "media opened: {uri} ({} ms, {:?} px)",
            decoder.duration_ms(),
            decoder.frame_size()
        );
        self.decoder = Some(decoder);
        Ok(())
    }

    pub fn attach_decoder(&mut self, decoder: Box<dyn MediaDecoder>) {
        self.decoder = Some(decoder);
    }

    /// Surface creation: build the sphere mesh and compile the pipeline.
    /// A shader compile failure is fatal to this surface and is reported
    /// with the backend diagnostic.
    pub fn on_surface_created(
        &mut self,
        device: wgpu::Device,
        queue: wgpu::Queue,
    ) -> Result<(), String> {
        let renderer = Renderer::new(
            device,
            queue,
            self.config.clone(),
            Arc::clone(&self.camera),
        )?;
        self.renderer = Some(renderer);
        self.phase = SurfacePhase::Ready;
        log::debug!("surface created");
        Ok(())
    }

    /// Viewport resize: cache the new aspect ratio source. No mesh rebuild.
    pub fn on_surface_changed(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// One vertical-sync tick: apply queued transport commands, refresh the
    /// video texture, draw, publish progress.
    pub fn on_frame(&mut self, output_view: &wgpu::TextureView) -> Result<(), String> {
        if self.phase != SurfacePhase::Ready {
            return Err(format!("on_frame in phase {:?}", self.phase));
        }
        let renderer = self
            .renderer
            .as_mut()
            .ok_or("on_frame: renderer missing")?;
        if let Some(dec) = self.decoder.as_deref_mut() {
            self.playback.sync_decoder(dec);
        }
        let (width, height) = self.viewport;
        let cmd = renderer.render_frame(
            self.decoder.as_deref_mut(),
            width,
            height,
            output_view,
        )?;
        renderer.submit([cmd]);
        Ok(())
    }

    /// Surface teardown. Waits for in-flight GPU work to drain, then drops
    /// the decoder and all GPU resources so no draw can touch a dangling
    /// handle. The mesh is cheap to rebuild on the next `on_surface_created`.
    pub fn on_surface_lost(&mut self) {
        self.playback.set_unavailable();
        if let Some(renderer) = &self.renderer {
            let _ = renderer.device().poll(wgpu::Maintain::Wait);
        }
        self.decoder = None;
        self.renderer = None;
        self.phase = SurfacePhase::Lost;
        log::debug!("surface lost");
    }

    pub fn renderer(&self) -> Option<&Renderer> {
        self.renderer.as_ref()
    }

    pub fn config(&self) -> &PanoConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_gates_rendering() {
        let plugin = PanoPlugin::new(PanoConfig::default());
        assert_eq!(plugin.phase(), SurfacePhase::Uninitialized);
        // Controls are live before any surface exists.
        assert_eq!(plugin.controls().progress(), (0, 1));
    }

    #[test]
    fn controls_share_camera_with_plugin() {
        let plugin = PanoPlugin::new(PanoConfig::default());
        let controls = plugin.controls();
        controls.pointer_delta(50.0, 0.0);
        assert_eq!(plugin.controls().orientation(), (5.0, 0.0));
    }
}
