//! Window-capable backend: drives the plugin's surface lifecycle from a
//! window's raw handles.
//!
//! The wgpu surface is recreated each frame (its lifetime is tied to the
//! window; recreating avoids transmute and platform-specific staleness when
//! the window is dragged or resized), while device/queue/pipeline live in
//! the plugin for the whole session.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use wgpu::SurfaceTargetUnsafe;

use crate::plugin::PanoPlugin;
use pano_renderer::PanoConfig;

pub struct PanoWindowBackend {
    instance: wgpu::Instance,
    plugin: PanoPlugin,
}

impl PanoWindowBackend {
    /// Create a window-capable backend from a window (e.g. winit). The window
    /// is only used to get raw handles and an initial surface for adapter
    /// selection; the host keeps the window alive and passes its raw handles
    /// to `render_frame_to_window` each frame.
    pub fn from_window(
        window: &(impl HasWindowHandle + HasDisplayHandle),
        config: PanoConfig,
    ) -> Result<Self, String> {
        let (raw_window, raw_display) = {
            let wh = window.window_handle().map_err(|e| e.to_string())?;
            let dh = window.display_handle().map_err(|e| e.to_string())?;
            (wh.as_raw(), dh.as_raw())
        };
        pollster::block_on(Self::from_raw_handles_async(raw_window, raw_display, config))
    }

    async fn from_raw_handles_async(
        raw_window_handle: raw_window_handle::RawWindowHandle,
        raw_display_handle: raw_window_handle::RawDisplayHandle,
        config: PanoConfig,
    ) -> Result<Self, String> {
        let instance = wgpu::Instance::default();
        let target = SurfaceTargetUnsafe::RawHandle {
            raw_window_handle,
            raw_display_handle,
        };
        let surface = unsafe { instance.create_surface_unsafe(target).map_err(|e| e.to_string())? };
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or("No adapter")?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default(), None)
            .await
            .map_err(|e| e.to_string())?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .first()
            .copied()
            .unwrap_or(wgpu::TextureFormat::Rgba8Unorm);
        let config = PanoConfig {
            swapchain_format: format,
            ..config
        };
        let mut plugin = PanoPlugin::new(config);
        plugin.on_surface_created(device, queue)?;
        drop(surface);
        Ok(Self { instance, plugin })
    }

    pub fn plugin(&self) -> &PanoPlugin {
        &self.plugin
    }

    pub fn plugin_mut(&mut self) -> &mut PanoPlugin {
        &mut self.plugin
    }

    fn surface_config(
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Opaque,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    /// Render one frame and present to the window identified by the raw
    /// handles. `size` is the current inner size of the window.
    pub fn render_frame_to_window(
        &mut self,
        size: (u32, u32),
        raw_window_handle: raw_window_handle::RawWindowHandle,
        raw_display_handle: raw_window_handle::RawDisplayHandle,
    ) -> Result<(), String> {
        let target = SurfaceTargetUnsafe::RawHandle {
            raw_window_handle,
            raw_display_handle,
        };
        let surface = unsafe {
            self.instance
                .create_surface_unsafe(target)
                .map_err(|e| e.to_string())?
        };
        let renderer = self.plugin.renderer().ok_or("surface not created")?;
        let format = renderer.config().swapchain_format;
        let device = renderer.device().clone();
        let (width, height) = size;
        let config = Self::surface_config(format, width.max(1), height.max(1));
        surface.configure(&device, &config);

        let frame = match surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Outdated) | Err(wgpu::SurfaceError::Lost) => {
                surface.configure(&device, &config);
                surface.get_current_texture().map_err(|e| e.to_string())?
            }
            Err(wgpu::SurfaceError::Timeout) => {
                return Err("Surface get_current_texture timeout".to_string())
            }
            Err(e) => return Err(e.to_string()),
        };
        let output_view = frame.texture.create_view(&Default::default());
        self.plugin.on_surface_changed(config.width, config.height);
        self.plugin.on_frame(&output_view)?;
        frame.present();
        Ok(())
    }
}
