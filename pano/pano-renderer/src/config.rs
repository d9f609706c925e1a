//! Pano renderer configuration: tessellation, camera optics, swapchain.

/// Renderer configuration. `lat_segments`/`lon_segments` are the caller-facing
/// counts; tessellation doubles them internally for smoothness.
#[derive(Clone, Debug)]
pub struct PanoConfig {
    /// Latitude segment count, >= 1.
    pub lat_segments: u32,
    /// Longitude segment count, >= 1.
    pub lon_segments: u32,
    /// Sphere radius. The camera sits at the center, so this only affects
    /// numerical conditioning, not the rendered direction.
    pub radius: f32,
    /// Vertical field of view in degrees. Kept well under 90 to avoid the
    /// fish-eye look a wide FOV produces on a sphere-projected panorama.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Swapchain texture format for the sphere pass output.
    pub swapchain_format: wgpu::TextureFormat,
    /// Background behind the sphere (visible only at the clipped poles).
    pub clear_color: wgpu::Color,
}

impl Default for PanoConfig {
    fn default() -> Self {
        Self {
            lat_segments: 100,
            lon_segments: 100,
            radius: 1.0,
            fov_y_deg: 40.0,
            near: 0.1,
            far: 100.0,
            swapchain_format: wgpu::TextureFormat::Rgba8Unorm,
            clear_color: wgpu::Color::WHITE,
        }
    }
}

impl PanoConfig {
    /// Reject values the mesh builder and view math assume are sane.
    pub fn validate(&self) -> Result<(), String> {
        if self.lat_segments == 0 || self.lon_segments == 0 {
            return Err("PanoConfig: segment counts must be >= 1".to_string());
        }
        if !(self.radius > 0.0) {
            return Err("PanoConfig: radius must be > 0".to_string());
        }
        if !(self.fov_y_deg > 0.0 && self.fov_y_deg < 180.0) {
            return Err("PanoConfig: fov_y_deg must be in (0, 180)".to_string());
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err("PanoConfig: need 0 < near < far".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(PanoConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_segments_rejected() {
        let cfg = PanoConfig {
            lat_segments: 0,
            ..PanoConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
