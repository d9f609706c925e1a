//! Equirectangular sphere tessellation: positions, texture coordinates and
//! u32 triangle indices, plus the interleaved byte layout the sphere pass
//! consumes (stride 20: float3 position + float2 uv).

use std::f32::consts::{FRAC_PI_2, PI};

/// CPU-side sphere mesh. Immutable once built; uploaded once at surface
/// creation and owned by the renderer afterward.
#[derive(Clone, Debug)]
pub struct SphereMesh {
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl SphereMesh {
    /// Tessellate a sphere for an equirectangular texture. Segment counts are
    /// doubled internally; callers keep the coarse quality knob. Callers must
    /// pass segments >= 1 and radius > 0 (see `PanoConfig::validate`).
    ///
    /// The `-pi/2` azimuth offset puts the texture seam directly behind the
    /// initial camera heading. The v coordinate uses an arcsine remap instead
    /// of linear latitude: linear spacing over-samples equirectangular rows
    /// near the poles.
    pub fn build(lat_segments: u32, lon_segments: u32, radius: f32) -> Self {
        let lat_rings = lat_segments * 2;
        let lon_bands = lon_segments * 2;

        let vertex_count = ((lat_rings + 1) * (lon_bands + 1)) as usize;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for lat in 0..=lat_rings {
            let theta = lat as f32 * PI / lat_rings as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            for lon in 0..=lon_bands {
                let phi = lon as f32 * 2.0 * PI / lon_bands as f32 - FRAC_PI_2;
                let (sin_phi, cos_phi) = phi.sin_cos();

                let x = radius * cos_phi * sin_theta;
                let y = radius * cos_theta;
                let z = radius * sin_phi * sin_theta;
                positions.push([x, y, z]);

                let u = lon as f32 / lon_bands as f32;
                let v = 0.5 - (y / radius).asin() / PI;
                uvs.push([u, v]);
            }
        }

        // Two triangles per quad between adjacent rings. The quads touching
        // the poles degenerate to zero area; the rasterizer discards them.
        let mut indices = Vec::with_capacity((lat_rings * lon_bands * 6) as usize);
        for lat in 0..lat_rings {
            for lon in 0..lon_bands {
                let first = lat * (lon_bands + 1) + lon;
                let second = first + lon_bands + 1;
                indices.extend_from_slice(&[first, second, first + 1]);
                indices.extend_from_slice(&[second, second + 1, first + 1]);
            }
        }

        Self {
            positions,
            uvs,
            indices,
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Interleaved vertex bytes, stride 20: position float3 + uv float2.
    pub fn interleaved(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.positions.len() * 5);
        for (pos, uv) in self.positions.iter().zip(&self.uvs) {
            data.extend_from_slice(pos);
            data.extend_from_slice(uv);
        }
        bytemuck::cast_slice(&data).to_vec()
    }

    /// Index bytes for a u32 index buffer.
    pub fn index_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.indices).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts() {
        for &(lat, lon) in &[(1u32, 1u32), (3, 5), (100, 100)] {
            let mesh = SphereMesh::build(lat, lon, 1.0);
            let expected_vertices = ((2 * lat + 1) * (2 * lon + 1)) as usize;
            assert_eq!(mesh.vertex_count(), expected_vertices);
            assert_eq!(mesh.index_count(), 2 * lat * lon * 4 * 3);
        }
    }

    #[test]
    fn indices_in_range() {
        let mesh = SphereMesh::build(4, 7, 2.0);
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices().iter().all(|&i| i < count));
        assert_eq!(mesh.index_count() % 3, 0);
    }

    #[test]
    fn vertices_lie_on_sphere() {
        let radius = 2.5;
        let mesh = SphereMesh::build(8, 8, radius);
        for p in mesh.positions() {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - radius).abs() < 1e-4, "|{p:?}| = {len}");
        }
    }

    #[test]
    fn uv_covers_poles_and_seam() {
        let mesh = SphereMesh::build(10, 10, 1.0);
        // North pole row: y = radius, arcsine remap gives v = 0.
        assert!((mesh.uvs()[0][1] - 0.0).abs() < 1e-6);
        // South pole row: v = 1.
        assert!((mesh.uvs().last().unwrap()[1] - 1.0).abs() < 1e-6);
        // First and last column share u = 0 / u = 1 on each ring.
        let cols = 2 * 10 + 1;
        assert_eq!(mesh.uvs()[0][0], 0.0);
        assert_eq!(mesh.uvs()[cols - 1][0], 1.0);
    }

    #[test]
    fn seam_sits_behind_initial_heading() {
        // lon = 0 has phi = -pi/2: x = 0, z = -r at the equator, which is
        // behind the initial (0, 0, 1) eye direction.
        let mesh = SphereMesh::build(2, 2, 1.0);
        let cols = 2 * 2 + 1;
        let equator_first = mesh.positions()[2 * cols];
        assert!(equator_first[0].abs() < 1e-6);
        assert!((equator_first[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn interleaved_stride_is_20() {
        let mesh = SphereMesh::build(2, 3, 1.0);
        assert_eq!(mesh.interleaved().len(), mesh.vertex_count() * 20);
        assert_eq!(mesh.index_bytes().len(), mesh.index_count() as usize * 4);
    }
}
