use super::MeshData;

pub const LATITUDE_BANDS: usize = 30;
pub const LONGITUDE_BANDS: usize = 30;
pub const RADIUS: f32 = 2.0;

use std::f32::consts::PI;

fn point(azimuth: f32, polar: f32) -> [f32; 4] {
    [
        azimuth.cos() * polar.sin() * RADIUS,
        polar.cos() * RADIUS,
        azimuth.sin() * polar.sin() * RADIUS,
        1.0,
    ]
}

/// Latitude/longitude sampling, two triangles per cell, no vertex sharing.
/// Texture coordinates are mirrored in both axes (`u = 1 - long/bands`,
/// `v = 1 - lat/bands`); the photo reads the right way around only with this
/// exact flip. The sphere carries no vertex colors.
pub fn build() -> MeshData {
    let mut mesh = MeshData::new();

    for lat in 1..=LATITUDE_BANDS {
        let polar0 = PI * (lat - 1) as f32 / LATITUDE_BANDS as f32;
        let polar1 = PI * lat as f32 / LATITUDE_BANDS as f32;

        for long in 1..=LONGITUDE_BANDS {
            let azimuth0 = 2.0 * PI * (long - 1) as f32 / LONGITUDE_BANDS as f32;
            let azimuth1 = 2.0 * PI * long as f32 / LONGITUDE_BANDS as f32;

            let p1 = point(azimuth0, polar0);
            let p2 = point(azimuth1, polar0);
            let p3 = point(azimuth0, polar1);
            let p4 = point(azimuth1, polar1);

            mesh.positions.extend([p1, p2, p3, p2, p4, p3]);
            mesh.vertex_count += 6;

            let u1 = 1.0 - (long - 1) as f32 / LONGITUDE_BANDS as f32;
            let u2 = 1.0 - long as f32 / LONGITUDE_BANDS as f32;
            let v1 = 1.0 - (lat - 1) as f32 / LATITUDE_BANDS as f32;
            let v2 = 1.0 - lat as f32 / LATITUDE_BANDS as f32;

            let uv1 = [u1, v1];
            let uv2 = [u2, v1];
            let uv3 = [u1, v2];
            let uv4 = [u2, v2];

            mesh.tex_coords.extend([uv1, uv2, uv3, uv2, uv4, uv3]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_matches_band_grid() {
        let mesh = build();
        assert_eq!(mesh.vertex_count, LATITUDE_BANDS * LONGITUDE_BANDS * 6);
        assert_eq!(mesh.positions.len(), mesh.vertex_count);
        assert_eq!(mesh.tex_coords.len(), mesh.vertex_count);
        assert!(mesh.colors.is_empty());
    }

    #[test]
    fn tex_coords_stay_in_unit_square() {
        let mesh = build();
        for uv in &mesh.tex_coords {
            assert!((0.0..=1.0).contains(&uv[0]), "u out of range: {}", uv[0]);
            assert!((0.0..=1.0).contains(&uv[1]), "v out of range: {}", uv[1]);
        }
    }

    #[test]
    fn u_decreases_along_a_latitude_row() {
        let mesh = build();
        // First vertex of each cell in the first row carries u = 1 - (long-1)/bands.
        let mut last_u = f32::INFINITY;
        for long in 0..LONGITUDE_BANDS {
            let u = mesh.tex_coords[long * 6][0];
            assert!(u < last_u, "u not strictly decreasing at column {}", long);
            last_u = u;
        }
    }

    #[test]
    fn points_lie_on_the_sphere() {
        let mesh = build();
        for p in &mesh.positions {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - RADIUS).abs() < 1e-4);
        }
    }
}
