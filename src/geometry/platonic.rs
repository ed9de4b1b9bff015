use super::MeshData;

const SCALE: f32 = 1.8;
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// Every face gets the same three texture corners; no vertex sharing, every
// triangle owns its vertices.
const TRI_UV: [[f32; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]];

fn triangle(mesh: &mut MeshData, a: [f32; 3], b: [f32; 3], c: [f32; 3]) {
    for p in [a, b, c] {
        mesh.positions.push([p[0], p[1], p[2], 1.0]);
        mesh.colors.push(WHITE);
    }
    mesh.tex_coords.extend_from_slice(&TRI_UV);
    mesh.vertex_count += 3;
}

pub fn build_tetrahedron() -> MeshData {
    let p = [0.0, 0.0, -0.35 * SCALE];
    let q = [0.0, 0.35 * SCALE, 0.15 * SCALE];
    let r = [-0.35 * SCALE, -0.15 * SCALE, 0.15 * SCALE];
    let s = [0.35 * SCALE, -0.15 * SCALE, 0.15 * SCALE];

    let mut mesh = MeshData::new();
    triangle(&mut mesh, p, r, q);
    triangle(&mut mesh, p, r, s);
    triangle(&mut mesh, p, q, s);
    triangle(&mut mesh, q, r, s);
    mesh
}

pub fn build_octahedron() -> MeshData {
    let a = [0.2 * SCALE, 0.0, -0.2 * SCALE];
    let b = [-0.2 * SCALE, 0.0, -0.2 * SCALE];
    let c = [-0.2 * SCALE, 0.0, 0.2 * SCALE];
    let d = [0.2 * SCALE, 0.0, 0.2 * SCALE];
    let top = [0.0, 0.3 * SCALE, 0.0];
    let bottom = [0.0, -0.3 * SCALE, 0.0];

    let mut mesh = MeshData::new();
    triangle(&mut mesh, a, d, top);
    triangle(&mut mesh, a, b, top);
    triangle(&mut mesh, b, c, top);
    triangle(&mut mesh, c, d, top);
    triangle(&mut mesh, a, d, bottom);
    triangle(&mut mesh, a, b, bottom);
    triangle(&mut mesh, b, c, bottom);
    triangle(&mut mesh, c, d, bottom);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tetrahedron_has_four_faces() {
        let mesh = build_tetrahedron();
        assert_eq!(mesh.vertex_count, 12);
        assert_eq!(mesh.positions.len(), 12);
        assert_eq!(mesh.tex_coords.len(), 12);
    }

    #[test]
    fn octahedron_has_eight_faces() {
        let mesh = build_octahedron();
        assert_eq!(mesh.vertex_count, 24);
        assert_eq!(mesh.positions.len(), 24);
    }

    #[test]
    fn faces_are_white_with_fixed_uv_triangle() {
        for mesh in [build_tetrahedron(), build_octahedron()] {
            assert!(mesh.colors.iter().all(|c| *c == WHITE));
            for tri in mesh.tex_coords.chunks(3) {
                assert_eq!(tri, TRI_UV);
            }
        }
    }
}
