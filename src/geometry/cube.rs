use super::MeshData;

#[rustfmt::skip]
const CORNERS: [[f32; 4]; 8] = [
    [-0.5, -0.5,  0.5, 1.0],
    [-0.5,  0.5,  0.5, 1.0],
    [ 0.5,  0.5,  0.5, 1.0],
    [ 0.5, -0.5,  0.5, 1.0],
    [-0.5, -0.5, -0.5, 1.0],
    [-0.5,  0.5, -0.5, 1.0],
    [ 0.5,  0.5, -0.5, 1.0],
    [ 0.5, -0.5, -0.5, 1.0],
];

#[rustfmt::skip]
const CORNER_COLORS: [[f32; 4]; 8] = [
    [1.0, 0.0, 1.0, 1.0],
    [0.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 0.0, 0.0, 1.0],
];

const FACE_UV: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

/// One cube face as two triangles. The whole face takes the color of corner
/// `c`, and the unit UV square is laid out the same way on every face.
fn quad(mesh: &mut MeshData, a: usize, b: usize, c: usize, d: usize) {
    let color = CORNER_COLORS[c];

    for corner in [a, b, c, a, c, d] {
        mesh.positions.push(CORNERS[corner]);
        mesh.colors.push(color);
    }
    for uv in [0, 1, 2, 0, 2, 3] {
        mesh.tex_coords.push(FACE_UV[uv]);
    }
    mesh.vertex_count += 6;
}

pub fn build() -> MeshData {
    let mut mesh = MeshData::new();

    quad(&mut mesh, 1, 0, 3, 2);
    quad(&mut mesh, 2, 3, 7, 6);
    quad(&mut mesh, 3, 0, 4, 7);
    quad(&mut mesh, 5, 1, 2, 6);
    quad(&mut mesh, 4, 5, 6, 7);
    quad(&mut mesh, 5, 4, 0, 1);

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_36_vertices() {
        let mesh = build();
        assert_eq!(mesh.vertex_count, 36);
        assert_eq!(mesh.positions.len(), 36);
        assert_eq!(mesh.colors.len(), 36);
        assert_eq!(mesh.tex_coords.len(), 36);
    }

    #[test]
    fn each_face_is_flat_colored() {
        let mesh = build();
        for face in 0..6 {
            let base = face * 6;
            let color = mesh.colors[base];
            for i in base..base + 6 {
                assert_eq!(mesh.colors[i], color, "face {}", face);
            }
        }
    }

    #[test]
    fn faces_repeat_the_unit_uv_square() {
        let mesh = build();
        for face in 0..6 {
            let base = face * 6;
            assert_eq!(mesh.tex_coords[base], [0.0, 0.0]);
            assert_eq!(mesh.tex_coords[base + 2], [1.0, 1.0]);
            assert_eq!(mesh.tex_coords[base + 5], [1.0, 0.0]);
        }
    }
}
