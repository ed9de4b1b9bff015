use super::MeshData;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const TRI_UV: [[f32; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]];

const EMBEDDED_MODEL: &str = include_str!("../../assets/model.obj");

/// Builds the shipped polyhedron model.
pub fn build_embedded() -> MeshData {
    build_from_text(EMBEDDED_MODEL)
}

/// Parses a `v`/`f` subset of the OBJ text format into a flat triangle mesh.
///
/// Faces use 1-based vertex indices; `/texture/normal` sub-indices are
/// ignored. Faces with more than three vertices are fan-triangulated from
/// their first vertex. Malformed lines and out-of-range indices are skipped;
/// a face left with fewer than three valid indices is dropped. The whole
/// model is scaled uniformly so its largest coordinate magnitude lands at 1.
pub fn build_from_text(text: &str) -> MeshData {
    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("v") => {
                let coords: Vec<f32> = parts.filter_map(|p| p.parse().ok()).collect();
                if coords.len() >= 3 {
                    vertices.push([coords[0], coords[1], coords[2]]);
                } else {
                    log::warn!("skipping malformed vertex line: {:?}", line);
                }
            }
            Some("f") => {
                let mut face = Vec::new();
                for part in parts {
                    let index_text = part.split('/').next().unwrap_or("");
                    match index_text.parse::<usize>() {
                        Ok(i) if i >= 1 && i <= vertices.len() => face.push(i - 1),
                        _ => log::warn!("skipping bad face index {:?} in {:?}", part, line),
                    }
                }
                if face.len() >= 3 {
                    faces.push(face);
                } else if !face.is_empty() {
                    log::warn!("dropping degenerate face: {:?}", line);
                }
            }
            _ => {}
        }
    }

    let max_abs = vertices
        .iter()
        .flatten()
        .fold(0.0f32, |acc, c| acc.max(c.abs()));
    let scale = if max_abs > 0.0 { 1.0 / max_abs } else { 1.0 };

    let mut mesh = MeshData::new();
    for face in &faces {
        for i in 1..face.len() - 1 {
            for &index in [face[0], face[i], face[i + 1]].iter() {
                let v = vertices[index];
                mesh.positions
                    .push([v[0] * scale, v[1] * scale, v[2] * scale, 1.0]);
                mesh.colors.push(WHITE);
            }
            mesh.tex_coords.extend_from_slice(&TRI_UV);
            mesh.vertex_count += 3;
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    #[test]
    fn quad_fan_triangulates_from_first_vertex() {
        let text = "v 0 0 0\nv 2 0 0\nv 2 2 0\nv 0 2 0\nf 1 2 3 4\n";
        let mesh = build_from_text(text);

        assert_eq!(mesh.vertex_count, 6);
        // Both triangles share vertex 1 (scaled by 1/2).
        assert_eq!(mesh.positions[0], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.positions[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.positions[4], [1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn out_of_range_index_drops_the_face() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 99\n";
        let mesh = build_from_text(text);
        assert_eq!(mesh.vertex_count, 0);
    }

    #[test]
    fn texture_and_normal_suffixes_are_ignored() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/4/7 2/5/8 3/6/9\n";
        let mesh = build_from_text(text);
        assert_eq!(mesh.vertex_count, 3);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let text = format!("v one two three\nf\nbogus line\n{}", TRIANGLE);
        let mesh = build_from_text(&text);
        assert_eq!(mesh.vertex_count, 3);
    }

    #[test]
    fn model_is_scaled_to_unit_extent() {
        let text = "v 4 0 0\nv 0 -8 0\nv 0 0 2\nf 1 2 3\n";
        let mesh = build_from_text(text);

        let mut max_abs = 0.0f32;
        for p in &mesh.positions {
            for c in &p[..3] {
                max_abs = max_abs.max(c.abs());
            }
        }
        assert!((max_abs - 1.0).abs() < 1e-6);
        // The extremal vertex maps exactly onto the unit bound.
        assert_eq!(mesh.positions[1][1], -1.0);
    }

    #[test]
    fn empty_model_yields_empty_mesh() {
        let mesh = build_from_text("");
        assert_eq!(mesh.vertex_count, 0);
        assert!(mesh.positions.is_empty());
    }

    #[test]
    fn embedded_model_builds() {
        let mesh = build_embedded();
        assert!(mesh.vertex_count > 0);
        assert_eq!(mesh.vertex_count % 3, 0);
        assert_eq!(mesh.positions.len(), mesh.vertex_count);
        assert_eq!(mesh.tex_coords.len(), mesh.vertex_count);
    }
}
