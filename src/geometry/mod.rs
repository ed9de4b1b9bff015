use wgpu::PrimitiveTopology;

pub mod cube;
pub mod obj;
pub mod platonic;
pub mod sphere;

/// The fixed set of primitives the viewer can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cube,
    CubeFast,
    Sphere,
    Tetrahedron,
    Octahedron,
    Polyhedron,
}

impl ShapeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::CubeFast => "cube_fast",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Tetrahedron => "tetrahedron",
            ShapeKind::Octahedron => "octahedron",
            ShapeKind::Polyhedron => "polyhedron",
        }
    }

    /// Degrees per frame for the flat-rotated shapes. The fast cube is the
    /// same geometry as the cube, distinguished only by this value.
    pub fn rotation_speed(&self) -> f32 {
        match self {
            ShapeKind::CubeFast => 10.0,
            ShapeKind::Sphere => 0.1,
            _ => 2.0,
        }
    }

    pub fn uses_texture(&self) -> bool {
        true
    }

    /// Only the sphere renders through a look-at/orthographic camera; every
    /// other shape spins via the rotation uniform.
    pub fn uses_projection(&self) -> bool {
        matches!(self, ShapeKind::Sphere)
    }

    pub fn render_mode(&self) -> RenderMode {
        RenderMode::Triangles
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Triangles,
    TriangleStrip,
    LineLoop,
}

impl RenderMode {
    /// wgpu has no loop topology, so `LineLoop` degrades to a strip.
    pub fn topology(&self) -> PrimitiveTopology {
        match self {
            RenderMode::Triangles => PrimitiveTopology::TriangleList,
            RenderMode::TriangleStrip => PrimitiveTopology::TriangleStrip,
            RenderMode::LineLoop => PrimitiveTopology::LineStrip,
        }
    }
}

/// Non-indexed mesh as three parallel attribute streams. `colors` may be
/// empty (the sphere carries none); `positions` and, for textured shapes,
/// `tex_coords` always match `vertex_count`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 4]>,
    pub colors: Vec<[f32; 4]>,
    pub tex_coords: Vec<[f32; 2]>,
    pub vertex_count: usize,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builds the geometry for a shape kind. Pure: no device access, no
/// dependence on whatever shape was active before.
pub fn build(kind: ShapeKind) -> MeshData {
    match kind {
        ShapeKind::Cube | ShapeKind::CubeFast => cube::build(),
        ShapeKind::Sphere => sphere::build(),
        ShapeKind::Tetrahedron => platonic::build_tetrahedron(),
        ShapeKind::Octahedron => platonic::build_octahedron(),
        ShapeKind::Polyhedron => obj::build_embedded(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_kinds() -> [ShapeKind; 6] {
        [
            ShapeKind::Cube,
            ShapeKind::CubeFast,
            ShapeKind::Sphere,
            ShapeKind::Tetrahedron,
            ShapeKind::Octahedron,
            ShapeKind::Polyhedron,
        ]
    }

    #[test]
    fn attribute_streams_are_parallel() {
        for kind in all_kinds() {
            let mesh = build(kind);
            assert_eq!(mesh.positions.len(), mesh.vertex_count, "{:?}", kind);
            if kind.uses_texture() {
                assert_eq!(mesh.tex_coords.len(), mesh.vertex_count, "{:?}", kind);
            }
            if !mesh.colors.is_empty() {
                assert_eq!(mesh.colors.len(), mesh.vertex_count, "{:?}", kind);
            }
        }
    }

    #[test]
    fn building_twice_is_idempotent() {
        for kind in all_kinds() {
            assert_eq!(build(kind), build(kind), "{:?}", kind);
        }
    }

    #[test]
    fn only_sphere_projects() {
        for kind in all_kinds() {
            assert_eq!(kind.uses_projection(), kind == ShapeKind::Sphere);
        }
    }

    #[test]
    fn fast_cube_differs_only_in_speed() {
        assert_eq!(build(ShapeKind::Cube), build(ShapeKind::CubeFast));
        assert_eq!(ShapeKind::Cube.rotation_speed(), 2.0);
        assert_eq!(ShapeKind::CubeFast.rotation_speed(), 10.0);
    }
}
