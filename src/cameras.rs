use glam::{Mat4, Vec3};

pub const ORBIT_RADIUS: f32 = 2.0;

const ORTHO_LEFT: f32 = -3.0;
const ORTHO_RIGHT: f32 = 3.0;
const ORTHO_BOTTOM: f32 = -3.0;
const ORTHO_TOP: f32 = 3.0;
const ORTHO_NEAR: f32 = -10.0;
const ORTHO_FAR: f32 = 10.0;

const TAU: f32 = std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

impl RotationAxis {
    fn index(&self) -> usize {
        match self {
            RotationAxis::X => 0,
            RotationAxis::Y => 1,
            RotationAxis::Z => 2,
        }
    }
}

/// Euler spin for everything that is not the sphere. Angles are in degrees
/// (the shader converts), accumulate without wraparound, and only the
/// selected axis advances.
#[derive(Debug, Clone)]
pub struct RotationState {
    pub angles: [f32; 3],
    pub axis: RotationAxis,
    pub rotate_on: bool,
    pub speed: f32,
}

impl RotationState {
    pub fn new(speed: f32) -> Self {
        Self {
            angles: [45.0, 45.0, 45.0],
            axis: RotationAxis::X,
            rotate_on: false,
            speed,
        }
    }

    /// Advances the active axis by one frame's worth of rotation.
    pub fn tick(&mut self) {
        if self.rotate_on {
            self.angles[self.axis.index()] += self.speed;
        }
    }

    pub fn theta(&self) -> Vec3 {
        Vec3::from_array(self.angles)
    }
}

/// Spherical camera orbiting the origin. Both angles are kept in [0, 2π);
/// crossing into the lower hemisphere flips the up vector so the look-at
/// basis stays well defined.
#[derive(Debug, Clone)]
pub struct OrbitState {
    pub azimuth: f32,
    pub elevation: f32,
}

fn wrap_angle(mut a: f32) -> f32 {
    if a >= TAU {
        a -= TAU;
    }
    if a < 0.0 {
        a += TAU;
    }
    a
}

impl OrbitState {
    pub fn new() -> Self {
        Self {
            azimuth: 0.0,
            elevation: 0.0,
        }
    }

    pub fn nudge(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.azimuth += d_azimuth;
        self.elevation += d_elevation;
    }

    pub fn normalize(&mut self) {
        self.azimuth = wrap_angle(self.azimuth);
        self.elevation = wrap_angle(self.elevation);
    }

    pub fn up(&self) -> Vec3 {
        if self.elevation >= std::f32::consts::FRAC_PI_2
            && self.elevation < 3.0 * std::f32::consts::FRAC_PI_2
        {
            Vec3::new(0.0, -1.0, 0.0)
        } else {
            Vec3::new(0.0, 1.0, 0.0)
        }
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            ORBIT_RADIUS * self.azimuth.sin() * self.elevation.cos(),
            ORBIT_RADIUS * self.elevation.sin(),
            ORBIT_RADIUS * self.azimuth.cos() * self.elevation.cos(),
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, self.up())
    }

    pub fn projection_matrix() -> Mat4 {
        Mat4::orthographic_rh(
            ORTHO_LEFT,
            ORTHO_RIGHT,
            ORTHO_BOTTOM,
            ORTHO_TOP,
            ORTHO_NEAR,
            ORTHO_FAR,
        )
    }
}

/// The two camera models the render loop has to serve. Cloned wholesale by
/// the capture controller to restore the pre-capture pose.
#[derive(Debug, Clone)]
pub enum CameraMode {
    Flat(RotationState),
    Orbiting(OrbitState),
}

impl CameraMode {
    pub fn rotate_on(&self) -> bool {
        match self {
            CameraMode::Flat(rotation) => rotation.rotate_on,
            CameraMode::Orbiting(_) => false,
        }
    }

    pub fn set_rotate_on(&mut self, value: bool) {
        if let CameraMode::Flat(rotation) = self {
            rotation.rotate_on = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_accumulates_linearly_on_active_axis() {
        let mut rotation = RotationState::new(2.0);
        rotation.angles = [0.0, 0.0, 0.0];
        rotation.rotate_on = true;

        for _ in 0..100 {
            rotation.tick();
        }

        assert_eq!(rotation.angles[0], 200.0);
        assert_eq!(rotation.angles[1], 0.0);
        assert_eq!(rotation.angles[2], 0.0);
    }

    #[test]
    fn rotation_disabled_holds_angles() {
        let mut rotation = RotationState::new(10.0);
        let before = rotation.angles;
        rotation.tick();
        assert_eq!(rotation.angles, before);
    }

    #[test]
    fn azimuth_wraps_into_unit_circle() {
        let mut orbit = OrbitState::new();
        orbit.azimuth = TAU + 0.25;
        orbit.normalize();
        assert!((orbit.azimuth - 0.25).abs() < 1e-6);

        orbit.azimuth = -0.1;
        orbit.normalize();
        assert!((orbit.azimuth - (TAU - 0.1)).abs() < 1e-6);
    }

    #[test]
    fn up_vector_flips_in_lower_half() {
        let mut orbit = OrbitState::new();
        assert_eq!(orbit.up(), Vec3::Y);

        orbit.elevation = std::f32::consts::FRAC_PI_2;
        assert_eq!(orbit.up(), Vec3::new(0.0, -1.0, 0.0));

        orbit.elevation = std::f32::consts::PI;
        assert_eq!(orbit.up(), Vec3::new(0.0, -1.0, 0.0));

        orbit.elevation = 3.0 * std::f32::consts::FRAC_PI_2;
        assert_eq!(orbit.up(), Vec3::Y);
    }

    #[test]
    fn eye_sits_on_orbit_radius() {
        let mut orbit = OrbitState::new();
        orbit.azimuth = 1.3;
        orbit.elevation = 0.7;
        assert!((orbit.eye().length() - ORBIT_RADIUS).abs() < 1e-5);
    }
}
