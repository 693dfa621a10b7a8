use std::{f32::consts::FRAC_PI_2, fmt};

use nalgebra::{Matrix4, Vector3};

/// Elevation is kept strictly inside the poles; at exactly ±90° the
/// look-at basis collapses because the view direction is parallel to `up`.
pub const MAX_ELEVATION: f32 = FRAC_PI_2 - 0.01;

const DEFAULT_NEAR: f32 = 0.1;
const DEFAULT_FAR: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraError {
    /// The camera position coincides with the target it should orbit.
    DegenerateGeometry { distance: f32 },
    InvalidViewport { width: f32, height: f32 },
    /// Clip planes must satisfy `0 < near < far`, both finite.
    InvalidClipPlanes { near: f32, far: f32 },
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateGeometry { distance } => {
                write!(f, "camera position is {distance} away from its target")
            }
            Self::InvalidViewport { width, height } => {
                write!(f, "invalid viewport size {width}x{height}")
            }
            Self::InvalidClipPlanes { near, far } => {
                write!(f, "invalid clip planes near {near}, far {far}")
            }
        }
    }
}

impl std::error::Error for CameraError {}

/// Camera orbiting a fixed target at a fixed radius.
///
/// The position is never stored; it is derived from the two rotation
/// angles every time it is needed, so the matrices can never go stale.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    radius: f32,
    rotation_vertical: f32,
    rotation_horizontal: f32,
    target: Vector3<f32>,
    up: Vector3<f32>,

    near: f32,
    far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        OrbitCamera {
            radius: 1.0,
            rotation_vertical: 0.0,
            rotation_horizontal: 0.0,
            target: Vector3::zeros(),
            up: Vector3::z(),
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }

    pub fn with_clip_planes(near: f32, far: f32) -> Result<Self, CameraError> {
        let finite = near.is_finite() && far.is_finite();

        if !finite || near <= 0.0 || far - near <= f32::EPSILON {
            return Err(CameraError::InvalidClipPlanes { near, far });
        }

        Ok(OrbitCamera {
            near,
            far,
            ..Self::new()
        })
    }

    /// Points the camera at `target` from `position`.
    ///
    /// The radius becomes the distance between the two points and the
    /// angles are reset so that the camera sits at `position` (up to the
    /// elevation clamp). Nothing changes if the points coincide.
    pub fn look_at(
        &mut self,
        target: Vector3<f32>,
        position: Vector3<f32>,
    ) -> Result<(), CameraError> {
        let offset = position - target;
        let distance = offset.norm();

        if !distance.is_finite() || distance < f32::EPSILON {
            return Err(CameraError::DegenerateGeometry { distance });
        }

        self.target = target;
        self.radius = distance;
        self.rotation_vertical = (offset.z / distance)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-MAX_ELEVATION, MAX_ELEVATION);
        self.rotation_horizontal = offset.y.atan2(offset.x);

        log::debug!(
            "camera looking at {:?} from radius {}",
            self.target,
            self.radius
        );

        Ok(())
    }

    pub fn rotate(&mut self, direction: RotationDirection, delta: f32) {
        self.rotate_scaled(direction, delta, 1.0);
    }

    /// Adds `delta * modifier` radians to the angle picked by `direction`.
    pub fn rotate_scaled(&mut self, direction: RotationDirection, delta: f32, modifier: f32) {
        let step = delta * modifier;

        match direction {
            RotationDirection::Horizontal => self.rotation_horizontal += step,
            RotationDirection::Vertical => {
                self.rotation_vertical =
                    (self.rotation_vertical + step).clamp(-MAX_ELEVATION, MAX_ELEVATION);
            }
        }
    }

    /// Camera position relative to the target.
    pub fn local_position(&self) -> Vector3<f32> {
        let planar_radius = self.radius * self.rotation_vertical.cos();

        Vector3::new(
            planar_radius * self.rotation_horizontal.cos(),
            planar_radius * self.rotation_horizontal.sin(),
            self.radius * self.rotation_vertical.sin(),
        )
    }

    pub fn world_position(&self) -> Vector3<f32> {
        self.target + self.local_position()
    }

    /// World to camera transform.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        nalgebra_glm::look_at(&self.world_position(), &self.target, &self.up)
    }

    /// Perspective projection for a vertical field of view in radians.
    pub fn projection_matrix(
        &self,
        fov: f32,
        width: f32,
        height: f32,
    ) -> Result<Matrix4<f32>, CameraError> {
        let valid = |side: f32| side.is_finite() && side > 0.0;
        let aspect = width / height;

        // glm asserts the aspect is not approximately zero
        if !valid(width) || !valid(height) || !aspect.is_finite() || aspect <= f32::EPSILON {
            return Err(CameraError::InvalidViewport { width, height });
        }

        Ok(nalgebra_glm::perspective(
            aspect,
            fov,
            self.near,
            self.far,
        ))
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn rotation_vertical(&self) -> f32 {
        self.rotation_vertical
    }

    pub fn rotation_horizontal(&self) -> f32 {
        self.rotation_horizontal
    }

    pub fn target(&self) -> &Vector3<f32> {
        &self.target
    }

    pub fn up(&self) -> &Vector3<f32> {
        &self.up
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{PI, TAU};

    use nalgebra::Vector4;

    use super::*;

    const EPSILON: f32 = 1e-4;

    fn assert_close(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert!(
            (actual - expected).norm() < EPSILON,
            "expected {:?}, got {:?}",
            expected.data,
            actual.data
        );
    }

    fn camera_at(position: Vector3<f32>) -> OrbitCamera {
        let mut camera = OrbitCamera::new();
        camera.look_at(Vector3::zeros(), position).unwrap();
        camera
    }

    #[test]
    fn test_zero_angles_sit_on_x_axis() {
        let camera = camera_at(Vector3::new(3.0, 0.0, 0.0));

        assert_eq!(camera.rotation_vertical(), 0.0);
        assert_eq!(camera.rotation_horizontal(), 0.0);
        assert_close(camera.local_position(), Vector3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_orbit_stays_on_sphere() {
        let mut camera = camera_at(Vector3::new(2.5, 0.0, 0.0));

        for step in 0..40 {
            let direction = if step % 3 == 0 {
                RotationDirection::Vertical
            } else {
                RotationDirection::Horizontal
            };
            camera.rotate(direction, 0.37);

            assert!((camera.local_position().norm() - 2.5).abs() < EPSILON);
        }
    }

    #[test]
    fn test_horizontal_round_trip() {
        let mut camera = camera_at(Vector3::new(1.0, 2.0, 0.5));
        let before = camera.local_position();

        camera.rotate(RotationDirection::Horizontal, 1.3);
        camera.rotate(RotationDirection::Horizontal, -1.3);

        assert_close(camera.local_position(), before);
    }

    #[test]
    fn test_horizontal_full_turn_is_periodic() {
        let mut camera = camera_at(Vector3::new(4.0, -1.0, 2.0));
        let before = camera.local_position();

        camera.rotate(RotationDirection::Horizontal, TAU);

        assert_close(camera.local_position(), before);
    }

    #[test]
    fn test_rotate_scaled_applies_modifier() {
        let mut camera = camera_at(Vector3::new(1.0, 0.0, 0.0));

        camera.rotate_scaled(RotationDirection::Horizontal, 50.0, 0.01);

        assert!((camera.rotation_horizontal() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_vertical_rotation_saturates() {
        let mut camera = camera_at(Vector3::new(1.0, 0.0, 0.0));

        for _ in 0..100 {
            camera.rotate(RotationDirection::Vertical, 0.1);
        }
        assert_eq!(camera.rotation_vertical(), MAX_ELEVATION);

        for _ in 0..100 {
            camera.rotate(RotationDirection::Vertical, -0.1);
        }
        assert_eq!(camera.rotation_vertical(), -MAX_ELEVATION);
    }

    #[test]
    fn test_look_at_recovers_position() {
        let target = Vector3::new(1.0, -2.0, 0.5);
        let position = Vector3::new(-3.0, 4.0, 2.0);

        let mut camera = OrbitCamera::new();
        camera.look_at(target, position).unwrap();

        assert!((camera.radius() - (position - target).norm()).abs() < EPSILON);
        assert_close(camera.world_position(), position);
    }

    #[test]
    fn test_look_at_from_pole_is_clamped() {
        let camera = camera_at(Vector3::new(0.0, 0.0, 2.0));

        assert_eq!(camera.rotation_vertical(), MAX_ELEVATION);
        assert!((camera.local_position().norm() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_look_at_coincident_points_fails() {
        let mut camera = camera_at(Vector3::new(5.0, 0.0, 0.0));
        let point = Vector3::new(1.0, 1.0, 1.0);

        let err = camera.look_at(point, point).unwrap_err();

        assert!(matches!(err, CameraError::DegenerateGeometry { .. }));
        assert_eq!(camera.radius(), 5.0);
        assert_close(*camera.target(), Vector3::zeros());
    }

    #[test]
    fn test_view_maps_eye_to_origin() {
        let mut camera = camera_at(Vector3::new(5.0, 0.0, 0.0));
        camera.rotate(RotationDirection::Horizontal, 0.8);
        camera.rotate(RotationDirection::Vertical, 0.4);

        let view = camera.view_matrix();
        let eye = camera.world_position();
        let eye_in_camera = view * Vector4::new(eye.x, eye.y, eye.z, 1.0);

        assert_close(eye_in_camera.xyz(), Vector3::zeros());
        assert!((eye_in_camera.w - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_view_puts_target_in_front() {
        let mut camera = OrbitCamera::new();
        camera
            .look_at(Vector3::new(1.0, 1.0, 0.0), Vector3::new(1.0, 4.0, 1.0))
            .unwrap();

        let target = camera.target();
        let target_in_camera = camera.view_matrix() * Vector4::new(target.x, target.y, target.z, 1.0);

        assert_close(
            target_in_camera.xyz(),
            Vector3::new(0.0, 0.0, -camera.radius()),
        );
    }

    #[test]
    fn test_view_tracks_rotation() {
        let mut camera = camera_at(Vector3::new(5.0, 0.0, 0.0));
        let before = camera.view_matrix();

        camera.rotate(RotationDirection::Horizontal, PI / 4.0);

        assert!((camera.view_matrix() - before).norm() > EPSILON);
    }

    #[test]
    fn test_projection_rejects_zero_height() {
        let camera = OrbitCamera::new();

        let err = camera
            .projection_matrix(45.0_f32.to_radians(), 800.0, 0.0)
            .unwrap_err();

        assert_eq!(
            err,
            CameraError::InvalidViewport {
                width: 800.0,
                height: 0.0
            }
        );
    }

    #[test]
    fn test_projection_rejects_negative_sizes() {
        let camera = OrbitCamera::new();

        assert!(camera.projection_matrix(1.0, 800.0, -1.0).is_err());
        assert!(camera.projection_matrix(1.0, 0.0, 600.0).is_err());
        assert!(camera.projection_matrix(1.0, f32::NAN, 600.0).is_err());
    }

    #[test]
    fn test_projection_rejects_vanishing_aspect() {
        let camera = OrbitCamera::new();

        let err = camera.projection_matrix(1.0, 1.0, 1.0e8).unwrap_err();

        assert_eq!(
            err,
            CameraError::InvalidViewport {
                width: 1.0,
                height: 1.0e8
            }
        );
        assert!(camera.projection_matrix(1.0, f32::MAX, f32::MIN_POSITIVE).is_err());
    }

    #[test]
    fn test_clip_planes_are_validated() {
        assert_eq!(
            OrbitCamera::with_clip_planes(1.0, 1.0).unwrap_err(),
            CameraError::InvalidClipPlanes {
                near: 1.0,
                far: 1.0
            }
        );
        assert!(OrbitCamera::with_clip_planes(0.0, 10.0).is_err());
        assert!(OrbitCamera::with_clip_planes(-1.0, 10.0).is_err());
        assert!(OrbitCamera::with_clip_planes(5.0, 2.0).is_err());
        assert!(OrbitCamera::with_clip_planes(0.1, f32::INFINITY).is_err());
        assert!(OrbitCamera::with_clip_planes(f32::NAN, 10.0).is_err());
    }

    #[test]
    fn test_custom_clip_planes_reach_projection() {
        let camera = OrbitCamera::with_clip_planes(1.0, 3.0).unwrap();

        let projection = camera.projection_matrix(1.0, 800.0, 600.0).unwrap();

        // -(far + near) / (far - near) for an OpenGL projection
        assert!((projection[(2, 2)] + 2.0).abs() < EPSILON);
        // -2 * far * near / (far - near)
        assert!((projection[(2, 3)] + 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_projection_encodes_fov_and_aspect() {
        let camera = OrbitCamera::new();
        let fov = 90.0_f32.to_radians();

        let projection = camera.projection_matrix(fov, 800.0, 400.0).unwrap();

        // cot(fov / 2) == 1 for a 90 degree field of view
        assert!((projection[(1, 1)] - 1.0).abs() < EPSILON);
        assert!((projection[(0, 0)] - 0.5).abs() < EPSILON);
        assert_eq!(projection[(3, 2)], -1.0);
    }
}
