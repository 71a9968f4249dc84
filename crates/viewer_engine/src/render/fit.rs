//! Camera fit engine
//!
//! Places the camera along a fixed viewing axis so that a bounding sphere is
//! fully visible at the current viewport aspect ratio, with a configurable
//! margin of breathing room. The narrower of the vertical and horizontal
//! fields of view decides the distance, so the object is never clipped in
//! tall or wide containers.

use thiserror::Error;

use crate::foundation::math::{utils, Unit, Vec3};
use crate::render::camera::Camera;
use crate::scene::bounds::BoundingSphere;

/// How far the near plane sits in front of the camera, as a fraction of the
/// framing distance. Keeps depth precision without z-fighting on close-ups.
const NEAR_PLANE_RATIO: f32 = 1.0 / 100.0;

/// How many sphere radii of depth to keep behind the framed object.
const FAR_PLANE_RADII: f32 = 10.0;

/// Errors rejected by the fit computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// Margin must be a positive ratio
    #[error("fit margin must be positive, got {0}")]
    NonPositiveMargin(f32),

    /// Vertical field of view must be a usable perspective angle
    #[error("field of view must be inside (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    /// Aspect ratio must be positive and finite
    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspect(f32),

    /// A zero-radius sphere has nothing to frame
    #[error("cannot frame a degenerate bounding sphere")]
    DegenerateSphere,
}

/// Computes camera placements that frame a bounding sphere
///
/// The fitter holds only the viewing axis; everything else is an argument,
/// which makes the computation idempotent: identical inputs produce an
/// identical camera.
#[derive(Debug, Clone)]
pub struct CameraFitter {
    view_direction: Unit<Vec3>,
}

impl Default for CameraFitter {
    /// Diagonal three-quarter view, slightly elevated
    fn default() -> Self {
        Self::new(Vec3::new(2.2, 1.8, 2.2))
    }
}

impl CameraFitter {
    /// Create a fitter viewing the object from the given direction
    ///
    /// The direction points from the object towards the camera and is
    /// normalized internally; a zero vector falls back to the default axis.
    pub fn new(direction: Vec3) -> Self {
        let view_direction = Unit::try_new(direction, 1e-6).unwrap_or_else(|| {
            log::warn!("Degenerate view direction {:?}, using default axis", direction);
            Unit::new_normalize(Vec3::new(2.2, 1.8, 2.2))
        });
        Self { view_direction }
    }

    /// Direction from the look target towards the camera
    pub fn view_direction(&self) -> Vec3 {
        self.view_direction.into_inner()
    }

    /// Compute a camera that frames the sphere at the given aspect ratio
    ///
    /// The distance along the viewing axis is the larger of the two per-axis
    /// requirements:
    ///
    /// ```text
    /// d_v = r * margin / tan(v_fov / 2)
    /// d_h = r * margin / tan(h_fov / 2),  h_fov = 2 * atan(tan(v_fov / 2) * aspect)
    /// ```
    ///
    /// Near and far planes scale with the result (`near = d / 100`,
    /// `far = d + 10 r`). A `margin` above 1 leaves breathing room around
    /// the object; non-positive margins are rejected.
    pub fn fit(
        &self,
        sphere: &BoundingSphere,
        aspect: f32,
        fov_degrees: f32,
        margin: f32,
    ) -> Result<Camera, FitError> {
        if !(margin > 0.0) || !margin.is_finite() {
            return Err(FitError::NonPositiveMargin(margin));
        }
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(FitError::InvalidFov(fov_degrees));
        }
        if !(aspect > 0.0) || !aspect.is_finite() {
            return Err(FitError::InvalidAspect(aspect));
        }
        if sphere.is_degenerate() {
            return Err(FitError::DegenerateSphere);
        }

        let half_v = utils::deg_to_rad(fov_degrees) * 0.5;
        let half_h = (half_v.tan() * aspect).atan();

        let distance_v = sphere.radius * margin / half_v.tan();
        let distance_h = sphere.radius * margin / half_h.tan();
        let distance = distance_v.max(distance_h);

        let mut camera = Camera::perspective(
            sphere.center + self.view_direction.into_inner() * distance,
            fov_degrees,
            aspect,
            distance * NEAR_PLANE_RATIO,
            distance + sphere.radius * FAR_PLANE_RADII,
        );
        camera.look_at(sphere.center, Vec3::y());

        log::debug!(
            "Camera fitted: distance {:.3} (vertical {:.3}, horizontal {:.3}) for radius {:.3} at aspect {:.3}",
            distance,
            distance_v,
            distance_h,
            sphere.radius,
            aspect
        );
        Ok(camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_sphere() -> BoundingSphere {
        BoundingSphere {
            center: Vec3::zeros(),
            radius: 1.0,
        }
    }

    /// Analytic containment check: the sphere center sits on the view axis,
    /// so it is inside the frustum iff its distance to each side plane and
    /// to the near/far planes is at least the radius.
    fn sphere_inside_frustum(camera: &Camera, sphere: &BoundingSphere) -> bool {
        let distance = camera.target_distance();
        let half_v = camera.fov * 0.5;
        let half_h = (half_v.tan() * camera.aspect).atan();
        distance * half_v.sin() >= sphere.radius
            && distance * half_h.sin() >= sphere.radius
            && distance - sphere.radius >= camera.near
            && distance + sphere.radius <= camera.far
    }

    #[test]
    fn test_reference_distance_at_16_9() {
        let fitter = CameraFitter::default();
        let camera = fitter.fit(&unit_sphere(), 16.0 / 9.0, 60.0, 1.28).unwrap();

        let half_v = 30.0_f32.to_radians();
        let half_h = (half_v.tan() * (16.0 / 9.0)).atan();
        let expected = (1.28 / half_v.tan()).max(1.28 / half_h.tan());
        assert_relative_eq!(camera.target_distance(), expected, epsilon = 1e-4);
        // At 16:9 the vertical axis is the tighter one.
        assert_relative_eq!(camera.target_distance(), 1.28 / half_v.tan(), epsilon = 1e-4);
    }

    #[test]
    fn test_narrow_aspect_uses_horizontal_axis() {
        let fitter = CameraFitter::default();
        let camera = fitter.fit(&unit_sphere(), 0.5, 60.0, 1.28).unwrap();

        let half_v = 30.0_f32.to_radians();
        let half_h = (half_v.tan() * 0.5).atan();
        // Portrait container: the horizontal requirement dominates.
        assert_relative_eq!(camera.target_distance(), 1.28 / half_h.tan(), epsilon = 1e-4);
        assert!(camera.target_distance() > 1.28 / half_v.tan());
    }

    #[test]
    fn test_sphere_contained_across_aspect_ratios() {
        let fitter = CameraFitter::default();
        let sphere = unit_sphere();
        for aspect in [0.2, 0.5, 1.0, 16.0 / 9.0, 3.0, 8.0] {
            let camera = fitter.fit(&sphere, aspect, 60.0, 1.28).unwrap();
            assert!(
                sphere_inside_frustum(&camera, &sphere),
                "sphere clipped at aspect {aspect}"
            );
        }
    }

    #[test]
    fn test_fit_is_idempotent() {
        let fitter = CameraFitter::default();
        let sphere = BoundingSphere {
            center: Vec3::new(0.5, -0.25, 0.0),
            radius: 2.5,
        };
        let first = fitter.fit(&sphere, 1.4, 55.0, 1.1).unwrap();
        let second = fitter.fit(&sphere, 1.4, 55.0, 1.1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_off_center_sphere_is_targeted() {
        let fitter = CameraFitter::default();
        let sphere = BoundingSphere {
            center: Vec3::new(0.0, 2.0, 0.0),
            radius: 1.0,
        };
        let camera = fitter.fit(&sphere, 1.0, 60.0, 1.28).unwrap();
        assert_relative_eq!(camera.target, sphere.center);
    }

    #[test]
    fn test_clip_planes_bracket_the_sphere() {
        let fitter = CameraFitter::default();
        let camera = fitter.fit(&unit_sphere(), 1.0, 60.0, 1.28).unwrap();
        let distance = camera.target_distance();
        assert!(camera.near > 0.0);
        assert_relative_eq!(camera.near, distance / 100.0, epsilon = 1e-5);
        assert_relative_eq!(camera.far, distance + 10.0, epsilon = 1e-4);
        assert!(camera.far > camera.near);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let fitter = CameraFitter::default();
        let sphere = unit_sphere();
        assert_eq!(
            fitter.fit(&sphere, 1.0, 60.0, 0.0),
            Err(FitError::NonPositiveMargin(0.0))
        );
        assert_eq!(
            fitter.fit(&sphere, 1.0, 60.0, -1.0),
            Err(FitError::NonPositiveMargin(-1.0))
        );
        assert_eq!(
            fitter.fit(&sphere, 1.0, 185.0, 1.28),
            Err(FitError::InvalidFov(185.0))
        );
        assert_eq!(
            fitter.fit(&sphere, 0.0, 60.0, 1.28),
            Err(FitError::InvalidAspect(0.0))
        );
        assert_eq!(
            fitter.fit(&BoundingSphere::empty(), 1.0, 60.0, 1.28),
            Err(FitError::DegenerateSphere)
        );
    }
}
