use glam::{Mat4, Vec3};

use super::frame_state::{aspect_ratio, FrameState};

/// Vertical field of view, degrees.
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Camera offset along -Z.
pub const CAMERA_DISTANCE: f32 = 5.0;

/// Spin rate about the primary (Z) axis. The secondary (Y) axis turns at half this.
pub const DEGREES_PER_SECOND: f64 = 50.0;

/// The primary angle is reduced modulo this before narrowing to `f32`.
///
/// 720 keeps both rotations continuous: Z has period 360 and Y (half angle) has
/// period 720 in primary-angle terms.
const ANGLE_PERIOD: f64 = 720.0;

/// Rotation angles of the cube at a point in time, in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpinAngles {
    /// About +Z, applied first.
    pub primary: f32,
    /// About +Y in the frame left by the primary rotation; always `primary / 2`.
    pub secondary: f32,
}

impl SpinAngles {
    pub fn at(elapsed_secs: f64) -> Self {
        let primary = (elapsed_secs * DEGREES_PER_SECOND).rem_euclid(ANGLE_PERIOD);
        Self {
            primary: primary as f32,
            secondary: (primary * 0.5) as f32,
        }
    }

    /// `identity * Rz(primary) * Ry(secondary)`.
    pub fn model_matrix(self) -> Mat4 {
        Mat4::from_rotation_z(self.primary.to_radians())
            * Mat4::from_rotation_y(self.secondary.to_radians())
    }
}

/// Per-frame matrices pushed to the cube shader.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneTransforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
}

impl SceneTransforms {
    /// Matrices for the frame at `elapsed_secs` drawn into `frame`.
    pub fn compute(elapsed_secs: f64, frame: &FrameState) -> Self {
        Self::at(elapsed_secs, frame.fb_width(), frame.fb_height())
    }

    /// Pure form of [`compute`](Self::compute).
    ///
    /// A zero-sized framebuffer uses [`super::FALLBACK_ASPECT`], so the result is
    /// always finite.
    pub fn at(elapsed_secs: f64, fb_width: u32, fb_height: u32) -> Self {
        Self {
            projection: projection(aspect_ratio(fb_width, fb_height)),
            view: view(),
            model: SpinAngles::at(elapsed_secs).model_matrix(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.projection.is_finite() && self.view.is_finite() && self.model.is_finite()
    }
}

/// Right-handed perspective with wgpu's 0..1 depth range.
pub fn projection(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR)
}

/// Fixed camera: the world pushed back along -Z, no rotation.
pub fn view() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_DISTANCE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPS: f32 = 1e-5;

    /// Angular distance on a circle, degrees.
    fn wrapped_diff(a: f32, b: f32) -> f32 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn projection_matches_analytic_perspective() {
        for (w, h) in [(640u32, 480u32), (1920, 1080), (100, 400), (1, 1)] {
            let p = SceneTransforms::at(0.0, w, h).projection;

            let aspect = w as f32 / h as f32;
            let f = 1.0 / (FOV_Y_DEGREES.to_radians() * 0.5).tan();
            let r = Z_FAR / (Z_NEAR - Z_FAR);

            let expected = Mat4::from_cols(
                Vec4::new(f / aspect, 0.0, 0.0, 0.0),
                Vec4::new(0.0, f, 0.0, 0.0),
                Vec4::new(0.0, 0.0, r, -1.0),
                Vec4::new(0.0, 0.0, r * Z_NEAR, 0.0),
            );
            assert!(p.abs_diff_eq(expected, EPS), "{w}x{h}: {p:?}");
        }
    }

    #[test]
    fn projection_maps_near_and_far_to_depth_range() {
        let p = projection(1.0);
        let near = p * Vec4::new(0.0, 0.0, -Z_NEAR, 1.0);
        let far = p * Vec4::new(0.0, 0.0, -Z_FAR, 1.0);
        assert!((near.z / near.w).abs() < EPS);
        assert!((far.z / far.w - 1.0).abs() < EPS);
    }

    #[test]
    fn zero_height_produces_finite_matrices() {
        let t = SceneTransforms::at(3.0, 640, 0);
        assert!(t.is_finite());
        assert!(t.projection.abs_diff_eq(projection(1.0), EPS));
    }

    #[test]
    fn zero_sized_framebuffer_produces_finite_matrices() {
        assert!(SceneTransforms::at(3.0, 0, 0).is_finite());
        assert!(SceneTransforms::at(3.0, 0, 480).is_finite());
    }

    // ── view ──────────────────────────────────────────────────────────────

    #[test]
    fn view_is_constant_translation() {
        let a = SceneTransforms::at(0.0, 640, 480).view;
        let b = SceneTransforms::at(42.0, 640, 480).view;
        assert_eq!(a, b);
        assert_eq!(a.w_axis, Vec4::new(0.0, 0.0, -5.0, 1.0));
        assert_eq!(a.transform_point3(Vec3::ZERO), Vec3::new(0.0, 0.0, -5.0));
    }

    // ── model ─────────────────────────────────────────────────────────────

    #[test]
    fn model_is_identity_at_start() {
        let m = SceneTransforms::at(0.0, 640, 480).model;
        assert!(m.abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn primary_advances_fifty_degrees_per_second() {
        let pairs = [(0.0, 1.0), (1.0, 3.5), (7.0, 7.2), (14.0, 15.0), (100.0, 1000.25)];
        for (t1, t2) in pairs {
            let a1 = SpinAngles::at(t1);
            let a2 = SpinAngles::at(t2);

            let expected = (50.0 * (t2 - t1)) as f32;
            let got = a2.primary - a1.primary;
            assert!(wrapped_diff(got, expected) < 1e-2, "t1={t1} t2={t2}");

            let expected_half = expected * 0.5;
            let got_half = a2.secondary - a1.secondary;
            assert!(wrapped_diff(got_half, expected_half) < 1e-2, "t1={t1} t2={t2}");
        }
    }

    #[test]
    fn secondary_is_exactly_half_primary() {
        for t in [0.0, 0.3, 7.2, 14.4, 15.0, 3600.0] {
            let a = SpinAngles::at(t);
            assert_eq!(a.secondary, a.primary / 2.0);
        }
    }

    #[test]
    fn model_is_continuous_across_angle_wrap() {
        // 14.4s is where the primary angle wraps 720 -> 0.
        let before = SceneTransforms::at(14.4 - 1e-4, 1, 1).model;
        let after = SceneTransforms::at(14.4 + 1e-4, 1, 1).model;
        assert!(before.abs_diff_eq(after, 1e-3));
    }

    #[test]
    fn model_composes_z_then_local_y() {
        let t = 1.3;
        let angles = SpinAngles::at(t);
        let m = SceneTransforms::at(t, 640, 480).model;

        let rz = Mat4::from_rotation_z(angles.primary.to_radians());
        let ry = Mat4::from_rotation_y(angles.secondary.to_radians());
        assert!(m.abs_diff_eq(rz * ry, EPS));

        // Undoing in reverse order returns to identity; the other order does not.
        assert!((m * ry.inverse() * rz.inverse()).abs_diff_eq(Mat4::IDENTITY, EPS));
        assert!(!(ry * rz).abs_diff_eq(m, 1e-3));
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn repeated_resize_gives_identical_projection() {
        let mut frame = FrameState::new(640, 480);
        frame.resize(1280, 720);
        let first = SceneTransforms::compute(2.0, &frame);
        frame.resize(1280, 720);
        frame.resize(1280, 720);
        let second = SceneTransforms::compute(2.0, &frame);
        assert_eq!(first, second);
    }
}
