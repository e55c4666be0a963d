use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Cached orientation vectors derived from the rotation.
#[derive(Debug, Clone, Copy)]
struct Basis {
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

/// Spatial transform: position, Euler rotation (pitch, yaw, roll), scale.
///
/// The basis vectors and world matrix are cached and recomputed lazily the
/// first time they are read after a mutation, so readers only need `&self`.
/// A transform belongs to exactly one entity or camera.
#[derive(Debug, Clone)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    basis: Cell<Basis>,
    basis_dirty: Cell<bool>,
    world: Cell<Mat4>,
    world_dirty: Cell<bool>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            basis: Cell::new(Basis {
                forward: Vec3::Z,
                right: Vec3::X,
                up: Vec3::Y,
            }),
            basis_dirty: Cell::new(false),
            world: Cell::new(Mat4::IDENTITY),
            world_dirty: Cell::new(false),
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        let mut t = Self::default();
        t.set_position(position);
        t
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler angles in radians as (pitch, yaw, roll).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.world_dirty.set(true);
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.invalidate_rotation();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.world_dirty.set(true);
    }

    /// Add a world-space offset to the position.
    pub fn move_absolute(&mut self, delta: Vec3) {
        self.position += delta;
        self.world_dirty.set(true);
    }

    /// Add an offset expressed in local space: the delta is rotated by the
    /// current orientation first, so `+Z` always means "facing direction".
    pub fn move_relative(&mut self, delta: Vec3) {
        self.position += self.rotation_quat() * delta;
        self.world_dirty.set(true);
    }

    /// Add to the Euler angles. Pitch is not clamped; past +/-90 degrees the
    /// orientation flips over the pole.
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
        self.invalidate_rotation();
    }

    /// Multiply the current scale component-wise. Repeated calls compound.
    pub fn scale_by(&mut self, factor: Vec3) {
        self.scale *= factor;
        self.world_dirty.set(true);
    }

    /// Orientation quaternion: roll about Z, then pitch about X, then yaw about Y.
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y,
            self.rotation.x,
            self.rotation.z,
        )
    }

    pub fn forward(&self) -> Vec3 {
        self.basis().forward
    }

    pub fn right(&self) -> Vec3 {
        self.basis().right
    }

    pub fn up(&self) -> Vec3 {
        self.basis().up
    }

    pub fn world_matrix(&self) -> Mat4 {
        if self.world_dirty.get() {
            let world = Mat4::from_scale_rotation_translation(
                self.scale,
                self.rotation_quat(),
                self.position,
            );
            self.world.set(world);
            self.world_dirty.set(false);
        }
        self.world.get()
    }

    /// Plain copy of the editable fields, without the caches.
    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    fn basis(&self) -> Basis {
        if self.basis_dirty.get() {
            let q = self.rotation_quat();
            self.basis.set(Basis {
                forward: q * Vec3::Z,
                right: q * Vec3::X,
                up: q * Vec3::Y,
            });
            self.basis_dirty.set(false);
        }
        self.basis.get()
    }

    fn invalidate_rotation(&mut self) {
        self.basis_dirty.set(true);
        self.world_dirty.set(true);
    }
}

/// Serializable view of a transform's editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(t.world_matrix(), Mat4::IDENTITY);
        assert_eq!(t.forward(), Vec3::Z);
    }

    #[test]
    fn move_absolute_sums_deltas() {
        let deltas = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-0.5, 0.25, 0.0),
            Vec3::new(0.0, -4.0, 1.5),
        ];
        let mut forward_order = Transform::new();
        for d in deltas {
            forward_order.move_absolute(d);
        }
        let mut reverse_order = Transform::new();
        for d in deltas.iter().rev() {
            reverse_order.move_absolute(*d);
        }
        let sum: Vec3 = deltas.iter().copied().sum();
        assert!(forward_order.position().abs_diff_eq(sum, EPS));
        assert!(reverse_order.position().abs_diff_eq(sum, EPS));
    }

    #[test]
    fn move_relative_applies_rotation_first() {
        let rotations = [
            Vec3::ZERO,
            Vec3::new(0.0, FRAC_PI_2, 0.0),
            Vec3::new(0.3, -1.2, 0.7),
        ];
        let delta = Vec3::new(1.0, 2.0, 3.0);
        for r in rotations {
            let mut relative = Transform::new();
            relative.rotate(r);
            relative.move_relative(delta);

            let mut absolute = Transform::new();
            absolute.rotate(r);
            let rotated = absolute.rotation_quat() * delta;
            absolute.move_absolute(rotated);

            assert!(relative.position().abs_diff_eq(absolute.position(), EPS));
        }
    }

    #[test]
    fn yaw_quarter_turn_points_forward_along_x() {
        let mut t = Transform::new();
        t.rotate(Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert!(t.forward().abs_diff_eq(Vec3::X, EPS));
        assert!(t.right().abs_diff_eq(-Vec3::Z, EPS));
        assert!(t.up().abs_diff_eq(Vec3::Y, EPS));
        t.move_relative(Vec3::Z);
        assert!(t.position().abs_diff_eq(Vec3::X, EPS));
    }

    #[test]
    fn scale_compounds() {
        let mut t = Transform::new();
        t.scale_by(Vec3::splat(2.0));
        t.scale_by(Vec3::splat(2.0));
        assert_eq!(t.scale(), Vec3::splat(4.0));
    }

    #[test]
    fn world_matrix_maps_origin_to_position() {
        let p = Vec3::new(3.0, -2.0, 7.5);
        let t = Transform::from_position(p);
        let origin = t.world_matrix().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(p, EPS));
    }

    #[test]
    fn world_matrix_scales_before_rotating_and_translating() {
        let mut t = Transform::from_position(Vec3::new(0.0, 0.0, 10.0));
        t.scale_by(Vec3::new(2.0, 1.0, 1.0));
        t.rotate(Vec3::new(0.0, 0.0, FRAC_PI_2));
        // x-axis point is stretched to 2, rolled onto +Y, then offset.
        let p = t.world_matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 2.0, 10.0), EPS));
    }

    #[test]
    fn cached_matrix_refreshes_after_mutation() {
        let mut t = Transform::new();
        let before = t.world_matrix();
        t.move_absolute(Vec3::X);
        let after = t.world_matrix();
        assert_ne!(before, after);
        assert_eq!(after, t.world_matrix());
    }

    #[test]
    fn setters_replace_fields_and_refresh_caches() {
        let mut t = Transform::new();
        t.scale_by(Vec3::splat(3.0));
        t.set_scale(Vec3::splat(2.0));
        assert_eq!(t.scale(), Vec3::splat(2.0));

        let _ = t.forward();
        t.set_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert!(t.forward().abs_diff_eq(Vec3::X, EPS));

        let p = t.world_matrix().transform_point3(Vec3::Z);
        assert!(p.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn pitch_is_not_clamped() {
        // Rotating past the pole is accepted; the forward vector flips over.
        let mut t = Transform::new();
        t.rotate(Vec3::new(std::f32::consts::PI, 0.0, 0.0));
        assert!((t.rotation().x - std::f32::consts::PI).abs() < EPS);
        assert!(t.forward().abs_diff_eq(-Vec3::Z, 1e-4));
        assert!(t.up().abs_diff_eq(-Vec3::Y, 1e-4));
    }
}
