use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

/// Vertex layout shared by every mesh: position and color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Per-draw constants read by the vertex stage.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ObjectConstants {
    pub world: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub tint: [f32; 4],
}

impl ObjectConstants {
    pub fn new(world: Mat4, view: Mat4, projection: Mat4, tint: Vec4) -> Self {
        Self {
            world: world.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            tint: tint.to_array(),
        }
    }
}

/// Size of `T` rounded up to the next multiple of 16 bytes, the minimum
/// constant buffer granularity.
pub const fn constant_buffer_size<T>() -> usize {
    std::mem::size_of::<T>().div_ceil(16) * 16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C)]
    struct Odd {
        _a: [f32; 5],
    }

    #[test]
    fn constant_size_rounds_up() {
        assert_eq!(constant_buffer_size::<Odd>(), 32);
        assert_eq!(constant_buffer_size::<[f32; 4]>(), 16);
    }

    #[test]
    fn object_constants_are_aligned() {
        let size = std::mem::size_of::<ObjectConstants>();
        assert_eq!(size, 208);
        assert_eq!(constant_buffer_size::<ObjectConstants>(), size);
    }

    #[test]
    fn matrices_are_column_major() {
        let world = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let c = ObjectConstants::new(world, Mat4::IDENTITY, Mat4::IDENTITY, Vec4::ONE);
        assert_eq!(c.world[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(c.tint, [1.0; 4]);
    }
}
