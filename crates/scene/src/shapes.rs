//! Built-in geometry. Everything lies in the z = 0 plane with clockwise
//! winding as seen from `-Z`, the default camera side.

use prism_render::Vertex;

pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
pub const MAGENTA: [f32; 4] = [0.5, 0.0, 0.5, 1.0];

/// Single triangle centred on the origin.
pub fn triangle() -> (Vec<Vertex>, Vec<u32>) {
    let vertices = vec![
        Vertex::new([0.0, 0.5, 0.0], RED),
        Vertex::new([0.5, -0.5, 0.0], BLUE),
        Vertex::new([-0.5, -0.5, 0.0], GREEN),
    ];
    (vertices, vec![0, 1, 2])
}

/// Unit square centred on (1, 1).
pub fn quad() -> (Vec<Vertex>, Vec<u32>) {
    #[rustfmt::skip]
    let vertices = vec![
        Vertex::new([0.5, 1.5, 0.0], RED),
        Vertex::new([1.5, 1.5, 0.0], BLUE),
        Vertex::new([1.5, 0.5, 0.0], RED),
        Vertex::new([0.5, 0.5, 0.0], BLUE),
    ];
    (vertices, vec![0, 1, 2, 0, 2, 3])
}

/// Diamond of half-width 0.3 centred on (-0.5, 0.5).
///
/// Two triangles split along the horizontal diagonal. The list is exactly
/// six indices; a trailing lone index would not form a triangle.
pub fn diamond() -> (Vec<Vertex>, Vec<u32>) {
    #[rustfmt::skip]
    let vertices = vec![
        Vertex::new([-0.5, 0.8, 0.0], RED),     // top
        Vertex::new([-0.2, 0.5, 0.0], BLUE),    // right
        Vertex::new([-0.8, 0.5, 0.0], GREEN),   // left
        Vertex::new([-0.5, 0.2, 0.0], MAGENTA), // bottom
    ];
    (vertices, vec![2, 0, 1, 2, 1, 3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn assert_valid(name: &str, (vertices, indices): (Vec<Vertex>, Vec<u32>)) {
        assert_eq!(indices.len() % 3, 0, "{name}: partial triangle");
        assert!(
            indices.iter().all(|&i| (i as usize) < vertices.len()),
            "{name}: index out of range"
        );
        for tri in indices.chunks(3) {
            let corner = |i: u32| Vec3::from(vertices[i as usize].position);
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(corner);
            // Clockwise in x/y means the z of the cross product is negative.
            assert!((b - a).cross(c - a).z < 0.0, "{name}: winding of {tri:?}");
        }
    }

    #[test]
    fn builtin_shapes_are_valid_clockwise_triangle_lists() {
        assert_valid("triangle", triangle());
        assert_valid("quad", quad());
        assert_valid("diamond", diamond());
    }

    #[test]
    fn diamond_has_two_triangles() {
        let (vertices, indices) = diamond();
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices.len(), 6);
    }
}
