//! Geometry factory: maps a primitive description to mesh data.
//!
//! Pure and deterministic — the same primitive always yields the same
//! mesh. Parameter validation happens in `shared::Primitive::from_fields`
//! before a `Primitive` value can exist, so building never fails.

use shared::Primitive;

use crate::viewport::mesh::{self, MeshData};

/// Base color for placed objects
pub const OBJECT_COLOR: [f32; 3] = [0.0, 0.8, 0.2];
/// Color of the selection outline shell
pub const OUTLINE_COLOR: [f32; 3] = [1.0, 0.6, 0.1];
/// Fixed inflation factor for the selection outline
pub const OUTLINE_SCALE: f32 = 1.05;

/// Build the mesh for a primitive.
pub fn build_mesh(primitive: &Primitive) -> MeshData {
    match *primitive {
        Primitive::Cube {
            width,
            height,
            depth,
        } => mesh::cube(width as f32, height as f32, depth as f32, OBJECT_COLOR),
        Primitive::Sphere { radius, segments } => {
            mesh::sphere(radius as f32, segments, segments, OBJECT_COLOR)
        }
        Primitive::Cylinder {
            radius,
            height,
            segments,
        } => mesh::cylinder(radius as f32, height as f32, segments, OBJECT_COLOR),
        Primitive::Plane { width, height } => {
            mesh::plane(width as f32, height as f32, OBJECT_COLOR)
        }
        Primitive::Cone {
            radius,
            height,
            segments,
        } => mesh::cone(radius as f32, height as f32, segments, OBJECT_COLOR),
        Primitive::Torus {
            radius,
            tube_radius,
            segments,
        } => mesh::torus(radius as f32, tube_radius as f32, segments, OBJECT_COLOR),
    }
}

/// Build the selection-outline mesh for a primitive: the same geometry
/// inflated by [`OUTLINE_SCALE`]. The viewport draws it back-face-only so
/// it reads as a thin rim around the object.
pub fn outline_mesh(primitive: &Primitive) -> MeshData {
    mesh::inflated(&build_mesh(primitive), OUTLINE_SCALE, OUTLINE_COLOR)
}
