use glam::Vec3;

use shared::ObjectId;

use super::mesh::MeshData;
use crate::state::scene::SceneGraph;

/// A ray in world space
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Axis-aligned bounding box
#[derive(Clone, Copy)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB from MeshData (9 floats per vertex: pos+normal+color)
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        let verts = &data.vertices;
        let stride = 9;
        let count = verts.len() / stride;

        for i in 0..count {
            let base = i * stride;
            let p = Vec3::new(verts[base], verts[base + 1], verts[base + 2]);
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    // Outside triangle (u)
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    // Outside triangle (v)
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Distance to the nearest triangle of a mesh hit by the ray, or None.
pub fn mesh_hit_distance(ray: &Ray, mesh: &MeshData) -> Option<f32> {
    let stride = 9;
    let indices = &mesh.indices;
    let verts = &mesh.vertices;
    let tri_count = indices.len() / 3;

    let mut best: Option<f32> = None;

    for tri_idx in 0..tri_count {
        let i0 = indices[tri_idx * 3] as usize;
        let i1 = indices[tri_idx * 3 + 1] as usize;
        let i2 = indices[tri_idx * 3 + 2] as usize;

        let v0 = Vec3::new(
            verts[i0 * stride],
            verts[i0 * stride + 1],
            verts[i0 * stride + 2],
        );
        let v1 = Vec3::new(
            verts[i1 * stride],
            verts[i1 * stride + 1],
            verts[i1 * stride + 2],
        );
        let v2 = Vec3::new(
            verts[i2 * stride],
            verts[i2 * stride + 1],
            verts[i2 * stride + 2],
        );

        if let Some(dist) = ray_triangle_intersect(ray, v0, v1, v2) {
            if best.is_none_or(|b| dist < b) {
                best = Some(dist);
            }
        }
    }

    best
}

/// Pick the object nearest to the ray origin. Objects are tested in
/// insertion order; a later object replaces an earlier one only with a
/// strictly smaller distance, so exact ties resolve to the earlier
/// insertion. The outline shell is never part of the candidate set.
pub fn pick(ray: &Ray, scene: &SceneGraph) -> Option<ObjectId> {
    let mut best: Option<(ObjectId, f32)> = None;

    for object in scene.iter() {
        let world = object.world_mesh();
        // AABB prefilter, exact triangle test for the actual hit
        if ray_aabb(ray, &Aabb::from_mesh(&world)).is_none() {
            continue;
        }
        if let Some(dist) = mesh_hit_distance(ray, &world) {
            if best.as_ref().is_none_or(|(_, d)| dist < *d) {
                best = Some((object.id().clone(), dist));
            }
        }
    }

    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Primitive, PrimitiveKind, Transform};

    use crate::state::scene::SceneObject;

    fn cube_at(x: f64, y: f64, z: f64) -> SceneObject {
        let mut t = Transform::new();
        t.position = [x, y, z];
        SceneObject::new(Primitive::default_for(PrimitiveKind::Cube), t)
    }

    fn ray_down_z() -> Ray {
        Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        }
    }

    #[test]
    fn test_ray_aabb_hit_and_miss() {
        let aabb = Aabb {
            min: Vec3::splat(-0.5),
            max: Vec3::splat(0.5),
        };
        assert!(ray_aabb(&ray_down_z(), &aabb).is_some());

        let miss = Ray {
            origin: Vec3::new(5.0, 5.0, 10.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        assert!(ray_aabb(&miss, &aabb).is_none());
    }

    #[test]
    fn test_ray_triangle_hit_distance() {
        let d = ray_triangle_intersect(
            &ray_down_z(),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        assert!((d - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_triangle_behind_origin() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, -10.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        assert!(ray_triangle_intersect(
            &ray,
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn test_pick_empty_scene() {
        let scene = SceneGraph::new();
        assert!(pick(&ray_down_z(), &scene).is_none());
    }

    #[test]
    fn test_pick_miss_all() {
        let mut scene = SceneGraph::new();
        scene.add(cube_at(100.0, 0.0, 0.0));
        assert!(pick(&ray_down_z(), &scene).is_none());
    }

    #[test]
    fn test_pick_nearest_of_two() {
        let mut scene = SceneGraph::new();
        let far = scene.add(cube_at(0.0, 0.0, -5.0));
        let near = scene.add(cube_at(0.0, 0.0, 5.0));
        let _ = far;
        assert_eq!(pick(&ray_down_z(), &scene), Some(near));
    }

    #[test]
    fn test_pick_tie_resolves_to_earlier_insertion() {
        // Two identical cubes at the same place: equal hit distances
        let mut scene = SceneGraph::new();
        let first = scene.add(cube_at(0.0, 0.0, 0.0));
        scene.add(cube_at(0.0, 0.0, 0.0));
        assert_eq!(pick(&ray_down_z(), &scene), Some(first));
    }
}
