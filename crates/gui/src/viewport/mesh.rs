use glam::{EulerRot, Mat4, Vec3};
use shared::Transform;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

// ── Primitive generation ─────────────────────────────────────

pub fn cube(w: f32, h: f32, d: f32, color: [f32; 3]) -> MeshData {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut vertices = Vec::with_capacity(24 * 9);
    let mut indices = Vec::with_capacity(36);

    for (quad, normal) in &faces {
        let base = (vertices.len() / 9) as u32;
        for v in quad {
            vertices.extend_from_slice(&[v.x, v.y, v.z, normal.x, normal.y, normal.z, color[0], color[1], color[2]]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

pub fn sphere(radius: f32, rings: u32, sectors: u32, color: [f32; 3]) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        let sp = phi.sin();
        let cp = phi.cos();

        for s in 0..=sectors {
            let theta = std::f32::consts::TAU * s as f32 / sectors as f32;
            let st = theta.sin();
            let ct = theta.cos();

            let x = sp * ct;
            let y = cp;
            let z = sp * st;

            let n = Vec3::new(x, y, z);
            push_vert(&mut vertices, radius * x, radius * y, radius * z, n, color);
        }
    }

    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    MeshData { vertices, indices }
}

pub fn cylinder(radius: f32, height: f32, segments: u32, color: [f32; 3]) -> MeshData {
    let hh = height * 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side faces
    for i in 0..segments {
        let a0 = (i as f32) * std::f32::consts::TAU / segments as f32;
        let a1 = ((i + 1) as f32) * std::f32::consts::TAU / segments as f32;

        let c0 = a0.cos();
        let s0 = a0.sin();
        let c1 = a1.cos();
        let s1 = a1.sin();

        let n0 = Vec3::new(c0, 0.0, s0);
        let n1 = Vec3::new(c1, 0.0, s1);

        let base = (vertices.len() / 9) as u32;

        push_vert(&mut vertices, radius * c0, -hh, radius * s0, n0, color);
        push_vert(&mut vertices, radius * c1, -hh, radius * s1, n1, color);
        push_vert(&mut vertices, radius * c1, hh, radius * s1, n1, color);
        push_vert(&mut vertices, radius * c0, hh, radius * s0, n0, color);

        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    add_cap(&mut vertices, &mut indices, radius, hh, segments, Vec3::Y, color);
    add_cap_reversed(&mut vertices, &mut indices, radius, -hh, segments, Vec3::NEG_Y, color);

    MeshData { vertices, indices }
}

/// Flat quad in the XY plane, centered at the origin, normal along +Z.
/// Both winding directions are emitted so it stays visible from behind.
pub fn plane(width: f32, height: f32, color: [f32; 3]) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;

    let mut vertices = Vec::with_capacity(8 * 9);
    let mut indices = Vec::with_capacity(12);

    let corners = [
        Vec3::new(-hw, -hh, 0.0),
        Vec3::new(hw, -hh, 0.0),
        Vec3::new(hw, hh, 0.0),
        Vec3::new(-hw, hh, 0.0),
    ];

    for v in &corners {
        push_vert(&mut vertices, v.x, v.y, v.z, Vec3::Z, color);
    }
    indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);

    for v in &corners {
        push_vert(&mut vertices, v.x, v.y, v.z, Vec3::NEG_Z, color);
    }
    indices.extend_from_slice(&[4, 6, 5, 4, 7, 6]);

    MeshData { vertices, indices }
}

pub fn cone(radius: f32, height: f32, segments: u32, color: [f32; 3]) -> MeshData {
    let hh = height * 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let slope = radius / height;
    for i in 0..segments {
        let a0 = (i as f32) * std::f32::consts::TAU / segments as f32;
        let a1 = ((i + 1) as f32) * std::f32::consts::TAU / segments as f32;

        let c0 = a0.cos();
        let s0 = a0.sin();
        let c1 = a1.cos();
        let s1 = a1.sin();

        let n0 = Vec3::new(c0, slope, s0).normalize();
        let n1 = Vec3::new(c1, slope, s1).normalize();
        let n_top = (n0 + n1).normalize();

        let base = (vertices.len() / 9) as u32;

        push_vert(&mut vertices, 0.0, hh, 0.0, n_top, color); // apex
        push_vert(&mut vertices, radius * c0, -hh, radius * s0, n0, color);
        push_vert(&mut vertices, radius * c1, -hh, radius * s1, n1, color);

        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    add_cap_reversed(&mut vertices, &mut indices, radius, -hh, segments, Vec3::NEG_Y, color);

    MeshData { vertices, indices }
}

/// Torus around the Z axis: ring radius + tube radius, `segments`
/// subdivisions both around the ring and around the tube.
pub fn torus(radius: f32, tube_radius: f32, segments: u32, color: [f32; 3]) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for i in 0..=segments {
        let u = (i as f32) * std::f32::consts::TAU / segments as f32;
        let cu = u.cos();
        let su = u.sin();
        // Center of the tube circle for this ring angle
        let ring = Vec3::new(radius * cu, radius * su, 0.0);

        for j in 0..=segments {
            let v = (j as f32) * std::f32::consts::TAU / segments as f32;
            let cv = v.cos();
            let sv = v.sin();

            let n = Vec3::new(cu * cv, su * cv, sv);
            let p = ring + n * tube_radius;
            push_vert(&mut vertices, p.x, p.y, p.z, n, color);
        }
    }

    let stride = segments + 1;
    for i in 0..segments {
        for j in 0..segments {
            let i0 = i * stride + j;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    MeshData { vertices, indices }
}

// ── Mesh transforms ──────────────────────────────────────────

/// Model matrix for an object transform (rotation stored in degrees)
pub fn model_matrix(transform: &Transform) -> Mat4 {
    let t = Vec3::new(
        transform.position[0] as f32,
        transform.position[1] as f32,
        transform.position[2] as f32,
    );
    let rot = Mat4::from_euler(
        EulerRot::XYZ,
        (transform.rotation[0] as f32).to_radians(),
        (transform.rotation[1] as f32).to_radians(),
        (transform.rotation[2] as f32).to_radians(),
    );
    Mat4::from_translation(t) * rot
}

/// Bake an object transform into a local-space mesh, producing a
/// world-space copy. Normals get the rotation only.
pub fn transformed(data: &MeshData, transform: &Transform) -> MeshData {
    let model = model_matrix(transform);
    let mut vertices = Vec::with_capacity(data.vertices.len());

    for chunk in data.vertices.chunks_exact(9) {
        let p = model.transform_point3(Vec3::new(chunk[0], chunk[1], chunk[2]));
        let n = model.transform_vector3(Vec3::new(chunk[3], chunk[4], chunk[5]));
        vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, chunk[6], chunk[7], chunk[8]]);
    }

    MeshData {
        vertices,
        indices: data.indices.clone(),
    }
}

/// Uniformly inflate a mesh about its local origin and recolor it.
/// Used for the selection outline shell.
pub fn inflated(data: &MeshData, factor: f32, color: [f32; 3]) -> MeshData {
    let mut vertices = Vec::with_capacity(data.vertices.len());

    for chunk in data.vertices.chunks_exact(9) {
        vertices.extend_from_slice(&[
            chunk[0] * factor,
            chunk[1] * factor,
            chunk[2] * factor,
            chunk[3],
            chunk[4],
            chunk[5],
            color[0],
            color[1],
            color[2],
        ]);
    }

    MeshData {
        vertices,
        indices: data.indices.clone(),
    }
}

// ── Grid and axes ────────────────────────────────────────────

pub fn grid(range: i32, cell_size: f32, opacity: f32) -> LineMeshData {
    let mut vertices = Vec::new();
    let grid_color = [0.25_f32, 0.25, 0.25, opacity];
    let origin_color_x = [0.5_f32, 0.2, 0.2, opacity * 0.7];
    let origin_color_z = [0.2_f32, 0.2, 0.5, opacity * 0.7];

    let extent = range as f32 * cell_size;

    for i in -range..=range {
        let f = i as f32 * cell_size;
        let color = if i == 0 { origin_color_z } else { grid_color };
        // Line along Z
        push_line_vert(&mut vertices, f, 0.0, -extent, color);
        push_line_vert(&mut vertices, f, 0.0, extent, color);

        let color = if i == 0 { origin_color_x } else { grid_color };
        // Line along X
        push_line_vert(&mut vertices, -extent, 0.0, f, color);
        push_line_vert(&mut vertices, extent, 0.0, f, color);
    }

    LineMeshData { vertices }
}

pub fn axes(length: f32) -> LineMeshData {
    let mut vertices = Vec::new();
    let r = [0.9_f32, 0.2, 0.2, 1.0];
    let g = [0.2_f32, 0.8, 0.2, 1.0];
    let b = [0.2_f32, 0.3, 0.9, 1.0];

    // X axis
    push_line_vert(&mut vertices, 0.0, 0.0, 0.0, r);
    push_line_vert(&mut vertices, length, 0.0, 0.0, r);
    // Y axis
    push_line_vert(&mut vertices, 0.0, 0.0, 0.0, g);
    push_line_vert(&mut vertices, 0.0, length, 0.0, g);
    // Z axis
    push_line_vert(&mut vertices, 0.0, 0.0, 0.0, b);
    push_line_vert(&mut vertices, 0.0, 0.0, length, b);

    LineMeshData { vertices }
}

// ── Helpers ──────────────────────────────────────────────────

fn push_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[px, py, pz, n.x, n.y, n.z, c[0], c[1], c[2]]);
}

fn push_line_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, c: [f32; 4]) {
    v.extend_from_slice(&[px, py, pz, c[0], c[1], c[2], c[3]]);
}

fn add_cap(
    vertices: &mut Vec<f32>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    segments: u32,
    normal: Vec3,
    color: [f32; 3],
) {
    let center_idx = (vertices.len() / 9) as u32;
    push_vert(vertices, 0.0, y, 0.0, normal, color);

    for i in 0..segments {
        let angle = (i as f32) * std::f32::consts::TAU / segments as f32;
        push_vert(vertices, radius * angle.cos(), y, radius * angle.sin(), normal, color);
    }

    for i in 0..segments {
        let next = (i + 1) % segments;
        indices.extend_from_slice(&[center_idx, center_idx + 1 + i, center_idx + 1 + next]);
    }
}

fn add_cap_reversed(
    vertices: &mut Vec<f32>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    segments: u32,
    normal: Vec3,
    color: [f32; 3],
) {
    let center_idx = (vertices.len() / 9) as u32;
    push_vert(vertices, 0.0, y, 0.0, normal, color);

    for i in 0..segments {
        let angle = (i as f32) * std::f32::consts::TAU / segments as f32;
        push_vert(vertices, radius * angle.cos(), y, radius * angle.sin(), normal, color);
    }

    for i in 0..segments {
        let next = (i + 1) % segments;
        indices.extend_from_slice(&[center_idx, center_idx + 1 + next, center_idx + 1 + i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(mesh: &MeshData) -> Vec<Vec3> {
        mesh.vertices
            .chunks_exact(9)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect()
    }

    #[test]
    fn test_cube_extents() {
        let m = cube(2.0, 4.0, 6.0, [0.0, 1.0, 0.0]);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.triangle_count(), 12);
        for p in positions(&m) {
            assert!(p.x.abs() <= 1.0 + 1e-6);
            assert!(p.y.abs() <= 2.0 + 1e-6);
            assert!(p.z.abs() <= 3.0 + 1e-6);
        }
    }

    #[test]
    fn test_sphere_on_radius() {
        let m = sphere(2.0, 8, 8, [0.0, 1.0, 0.0]);
        for p in positions(&m) {
            assert!((p.length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_torus_distance_from_ring() {
        let m = torus(1.0, 0.4, 8, [0.0, 1.0, 0.0]);
        for p in positions(&m) {
            // Distance from the ring circle must equal the tube radius
            let ring = Vec3::new(p.x, p.y, 0.0).normalize_or_zero();
            let d = (p - ring).length();
            assert!((d - 0.4).abs() < 1e-4, "distance {d}");
        }
    }

    #[test]
    fn test_plane_two_sided() {
        let m = plane(1.0, 1.0, [0.0, 1.0, 0.0]);
        assert_eq!(m.vertex_count(), 8);
        assert_eq!(m.triangle_count(), 4);
    }

    #[test]
    fn test_transformed_translation() {
        let m = cube(1.0, 1.0, 1.0, [0.0, 1.0, 0.0]);
        let t = Transform {
            position: [1.0, 2.0, 3.0],
            rotation: [0.0, 0.0, 0.0],
        };
        let w = transformed(&m, &t);
        let local = positions(&m);
        let world = positions(&w);
        for (l, w) in local.iter().zip(&world) {
            assert!((*l + Vec3::new(1.0, 2.0, 3.0) - *w).length() < 1e-5);
        }
    }

    #[test]
    fn test_transformed_rotation_x90() {
        // A plane rotated 90 deg about X must end up horizontal
        let m = plane(2.0, 2.0, [0.0, 1.0, 0.0]);
        let t = Transform {
            position: [0.0, 0.0, 0.0],
            rotation: [90.0, 0.0, 0.0],
        };
        let w = transformed(&m, &t);
        for p in positions(&w) {
            assert!(p.y.abs() < 1e-5, "expected y close to 0, got {}", p.y);
        }
    }

    #[test]
    fn test_inflated_scales_positions() {
        let m = cube(2.0, 2.0, 2.0, [0.0, 1.0, 0.0]);
        let o = inflated(&m, 1.05, [1.0, 0.5, 0.0]);
        let orig = positions(&m);
        let out = positions(&o);
        for (a, b) in orig.iter().zip(&out) {
            assert!((*a * 1.05 - *b).length() < 1e-5);
        }
        // Color replaced
        assert_eq!(&o.vertices[6..9], &[1.0, 0.5, 0.0]);
    }
}
