//! Scene graph: ordered collection of placed objects.

use shared::{ObjectId, Primitive, Transform};

use crate::geometry;
use crate::viewport::mesh::{self, MeshData};

/// A placed object. The mesh is derived from the primitive and is only
/// ever replaced through [`SceneObject::set_primitive`], so the two
/// cannot drift apart.
#[derive(Debug, Clone)]
pub struct SceneObject {
    id: ObjectId,
    primitive: Primitive,
    pub transform: Transform,
    mesh: MeshData,
}

impl SceneObject {
    pub fn new(primitive: Primitive, transform: Transform) -> Self {
        let mesh = geometry::build_mesh(&primitive);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            primitive,
            transform,
            mesh,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// Local-space mesh (no transform applied)
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Replace the primitive and rebuild the mesh. The previous mesh is
    /// dropped here, never left dangling.
    pub fn set_primitive(&mut self, primitive: Primitive) {
        self.mesh = geometry::build_mesh(&primitive);
        self.primitive = primitive;
    }

    /// World-space copy of the mesh with the transform baked in
    pub fn world_mesh(&self) -> MeshData {
        mesh::transformed(&self.mesh, &self.transform)
    }
}

/// Ordered scene contents. Insertion order doubles as display order.
#[derive(Default)]
pub struct SceneGraph {
    objects: Vec<SceneObject>,
    /// Monotonically increasing version counter for cache invalidation
    version: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Bump the version after mutating an object in place
    pub fn notify_mutated(&mut self) {
        self.version += 1;
    }

    /// Append an object. Ids are uuid-fresh by construction.
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        debug_assert!(
            !self.objects.iter().any(|o| o.id == object.id),
            "duplicate object id in scene graph"
        );
        let id = object.id.clone();
        self.objects.push(object);
        self.version += 1;
        id
    }

    /// Remove an object by id. Removing an absent object is a no-op —
    /// deletions can race with an undo-driven scene replacement.
    pub fn remove(&mut self, id: &str) -> Option<SceneObject> {
        let pos = self.objects.iter().position(|o| o.id == id)?;
        self.version += 1;
        Some(self.objects.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    /// Objects in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove all objects. Used only by undo-driven scene replacement.
    pub fn clear(&mut self) {
        if !self.objects.is_empty() {
            self.objects.clear();
            self.version += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PrimitiveKind;

    fn cube() -> SceneObject {
        SceneObject::new(
            Primitive::default_for(PrimitiveKind::Cube),
            Transform::new(),
        )
    }

    #[test]
    fn test_add_preserves_order() {
        let mut g = SceneGraph::new();
        let a = g.add(cube());
        let b = g.add(cube());
        let ids: Vec<_> = g.iter().map(|o| o.id().clone()).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_ids_unique() {
        let mut g = SceneGraph::new();
        let a = g.add(cube());
        let b = g.add(cube());
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut g = SceneGraph::new();
        g.add(cube());
        let v = g.version();
        assert!(g.remove("no-such-id").is_none());
        assert_eq!(g.len(), 1);
        assert_eq!(g.version(), v);
    }

    #[test]
    fn test_remove_present() {
        let mut g = SceneGraph::new();
        let a = g.add(cube());
        let b = g.add(cube());
        let removed = g.remove(&a).unwrap();
        assert_eq!(*removed.id(), a);
        assert_eq!(g.len(), 1);
        assert!(g.contains(&b));
    }

    #[test]
    fn test_clear() {
        let mut g = SceneGraph::new();
        g.add(cube());
        g.add(cube());
        g.clear();
        assert!(g.is_empty());
    }

    #[test]
    fn test_set_primitive_rebuilds_mesh() {
        let mut o = cube();
        let before = o.mesh().clone();
        o.set_primitive(Primitive::Cube {
            width: 3.0,
            height: 1.0,
            depth: 1.0,
        });
        assert_ne!(before, *o.mesh());
        assert_eq!(*o.mesh(), crate::geometry::build_mesh(o.primitive()));
    }

    #[test]
    fn test_version_bumps_on_mutation() {
        let mut g = SceneGraph::new();
        let v0 = g.version();
        let id = g.add(cube());
        assert!(g.version() > v0);
        let v1 = g.version();
        g.remove(&id);
        assert!(g.version() > v1);
    }
}
