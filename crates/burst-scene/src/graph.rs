//! SceneGraph - node hierarchy backed by a hecs world

use crate::mesh::Mesh;
use crate::node::NodeInfo;
use bimap::BiMap;
use burst_core::{BurstError, NodeId, Result, Transform, Vec3};
use std::collections::HashMap;

/// Human-readable node name component
struct NodeName(String);

/// Visibility flag component
struct Visible(bool);

/// The scene graph
///
/// Wraps hecs::World with:
/// - Stable NodeId mapping
/// - Ordered parent/child links
/// - World-space matrix queries
///
/// World matrices are never cached. Every query walks the parent chain and
/// multiplies the current local transforms, so a query right after a
/// transform or hierarchy change always sees the change.
pub struct SceneGraph {
    world: hecs::World,
    /// Bidirectional mapping: NodeId <-> hecs::Entity
    id_map: BiMap<NodeId, hecs::Entity>,
    /// child -> parent
    parents: HashMap<NodeId, NodeId>,
    /// parent -> children, in attach order
    children: HashMap<NodeId, Vec<NodeId>>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            world: hecs::World::new(),
            id_map: BiMap::new(),
            parents: HashMap::new(),
            children: HashMap::new(),
        }
    }

    /// Spawn an empty, unattached node with identity transform
    pub fn spawn(&mut self, name: impl Into<String>) -> NodeId {
        let entity = self.world.spawn((
            NodeName(name.into()),
            Transform::IDENTITY,
            Visible(true),
        ));
        let id = NodeId::new();
        self.id_map.insert(id, entity);
        id
    }

    /// Spawn an unattached node that renders a mesh
    pub fn spawn_mesh(&mut self, name: impl Into<String>, mesh: Mesh) -> NodeId {
        let id = self.spawn(name);
        if let Some(entity) = self.id_map.get_by_left(&id) {
            // The entity was spawned just above, so the insert cannot miss.
            let _ = self.world.insert_one(*entity, mesh);
        }
        id
    }

    /// Despawn a node. It is detached from its parent and its children
    /// become roots.
    pub fn despawn(&mut self, id: NodeId) -> Result<()> {
        let entity = self.entity(id)?;

        self.detach(id);
        if let Some(orphans) = self.children.remove(&id) {
            for child in orphans {
                self.parents.remove(&child);
            }
        }

        self.world
            .despawn(entity)
            .map_err(|_| BurstError::NodeNotFound(id))?;
        self.id_map.remove_by_left(&id);
        Ok(())
    }

    /// Attach `child` under `parent`, detaching it from any previous parent.
    /// Re-adding an existing child moves it to the end of the child list.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.entity(parent)?;
        self.entity(child)?;

        if parent == child || self.is_ancestor(child, parent) {
            return Err(BurstError::HierarchyCycle { parent, child });
        }

        self.detach(child);
        self.parents.insert(child, parent);
        self.children.entry(parent).or_default().push(child);
        Ok(())
    }

    /// Remove `child` from `parent`. Returns false if it was not a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        self.entity(parent)?;
        self.entity(child)?;

        if self.parents.get(&child) != Some(&parent) {
            return Ok(false);
        }
        self.detach(child);
        Ok(true)
    }

    /// Detach a node from its parent, returning the former parent
    pub fn detach(&mut self, child: NodeId) -> Option<NodeId> {
        let parent = self.parents.remove(&child)?;
        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.retain(|c| *c != child);
            if siblings.is_empty() {
                self.children.remove(&parent);
            }
        }
        Some(parent)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// True if `ancestor` appears on `node`'s parent chain
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parents.get(&node);
        while let Some(p) = current {
            if *p == ancestor {
                return true;
            }
            current = self.parents.get(p);
        }
        false
    }

    pub fn name(&self, id: NodeId) -> Option<String> {
        let entity = self.entity(id).ok()?;
        let name = self.world.get::<&NodeName>(entity).ok()?;
        Some(name.0.clone())
    }

    pub fn transform(&self, id: NodeId) -> Option<Transform> {
        let entity = self.entity(id).ok()?;
        let transform = self.world.get::<&Transform>(entity).ok()?;
        Some(*transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<hecs::RefMut<'_, Transform>> {
        let entity = self.entity(id).ok()?;
        self.world.get::<&mut Transform>(entity).ok()
    }

    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> Result<()> {
        let mut current = self
            .transform_mut(id)
            .ok_or(BurstError::NodeNotFound(id))?;
        *current = transform;
        Ok(())
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        let entity = self.entity(id)?;
        let mut flag = self
            .world
            .get::<&mut Visible>(entity)
            .map_err(|_| BurstError::NodeNotFound(id))?;
        flag.0 = visible;
        Ok(())
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.entity(id)
            .ok()
            .and_then(|e| self.world.get::<&Visible>(e).ok().map(|v| v.0))
            .unwrap_or(false)
    }

    pub fn mesh(&self, id: NodeId) -> Option<Mesh> {
        let entity = self.entity(id).ok()?;
        let mesh = self.world.get::<&Mesh>(entity).ok()?;
        Some(*mesh)
    }

    pub fn mesh_mut(&mut self, id: NodeId) -> Option<hecs::RefMut<'_, Mesh>> {
        let entity = self.entity(id).ok()?;
        self.world.get::<&mut Mesh>(entity).ok()
    }

    /// Local-to-world matrix, computed from the current parent chain
    pub fn world_matrix(&self, id: NodeId) -> Option<glam::Mat4> {
        let mut matrix = self.transform(id)?.to_matrix();
        let mut current = self.parents.get(&id).copied();
        while let Some(parent) = current {
            matrix = self.transform(parent)?.to_matrix() * matrix;
            current = self.parents.get(&parent).copied();
        }
        Some(matrix)
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        let matrix = self.world_matrix(id)?;
        Some(matrix.w_axis.truncate().into())
    }

    /// Express a world-space point in `id`'s local space
    pub fn world_to_local(&self, id: NodeId, point: Vec3) -> Option<Vec3> {
        let inverse = self.world_matrix(id)?.inverse();
        let local = inverse.transform_point3(point.into());
        if !local.is_finite() {
            log::debug!("world_to_local: node {id} has a degenerate world matrix");
            return None;
        }
        Some(local.into())
    }

    /// Express a point in `id`'s local space in world space
    pub fn local_to_world(&self, id: NodeId, point: Vec3) -> Option<Vec3> {
        let matrix = self.world_matrix(id)?;
        Some(matrix.transform_point3(point.into()).into())
    }

    pub fn node_info(&self, id: NodeId) -> Option<NodeInfo> {
        Some(NodeInfo {
            id,
            name: self.name(id)?,
            parent: self.parent(id),
            children: self.children(id).to_vec(),
            transform: self.transform(id)?,
            visible: self.is_visible(id),
            has_mesh: self.mesh(id).is_some(),
        })
    }

    /// All live node ids, in no particular order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.id_map.left_values().copied()
    }

    pub fn node_count(&self) -> usize {
        self.id_map.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_map.contains_left(&id)
    }

    pub fn clear(&mut self) {
        self.world.clear();
        self.id_map.clear();
        self.parents.clear();
        self.children.clear();
    }

    fn entity(&self, id: NodeId) -> Result<hecs::Entity> {
        self.id_map
            .get_by_left(&id)
            .copied()
            .ok_or(BurstError::NodeNotFound(id))
    }
}
