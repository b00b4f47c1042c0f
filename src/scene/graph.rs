//! Retained scene graph
//!
//! Nodes live in a slotted arena and form a tree of transform groups with
//! optional object payloads. Local transforms compose lazily: world matrices
//! are only valid after an explicit [`SceneGraph::update_world_transforms`]
//! pass, which callers must run before measuring geometry.

use cgmath::{Matrix4, SquareMatrix};

use crate::scene::material::MaterialManager;
use crate::scene::object::Object;

/// Handle to a node in the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: Matrix4<f32>,
    world: Matrix4<f32>,
    object: Option<Object>,
}

impl Node {
    fn group(name: &str, parent: Option<NodeId>, local: Matrix4<f32>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            local,
            world: Matrix4::identity(),
            object: None,
        }
    }
}

/// Main scene container: node tree plus centralized material storage
///
/// Accessors trust their handles: passing a [`NodeId`] whose node was removed
/// panics. A handle that may have outlived its node can be checked with
/// [`SceneGraph::contains`] first.
pub struct SceneGraph {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    root: NodeId,
    pub materials: MaterialManager,
}

impl SceneGraph {
    /// Creates a new scene graph with an identity root group
    pub fn new() -> Self {
        let root_node = Node::group("root", None, Matrix4::identity());
        Self {
            nodes: vec![Some(root_node)],
            free: Vec::new(),
            root: NodeId(0),
            materials: MaterialManager::new(),
        }
    }

    /// The root group every other node hangs off
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Adds an empty transform group under `parent`
    pub fn add_group(&mut self, parent: NodeId, name: &str, local: Matrix4<f32>) -> NodeId {
        self.insert(Node::group(name, Some(parent), local))
    }

    /// Adds an object node under `parent`, named after the object
    pub fn add_object(&mut self, parent: NodeId, object: Object, local: Matrix4<f32>) -> NodeId {
        let mut node = Node::group(&object.name, Some(parent), local);
        node.object = Some(object);
        self.insert(node)
    }

    fn insert(&mut self, node: Node) -> NodeId {
        let parent = node.parent;
        let id = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        };

        if let Some(parent) = parent {
            self.node_mut(parent).children.push(id);
        }
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.0].as_ref().expect("stale node id")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.0].as_mut().expect("stale node id")
    }

    /// True if the handle still refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).map_or(false, |slot| slot.is_some())
    }

    /// # Panics
    /// Panics if `id` is stale; see [`SceneGraph::contains`].
    pub fn name(&self, id: NodeId) -> &str {
        &self.node(id).name
    }

    /// # Panics
    /// Panics if `id` is stale; see [`SceneGraph::contains`].
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Object payload of a node, if it carries one
    ///
    /// # Panics
    /// Panics if `id` is stale; see [`SceneGraph::contains`].
    pub fn object(&self, id: NodeId) -> Option<&Object> {
        self.node(id).object.as_ref()
    }

    /// # Panics
    /// Panics if `id` is stale; see [`SceneGraph::contains`].
    pub fn local_transform(&self, id: NodeId) -> Matrix4<f32> {
        self.node(id).local
    }

    /// Replaces a node's local transform
    ///
    /// World matrices go stale until the next
    /// [`SceneGraph::update_world_transforms`] pass.
    ///
    /// # Panics
    /// Panics if `id` is stale; see [`SceneGraph::contains`].
    pub fn set_local_transform(&mut self, id: NodeId, local: Matrix4<f32>) {
        self.node_mut(id).local = local;
    }

    /// World matrix as of the last [`SceneGraph::update_world_transforms`]
    ///
    /// # Panics
    /// Panics if `id` is stale; see [`SceneGraph::contains`].
    pub fn world_transform(&self, id: NodeId) -> Matrix4<f32> {
        self.node(id).world
    }

    /// Recomputes every node's world matrix from the root down
    ///
    /// Transforms compose lazily; run this before reading
    /// [`SceneGraph::world_transform`] or measuring geometry.
    pub fn update_world_transforms(&mut self) {
        let mut stack = vec![(self.root, Matrix4::identity())];

        while let Some((id, parent_world)) = stack.pop() {
            let (world, children) = {
                let node = self.node_mut(id);
                node.world = parent_world * node.local;
                (node.world, node.children.clone())
            };

            for child in children {
                stack.push((child, world));
            }
        }
    }

    /// All node ids in the subtree rooted at `id`, depth-first, `id` included
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.node(current).children.iter().copied());
        }

        out
    }

    /// Removes a node and everything beneath it
    pub fn remove_subtree(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }

        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|&c| c != id);
        }

        for node_id in self.subtree(id) {
            self.nodes[node_id.0] = None;
            self.free.push(node_id.0);
        }
    }

    /// Removes all children of a node, keeping the node itself
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.node(id).children.clone() {
            self.remove_subtree(child);
        }
    }

    /// Finds or creates a child group with the given name
    ///
    /// Used for generated content that must be replaced wholesale on the next
    /// run rather than accumulated.
    pub fn ensure_child_group(&mut self, parent: NodeId, name: &str) -> NodeId {
        let existing = self
            .node(parent)
            .children
            .iter()
            .copied()
            .find(|&c| self.node(c).object.is_none() && self.node(c).name == name);

        match existing {
            Some(id) => id,
            None => self.add_group(parent, name, Matrix4::identity()),
        }
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Gets statistics about the scene
    pub fn statistics(&self) -> SceneStatistics {
        let mut stats = SceneStatistics {
            node_count: 0,
            object_count: 0,
            clickable_count: 0,
            total_triangles: 0,
            total_vertices: 0,
        };

        for slot in self.nodes.iter().flatten() {
            stats.node_count += 1;
            if let Some(object) = &slot.object {
                stats.object_count += 1;
                if object.is_clickable() {
                    stats.clickable_count += 1;
                }
                stats.total_triangles += object.triangle_count();
                stats.total_vertices += object.vertex_count();
            }
        }

        stats
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Scene statistics for debugging and logging
#[derive(Debug)]
pub struct SceneStatistics {
    pub node_count: usize,
    pub object_count: usize,
    pub clickable_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}
