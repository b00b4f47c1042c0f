//! Bounding volume resolution for loaded containers
//!
//! A container arrives as an arbitrary mesh hierarchy; layout needs its
//! usable volume in the anchor's local frame. The resolver measures the
//! world-space box of every mesh in the container subtree, then carries the
//! box into anchor space through the inverse of the anchor's world matrix.
//! Both steps refit the box from all 8 corners, since a transformed box is
//! not axis-aligned under rotation.
//!
//! World matrices compose lazily; callers must run
//! [`SceneGraph::update_world_transforms`] before resolving.

use cgmath::SquareMatrix;
use log::warn;

use crate::geometry::Aabb;
use crate::scene::{NodeId, SceneGraph};

/// World-space bounding box of all geometry in the subtree at `container`
///
/// `None` when the subtree carries no geometry at all (a failed or empty
/// load), which callers treat as "nothing to place".
pub fn subtree_world_aabb(scene: &SceneGraph, container: NodeId) -> Option<Aabb> {
    let mut result: Option<Aabb> = None;

    for id in scene.subtree(container) {
        let Some(object) = scene.object(id) else {
            continue;
        };
        let Some(local) = object.local_aabb() else {
            continue;
        };

        let world = local.transform(&scene.world_transform(id));
        result = Some(match result {
            Some(acc) => acc.union(&world),
            None => world,
        });
    }

    result
}

/// Resolves a container's volume in the anchor's local coordinate space
///
/// Pure with respect to the scene: reads transforms and geometry, mutates
/// nothing. `None` when the container has no geometry or the anchor's world
/// matrix is singular.
pub fn resolve_container_volume(
    scene: &SceneGraph,
    anchor: NodeId,
    container: NodeId,
) -> Option<Aabb> {
    let world_aabb = subtree_world_aabb(scene, container)?;

    let anchor_world = scene.world_transform(anchor);
    let Some(inverse) = anchor_world.invert() else {
        warn!(
            "anchor '{}' has a singular world transform, cannot resolve container volume",
            scene.name(anchor)
        );
        return None;
    };

    Some(world_aabb.transform(&inverse))
}
