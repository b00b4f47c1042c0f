//! # Container-Fitting Layout Engine
//!
//! Populates an arbitrarily-shaped, asynchronously-loaded container model
//! with book-like items arranged in rows and columns, with randomized
//! recessed and stacked companions.
//!
//! ## Pipeline
//!
//! 1. [`bounds`] - resolve the container's usable volume in the anchor's
//!    local frame (requires up-to-date world transforms)
//! 2. [`grid`] - partition the padded interior into rows x cols cells
//! 3. [`placement`] - walk the grid and emit an ordered placement sequence
//!    from an injected, seedable RNG
//! 4. [`factory`] - instantiate each placement as a pickable scene object
//!
//! [`layout_contents`] runs the whole pipeline against a scene graph. It is
//! an idempotent replace: re-running it for the same anchor clears the
//! previously generated contents group before attaching anything.
//!
//! ## Usage
//!
//! ```
//! use folio::catalog::Catalog;
//! use folio::geometry::generate_shelf;
//! use folio::layout::{layout_contents, LayoutConfig};
//! use folio::scene::{Object, SceneGraph};
//! use cgmath::{Matrix4, SquareMatrix};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut scene = SceneGraph::new();
//! let anchor = scene.add_group(scene.root(), "shelf-anchor", Matrix4::identity());
//! let container = scene.add_object(
//!     anchor,
//!     Object::new("shelf", vec![generate_shelf(4.0, 5.0, 0.8, 4)]),
//!     Matrix4::identity(),
//! );
//!
//! let catalog = Catalog::builtin();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let placed = layout_contents(
//!     &mut scene,
//!     anchor,
//!     container,
//!     &catalog,
//!     &LayoutConfig::default(),
//!     &mut rng,
//! )
//! .unwrap();
//! assert!(placed > 0);
//! ```

pub mod bounds;
pub mod factory;
pub mod grid;
pub mod placement;

pub use bounds::{resolve_container_volume, subtree_world_aabb};
pub use factory::{create_item, nominal_item_size, probe_size};
pub use grid::{interior_volume, partition, GridCell};
pub use placement::{generate_placements, PlacementKind, PlacementRecord};

use cgmath::Vector3;
use log::{debug, warn};
use rand::Rng;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::scene::{NodeId, SceneGraph};

/// Name of the anchor child group that holds generated items
pub const CONTENTS_GROUP: &str = "shelf-contents";

/// Which face of the container volume items sit flush against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontFace {
    /// The browsing side faces positive Z
    #[default]
    PosZ,
    /// The browsing side faces negative Z
    NegZ,
}

/// Configuration for one layout invocation
///
/// Immutable for the duration of a call. Defaults match the storefront
/// shelves: a 3x8 grid, light padding, roughly a third of cells with a
/// recessed companion, a quarter with a stacked one, and the original
/// scene's ±0.04 rad spine tilt.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal bands the interior height is split into
    pub rows: u32,
    /// Vertical slices the interior width is split into
    pub cols: u32,
    /// Interior margin subtracted from the volume on every side
    pub padding: Vector3<f32>,
    /// Which depth face items align with
    pub front_face: FrontFace,
    /// Uniform vertical offset applied to every anchor
    pub y_lift: f32,
    /// Extra vertical offset per row index
    pub row_lift: f32,
    /// Where the anchor sits within a band's vertical slack, 0 = resting
    pub y_position_in_cell: f32,
    /// Items per cell; above 1.0 buys a pool of scattered extras
    pub density: f32,
    /// Probability of a recessed companion per cell
    pub extra_item_chance: f32,
    /// Probability of a laid-flat companion per cell
    pub stack_chance: f32,
    /// Uniform scale applied to the nominal item size
    pub base_scale: f32,
    /// Yaw jitter bound for upright items, radians
    pub tilt_radians: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 8,
            padding: Vector3::new(0.05, 0.05, 0.05),
            front_face: FrontFace::PosZ,
            y_lift: 0.0,
            row_lift: 0.0,
            y_position_in_cell: 0.0,
            density: 1.0,
            extra_item_chance: 0.35,
            stack_chance: 0.25,
            base_scale: 1.0,
            tilt_radians: 0.04,
        }
    }
}

/// Hard layout failures
///
/// Everything else (missing geometry, degenerate grids, failed loads)
/// degrades to an empty shelf; an empty catalog is a configuration error
/// and is rejected before any placement is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("content catalog is empty, cyclic indexing is undefined")]
    EmptyCatalog,
}

/// Runs the full layout pipeline for one container
///
/// Measures the geometry under `container` in `anchor`'s local frame, grids
/// it, generates placements from `rng`, and attaches the resulting items to
/// the anchor's contents group, replacing whatever a previous run left
/// there. Returns the number of items attached; degraded outcomes return
/// `Ok(0)`.
pub fn layout_contents<R: Rng>(
    scene: &mut SceneGraph,
    anchor: NodeId,
    container: NodeId,
    catalog: &Catalog,
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<usize, LayoutError> {
    if catalog.is_empty() {
        return Err(LayoutError::EmptyCatalog);
    }

    scene.update_world_transforms();

    // Replace, never accumulate: prior generated content goes first, even
    // when this run ends up placing nothing.
    let contents = scene.ensure_child_group(anchor, CONTENTS_GROUP);
    scene.clear_children(contents);

    let Some(volume) = resolve_container_volume(scene, anchor, container) else {
        warn!(
            "container '{}' has no geometry, placing nothing",
            scene.name(container)
        );
        return Ok(0);
    };

    let Some(interior) = interior_volume(&volume, config.padding) else {
        warn!(
            "padding exceeds container '{}' extents, placing nothing",
            scene.name(container)
        );
        return Ok(0);
    };

    let cells = partition(&interior, config.rows, config.cols);
    if cells.is_empty() {
        return Ok(0);
    }

    let probe = probe_size(config.base_scale);
    let placements = generate_placements(&interior, &cells, probe, catalog.len(), config, rng);

    for placement in &placements {
        let record = catalog.get(placement.content_index);
        let (object, transform) =
            create_item(placement, record, config.base_scale, &mut scene.materials);
        scene.add_object(contents, object, transform);
    }

    debug!(
        "laid out {} item(s) over {} cell(s) under anchor '{}'",
        placements.len(),
        cells.len(),
        scene.name(anchor)
    );

    Ok(placements.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::generate_shelf;
    use crate::scene::Object;
    use cgmath::{Matrix4, Rad, SquareMatrix};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f32::consts::FRAC_PI_2;

    fn shelf_scene() -> (SceneGraph, NodeId, NodeId) {
        let mut scene = SceneGraph::new();
        let anchor = scene.add_group(
            scene.root(),
            "anchor",
            Matrix4::from_translation(cgmath::Vector3::new(-15.0, 0.0, -8.0))
                * Matrix4::from_angle_y(Rad(FRAC_PI_2)),
        );
        let container = scene.add_object(
            anchor,
            Object::new("shelf", vec![generate_shelf(4.0, 5.0, 0.8, 4)]),
            Matrix4::identity(),
        );
        (scene, anchor, container)
    }

    #[test]
    fn test_layout_places_items() {
        let (mut scene, anchor, container) = shelf_scene();
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let placed = layout_contents(
            &mut scene,
            anchor,
            container,
            &catalog,
            &LayoutConfig::default(),
            &mut rng,
        )
        .unwrap();

        assert!(placed >= 24); // at least one primary per cell
        let contents = scene.ensure_child_group(anchor, CONTENTS_GROUP);
        assert_eq!(scene.children(contents).len(), placed);

        // Every generated item is pickable
        for &child in scene.children(contents) {
            let object = scene.object(child).unwrap();
            assert!(object.is_clickable());
        }
    }

    #[test]
    fn test_relayout_replaces_not_accumulates() {
        let (mut scene, anchor, container) = shelf_scene();
        let catalog = Catalog::builtin();
        let config = LayoutConfig::default();

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let first =
            layout_contents(&mut scene, anchor, container, &catalog, &config, &mut rng).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let second =
            layout_contents(&mut scene, anchor, container, &catalog, &config, &mut rng).unwrap();

        assert_eq!(first, second);
        let contents = scene.ensure_child_group(anchor, CONTENTS_GROUP);
        assert_eq!(scene.children(contents).len(), second);
    }

    #[test]
    fn test_empty_catalog_fails_fast() {
        let (mut scene, anchor, container) = shelf_scene();
        let catalog = Catalog::new(Vec::new());
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let result = layout_contents(
            &mut scene,
            anchor,
            container,
            &catalog,
            &LayoutConfig::default(),
            &mut rng,
        );

        assert_eq!(result, Err(LayoutError::EmptyCatalog));
    }

    #[test]
    fn test_empty_container_degrades_to_zero() {
        let mut scene = SceneGraph::new();
        let anchor = scene.add_group(scene.root(), "anchor", Matrix4::identity());
        let container = scene.add_group(anchor, "shelf", Matrix4::identity());
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let placed = layout_contents(
            &mut scene,
            anchor,
            container,
            &catalog,
            &LayoutConfig::default(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(placed, 0);
    }

    #[test]
    fn test_oversized_padding_degrades_to_zero() {
        let (mut scene, anchor, container) = shelf_scene();
        let catalog = Catalog::builtin();
        let config = LayoutConfig {
            padding: Vector3::new(3.0, 3.0, 3.0),
            ..LayoutConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let placed =
            layout_contents(&mut scene, anchor, container, &catalog, &config, &mut rng).unwrap();

        assert_eq!(placed, 0);
        // A prior run's content is still cleared
        let contents = scene.ensure_child_group(anchor, CONTENTS_GROUP);
        assert!(scene.children(contents).is_empty());
    }

    #[test]
    fn test_independent_containers_do_not_interfere() {
        let mut scene = SceneGraph::new();
        let catalog = Catalog::builtin();
        let config = LayoutConfig::default();

        let anchor_a = scene.add_group(scene.root(), "a", Matrix4::identity());
        let shelf_a = scene.add_object(
            anchor_a,
            Object::new("shelf-a", vec![generate_shelf(4.0, 5.0, 0.8, 4)]),
            Matrix4::identity(),
        );
        let anchor_b = scene.add_group(
            scene.root(),
            "b",
            Matrix4::from_translation(cgmath::Vector3::new(8.0, 0.0, 0.0)),
        );
        let shelf_b = scene.add_object(
            anchor_b,
            Object::new("shelf-b", vec![generate_shelf(4.0, 5.0, 0.8, 4)]),
            Matrix4::identity(),
        );

        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let placed_a =
            layout_contents(&mut scene, anchor_a, shelf_a, &catalog, &config, &mut rng).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let placed_b =
            layout_contents(&mut scene, anchor_b, shelf_b, &catalog, &config, &mut rng).unwrap();

        // Same seed, same shelf: the layouts match even though another
        // container was laid out in between
        assert_eq!(placed_a, placed_b);
    }
}
