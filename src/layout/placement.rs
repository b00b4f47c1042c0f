//! Placement generation
//!
//! Walks the cell grid in row-major order and emits one placement record per
//! occupant: a primary upright item per cell, probabilistic recessed and
//! laid-flat companions, and a density-driven pool of extra items scattered
//! over random cells. The RNG is injected by the caller, so a seeded source
//! reproduces the full sequence byte for byte.
//!
//! RNG draw order is part of the contract: per cell, the primary yaw comes
//! first, then the secondary roll (x jitter, scale on success), then the
//! stacked roll (yaw, x jitter on success); the extra pool draws after all
//! cells (cell pick, x jitter, z jitter, yaw, scale per item).

use cgmath::Vector3;
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

use crate::catalog::CatalogCursor;
use crate::geometry::Aabb;

use super::grid::GridCell;
use super::{FrontFace, LayoutConfig};

/// Gap between an item's front face and the container's front plane
const FRONT_CLEARANCE: f32 = 0.01;

/// Role of a placed item within its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    /// The upright item at the cell's anchor
    Primary,
    /// A recessed duplicate behind the primary
    Secondary,
    /// Laid flat atop the shelf surface
    Stacked,
    /// Density-driven bonus item
    Extra,
}

/// One abstract placement, ready for the item factory
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    /// Position in the anchor's local frame
    pub position: Vector3<f32>,
    /// Yaw about the vertical axis, radians
    pub rotation_y: f32,
    /// Roll about the depth axis, radians; `π/2` lays an item flat
    pub rotation_z: f32,
    /// Multiplier on the configured base scale
    pub scale_multiplier: f32,
    /// Cyclic catalog index
    pub content_index: usize,
    pub kind: PlacementKind,
}

/// Generates the ordered placement sequence for one layout run
///
/// `probe` is the rendered size of a nominal item at the configured base
/// scale, measured once per call. `catalog_len` must be nonzero; callers
/// reject an empty catalog before placement is attempted. Positions are
/// clamped so no item extends past the interior volume on any axis.
pub fn generate_placements<R: Rng>(
    interior: &Aabb,
    cells: &[GridCell],
    probe: Vector3<f32>,
    catalog_len: usize,
    config: &LayoutConfig,
    rng: &mut R,
) -> Vec<PlacementRecord> {
    debug_assert!(catalog_len > 0);

    if cells.is_empty() {
        return Vec::new();
    }

    let half = probe / 2.0;
    let secondary_chance = f64::from(config.extra_item_chance.clamp(0.0, 1.0));
    let stack_chance = f64::from(config.stack_chance.clamp(0.0, 1.0));

    let front_z = match config.front_face {
        FrontFace::PosZ => interior.max.z - half.z - FRONT_CLEARANCE,
        FrontFace::NegZ => interior.min.z + half.z + FRONT_CLEARANCE,
    };
    // Unit step pointing away from the front face
    let inward = match config.front_face {
        FrontFace::PosZ => -1.0,
        FrontFace::NegZ => 1.0,
    };

    let anchor_y = |cell: &GridCell| {
        let slack = (cell.band_height() - probe.y).max(0.0);
        cell.band_y_min
            + half.y
            + config.y_position_in_cell.clamp(0.0, 1.0) * slack
            + config.y_lift
            + cell.row as f32 * config.row_lift
    };

    let mut cursor = CatalogCursor::new();
    let mut placements = Vec::with_capacity(cells.len());

    for cell in cells {
        let x = cell.x_mid();
        let y = anchor_y(cell);

        let yaw = jitter(rng, config.tilt_radians);
        placements.push(PlacementRecord {
            position: clamp_into(interior, half, Vector3::new(x, y, front_z)),
            rotation_y: yaw,
            rotation_z: 0.0,
            scale_multiplier: 1.0,
            content_index: cursor.next(catalog_len),
            kind: PlacementKind::Primary,
        });

        if rng.random_bool(secondary_chance) {
            let dx = jitter(rng, cell.col_width() * 0.15);
            let scale = rng.random_range(0.85..=1.0);
            let z = front_z + inward * probe.z;

            placements.push(PlacementRecord {
                position: clamp_into(interior, half, Vector3::new(x + dx, y, z)),
                rotation_y: 0.0,
                rotation_z: 0.0,
                scale_multiplier: scale,
                content_index: cursor.next(catalog_len),
                kind: PlacementKind::Secondary,
            });
        }

        if rng.random_bool(stack_chance) {
            let yaw = jitter(rng, config.tilt_radians);
            let dx = jitter(rng, cell.col_width() * 0.25);
            // Rests on the shelf surface instead of floating at spine height
            let y_flat = y - half.y * 0.25;
            // Lying flat swaps the footprint: horizontal extent is the
            // upright height, vertical extent the spine width
            let flat_half = Vector3::new(half.y, half.x, half.z);

            placements.push(PlacementRecord {
                position: clamp_into(interior, flat_half, Vector3::new(x + dx, y_flat, front_z)),
                rotation_y: yaw,
                rotation_z: FRAC_PI_2,
                scale_multiplier: 1.0,
                content_index: cursor.next(catalog_len),
                kind: PlacementKind::Stacked,
            });
        }
    }

    // Density above 1.0 buys a bonus pool of scattered extras
    let bonus = if config.density > 1.0 {
        (cells.len() as f32 * (config.density - 1.0)).floor() as usize
    } else {
        0
    };

    for _ in 0..bonus {
        let cell = &cells[rng.random_range(0..cells.len())];
        let dx = jitter(rng, cell.col_width() * 0.25);
        let dz = inward * rng.random_range(0.0..=probe.z * 0.5);
        let yaw = jitter(rng, config.tilt_radians);
        let scale = rng.random_range(0.8..=0.95);

        let position = Vector3::new(cell.x_mid() + dx, anchor_y(cell), front_z + dz);
        placements.push(PlacementRecord {
            position: clamp_into(interior, half, position),
            rotation_y: yaw,
            rotation_z: 0.0,
            scale_multiplier: scale,
            content_index: cursor.next(catalog_len),
            kind: PlacementKind::Extra,
        });
    }

    placements
}

fn jitter<R: Rng>(rng: &mut R, amount: f32) -> f32 {
    if amount > 0.0 {
        rng.random_range(-amount..=amount)
    } else {
        0.0
    }
}

/// Clamps a position so an item of half-size `half` stays inside `interior`
fn clamp_into(interior: &Aabb, half: Vector3<f32>, p: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(
        clamp_axis(p.x, interior.min.x + half.x, interior.max.x - half.x),
        clamp_axis(p.y, interior.min.y + half.y, interior.max.y - half.y),
        clamp_axis(p.z, interior.min.z + half.z, interior.max.z - half.z),
    )
}

fn clamp_axis(v: f32, lo: f32, hi: f32) -> f32 {
    // An item wider than the axis itself settles at the center
    if lo > hi {
        (lo + hi) / 2.0
    } else {
        v.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::grid::{interior_volume, partition};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_interior() -> Aabb {
        interior_volume(
            &Aabb::new(Vector3::new(-2.0, 0.0, -0.5), Vector3::new(2.0, 3.0, 0.5)),
            Vector3::new(0.1, 0.1, 0.1),
        )
        .unwrap()
    }

    fn quiet_config() -> LayoutConfig {
        LayoutConfig {
            extra_item_chance: 0.0,
            stack_chance: 0.0,
            tilt_radians: 0.0,
            ..LayoutConfig::default()
        }
    }

    fn probe() -> Vector3<f32> {
        Vector3::new(0.16, 0.85, 0.6)
    }

    #[test]
    fn test_primary_count_matches_cells() {
        let interior = sample_interior();
        let cells = partition(&interior, 3, 8);
        let config = quiet_config();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let placements =
            generate_placements(&interior, &cells, probe(), 12, &config, &mut rng);

        assert_eq!(placements.len(), 24);
        assert!(placements.iter().all(|p| p.kind == PlacementKind::Primary));
    }

    #[test]
    fn test_density_buys_exact_extra_pool() {
        let interior = sample_interior();
        let cells = partition(&interior, 3, 8);
        let config = LayoutConfig {
            density: 1.5,
            ..quiet_config()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let placements =
            generate_placements(&interior, &cells, probe(), 12, &config, &mut rng);

        let primary = placements.iter().filter(|p| p.kind == PlacementKind::Primary).count();
        let extra = placements.iter().filter(|p| p.kind == PlacementKind::Extra).count();
        assert_eq!(primary, 24);
        assert_eq!(extra, 12);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let interior = sample_interior();
        let cells = partition(&interior, 3, 8);
        let config = LayoutConfig {
            extra_item_chance: 0.4,
            stack_chance: 0.3,
            density: 1.5,
            ..LayoutConfig::default()
        };

        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);

        let a = generate_placements(&interior, &cells, probe(), 12, &config, &mut rng_a);
        let b = generate_placements(&interior, &cells, probe(), 12, &config, &mut rng_b);

        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let interior = sample_interior();
        let cells = partition(&interior, 2, 4);
        let config = LayoutConfig {
            extra_item_chance: 0.5,
            stack_chance: 0.5,
            ..LayoutConfig::default()
        };

        let mut rng_a = ChaCha8Rng::seed_from_u64(1);
        let mut rng_b = ChaCha8Rng::seed_from_u64(2);

        let a = generate_placements(&interior, &cells, probe(), 12, &config, &mut rng_a);
        let b = generate_placements(&interior, &cells, probe(), 12, &config, &mut rng_b);

        assert_ne!(a, b);
    }

    #[test]
    fn test_positions_stay_inside_interior() {
        let interior = sample_interior();
        let cells = partition(&interior, 3, 8);
        let config = LayoutConfig {
            extra_item_chance: 0.8,
            stack_chance: 0.8,
            density: 2.0,
            ..LayoutConfig::default()
        };
        let half = probe() / 2.0;
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let placements =
            generate_placements(&interior, &cells, probe(), 12, &config, &mut rng);

        for p in &placements {
            // Stacked items lie on their side, so width and height trade places
            let half = match p.kind {
                PlacementKind::Stacked => Vector3::new(half.y, half.x, half.z),
                _ => half,
            };
            assert!(p.position.x >= interior.min.x + half.x - 1e-5);
            assert!(p.position.x <= interior.max.x - half.x + 1e-5);
            assert!(p.position.y >= interior.min.y + half.y - 1e-5);
            assert!(p.position.y <= interior.max.y - half.y + 1e-5);
            assert!(p.position.z >= interior.min.z + half.z - 1e-5);
            assert!(p.position.z <= interior.max.z - half.z + 1e-5);
        }
    }

    #[test]
    fn test_stacked_items_stay_clear_of_side_walls() {
        let interior = sample_interior();
        let cells = partition(&interior, 3, 8);
        let config = LayoutConfig {
            stack_chance: 1.0,
            extra_item_chance: 0.0,
            ..LayoutConfig::default()
        };
        let probe = probe();
        // Flat on its side, the horizontal reach is half the upright height
        let flat_half_x = probe.y / 2.0;
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let placements =
            generate_placements(&interior, &cells, probe, 12, &config, &mut rng);

        let stacked: Vec<_> = placements
            .iter()
            .filter(|p| p.kind == PlacementKind::Stacked)
            .collect();
        assert_eq!(stacked.len(), 24);
        for p in stacked {
            assert!(p.position.x >= interior.min.x + flat_half_x - 1e-5);
            assert!(p.position.x <= interior.max.x - flat_half_x + 1e-5);
        }
    }

    #[test]
    fn test_primaries_flush_with_front_face() {
        let interior = sample_interior();
        let cells = partition(&interior, 2, 4);
        let config = quiet_config();
        let expected_z = interior.max.z - probe().z / 2.0 - FRONT_CLEARANCE;
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let placements =
            generate_placements(&interior, &cells, probe(), 12, &config, &mut rng);

        for p in placements.iter().filter(|p| p.kind == PlacementKind::Primary) {
            assert!((p.position.z - expected_z).abs() < 1e-5);
        }
    }

    #[test]
    fn test_negative_front_face_mirrors_depth() {
        let interior = sample_interior();
        let cells = partition(&interior, 2, 4);
        let config = LayoutConfig {
            front_face: FrontFace::NegZ,
            ..quiet_config()
        };
        let expected_z = interior.min.z + probe().z / 2.0 + FRONT_CLEARANCE;
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let placements =
            generate_placements(&interior, &cells, probe(), 12, &config, &mut rng);

        assert!((placements[0].position.z - expected_z).abs() < 1e-5);
    }

    #[test]
    fn test_content_indices_cycle() {
        let interior = sample_interior();
        let cells = partition(&interior, 3, 8);
        let config = quiet_config();
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let placements =
            generate_placements(&interior, &cells, probe(), 10, &config, &mut rng);

        for (i, p) in placements.iter().enumerate() {
            assert_eq!(p.content_index, i % 10);
        }
    }

    #[test]
    fn test_stacked_items_lie_flat() {
        let interior = sample_interior();
        let cells = partition(&interior, 2, 4);
        let config = LayoutConfig {
            stack_chance: 1.0,
            extra_item_chance: 0.0,
            ..LayoutConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let placements =
            generate_placements(&interior, &cells, probe(), 12, &config, &mut rng);

        let stacked: Vec<_> = placements
            .iter()
            .filter(|p| p.kind == PlacementKind::Stacked)
            .collect();
        assert_eq!(stacked.len(), 8);
        for p in stacked {
            assert!((p.rotation_z - FRAC_PI_2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_cells_produce_nothing() {
        let interior = sample_interior();
        let config = LayoutConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        let placements = generate_placements(&interior, &[], probe(), 12, &config, &mut rng);
        assert!(placements.is_empty());
    }
}
