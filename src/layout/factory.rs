//! Item factory
//!
//! Turns an abstract placement record plus its catalog entry into a
//! renderable, pickable scene object: box geometry sized by the placement's
//! scale, a spine-colored material pooled through the scene's material
//! manager, and the transform and metadata the scene graph and picking
//! system consume.

use cgmath::{Matrix4, Rad, Vector3};

use crate::catalog::ContentRecord;
use crate::geometry::generate_box;
use crate::scene::{MaterialManager, Object, PickMetadata};

use super::placement::PlacementRecord;

/// Size of a nominal item at scale 1.0: spine width, height, depth
pub fn nominal_item_size() -> Vector3<f32> {
    Vector3::new(0.16, 0.85, 0.6)
}

/// Rendered size of the probe item at the configured base scale
///
/// Measured once per layout call; all primary items share this nominal size.
pub fn probe_size(base_scale: f32) -> Vector3<f32> {
    nominal_item_size() * base_scale
}

/// Builds one renderable item for a placement
///
/// Returns the object plus its local transform relative to the generated
/// contents group. Materials are pooled by spine color, so items sharing a
/// color share one material entry.
pub fn create_item(
    placement: &PlacementRecord,
    record: &ContentRecord,
    base_scale: f32,
    materials: &mut MaterialManager,
) -> (Object, Matrix4<f32>) {
    let dims = nominal_item_size() * base_scale * placement.scale_multiplier;
    let geometry = generate_box(dims.x, dims.y, dims.z);

    let material_id = materials.get_or_insert_color(
        &color_material_name(record.color),
        record.color,
        0.1,
        0.5,
    );

    let object = Object::new(&record.title, vec![geometry])
        .with_material(&material_id)
        .with_pick_metadata(PickMetadata::for_record(record));

    // T * Ry * Rz, scale baked into the geometry
    let transform = Matrix4::from_translation(placement.position)
        * Matrix4::from_angle_y(Rad(placement.rotation_y))
        * Matrix4::from_angle_z(Rad(placement.rotation_z));

    (object, transform)
}

fn color_material_name(color: [f32; 3]) -> String {
    format!(
        "book-{:02x}{:02x}{:02x}",
        (color[0].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[1].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[2].clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}
