//! Scene objects and interaction metadata
//!
//! An [`Object`] is a leaf payload in the scene graph: geometry plus a
//! material reference and, for browsable items, the metadata an external
//! picking system reads when the user clicks the object.

use crate::catalog::ContentRecord;
use crate::geometry::{Aabb, GeometryData};
use crate::scene::material::MaterialId;

/// Descriptive metadata attached to clickable objects
///
/// The picking system recognizes exactly these fields; anything it needs to
/// show in the detail modal lives here.
#[derive(Debug, Clone, PartialEq)]
pub struct PickMetadata {
    pub clickable: bool,
    pub title: String,
    pub author: String,
    pub price: String,
}

impl PickMetadata {
    /// Metadata for a catalog-backed item
    pub fn for_record(record: &ContentRecord) -> Self {
        Self {
            clickable: true,
            title: record.title.clone(),
            author: record.author.clone(),
            price: record.price.clone(),
        }
    }
}

/// Individual 3D object: meshes, material reference, pick metadata
pub struct Object {
    pub name: String,
    pub meshes: Vec<GeometryData>,
    material_id: Option<MaterialId>,
    pick: Option<PickMetadata>,
}

impl Object {
    /// Create a new object from pre-built meshes
    pub fn new(name: &str, meshes: Vec<GeometryData>) -> Self {
        Self {
            name: name.to_string(),
            meshes,
            material_id: None,
            pick: None,
        }
    }

    /// Assign a material by ID
    pub fn set_material(&mut self, material_id: &str) {
        self.material_id = Some(material_id.to_string());
    }

    /// Builder pattern: assign a material
    pub fn with_material(mut self, material_id: &str) -> Self {
        self.set_material(material_id);
        self
    }

    /// Builder pattern: attach pick metadata
    pub fn with_pick_metadata(mut self, pick: PickMetadata) -> Self {
        self.pick = Some(pick);
        self
    }

    pub fn material_id(&self) -> Option<&MaterialId> {
        self.material_id.as_ref()
    }

    /// Pick metadata, if this object is interactive
    pub fn pick_metadata(&self) -> Option<&PickMetadata> {
        self.pick.as_ref()
    }

    pub fn is_clickable(&self) -> bool {
        self.pick.as_ref().map_or(false, |p| p.clickable)
    }

    /// Bounding box over all meshes in object-local space
    ///
    /// `None` when the object carries no geometry at all.
    pub fn local_aabb(&self) -> Option<Aabb> {
        let mut result: Option<Aabb> = None;

        for mesh in &self.meshes {
            if let Some(aabb) = mesh.aabb() {
                result = Some(match result {
                    Some(acc) => acc.union(&aabb),
                    None => aabb,
                });
            }
        }

        result
    }

    /// Total triangle count across meshes
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.triangle_count()).sum()
    }

    /// Total vertex count across meshes
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertex_count()).sum()
    }
}
