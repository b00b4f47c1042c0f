//! # Asset Loading
//!
//! Callback-shaped OBJ model loading. The transport is synchronous here, but
//! the surface mirrors an asynchronous loader: consumers receive the loaded
//! model through `on_success` or a failure through `on_error`, and scene
//! population runs strictly inside the success path. Nothing downstream is
//! coupled to how the bytes arrived.
//!
//! ## Usage
//!
//! ```no_run
//! use folio::assets;
//! use folio::scene::SceneGraph;
//! use cgmath::{Matrix4, SquareMatrix};
//!
//! let mut scene = SceneGraph::new();
//! let anchor = scene.add_group(scene.root(), "shelf", Matrix4::identity());
//!
//! assets::load_model(
//!     "models/shelf.obj",
//!     |model| {
//!         let _container = assets::attach_model(&mut scene, anchor, model);
//!         // layout runs here, once the container is ready
//!     },
//!     |err| log::warn!("shelf model unavailable: {err}"),
//! );
//! ```

use cgmath::Matrix4;
use log::debug;
use thiserror::Error;

use crate::geometry::GeometryData;
use crate::scene::{Material, NodeId, Object, SceneGraph};

/// Errors reported through a loader's `on_error` callback
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load model '{path}'")]
    Load {
        path: String,
        #[source]
        source: tobj::LoadError,
    },
}

/// A fully decoded model, ready to attach to a scene
pub struct LoadedModel {
    pub name: String,
    pub meshes: Vec<GeometryData>,
    /// Materials extracted from the MTL file, if one was present
    pub materials: Vec<Material>,
    /// Material assignment for the whole model, by name
    pub material_id: Option<String>,
}

/// Loads an OBJ model and reports the result through callbacks
///
/// Exactly one of `on_success` and `on_error` fires. A failed load never
/// yields a partial model.
pub fn load_model<S, E>(path: &str, on_success: S, on_error: E)
where
    S: FnOnce(LoadedModel),
    E: FnOnce(AssetError),
{
    match read_model(path) {
        Ok(model) => on_success(model),
        Err(err) => on_error(err),
    }
}

/// Synchronous decode behind the callback surface
pub fn read_model(path: &str) -> Result<LoadedModel, AssetError> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| AssetError::Load {
        path: path.to_string(),
        source,
    })?;

    let mtl_materials = materials.unwrap_or_else(|_| {
        debug!("no MTL file for '{path}', using default materials");
        Vec::new()
    });

    let mut extracted = Vec::new();
    for (i, mtl) in mtl_materials.iter().enumerate() {
        let material_name = if mtl.name.is_empty() {
            format!("material_{}", i)
        } else {
            mtl.name.clone()
        };

        let diffuse = mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]);
        extracted.push(Material::new(
            &material_name,
            [
                diffuse[0],
                diffuse[1],
                diffuse[2],
                mtl.dissolve.unwrap_or(1.0),
            ],
            0.0, // MTL has no direct metallic value
            1.0 - (mtl.shininess.unwrap_or(32.0) / 128.0).clamp(0.0, 1.0),
        ));
    }

    let meshes: Vec<GeometryData> = models
        .iter()
        .map(|m| {
            GeometryData::from_raw(
                &m.mesh.positions,
                &m.mesh.normals,
                &m.mesh.texcoords,
                m.mesh.indices.clone(),
            )
        })
        .collect();

    let mut name = String::from("model");
    let mut material_id = None;

    if let Some(first_model) = models.first() {
        if !first_model.name.is_empty() {
            name = first_model.name.clone();
        }

        if let Some(idx) = first_model.mesh.material_id {
            if idx < extracted.len() {
                material_id = Some(extracted[idx].name.clone());
            }
        }
    }

    debug!(
        "loaded '{path}': {} mesh(es), {} material(s)",
        meshes.len(),
        extracted.len()
    );

    Ok(LoadedModel {
        name,
        meshes,
        materials: extracted,
        material_id,
    })
}

/// Attaches a loaded model beneath `parent` and registers its materials
///
/// This is the "container ready" handoff: the returned node is what layout
/// measures and populates.
pub fn attach_model(scene: &mut SceneGraph, parent: NodeId, model: LoadedModel) -> NodeId {
    for material in model.materials {
        if scene.materials.get_material(&material.name).is_none() {
            scene.materials.add_material(material);
        }
    }

    let mut object = Object::new(&model.name, model.meshes);
    if let Some(material_id) = &model.material_id {
        object.set_material(material_id);
    }

    scene.add_object(parent, object, Matrix4::from_scale(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_error() {
        let mut succeeded = false;
        let mut failed = false;

        load_model(
            "does/not/exist.obj",
            |_| succeeded = true,
            |err| {
                failed = true;
                assert!(err.to_string().contains("does/not/exist.obj"));
            },
        );

        assert!(!succeeded);
        assert!(failed);
    }

    #[test]
    fn test_attach_model_registers_materials() {
        let mut scene = SceneGraph::new();
        let parent = scene.root();

        let model = LoadedModel {
            name: "shelf".to_string(),
            meshes: vec![crate::geometry::generate_box(1.0, 2.0, 0.5)],
            materials: vec![Material::new("oak", [0.5, 0.35, 0.2, 1.0], 0.0, 0.7)],
            material_id: Some("oak".to_string()),
        };

        let node = attach_model(&mut scene, parent, model);

        assert!(scene.materials.get_material("oak").is_some());
        let object = scene.object(node).unwrap();
        assert_eq!(object.material_id().map(String::as_str), Some("oak"));
    }
}
