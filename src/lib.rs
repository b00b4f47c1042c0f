// src/lib.rs
//! Folio
//!
//! A retained scene graph and container-fitting layout engine for browsable
//! 3D bookstore interiors. Shelf models load asynchronously (or fall back to
//! procedural geometry), the layout engine measures their interior volume
//! and populates it with pickable, catalog-backed items.

pub mod assets;
pub mod catalog;
pub mod geometry;
pub mod layout;
pub mod scene;

// Re-export main types for convenience
pub use catalog::{Catalog, ContentRecord};
pub use layout::{layout_contents, LayoutConfig, LayoutError};
pub use scene::{NodeId, Object, SceneGraph};
