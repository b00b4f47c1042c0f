//! # Scene Management Module
//!
//! This module provides the retained scene graph the bookstore interior is
//! assembled into: transform groups, object payloads with pick metadata, and
//! centralized material storage.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - Node arena with parent/child transform composition
//! - [`Object`] - Individual 3D objects with meshes, materials, and metadata
//! - [`MaterialManager`] - Centralized material storage, pooled by ID
//! - [`PickMetadata`] - The contract an external picking system reads
//!
//! ## World transforms
//!
//! Local transforms compose lazily. Anything that measures geometry in world
//! or anchor space must call [`SceneGraph::update_world_transforms`] first;
//! the layout engine does this on every invocation.

pub mod graph;
pub mod material;
pub mod object;

// Re-export main types
pub use graph::{NodeId, SceneGraph, SceneStatistics};
pub use material::{Material, MaterialId, MaterialManager};
pub use object::{Object, PickMetadata};
