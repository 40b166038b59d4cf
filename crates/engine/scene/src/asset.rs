//! Asset templates for placeable objects
//!
//! The template is resolved once at startup. A missing scene or node is a
//! configuration error reported to the caller rather than a placeholder
//! object silently placed later.

use crate::error::{Error, Result};
use crate::node::ObjectNode;
use std::collections::HashMap;
use tracing::debug;

/// Source of loadable asset scenes
pub trait AssetSource {
    /// Load the root nodes of the scene stored at `path`
    fn load_scene(&self, path: &str) -> Result<Vec<ObjectNode>>;
}

/// In-memory asset source keyed by path
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    scenes: HashMap<String, Vec<ObjectNode>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene, replacing any previous one at the same path
    pub fn insert(&mut self, path: impl Into<String>, roots: Vec<ObjectNode>) {
        self.scenes.insert(path.into(), roots);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_scene(mut self, path: impl Into<String>, roots: Vec<ObjectNode>) -> Self {
        self.insert(path, roots);
        self
    }
}

impl AssetSource for MemoryAssets {
    fn load_scene(&self, path: &str) -> Result<Vec<ObjectNode>> {
        self.scenes
            .get(path)
            .cloned()
            .ok_or_else(|| Error::AssetNotFound(path.to_string()))
    }
}

/// A node prototype cloned for every placement
#[derive(Debug, Clone, PartialEq)]
pub struct AssetTemplate {
    path: String,
    prototype: ObjectNode,
}

impl AssetTemplate {
    /// Load `path` from `source` and pick `node_name` anywhere in its hierarchy
    pub fn load(source: &dyn AssetSource, path: &str, node_name: &str) -> Result<Self> {
        let roots = source.load_scene(path)?;

        let prototype = roots
            .iter()
            .find_map(|root| root.find(node_name))
            .cloned()
            .ok_or_else(|| Error::NodeNotFound {
                node: node_name.to_string(),
                path: path.to_string(),
            })?;

        debug!(path, node = node_name, bounds = ?prototype.bounds, "Loaded asset template");

        Ok(Self {
            path: path.to_string(),
            prototype,
        })
    }

    /// Wrap an already-built node as a template
    pub fn from_node(prototype: ObjectNode) -> Self {
        Self {
            path: String::new(),
            prototype,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn prototype(&self) -> &ObjectNode {
        &self.prototype
    }

    /// Fresh, independent copy of the prototype
    pub fn instantiate(&self) -> ObjectNode {
        self.prototype.clone()
    }
}
