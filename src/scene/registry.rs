//! Index-ordered storage for mounted scenes.

use std::collections::BTreeMap;

use super::controller::SceneController;

/// Mounted scenes keyed by tab index. Iteration follows index order.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    scenes: BTreeMap<usize, SceneController>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a scene, returning the one it replaced.
    pub fn insert(&mut self, scene: SceneController) -> Option<SceneController> {
        self.scenes.insert(scene.index(), scene)
    }

    pub fn remove(&mut self, index: usize) -> Option<SceneController> {
        self.scenes.remove(&index)
    }

    pub fn get(&self, index: usize) -> Option<&SceneController> {
        self.scenes.get(&index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SceneController> {
        self.scenes.get_mut(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.scenes.contains_key(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneController> {
        self.scenes.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneController> {
        self.scenes.values_mut()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.scenes.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
