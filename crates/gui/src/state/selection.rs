use serde::{Deserialize, Serialize};

/// A selectable piece of geometry, addressed by layer and index.
///
/// Handles are only meaningful until the next deletion on their layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Handle {
    Vertex { layer: usize, index: usize },
    Triangle { layer: usize, index: usize },
}

impl Handle {
    pub fn vertex(layer: usize, index: usize) -> Self {
        Handle::Vertex { layer, index }
    }

    pub fn triangle(layer: usize, index: usize) -> Self {
        Handle::Triangle { layer, index }
    }

    pub fn layer(&self) -> usize {
        match *self {
            Handle::Vertex { layer, .. } | Handle::Triangle { layer, .. } => layer,
        }
    }
}

/// Current selection (supports multi-select)
#[derive(Default)]
pub struct SelectionState {
    /// Selected handles (in order of selection)
    selected: Vec<Handle>,
    /// Version counter for selection changes
    version: u64,
}

impl SelectionState {
    /// All selected handles
    pub fn all(&self) -> &[Handle] {
        &self.selected
    }

    /// Number of selected handles
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_selected(&self, handle: &Handle) -> bool {
        self.selected.contains(handle)
    }

    pub fn is_vertex_selected(&self, layer: usize, index: usize) -> bool {
        self.is_selected(&Handle::vertex(layer, index))
    }

    pub fn is_triangle_selected(&self, layer: usize, index: usize) -> bool {
        self.is_selected(&Handle::triangle(layer, index))
    }

    /// Select a single handle (clears previous selection)
    pub fn select(&mut self, handle: Handle) {
        self.selected.clear();
        self.selected.push(handle);
        self.version += 1;
    }

    /// Add a handle without clearing; duplicates are ignored
    pub fn add(&mut self, handle: Handle) {
        if !self.selected.contains(&handle) {
            self.selected.push(handle);
            self.version += 1;
        }
    }

    /// Add several handles at once (rubber-band selection)
    pub fn extend(&mut self, handles: impl IntoIterator<Item = Handle>) {
        for handle in handles {
            self.add(handle);
        }
    }

    /// Toggle selection (Ctrl+click behavior)
    pub fn toggle(&mut self, handle: Handle) {
        if let Some(pos) = self.selected.iter().position(|h| *h == handle) {
            self.selected.remove(pos);
        } else {
            self.selected.push(handle);
        }
        self.version += 1;
    }

    /// Drop every handle that does not belong to `layer`
    pub fn retain_layer(&mut self, layer: usize) {
        let before = self.selected.len();
        self.selected.retain(|h| h.layer() == layer);
        if self.selected.len() != before {
            self.version += 1;
        }
    }

    /// Clear all selection
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.version += 1;
        }
    }
}
