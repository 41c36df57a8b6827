use glam::DVec2;

/// Vertex being dragged on the editor surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexDrag {
    pub layer: usize,
    pub index: usize,
    /// Mesh version right after the last drag step; anything else means
    /// the index may have been renumbered underneath the drag
    pub version: u64,
}

/// Editor tool state (modes and in-flight gestures)
#[derive(Debug, Clone, Default)]
pub struct ToolState {
    /// Clicks on empty space place a vertex
    pub add_vertex: bool,
    /// Last cursor position in world units (ghost vertex, rubber lines)
    pub cursor_world: Option<DVec2>,
    pub drag: Option<VertexDrag>,
    /// Rubber-band selection start, world units
    pub band_start: Option<DVec2>,
}

impl ToolState {
    /// Abort every in-flight gesture
    pub fn cancel_gestures(&mut self) {
        self.drag = None;
        self.band_start = None;
    }
}
