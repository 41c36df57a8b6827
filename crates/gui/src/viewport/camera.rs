use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

/// Zoom is clamped into this range so the transform stays invertible
pub const MIN_ZOOM: f64 = 1e-6;
pub const MAX_ZOOM: f64 = 1e6;

/// Axis-aligned rectangle (world units or device pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    pub min: DVec2,
    pub size: DVec2,
}

impl ViewRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    /// Normalized rect spanning two corners
    pub fn from_points(a: DVec2, b: DVec2) -> Self {
        let min = a.min(b);
        Self {
            min,
            size: a.max(b) - min,
        }
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    pub fn center(&self) -> DVec2 {
        self.min + self.size * 0.5
    }

    /// True when either side has no positive extent
    pub fn is_empty(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    pub fn contains(&self, p: DVec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.y >= self.min.y && p.x <= max.x && p.y <= max.y
    }

    /// Inset on every side; never inverts.
    pub fn shrink(&self, margin: f64) -> Self {
        let margin = margin.min(self.size.x / 2.0).min(self.size.y / 2.0).max(0.0);
        Self {
            min: self.min + DVec2::splat(margin),
            size: self.size - DVec2::splat(2.0 * margin),
        }
    }
}

/// Orthographic 2D camera: world center + zoom (pixels per world unit)
#[derive(Debug, Clone)]
pub struct Camera {
    /// World point shown at the viewport center
    pub center: DVec2,
    /// Pixels per world unit, always inside [MIN_ZOOM, MAX_ZOOM]
    zoom: f64,
    /// Last known viewport in device pixels
    viewport: ViewRect,
    /// Rectangle fitted on first layout and on reset
    initial: ViewRect,
    fitted: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(ViewRect::new(-500.0, -500.0, 1000.0, 1000.0))
    }
}

impl Camera {
    /// Camera that will fit `initial` once the viewport size is known
    pub fn new(initial: ViewRect) -> Self {
        Self {
            center: initial.center(),
            zoom: 1.0,
            viewport: ViewRect::default(),
            initial,
            fitted: false,
        }
    }

    /// Camera with explicit state; no first-layout fit will happen
    pub fn from_parts(center: DVec2, zoom: f64, viewport: ViewRect) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            viewport,
            initial: ViewRect::from_points(center - DVec2::ONE, center + DVec2::ONE),
            fitted: true,
        }
    }

    pub fn viewport(&self) -> ViewRect {
        self.viewport
    }

    pub fn initial_rect(&self) -> ViewRect {
        self.initial
    }

    pub fn set_initial_rect(&mut self, rect: ViewRect) {
        self.initial = rect;
    }

    /// Record the layout rect. The first non-empty one triggers a one-time fit.
    pub fn set_viewport(&mut self, viewport: ViewRect) {
        self.viewport = viewport;
        if !self.fitted && !viewport.is_empty() {
            self.fit_initial();
            self.fitted = true;
        }
    }

    /// Show the initial rectangle again
    pub fn reset(&mut self) {
        if self.viewport.is_empty() {
            self.center = self.initial.center();
            self.fitted = false;
        } else {
            self.fit_initial();
            self.fitted = true;
        }
    }

    fn fit_initial(&mut self) {
        self.center = self.initial.center();
        if self.initial.is_empty() {
            return;
        }
        let fit = (self.viewport.width() / self.initial.width())
            .min(self.viewport.height() / self.initial.height());
        self.set_zoom(fit);
        tracing::debug!(
            "Camera fit: center=({:.1}, {:.1}) zoom={:.4}",
            self.center.x,
            self.center.y,
            self.zoom
        );
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Clamped into [MIN_ZOOM, MAX_ZOOM]; non-finite values are ignored
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// World -> screen: `viewport.center + (p - center) * zoom`
    pub fn world_to_screen(&self) -> DAffine2 {
        DAffine2::from_translation(self.viewport.center())
            * DAffine2::from_scale(DVec2::splat(self.zoom))
            * DAffine2::from_translation(-self.center)
    }

    pub fn map_to_screen(&self, world: DVec2) -> DVec2 {
        self.world_to_screen().transform_point2(world)
    }

    /// Screen -> world. Returns the origin if the transform is singular.
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return DVec2::ZERO;
        }
        let transform = self.world_to_screen();
        if transform.matrix2.determinant() == 0.0 {
            return DVec2::ZERO;
        }
        transform.inverse().transform_point2(screen)
    }

    /// Drag-pan by a screen-pixel delta
    pub fn pan(&mut self, delta: DVec2) {
        if self.zoom > 0.0 {
            self.center -= delta / self.zoom;
        }
    }

    /// Multiply zoom by `factor`, keeping the world point under `anchor` fixed.
    pub fn zoom_at(&mut self, anchor: DVec2, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            tracing::debug!("zoom_at: ignoring factor {factor}");
            return;
        }
        let world = self.screen_to_world(anchor);
        self.set_zoom(self.zoom * factor);
        self.center = world - (anchor - self.viewport.center()) / self.zoom;
    }

    /// World rectangle currently visible; derived, never cached
    pub fn visible_world_rect(&self) -> ViewRect {
        let half = self.viewport.size / (2.0 * self.zoom);
        ViewRect {
            min: self.center - half,
            size: half * 2.0,
        }
    }

    /// Screen length of `world_len` world units
    pub fn scale_length(&self, world_len: f64) -> f64 {
        world_len * self.zoom
    }
}
