use crate::graph::Position;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;

/// The pan/zoom transform between canvas-relative screen points and diagram space.
///
/// `screen = diagram * zoom + pan`. The zoom always stays within
/// `MIN_ZOOM..=MAX_ZOOM`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pan: Position,
    zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Position::default(),
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Builds a viewport, clamping `zoom` into range. A non-finite zoom resets to 1
    /// and a non-finite pan to the origin.
    pub fn new(pan: Position, zoom: f64) -> Self {
        Self {
            pan: if pan.is_finite() { pan } else { Position::default() },
            zoom: if zoom.is_finite() {
                zoom.clamp(MIN_ZOOM, MAX_ZOOM)
            } else {
                1.0
            },
        }
    }

    pub fn pan(&self) -> Position {
        self.pan
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn screen_to_diagram(&self, screen: Position) -> Position {
        Position::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    pub fn diagram_to_screen(&self, point: Position) -> Position {
        Position::new(
            point.x * self.zoom + self.pan.x,
            point.y * self.zoom + self.pan.y,
        )
    }

    /// Converts a screen-space drag distance into a diagram-space one.
    pub fn scale_delta(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.zoom, dy / self.zoom)
    }

    /// Shifts the view. Ignored when it would leave the pan non-finite.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let pan = self.pan.offset(dx, dy);
        if pan.is_finite() {
            self.pan = pan;
        }
    }

    /// Zooms by `factor` while keeping the diagram point under `anchor` fixed on screen.
    pub fn zoom_at(&mut self, anchor: Position, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let pinned = self.screen_to_diagram(anchor);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = Position::new(
            anchor.x - pinned.x * self.zoom,
            anchor.y - pinned.y * self.zoom,
        );
    }
}
