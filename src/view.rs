use crate::grid::{Cell, Grid};

pub const CELL_SIZE: f32 = 10.0; // px at zoom 1
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;
/// Relative zoom applied after fitting, leaves a margin around the pattern.
pub const FIT_MARGIN_ZOOM: f32 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub cell_size: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

/// Maps grid coordinates to screen pixels and back.
///
/// `screen = (grid * cell_size + translate) * scale`, where `translate` is
/// measured in pixels at zoom 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub translate: [f32; 2],
    pub scale: f32,
    config: ViewConfig,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl ViewTransform {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            translate: [0.0, 0.0],
            scale: 1.0_f32.clamp(config.min_zoom, config.max_zoom),
            config,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Side of one cell on screen.
    pub fn cell_extent(&self) -> f32 {
        self.config.cell_size * self.scale
    }

    pub fn to_screen(&self, gx: f32, gy: f32) -> [f32; 2] {
        [
            (gx * self.config.cell_size + self.translate[0]) * self.scale,
            (gy * self.config.cell_size + self.translate[1]) * self.scale,
        ]
    }

    pub fn to_grid(&self, sx: f32, sy: f32) -> [f32; 2] {
        [
            (sx / self.scale - self.translate[0]) / self.config.cell_size,
            (sy / self.scale - self.translate[1]) / self.config.cell_size,
        ]
    }

    /// The cell under a screen position.
    pub fn cell_at(&self, sx: f32, sy: f32) -> Cell {
        let [gx, gy] = self.to_grid(sx, sy);
        (gx.floor() as i64, gy.floor() as i64)
    }

    /// Moves the view by a screen-space delta.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.translate[0] += dx / self.scale;
        self.translate[1] += dy / self.scale;
    }

    /// Zooms by `factor` (0.1 = 10% in, -0.1 = 10% out) keeping the grid point
    /// under the anchor fixed on screen. Returns false if the zoom is already
    /// at the bound it would move towards.
    pub fn zoom_around(&mut self, factor: f32, anchor_x: f32, anchor_y: f32) -> bool {
        let new_scale = (self.scale * (1.0 + factor)).clamp(self.config.min_zoom, self.config.max_zoom);
        if (new_scale - self.scale).abs() < f32::EPSILON {
            return false;
        }

        // anchor / scale - translate == anchor / new_scale - new_translate
        self.translate[0] -= anchor_x / self.scale - anchor_x / new_scale;
        self.translate[1] -= anchor_y / self.scale - anchor_y / new_scale;
        self.scale = new_scale;
        true
    }

    /// Zooms around the centre of the viewport.
    pub fn zoom(&mut self, factor: f32, viewport_width: f32, viewport_height: f32) -> bool {
        self.zoom_around(factor, viewport_width / 2.0, viewport_height / 2.0)
    }

    /// Scales and centres the view so every live cell is visible, then zooms
    /// out a little. Does nothing for an empty grid.
    pub fn fit_to_content(&mut self, grid: &Grid, viewport_width: f32, viewport_height: f32) -> bool {
        let Some(bounds) = grid.bounds() else {
            return false;
        };

        let cell_size = self.config.cell_size;
        let used_width = bounds.width() as f32 * cell_size;
        let used_height = bounds.height() as f32 * cell_size;
        self.scale = (viewport_width / used_width)
            .min(viewport_height / used_height)
            .clamp(self.config.min_zoom, self.config.max_zoom);

        let center_x = bounds.min_x as f32 + bounds.width() as f32 / 2.0;
        let center_y = bounds.min_y as f32 + bounds.height() as f32 / 2.0;
        self.translate = [
            viewport_width / (2.0 * self.scale) - center_x * cell_size,
            viewport_height / (2.0 * self.scale) - center_y * cell_size,
        ];

        self.zoom(FIT_MARGIN_ZOOM, viewport_width, viewport_height);
        log::debug!("Fitted view: scale {:.3}, translate {:?}", self.scale, self.translate);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn assert_close(a: [f32; 2], b: [f32; 2]) {
        assert!(
            (a[0] - b[0]).abs() < EPS && (a[1] - b[1]).abs() < EPS,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn to_grid_inverts_to_screen() {
        let mut view = ViewTransform::default();
        view.pan(37.0, -12.5);
        view.zoom_around(0.8, 100.0, 40.0);

        let screen = view.to_screen(-3.25, 17.5);
        assert_close(view.to_grid(screen[0], screen[1]), [-3.25, 17.5]);
    }

    #[test]
    fn pan_moves_by_screen_delta_at_any_zoom() {
        let mut view = ViewTransform::default();
        view.zoom_around(1.0, 0.0, 0.0);
        let before = view.to_screen(4.0, 4.0);
        view.pan(15.0, -30.0);
        let after = view.to_screen(4.0, 4.0);
        assert_close([after[0] - before[0], after[1] - before[1]], [15.0, -30.0]);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut view = ViewTransform::default();
        view.pan(-220.0, 75.0);
        let (ax, ay) = (312.0, 187.0);

        for factor in [0.3, 0.3, -0.5, 0.035, -0.035, 2.0, -0.9] {
            let before = view.to_grid(ax, ay);
            view.zoom_around(factor, ax, ay);
            assert_close(view.to_grid(ax, ay), before);
        }
    }

    #[test]
    fn zoom_is_clamped_to_bounds() {
        let mut view = ViewTransform::default();
        assert!(view.zoom_around(100.0, 0.0, 0.0));
        assert_eq!(view.scale, MAX_ZOOM);
        assert!(!view.zoom_around(0.5, 10.0, 10.0));

        assert!(view.zoom_around(-0.9999, 0.0, 0.0));
        assert_eq!(view.scale, MIN_ZOOM);
        assert!(!view.zoom_around(-0.5, 10.0, 10.0));
    }

    #[test]
    fn clamped_zoom_still_keeps_anchor_fixed() {
        let mut view = ViewTransform::default();
        let before = view.to_grid(50.0, 80.0);
        view.zoom_around(50.0, 50.0, 80.0);
        assert_eq!(view.scale, MAX_ZOOM);
        assert_close(view.to_grid(50.0, 80.0), before);
    }

    #[test]
    fn cell_at_floors_negative_coordinates() {
        let view = ViewTransform::default();
        assert_eq!(view.cell_at(5.0, 5.0), (0, 0));
        assert_eq!(view.cell_at(-0.5, 19.0), (-1, 1));
    }

    #[test]
    fn fit_to_content_shows_everything_centred() {
        let grid: Grid = [(-20, -5), (40, 15)].into_iter().collect();
        let (width, height) = (800.0, 600.0);
        let mut view = ViewTransform::default();
        assert!(view.fit_to_content(&grid, width, height));

        // 61 x 21 cells: width-bound, then 10% zoom out.
        let expected = width / (61.0 * CELL_SIZE) * 0.9;
        assert!((view.scale - expected).abs() < EPS);

        let top_left = view.to_screen(-20.0, -5.0);
        let bottom_right = view.to_screen(41.0, 16.0);
        assert!(top_left[0] >= 0.0 && top_left[1] >= 0.0);
        assert!(bottom_right[0] <= width && bottom_right[1] <= height);
        assert_close(view.to_screen(10.5, 5.5), [width / 2.0, height / 2.0]);
    }

    #[test]
    fn fit_to_content_clamps_tiny_patterns() {
        let grid: Grid = [(3, 3)].into_iter().collect();
        let mut view = ViewTransform::default();
        assert!(view.fit_to_content(&grid, 1000.0, 1000.0));
        assert!((view.scale - MAX_ZOOM * 0.9).abs() < EPS);
    }

    #[test]
    fn fit_to_empty_grid_leaves_view_alone() {
        let mut view = ViewTransform::default();
        view.pan(10.0, 10.0);
        let before = view;
        assert!(!view.fit_to_content(&Grid::new(), 800.0, 600.0));
        assert_eq!(view, before);
    }
}
