//! Projection of the displayed generation onto the screen.
//!
//! Rendering only reads the grid and the view transform; it never changes the
//! simulation, so a resize or redraw is always safe.

use crate::grid::Grid;
use crate::view::ViewTransform;
use egui::{pos2, Color32, Pos2, Rect, Shape, Stroke};

pub const BACKGROUND: Color32 = Color32::from_rgb(50, 50, 50);
pub const LIVE_CELL: Color32 = Color32::WHITE;
/// Grid meshes drawn over the cells: (colour, period in cells).
pub const GRID_MESHES: [(Color32, u32); 2] = [
    (Color32::from_rgb(70, 70, 70), 1),
    (Color32::from_rgb(90, 90, 90), 10),
];
/// Meshes denser than this many points per line are skipped.
const MIN_LINE_SPACING: f32 = 2.0;

/// Screen rectangles of the live cells that intersect the viewport.
pub fn cell_rects(grid: &Grid, view: &ViewTransform, viewport: Rect) -> Vec<Rect> {
    let extent = view.cell_extent();
    grid.iter()
        .map(|(x, y)| {
            let [sx, sy] = view.to_screen(x as f32, y as f32);
            Rect::from_min_size(viewport.min + egui::vec2(sx, sy), egui::vec2(extent, extent))
        })
        .filter(|rect| rect.intersects(viewport))
        .collect()
}

/// Vertical and horizontal lines of one mesh, aligned with cell borders.
pub fn grid_lines(view: &ViewTransform, viewport: Rect, period: u32) -> Vec<[Pos2; 2]> {
    let period_px = view.config().cell_size * period as f32;
    let spacing = period_px * view.scale;
    if spacing < MIN_LINE_SPACING {
        return Vec::new();
    }

    let mut lines = Vec::new();
    // Pixel centres keep one-point lines crisp.
    let mut x = (view.translate[0].rem_euclid(period_px) * view.scale).floor() + 0.5;
    while x <= viewport.width() {
        lines.push([
            pos2(viewport.min.x + x, viewport.min.y),
            pos2(viewport.min.x + x, viewport.max.y),
        ]);
        x += spacing;
    }
    let mut y = (view.translate[1].rem_euclid(period_px) * view.scale).floor() + 0.5;
    while y <= viewport.height() {
        lines.push([
            pos2(viewport.min.x, viewport.min.y + y),
            pos2(viewport.max.x, viewport.min.y + y),
        ]);
        y += spacing;
    }
    lines
}

/// Background, live cells, then both grid meshes.
pub fn scene(grid: &Grid, view: &ViewTransform, viewport: Rect) -> Vec<Shape> {
    let mut shapes = vec![Shape::rect_filled(viewport, 0.0, BACKGROUND)];
    shapes.extend(
        cell_rects(grid, view, viewport)
            .into_iter()
            .map(|rect| Shape::rect_filled(rect, 0.0, LIVE_CELL)),
    );
    for (color, period) in GRID_MESHES {
        shapes.extend(
            grid_lines(view, viewport, period)
                .into_iter()
                .map(|points| Shape::line_segment(points, Stroke::new(1.0, color))),
        );
    }
    shapes
}

pub fn paint(painter: &egui::Painter, grid: &Grid, view: &ViewTransform) {
    painter.extend(scene(grid, view, painter.clip_rect()));
}
