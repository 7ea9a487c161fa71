use crate::app::App;
use egui::{pos2, Pos2};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta},
};

/// Zoom per wheel line.
pub const LINE_ZOOM_STEP: f32 = 0.042;
/// Zoom per pixel of smooth scrolling.
pub const PIXEL_ZOOM_STEP: f32 = 0.00035;
/// Zoom per frame while a zoom button is held.
pub const BUTTON_ZOOM_STEP: f32 = 0.035;

/// Pointer tracking for drag-to-pan.
#[derive(Debug, Default)]
pub struct Pointer {
    /// Last known position in logical points.
    pub position: Option<Pos2>,
    pressed: bool,
    drag_from: Option<Pos2>,
}

pub fn to_points(position: PhysicalPosition<f64>, scale_factor: f64) -> Pos2 {
    let logical = position.to_logical::<f32>(scale_factor);
    pos2(logical.x, logical.y)
}

pub fn scroll_zoom_factor(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y * LINE_ZOOM_STEP,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * PIXEL_ZOOM_STEP,
    }
}

/// Zooms around the cursor, or around the viewport centre when the cursor is
/// outside the window.
pub fn handle_zoom(app: &mut App, delta: MouseScrollDelta) {
    let factor = scroll_zoom_factor(delta);
    if factor == 0.0 {
        return;
    }
    let anchor = app
        .pointer
        .position
        .unwrap_or_else(|| pos2(app.viewport[0] / 2.0, app.viewport[1] / 2.0));
    if app.view.zoom_around(factor, anchor.x, anchor.y) {
        log::debug!("Zoom: {:.2}, Translate: [{:.1}, {:.1}]", app.view.scale, app.view.translate[0], app.view.translate[1]);
    }
}

pub fn handle_mouse_input(app: &mut App, button: MouseButton, element_state: ElementState) {
    if matches!(button, MouseButton::Left | MouseButton::Right) {
        let is_pressed = element_state == ElementState::Pressed;
        app.pointer.pressed = is_pressed;
        app.pointer.drag_from = if is_pressed { app.pointer.position } else { None };
    }
}

/// Pans by the movement since the previous event. Deltas are applied in the
/// order they arrive, the view accumulates them.
pub fn handle_cursor_move(app: &mut App, position: Pos2) {
    app.pointer.position = Some(position);

    if app.pointer.pressed {
        if let Some(last) = app.pointer.drag_from {
            let delta = position - last;
            app.view.pan(delta.x, delta.y);
        }
        app.pointer.drag_from = Some(position);
    }
}

pub fn handle_cursor_left(app: &mut App) {
    app.pointer.position = None;
    // Keep the button state so a drag survives leaving and re-entering.
    app.pointer.drag_from = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;

    #[test]
    fn drag_pans_by_accumulated_deltas() {
        let mut app = test_app();
        let start = app.view.to_grid(100.0, 100.0);

        handle_cursor_move(&mut app, pos2(100.0, 100.0));
        handle_mouse_input(&mut app, MouseButton::Left, ElementState::Pressed);
        handle_cursor_move(&mut app, pos2(110.0, 95.0));
        handle_cursor_move(&mut app, pos2(130.0, 90.0));
        handle_mouse_input(&mut app, MouseButton::Left, ElementState::Released);
        handle_cursor_move(&mut app, pos2(500.0, 500.0));

        // The grid point that was under (100, 100) is now under (130, 90).
        let moved = app.view.to_grid(130.0, 90.0);
        assert!((moved[0] - start[0]).abs() < 1e-3);
        assert!((moved[1] - start[1]).abs() < 1e-3);
    }

    #[test]
    fn hover_without_button_does_not_pan() {
        let mut app = test_app();
        let before = app.view;
        handle_cursor_move(&mut app, pos2(10.0, 10.0));
        handle_cursor_move(&mut app, pos2(300.0, 200.0));
        assert_eq!(app.view, before);
    }

    #[test]
    fn re_entering_window_does_not_jump() {
        let mut app = test_app();
        handle_cursor_move(&mut app, pos2(10.0, 10.0));
        handle_mouse_input(&mut app, MouseButton::Right, ElementState::Pressed);
        handle_cursor_left(&mut app);
        let before = app.view;
        handle_cursor_move(&mut app, pos2(400.0, 400.0));
        assert_eq!(app.view, before);
        assert!(app.pointer.pressed);
    }

    #[test]
    fn wheel_zooms_around_cursor() {
        let mut app = test_app();
        handle_cursor_move(&mut app, pos2(240.0, 130.0));
        let anchor = app.view.to_grid(240.0, 130.0);
        let scale = app.view.scale;

        handle_zoom(&mut app, MouseScrollDelta::LineDelta(0.0, 2.0));
        assert!(app.view.scale > scale);
        let after = app.view.to_grid(240.0, 130.0);
        assert!((after[0] - anchor[0]).abs() < 1e-3);
        assert!((after[1] - anchor[1]).abs() < 1e-3);
    }

    #[test]
    fn scroll_factors() {
        assert_eq!(scroll_zoom_factor(MouseScrollDelta::LineDelta(0.0, -1.0)), -LINE_ZOOM_STEP);
        let pixels = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 120.0));
        assert!((scroll_zoom_factor(pixels) - 0.042).abs() < 1e-6);
    }

    #[test]
    fn physical_positions_become_points() {
        let p = to_points(PhysicalPosition::new(200.0, 100.0), 2.0);
        assert_eq!(p, pos2(100.0, 50.0));
    }
}
