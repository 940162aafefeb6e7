use glam::Vec2;
use web_sys as web;

/// Position relative to an element's top-left corner, in CSS pixels.
///
/// `None` when the element has no area or the point falls outside it.
#[inline]
pub fn local_point(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Option<Vec2> {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return None;
    }
    let p = client - rect_origin;
    let inside = p.x >= 0.0 && p.y >= 0.0 && p.x <= rect_size.x && p.y <= rect_size.y;
    inside.then_some(p)
}

/// Backing-store size for a canvas shown at `css_size` on a display with
/// `device_pixel_ratio`. Never zero.
#[inline]
pub fn backing_size(css_size: Vec2, device_pixel_ratio: f64) -> (u32, u32) {
    let w = (css_size.x as f64 * device_pixel_ratio) as u32;
    let h = (css_size.y as f64 * device_pixel_ratio) as u32;
    (w.max(1), h.max(1))
}

#[inline]
pub fn canvas_css_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(rect.width() as f32, rect.height() as f32)
}

#[inline]
pub fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Mouse position inside `canvas` in CSS pixels, the space picking uses.
#[inline]
pub fn pointer_canvas_css(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    local_point(
        client_pos(ev),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}
