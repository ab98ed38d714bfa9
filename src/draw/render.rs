use crate::draw::model::{Color, DirtyRect, Pen, MIN_PEN_WIDTH};
use crate::draw::surface::PixelSurface;

/// Bounds touched by a segment of `stroke_width`, padded by one pixel.
pub fn segment_dirty_bounds(start: (i32, i32), end: (i32, i32), stroke_width: u32) -> DirtyRect {
    let radius = (stroke_width.max(MIN_PEN_WIDTH) / 2) as i32;
    DirtyRect::from_points(start, end, radius + 1)
}

/// [`segment_dirty_bounds`] limited to a `width` x `height` surface.
///
/// Works in `i64` so endpoints anywhere in `i32` clip instead of overflowing.
pub fn clipped_segment_bounds(
    start: (i32, i32),
    end: (i32, i32),
    stroke_width: u32,
    width: u32,
    height: u32,
) -> Option<DirtyRect> {
    let pad = i64::from(stroke_width.max(MIN_PEN_WIDTH) / 2) + 1;
    let max_w = i64::from(width.min(i32::MAX as u32));
    let max_h = i64::from(height.min(i32::MAX as u32));
    let x0 = (i64::from(start.0.min(end.0)) - pad).max(0);
    let y0 = (i64::from(start.1.min(end.1)) - pad).max(0);
    let x1 = (i64::from(start.0.max(end.0)) + pad + 1).min(max_w);
    let y1 = (i64::from(start.1.max(end.1)) + pad + 1).min(max_h);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(DirtyRect {
        x: x0 as i32,
        y: y0 as i32,
        width: (x1 - x0) as i32,
        height: (y1 - y0) as i32,
    })
}

/// Rasterizes a round-capped segment from `start` to `end`.
///
/// Pixels are overwritten, never blended: a stroke writes `pen.color` as is and
/// an erase writes [`Color::TRANSPARENT`]. `start == end` stamps a single dot.
pub fn render_segment(
    surface: &mut PixelSurface,
    start: (i32, i32),
    end: (i32, i32),
    pen: Pen,
    erase: bool,
) {
    let color = if erase { Color::TRANSPARENT } else { pen.color };
    draw_segment_capsule(surface, start, end, color, pen.width.max(MIN_PEN_WIDTH));
}

fn draw_segment_capsule(
    surface: &mut PixelSurface,
    start: (i32, i32),
    end: (i32, i32),
    color: Color,
    stroke_width: u32,
) {
    let Some(clip) =
        clipped_segment_bounds(start, end, stroke_width, surface.width(), surface.height())
    else {
        return;
    };

    // Even widths straddle a pixel corner so the dab spans exactly `stroke_width` pixels.
    let offset = if stroke_width % 2 == 0 { 0.5 } else { 0.0 };
    let start = (f64::from(start.0) + offset, f64::from(start.1) + offset);
    let end = (f64::from(end.0) + offset, f64::from(end.1) + offset);
    let radius = f64::from(stroke_width) * 0.5;
    let radius_sq = radius * radius;

    for y in clip.y..(clip.y + clip.height) {
        for x in clip.x..(clip.x + clip.width) {
            if point_segment_distance_sq((f64::from(x), f64::from(y)), start, end) <= radius_sq {
                surface.set(x, y, color);
            }
        }
    }
}

fn point_segment_distance_sq(point: (f64, f64), start: (f64, f64), end: (f64, f64)) -> f64 {
    let (px, py) = point;
    let (x0, y0) = start;
    let vx = end.0 - x0;
    let vy = end.1 - y0;
    let wx = px - x0;
    let wy = py - y0;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f64::EPSILON {
        return wx * wx + wy * wy;
    }
    let t = ((wx * vx + wy * vy) / len_sq).clamp(0.0, 1.0);
    let dx = px - (x0 + vx * t);
    let dy = py - (y0 + vy * t);
    dx * dx + dy * dy
}
