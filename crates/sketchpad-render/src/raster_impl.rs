//! CPU raster renderer built on tiny-skia.

use crate::renderer::{RenderResult, Renderer};
use crate::surface::{Surface, to_skia_color};
use kurbo::{BezPath, Line, PathEl, Point, Rect};
use sketchpad_core::{DrawingState, Path, ToolKind};
use tiny_skia::{BlendMode, LineCap, LineJoin, Paint, PathBuilder, Stroke, Transform};

/// Convert a kurbo path into a tiny-skia path.
///
/// Returns `None` for paths tiny-skia cannot represent (empty or a lone
/// move-to).
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// Part of `line` inside `bounds`, or `None` when it misses them.
fn clip_line(line: Line, bounds: Rect) -> Option<Line> {
    // Halved so the difference of two finite coordinates cannot overflow.
    let (x0, y0) = (line.p0.x * 0.5, line.p0.y * 0.5);
    let (dx, dy) = (line.p1.x * 0.5 - x0, line.p1.y * 0.5 - y0);

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-dx, x0 - bounds.x0 * 0.5),
        (dx, bounds.x1 * 0.5 - x0),
        (-dy, y0 - bounds.y0 * 0.5),
        (dy, bounds.y1 * 0.5 - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }

    let at = |t: f64| {
        Point::new(
            line.p0.x * (1.0 - t) + line.p1.x * t,
            line.p0.y * (1.0 - t) + line.p1.y * t,
        )
    };
    (t0 <= t1).then(|| Line::new(at(t0), at(t1)))
}

/// Polyline through `points`, cut down to the parts inside `bounds`.
///
/// Segments that stay connected after clipping share a subpath; a segment
/// re-entering the bounds starts a new one.
fn clipped_polyline(points: &[Point], bounds: Rect) -> BezPath {
    let mut path = BezPath::new();
    let mut last = None;
    for pair in points.windows(2) {
        let Some(line) = clip_line(Line::new(pair[0], pair[1]), bounds) else {
            last = None;
            continue;
        };
        if last != Some(line.p0) {
            path.move_to(line.p0);
        }
        path.line_to(line.p1);
        last = Some(line.p1);
    }
    path
}

/// Width to stroke `path` with on `surface`, or `None` if it is too thin to
/// represent.
///
/// Widths are capped at twice the surface diagonal.
fn stroke_width(path: &Path, surface: &Surface) -> Option<f64> {
    let diagonal = f64::from(surface.width()).hypot(f64::from(surface.height()));
    let width = path.width().min(2.0 * diagonal);
    (width >= f64::from(f32::MIN_POSITIVE)).then_some(width)
}

/// Paint for a path: pens paint over, erasers cut coverage away.
fn paint_for(path: &Path, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias,
        ..Paint::default()
    };
    match path.tool() {
        ToolKind::Pen => {
            paint.set_color(to_skia_color(path.color().into()));
            paint.blend_mode = BlendMode::SourceOver;
        }
        ToolKind::Eraser => {
            paint.set_color(tiny_skia::Color::BLACK);
            paint.blend_mode = BlendMode::DestinationOut;
        }
    }
    paint
}

/// Software renderer that repaints a [`Surface`] from a drawing state.
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    anti_alias: bool,
}

impl Default for RasterRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterRenderer {
    /// Create an anti-aliasing renderer.
    pub fn new() -> Self {
        Self { anti_alias: true }
    }

    /// Enable or disable anti-aliasing.
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// Stroke one path onto the surface. Paths under two points are skipped.
    fn render_path(&self, surface: &mut Surface, path: &Path) {
        if !path.is_visible() {
            return;
        }

        let Some(width) = stroke_width(path, surface) else {
            log::debug!("Skipping hairline path {} (width {})", path.id(), path.width());
            return;
        };

        // Nothing outside half the width (plus a pixel of anti-aliasing) can
        // touch the surface, and what is left fits in f32.
        let margin = width / 2.0 + 1.0;
        let bounds = Rect::new(
            0.0,
            0.0,
            f64::from(surface.width()),
            f64::from(surface.height()),
        )
        .inflate(margin, margin);
        let Some(skia_path) = to_skia_path(&clipped_polyline(path.points(), bounds)) else {
            log::debug!("Skipping path {} outside the surface", path.id());
            return;
        };

        // Each path gets its own paint, so the eraser blend mode never leaks
        // into the next path.
        let paint = paint_for(path, self.anti_alias);
        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        surface
            .pixmap_mut()
            .stroke_path(&skia_path, &paint, &stroke, Transform::identity(), None);
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, surface: &mut Surface, state: &DrawingState) -> RenderResult<()> {
        surface.clear();
        for path in state.paint_order() {
            self.render_path(surface, path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use peniko::Color;
    use sketchpad_core::{StrokeColor, ToolSettings};

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const CLEARED: [u8; 4] = [0, 0, 0, 0];

    fn surface() -> Surface {
        Surface::new(100, 100, Color::from_rgba8(255, 255, 255, 255)).unwrap()
    }

    fn stroke(state: &mut DrawingState, settings: ToolSettings, points: &[(f64, f64)]) {
        let (x, y) = points[0];
        state.begin(Point::new(x, y), &settings).unwrap();
        for &(x, y) in &points[1..] {
            state.extend(Point::new(x, y)).unwrap();
        }
        state.commit();
    }

    fn pen() -> ToolSettings {
        ToolSettings::default().with_width(10.0)
    }

    fn eraser() -> ToolSettings {
        ToolSettings::default()
            .with_tool(ToolKind::Eraser)
            .with_width(20.0)
    }

    fn render(state: &DrawingState) -> Surface {
        let mut surface = surface();
        RasterRenderer::new().render(&mut surface, state).unwrap();
        surface
    }

    #[test]
    fn test_empty_state_is_background() {
        let surface = render(&DrawingState::new());
        assert_eq!(surface.pixel(50, 50), Some(WHITE));
    }

    #[test]
    fn test_pen_stroke_paints_color() {
        let mut state = DrawingState::new();
        let red = pen().with_color(StrokeColor::rgb(255, 0, 0));
        stroke(&mut state, red, &[(10.0, 50.0), (90.0, 50.0)]);

        let surface = render(&state);
        assert_eq!(surface.pixel(50, 50), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(50, 10), Some(WHITE));
    }

    #[test]
    fn test_round_caps_extend_past_endpoints() {
        let mut state = DrawingState::new();
        stroke(&mut state, pen(), &[(20.0, 50.0), (80.0, 50.0)]);

        let surface = render(&state);
        // Round cap of radius 5 covers a few pixels before the first point.
        assert_eq!(surface.pixel(17, 50), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(10, 50), Some(WHITE));
    }

    #[test]
    fn test_single_point_active_path_leaves_no_mark() {
        let mut state = DrawingState::new();
        state.begin(Point::new(50.0, 50.0), &pen()).unwrap();

        let surface = render(&state);
        assert_eq!(surface.pixel(50, 50), Some(WHITE));
    }

    #[test]
    fn test_active_path_is_rendered() {
        let mut state = DrawingState::new();
        state.begin(Point::new(10.0, 50.0), &pen()).unwrap();
        state.extend(Point::new(90.0, 50.0)).unwrap();

        let surface = render(&state);
        assert_eq!(surface.pixel(50, 50), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_eraser_after_pen_clears_region() {
        let mut state = DrawingState::new();
        stroke(&mut state, pen(), &[(10.0, 50.0), (90.0, 50.0)]);
        stroke(&mut state, eraser(), &[(10.0, 50.0), (90.0, 50.0)]);

        let surface = render(&state);
        assert_eq!(surface.pixel(50, 50), Some(CLEARED));
    }

    #[test]
    fn test_pen_after_eraser_paints_region() {
        let mut state = DrawingState::new();
        stroke(&mut state, eraser(), &[(10.0, 50.0), (90.0, 50.0)]);
        stroke(&mut state, pen(), &[(10.0, 50.0), (90.0, 50.0)]);

        let surface = render(&state);
        assert_eq!(surface.pixel(50, 50), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_blend_mode_is_not_sticky() {
        let mut state = DrawingState::new();
        stroke(&mut state, eraser(), &[(10.0, 20.0), (90.0, 20.0)]);
        stroke(&mut state, pen(), &[(10.0, 80.0), (90.0, 80.0)]);

        let surface = render(&state);
        assert_eq!(surface.pixel(50, 20), Some(CLEARED));
        assert_eq!(surface.pixel(50, 80), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut state = DrawingState::new();
        stroke(&mut state, pen(), &[(5.0, 5.0), (60.0, 30.0), (95.0, 90.0)]);
        stroke(&mut state, eraser(), &[(0.0, 100.0), (100.0, 0.0)]);

        let mut renderer = RasterRenderer::new();
        let mut surface = surface();
        renderer.render(&mut surface, &state).unwrap();
        let first = surface.data().to_vec();
        renderer.render(&mut surface, &state).unwrap();

        assert_eq!(first, surface.data());
        assert_eq!(first, render(&state).data());
    }

    #[test]
    fn test_out_of_bounds_points_are_clipped() {
        let mut state = DrawingState::new();
        stroke(&mut state, pen(), &[(-50.0, 50.0), (150.0, 50.0)]);

        let surface = render(&state);
        assert_eq!(surface.pixel(0, 50), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(99, 50), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_aliased_rendering_has_no_partial_coverage() {
        let mut state = DrawingState::new();
        stroke(&mut state, pen(), &[(10.0, 10.0), (90.0, 73.0)]);

        let mut surface = surface();
        RasterRenderer::new()
            .with_anti_alias(false)
            .render(&mut surface, &state)
            .unwrap();

        let rgba = surface.to_rgba8();
        assert!(
            rgba.chunks(4)
                .all(|px| px == [0, 0, 0, 255] || px == WHITE)
        );
    }

    #[test]
    fn test_far_out_of_bounds_stroke_is_clipped() {
        let mut state = DrawingState::new();
        stroke(&mut state, pen(), &[(-1e12, 50.0), (1e12, 50.0)]);

        let surface = render(&state);
        assert_eq!(surface.pixel(0, 50), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(50, 50), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(50, 20), Some(WHITE));
    }

    #[test]
    fn test_stroke_leaving_and_reentering_surface() {
        let mut state = DrawingState::new();
        stroke(
            &mut state,
            pen(),
            &[(20.0, 20.0), (20.0, -1e15), (80.0, -1e15), (80.0, 20.0)],
        );

        let surface = render(&state);
        assert_eq!(surface.pixel(20, 10), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(80, 10), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(50, 10), Some(WHITE));
    }

    #[test]
    fn test_stroke_entirely_off_surface_leaves_no_mark() {
        let mut state = DrawingState::new();
        stroke(&mut state, pen(), &[(-500.0, -500.0), (-200.0, -300.0)]);

        let surface = render(&state);
        assert!(surface.to_rgba8().chunks(4).all(|px| px == WHITE));
    }

    #[test]
    fn test_huge_width_covers_surface() {
        let mut state = DrawingState::new();
        stroke(&mut state, pen().with_width(1e39), &[(10.0, 10.0), (20.0, 20.0)]);

        let surface = render(&state);
        assert!(surface.to_rgba8().chunks(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_vanishing_width_leaves_no_mark() {
        let mut state = DrawingState::new();
        stroke(&mut state, pen().with_width(1e-50), &[(0.0, 50.0), (100.0, 50.0)]);

        let surface = render(&state);
        assert!(surface.to_rgba8().chunks(4).all(|px| px == WHITE));
    }

    #[test]
    fn test_clip_line_keeps_inside_segment() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let line = Line::new(Point::new(1.0, 2.0), Point::new(8.0, 9.0));
        assert_eq!(clip_line(line, bounds), Some(line));

        let crossing = Line::new(Point::new(-10.0, 5.0), Point::new(30.0, 5.0));
        assert_eq!(
            clip_line(crossing, bounds),
            Some(Line::new(Point::new(0.0, 5.0), Point::new(10.0, 5.0)))
        );

        let outside = Line::new(Point::new(-10.0, -5.0), Point::new(20.0, -5.0));
        assert_eq!(clip_line(outside, bounds), None);

        let extreme = Line::new(Point::new(-f64::MAX, 5.0), Point::new(f64::MAX, 5.0));
        let clipped = clip_line(extreme, bounds).unwrap();
        assert!(clipped.p0.is_finite() && clipped.p1.is_finite());
    }
}
