use crate::brush::Brush;
use crate::engine::StrokeEngine;
use crate::geometry::Affine;
use crate::geometry::hit_testing::{calculate_bounds, capsule_intersects_rect};
use crate::stroke::StrokeInput;
use egui::{Color32, Pos2, Rect, Shape, Stroke as EguiStroke, Vec2};

/// Stroke geometry produced by [`PolylineEngine`]: the input positions joined
/// by straight segments of the brush width.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineShape {
    points: Vec<Pos2>,
    width: f32,
    color: Color32,
    corner_rounding: f32,
    bounds: Rect,
}

impl PolylineShape {
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Square tips (0.0) are drawn with square caps, anything else round.
    pub fn corner_rounding(&self) -> f32 {
        self.corner_rounding
    }

    fn has_square_tip(&self) -> bool {
        self.corner_rounding <= 0.0
    }
}

/// Moves both ends of `points` outward by `extension` along the end segments.
fn extend_ends(points: &mut [Pos2], extension: f32) {
    let n = points.len();
    if n < 2 {
        return;
    }
    let start_direction = (points[0] - points[1]).normalized();
    let end_direction = (points[n - 1] - points[n - 2]).normalized();
    points[0] += start_direction * extension;
    points[n - 1] += end_direction * extension;
}

/// A [`StrokeEngine`] that tessellates nothing: strokes are polylines and
/// rendering appends [`egui::Shape`]s to a list, ready for an `egui::Painter`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PolylineEngine;

impl PolylineEngine {
    pub fn new() -> Self {
        Self
    }
}

impl StrokeEngine for PolylineEngine {
    type Shape = PolylineShape;
    type Canvas = Vec<Shape>;

    fn build_stroke(&self, brush: &Brush, inputs: &[StrokeInput]) -> PolylineShape {
        let points: Vec<Pos2> = inputs.iter().map(|input| input.position).collect();
        let width = brush.size();
        PolylineShape {
            bounds: calculate_bounds(&points, width / 2.0),
            points,
            width,
            color: brush.render_color(),
            corner_rounding: brush.corner_rounding(),
        }
    }

    fn bounds(&self, shape: &PolylineShape) -> Rect {
        shape.bounds
    }

    fn intersects_rect(&self, rect: Rect, shape: &PolylineShape, transform: &Affine) -> bool {
        let radius = shape.width / 2.0 * transform.scale_factor();
        let points: Vec<Pos2> = shape.points.iter().map(|point| transform.apply(*point)).collect();
        match points.as_slice() {
            [] => false,
            [point] => capsule_intersects_rect(*point, *point, radius, rect),
            _ => points
                .windows(2)
                .any(|window| capsule_intersects_rect(window[0], window[1], radius, rect)),
        }
    }

    fn render(&self, shape: &PolylineShape, transform: &Affine, canvas: &mut Vec<Shape>) {
        let width = shape.width * transform.scale_factor();
        let mut points: Vec<Pos2> =
            shape.points.iter().map(|point| transform.apply(*point)).collect();
        if let [point] = points[..] {
            let dot = if shape.has_square_tip() {
                let square = Rect::from_center_size(point, Vec2::splat(width));
                Shape::rect_filled(square, 0.0, shape.color)
            } else {
                Shape::circle_filled(point, width / 2.0, shape.color)
            };
            canvas.push(dot);
        } else if points.len() > 1 {
            if shape.has_square_tip() {
                extend_ends(&mut points, width / 2.0);
            }
            canvas.push(Shape::line(points, EguiStroke::new(width, shape.color)));
        }
    }
}
