use crate::brush::Brush;
use crate::geometry::Affine;
use crate::stroke::StrokeInput;
use egui::Rect;

/// Stroke geometry and rendering backend.
///
/// Shapes live in canonical page space; `transform` maps them onto the
/// target (for rendering) or into the space of `rect` (for hit testing).
pub trait StrokeEngine {
    /// Immutable, renderable stroke geometry.
    type Shape;
    /// Render target handed to [`StrokeEngine::render`].
    type Canvas;

    /// Builds the geometry of `brush` dragged through `inputs`, which is
    /// never empty.
    fn build_stroke(&self, brush: &Brush, inputs: &[StrokeInput]) -> Self::Shape;

    /// Bounding box of `shape` in canonical page space.
    fn bounds(&self, shape: &Self::Shape) -> Rect;

    fn intersects_rect(&self, rect: Rect, shape: &Self::Shape, transform: &Affine) -> bool;

    fn render(&self, shape: &Self::Shape, transform: &Affine, canvas: &mut Self::Canvas);
}
