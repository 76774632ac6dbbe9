use crate::geometry::PageOrientation;
use crate::id_generator::StrokeId;
use crate::stroke::StrokeInput;
use egui::{Pos2, Rect, Vec2};

/// The viewer hosting an [`InkModule`](crate::InkModule): page layout queries
/// plus the notifications the module sends back.
///
/// Rects and points are in screen space.
pub trait InkModuleClient {
    fn orientation(&self) -> PageOrientation;

    /// Where the page's contents sit on screen. Must not be empty for visible
    /// pages.
    fn page_contents_rect(&self, page_index: usize) -> Rect;

    fn viewport_origin_offset(&self) -> Vec2;

    fn zoom(&self) -> f32;

    fn is_page_visible(&self, page_index: usize) -> bool;

    /// The visible page under `point`, if any.
    fn visible_page_index_from_point(&self, point: Pos2) -> Option<usize>;

    /// Requests a repaint of `rect`.
    fn invalidate(&mut self, rect: Rect);

    /// A draw gesture, or an erase gesture that erased something, ended.
    fn stroke_finished(&mut self);

    fn on_annotation_mode_toggled(&mut self, _enabled: bool) {}

    /// A stroke was committed to `page_index`.
    fn stroke_added(&mut self, _page_index: usize, _id: StrokeId, _inputs: &[StrokeInput]) {}

    /// A stroke was hidden (erase, undo) or shown again (redo, undo of an
    /// erase).
    fn update_stroke_active(&mut self, _page_index: usize, _id: StrokeId, _active: bool) {}

    /// A stroke was deleted for good.
    fn discard_stroke(&mut self, _page_index: usize, _id: StrokeId) {}

    /// Sends a reply message to the host.
    fn post_message(&mut self, _message: serde_json::Value) {}
}
