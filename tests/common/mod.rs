#![allow(dead_code)]

use egui::{Pos2, Rect, Vec2, pos2, vec2};
use pdf_ink::{
    Brush, BrushType, InkModule, InkModuleClient, InkSettings, InputEvent, PageOrientation,
    PolylineEngine, StrokeId, StrokeInput, ToolSelection,
};
use serde_json::Value;

/// A viewer with pages laid out at fixed screen rects that records every
/// notification it receives.
#[derive(Debug, Default)]
pub struct FakeClient {
    pub pages: Vec<Rect>,
    pub hidden_pages: Vec<usize>,
    pub orientation: PageOrientation,
    pub zoom: f32,
    pub viewport_origin_offset: Vec2,

    pub invalidations: Vec<Rect>,
    pub strokes_finished: usize,
    pub mode_toggles: Vec<bool>,
    pub added: Vec<(usize, StrokeId, Vec<StrokeInput>)>,
    pub active_updates: Vec<(usize, StrokeId, bool)>,
    pub discarded: Vec<(usize, StrokeId)>,
    pub posted: Vec<Value>,
}

impl FakeClient {
    pub fn new(pages: Vec<Rect>) -> Self {
        Self {
            pages,
            zoom: 1.0,
            ..Default::default()
        }
    }

    /// One page with its origin at (5, 5), 50 wide and 60 tall.
    pub fn single_page() -> Self {
        Self::new(vec![Rect::from_min_size(pos2(5.0, 5.0), vec2(50.0, 60.0))])
    }

    /// Two pages stacked vertically with a 10 pixel gap.
    pub fn two_pages() -> Self {
        Self::new(vec![
            Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0)),
            Rect::from_min_size(pos2(0.0, 110.0), vec2(100.0, 100.0)),
        ])
    }

    pub fn clear_records(&mut self) {
        self.invalidations.clear();
        self.strokes_finished = 0;
        self.mode_toggles.clear();
        self.added.clear();
        self.active_updates.clear();
        self.discarded.clear();
        self.posted.clear();
    }
}

impl InkModuleClient for FakeClient {
    fn orientation(&self) -> PageOrientation {
        self.orientation
    }

    fn page_contents_rect(&self, page_index: usize) -> Rect {
        self.pages[page_index]
    }

    fn viewport_origin_offset(&self) -> Vec2 {
        self.viewport_origin_offset
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn is_page_visible(&self, page_index: usize) -> bool {
        page_index < self.pages.len() && !self.hidden_pages.contains(&page_index)
    }

    fn visible_page_index_from_point(&self, point: Pos2) -> Option<usize> {
        // Pages include their min edges but not their max edges.
        self.pages.iter().enumerate().find_map(|(index, rect)| {
            let inside = point.x >= rect.min.x
                && point.x < rect.max.x
                && point.y >= rect.min.y
                && point.y < rect.max.y;
            (inside && self.is_page_visible(index)).then_some(index)
        })
    }

    fn invalidate(&mut self, rect: Rect) {
        self.invalidations.push(rect);
    }

    fn stroke_finished(&mut self) {
        self.strokes_finished += 1;
    }

    fn on_annotation_mode_toggled(&mut self, enabled: bool) {
        self.mode_toggles.push(enabled);
    }

    fn stroke_added(&mut self, page_index: usize, id: StrokeId, inputs: &[StrokeInput]) {
        self.added.push((page_index, id, inputs.to_vec()));
    }

    fn update_stroke_active(&mut self, page_index: usize, id: StrokeId, active: bool) {
        self.active_updates.push((page_index, id, active));
    }

    fn discard_stroke(&mut self, page_index: usize, id: StrokeId) {
        self.discarded.push((page_index, id));
    }

    fn post_message(&mut self, message: Value) {
        self.posted.push(message);
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A module in annotation mode holding a 2 pixel black pen.
pub fn annotating_module(client: FakeClient) -> InkModule<FakeClient> {
    init_logging();
    let settings = InkSettings {
        annotation_mode_enabled: true,
        ..Default::default()
    };
    let mut module = InkModule::with_engine(client, PolylineEngine::new(), settings)
        .expect("valid settings");
    module.set_tool(pen(2.0));
    module
}

pub fn pen(size: f32) -> ToolSelection {
    ToolSelection::Brush(Brush::new(BrushType::Pen, egui::Color32::BLACK, size))
}

pub fn eraser(size: f32) -> ToolSelection {
    ToolSelection::Eraser { size }
}

/// Runs a full gesture through `points`: down on the first, a move for every
/// following one and up on the last.
pub fn run_gesture(module: &mut InkModule<FakeClient>, points: &[(f32, f32)]) {
    let (first, rest) = points.split_first().expect("gesture needs a point");
    let mut time = 0.0;
    module.handle_input_event(&InputEvent::down(pos2(first.0, first.1), time));
    for point in rest {
        time += 0.01;
        module.handle_input_event(&InputEvent::moved(pos2(point.0, point.1), time));
    }
    let last = points[points.len() - 1];
    module.handle_input_event(&InputEvent::up(pos2(last.0, last.1), time));
}

pub fn ids(values: &[usize]) -> Vec<StrokeId> {
    values.iter().copied().map(StrokeId).collect()
}
