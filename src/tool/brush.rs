use crate::brush::Brush;
use crate::stroke::{StrokeInput, StrokeInputSegment};
use egui::Pos2;

/// A draw gesture between pointer down and up.
#[derive(Debug, Clone)]
pub struct ActiveStroke {
    page_index: usize,
    start_time: f64,
    /// Never empty; only the last segment may be empty.
    segments: Vec<StrokeInputSegment>,
    /// Screen position of the previous on-page event, forgotten when the
    /// pointer leaves the page.
    last_event_position: Option<Pos2>,
}

impl ActiveStroke {
    fn new(page_index: usize, start_time: f64, position: Pos2, canonical_position: Pos2) -> Self {
        Self {
            page_index,
            start_time,
            segments: vec![vec![StrokeInput::new(canonical_position, 0.0)]],
            last_event_position: Some(position),
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn segments(&self) -> &[StrokeInputSegment] {
        &self.segments
    }

    /// Segments holding at least one input.
    pub fn non_empty_segments(&self) -> impl Iterator<Item = &StrokeInputSegment> {
        self.segments.iter().filter(|segment| !segment.is_empty())
    }

    pub(crate) fn into_segments(self) -> Vec<StrokeInputSegment> {
        self.segments
    }

    /// Appends an on-page sample. Returns the screen position the brush moved
    /// from, which is `position` itself on the first sample of a segment.
    pub(crate) fn add_point(
        &mut self,
        position: Pos2,
        canonical_position: Pos2,
        time: f64,
    ) -> Pos2 {
        let elapsed = (time - self.start_time).max(0.0) as f32;
        let previous = self.last_event_position.replace(position).unwrap_or(position);
        if let Some(segment) = self.segments.last_mut() {
            segment.push(StrokeInput::new(canonical_position, elapsed));
        }
        previous
    }

    /// The pointer left the page: later samples go to a fresh segment.
    pub(crate) fn leave_page(&mut self) {
        if self.segments.last().is_some_and(|segment| !segment.is_empty()) {
            self.segments.push(Vec::new());
        }
        self.last_event_position = None;
    }
}

/// The pen or highlighter, plus the stroke being drawn with it.
#[derive(Debug, Clone)]
pub struct BrushTool {
    brush: Brush,
    current_stroke: Option<ActiveStroke>,
}

impl BrushTool {
    pub fn new(brush: Brush) -> Self {
        Self {
            brush,
            current_stroke: None,
        }
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn current_stroke(&self) -> Option<&ActiveStroke> {
        self.current_stroke.as_ref()
    }

    pub(crate) fn current_stroke_mut(&mut self) -> Option<&mut ActiveStroke> {
        self.current_stroke.as_mut()
    }

    /// Start a new stroke at the given position
    pub(crate) fn start_stroke(
        &mut self,
        page_index: usize,
        time: f64,
        position: Pos2,
        canonical_position: Pos2,
    ) {
        self.current_stroke = Some(ActiveStroke::new(
            page_index,
            time,
            position,
            canonical_position,
        ));
    }

    /// Ends the current stroke, handing back what was drawn
    pub(crate) fn take_stroke(&mut self) -> Option<ActiveStroke> {
        self.current_stroke.take()
    }
}
