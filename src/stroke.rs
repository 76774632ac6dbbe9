use crate::id_generator::StrokeId;
use egui::Pos2;

/// One pointer sample in canonical page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeInput {
    pub position: Pos2,
    /// Seconds since the gesture started.
    pub elapsed_time_seconds: f32,
}

impl StrokeInput {
    pub fn new(position: Pos2, elapsed_time_seconds: f32) -> Self {
        Self {
            position,
            elapsed_time_seconds,
        }
    }
}

/// Inputs of one continuous on-page pointer path.
pub type StrokeInputSegment = Vec<StrokeInput>;

/// A committed stroke, owned by its page.
///
/// Erasing only hides a stroke; it is deleted once the undo history that
/// could bring it back is discarded.
#[derive(Debug, Clone)]
pub struct FinishedStroke<S> {
    id: StrokeId,
    inputs: StrokeInputSegment,
    shape: S,
    pub(crate) should_draw: bool,
}

impl<S> FinishedStroke<S> {
    pub(crate) fn new(id: StrokeId, inputs: StrokeInputSegment, shape: S) -> Self {
        Self {
            id,
            inputs,
            shape,
            should_draw: true,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn inputs(&self) -> &[StrokeInput] {
        &self.inputs
    }

    /// Geometry built by the stroke engine.
    pub fn shape(&self) -> &S {
        &self.shape
    }

    pub fn should_draw(&self) -> bool {
        self.should_draw
    }

    pub fn positions(&self) -> Vec<Pos2> {
        self.inputs.iter().map(|input| input.position).collect()
    }
}
