mod brush;
mod eraser;

pub use brush::{ActiveStroke, BrushTool};
pub use eraser::EraserTool;

use crate::message::ToolSelection;

/// The active tool. Exactly one is live; selecting another replaces it.
#[derive(Debug, Clone)]
pub enum ToolState {
    Drawing(BrushTool),
    Erasing(EraserTool),
}

impl From<ToolSelection> for ToolState {
    fn from(selection: ToolSelection) -> Self {
        match selection {
            ToolSelection::Brush(brush) => Self::Drawing(BrushTool::new(brush)),
            ToolSelection::Eraser { size } => Self::Erasing(EraserTool::new(size)),
        }
    }
}

impl ToolState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Drawing(tool) => tool.brush().brush_type().name(),
            Self::Erasing(_) => "eraser",
        }
    }

    /// Whether a pointer gesture is in progress.
    pub fn is_active(&self) -> bool {
        match self {
            Self::Drawing(tool) => tool.current_stroke().is_some(),
            Self::Erasing(tool) => tool.is_erasing(),
        }
    }
}
