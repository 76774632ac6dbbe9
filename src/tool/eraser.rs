/// The eraser and the state of an erase gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct EraserTool {
    size: f32,
    erasing: bool,
    did_erase_any: bool,
}

impl EraserTool {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            erasing: false,
            did_erase_any: false,
        }
    }

    /// Half the side of the square erased around the pointer.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    pub(crate) fn start_erasing(&mut self) {
        self.erasing = true;
        self.did_erase_any = false;
    }

    pub(crate) fn mark_erased(&mut self) {
        self.did_erase_any = true;
    }

    /// Ends the gesture. Returns whether it erased anything.
    pub(crate) fn finish_erasing(&mut self) -> bool {
        self.erasing = false;
        std::mem::take(&mut self.did_erase_any)
    }
}
