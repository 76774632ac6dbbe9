use egui::{PointerButton, Pos2};

/// Pointer input forwarded by the host, in screen coordinates.
///
/// `time` is in seconds on any monotonic clock; only differences matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed, or a pen/finger touched down
    PointerDown {
        position: Pos2,
        button: PointerButton,
        time: f64,
    },
    /// Pointer moved
    PointerMove { position: Pos2, time: f64 },
    /// Mouse button was released, or a pen/finger lifted
    PointerUp {
        position: Pos2,
        button: PointerButton,
        time: f64,
    },
}

impl InputEvent {
    /// Primary button press.
    pub fn down(position: Pos2, time: f64) -> Self {
        Self::PointerDown {
            position,
            button: PointerButton::Primary,
            time,
        }
    }

    pub fn moved(position: Pos2, time: f64) -> Self {
        Self::PointerMove { position, time }
    }

    /// Primary button release.
    pub fn up(position: Pos2, time: f64) -> Self {
        Self::PointerUp {
            position,
            button: PointerButton::Primary,
            time,
        }
    }

    pub fn position(&self) -> Pos2 {
        match self {
            Self::PointerDown { position, .. }
            | Self::PointerMove { position, .. }
            | Self::PointerUp { position, .. } => *position,
        }
    }
}
