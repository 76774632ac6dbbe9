use crate::brush::{Brush, BrushType, RgbColor};
use crate::error::SettingsError;
use serde::{Deserialize, Serialize};

/// The brush selected before the host picks one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    pub brush_type: BrushType,
    pub size: f32,
    pub color: RgbColor,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            brush_type: BrushType::Pen,
            size: 3.0,
            color: RgbColor::default(),
        }
    }
}

/// Startup configuration of an [`InkModule`](crate::InkModule).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys keep their default values
pub struct InkSettings {
    /// Whether pointer events are consumed right away.
    pub annotation_mode_enabled: bool,
    pub brush: BrushSettings,
}

impl InkSettings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !Brush::is_size_in_range(self.brush.size) {
            return Err(SettingsError::Invalid(format!(
                "brush size {} out of range",
                self.brush.size
            )));
        }
        Ok(())
    }

    pub fn initial_brush(&self) -> Brush {
        Brush::new(self.brush.brush_type, self.brush.color.into(), self.brush.size)
    }
}
