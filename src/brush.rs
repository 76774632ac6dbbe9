use egui::{Color32, Pos2, Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

/// Smallest brush or eraser size accepted from the host.
pub const MIN_TOOL_SIZE: f32 = 1.0;
/// Largest brush or eraser size accepted from the host.
pub const MAX_TOOL_SIZE: f32 = 16.0;

/// The drawing tools that leave ink behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushType {
    Pen,
    Highlighter,
}

impl BrushType {
    /// Parses the name the host uses for this brush type.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pen" => Some(Self::Pen),
            "highlighter" => Some(Self::Highlighter),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Highlighter => "highlighter",
        }
    }

    fn opacity(self) -> f32 {
        match self {
            Self::Pen => 1.0,
            Self::Highlighter => 0.4,
        }
    }

    fn corner_rounding(self) -> f32 {
        match self {
            Self::Pen => 1.0,
            Self::Highlighter => 0.0,
        }
    }
}

/// An opaque color as exchanged with the host: `{"r": 0, "g": 0, "b": 0}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<RgbColor> for Color32 {
    fn from(color: RgbColor) -> Self {
        Color32::from_rgb(color.r, color.g, color.b)
    }
}

impl From<Color32> for RgbColor {
    fn from(color: Color32) -> Self {
        Self {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        }
    }
}

/// Immutable description of the active drawing tool. Changing the color or
/// size means building a new `Brush`.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    brush_type: BrushType,
    color: Color32,
    size: f32,
}

impl Brush {
    /// Creates a brush. `size` must already be validated with
    /// [`Brush::is_size_in_range`].
    pub fn new(brush_type: BrushType, color: Color32, size: f32) -> Self {
        assert!(
            Self::is_size_in_range(size),
            "brush size {size} outside of [{MIN_TOOL_SIZE}, {MAX_TOOL_SIZE}]"
        );
        Self {
            brush_type,
            color: Color32::from_rgb(color.r(), color.g(), color.b()),
            size,
        }
    }

    pub fn is_size_in_range(size: f32) -> bool {
        (MIN_TOOL_SIZE..=MAX_TOOL_SIZE).contains(&size)
    }

    pub fn brush_type(&self) -> BrushType {
        self.brush_type
    }

    /// The opaque RGB color chosen by the user.
    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Tip diameter in canonical page units.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn opacity(&self) -> f32 {
        self.brush_type.opacity()
    }

    /// 1.0 is a fully round tip, 0.0 a square one.
    pub fn corner_rounding(&self) -> f32 {
        self.brush_type.corner_rounding()
    }

    /// The color with the brush opacity applied, as handed to renderers.
    pub fn render_color(&self) -> Color32 {
        let alpha = (self.opacity() * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.color.r(), self.color.g(), self.color.b(), alpha)
    }

    /// The area covered by a straight brush movement between two points,
    /// rounded outward to whole pixels.
    pub fn invalidate_area(&self, center1: Pos2, center2: Pos2) -> Rect {
        let tip = Vec2::splat(self.size);
        let area = Rect::from_center_size(center1, tip).union(Rect::from_center_size(center2, tip));
        Rect::from_min_max(
            pos2(area.min.x.floor(), area.min.y.floor()),
            pos2(area.max.x.ceil(), area.max.y.ceil()),
        )
    }
}
