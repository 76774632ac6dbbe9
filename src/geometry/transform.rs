use egui::{Pos2, Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

/// Rotation of the displayed pages, in 90 degree clockwise steps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageOrientation {
    #[default]
    Original,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

/// A 2D affine transform `[[a, b, c], [d, e, f], [0, 0, 1]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0);

    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Maps `point` through the transform.
    pub fn apply(&self, point: Pos2) -> Pos2 {
        pos2(
            self.a * point.x + self.b * point.y + self.c,
            self.d * point.x + self.e * point.y + self.f,
        )
    }

    /// Axis-aligned bounding box of `rect` after transformation.
    pub fn transform_rect(&self, rect: Rect) -> Rect {
        if rect.min.x > rect.max.x || rect.min.y > rect.max.y {
            return Rect::NOTHING;
        }
        let corners = [
            rect.left_top(),
            rect.right_top(),
            rect.left_bottom(),
            rect.right_bottom(),
        ];
        Rect::from_points(&corners.map(|corner| self.apply(corner)))
    }

    /// Uniform scale applied to lengths. Exact for the rotation and scale
    /// transforms produced by [`render_transform`].
    pub fn scale_factor(&self) -> f32 {
        (self.a * self.e - self.b * self.d).abs().sqrt()
    }
}

fn assert_valid_page(page_content_rect: Rect, scale_factor: f32) {
    assert!(scale_factor > 0.0, "scale factor must be positive, got {scale_factor}");
    assert!(
        page_content_rect.width() > 0.0 && page_content_rect.height() > 0.0,
        "page content rect must not be empty: {page_content_rect:?}"
    );
}

/// Converts a screen-space event position into canonical page space: relative
/// to the page origin, unrotated and unzoomed.
///
/// Rotated axes subtract one from the pivot dimension so that pixel centers
/// map onto pixel centers.
pub fn to_canonical_position(
    event_position: Pos2,
    orientation: PageOrientation,
    page_content_rect: Rect,
    scale_factor: f32,
) -> Pos2 {
    assert_valid_page(page_content_rect, scale_factor);

    let page_position = event_position - page_content_rect.min.to_vec2();
    let width = page_content_rect.width();
    let height = page_content_rect.height();
    let rotated = match orientation {
        PageOrientation::Original => page_position,
        PageOrientation::Clockwise90 => pos2(page_position.y, width - page_position.x - 1.0),
        PageOrientation::Clockwise180 => pos2(
            width - page_position.x - 1.0,
            height - page_position.y - 1.0,
        ),
        PageOrientation::Clockwise270 => pos2(height - page_position.y - 1.0, page_position.x),
    };
    pos2(rotated.x / scale_factor, rotated.y / scale_factor)
}

/// Builds the transform that renders canonical page-space geometry onto the
/// screen for a page occupying `page_content_rect`.
pub fn render_transform(
    viewport_origin_offset: Vec2,
    orientation: PageOrientation,
    page_content_rect: Rect,
    scale_factor: f32,
) -> Affine {
    assert!(
        viewport_origin_offset.x >= 0.0 && viewport_origin_offset.y >= 0.0,
        "viewport origin offset must not be negative: {viewport_origin_offset:?}"
    );
    assert_valid_page(page_content_rect, scale_factor);

    let s = scale_factor;
    let dx = viewport_origin_offset.x + page_content_rect.min.x;
    let dy = viewport_origin_offset.y + page_content_rect.min.y;
    let width = page_content_rect.width();
    let height = page_content_rect.height();
    match orientation {
        PageOrientation::Original => Affine::new(s, 0.0, dx, 0.0, s, dy),
        PageOrientation::Clockwise90 => Affine::new(0.0, -s, dx + width - 1.0, s, 0.0, dy),
        PageOrientation::Clockwise180 => {
            Affine::new(-s, 0.0, dx + width - 1.0, 0.0, -s, dy + height - 1.0)
        }
        PageOrientation::Clockwise270 => Affine::new(0.0, s, dx, -s, 0.0, dy + height - 1.0),
    }
}
