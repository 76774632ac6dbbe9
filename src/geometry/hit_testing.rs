use egui::{Pos2, Rect};

/// Calculate distance from a point to a line segment
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Distance from a point to the closest point of `rect`; zero inside.
pub fn distance_to_rect(point: Pos2, rect: Rect) -> f32 {
    let dx = (rect.min.x - point.x).max(point.x - rect.max.x).max(0.0);
    let dy = (rect.min.y - point.y).max(point.y - rect.max.y).max(0.0);
    dx.hypot(dy)
}

/// Calculate the bounding box for a set of points
pub fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

/// Whether the segment from `start` to `end` touches `rect` (Liang-Barsky clip).
pub fn segment_intersects_rect(start: Pos2, end: Pos2, rect: Rect) -> bool {
    let delta = end - start;
    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;

    let edges = [
        (-delta.x, start.x - rect.min.x),
        (delta.x, rect.max.x - start.x),
        (-delta.y, start.y - rect.min.y),
        (delta.y, rect.max.y - start.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this edge: reject when outside of it.
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t_exit {
                return false;
            }
            t_enter = t_enter.max(t);
        } else {
            if t < t_enter {
                return false;
            }
            t_exit = t_exit.min(t);
        }
    }
    true
}

/// Whether a round-capped segment of the given `radius` overlaps `rect`.
pub fn capsule_intersects_rect(start: Pos2, end: Pos2, radius: f32, rect: Rect) -> bool {
    if segment_intersects_rect(start, end, rect) {
        return true;
    }

    // Disjoint: the closest pair is an endpoint vs the rect or a corner vs the segment.
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.left_bottom(),
        rect.right_bottom(),
    ];
    let closest = corners
        .iter()
        .map(|corner| distance_to_line_segment(*corner, start, end))
        .chain([distance_to_rect(start, rect), distance_to_rect(end, rect)])
        .fold(f32::INFINITY, f32::min);
    closest <= radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn unit_rect() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0))
    }

    #[test]
    fn test_distance_to_line_segment() {
        let d = distance_to_line_segment(pos2(5.0, 3.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert_eq!(d, 3.0);
        // Beyond the end clamps to the endpoint.
        let d = distance_to_line_segment(pos2(13.0, 4.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert_eq!(d, 5.0);
    }

    #[test]
    fn test_segment_crossing_rect_without_endpoints_inside() {
        assert!(segment_intersects_rect(pos2(-5.0, 5.0), pos2(15.0, 5.0), unit_rect()));
        assert!(!segment_intersects_rect(pos2(-5.0, 15.0), pos2(15.0, 15.0), unit_rect()));
    }

    #[test]
    fn test_single_point_segment() {
        assert!(segment_intersects_rect(pos2(3.0, 3.0), pos2(3.0, 3.0), unit_rect()));
        assert!(!segment_intersects_rect(pos2(13.0, 3.0), pos2(13.0, 3.0), unit_rect()));
    }

    #[test]
    fn test_capsule_uses_radius() {
        let start = pos2(12.0, -5.0);
        let end = pos2(12.0, 15.0);
        assert!(!capsule_intersects_rect(start, end, 1.5, unit_rect()));
        assert!(capsule_intersects_rect(start, end, 2.0, unit_rect()));
    }

    #[test]
    fn test_calculate_bounds() {
        let bounds = calculate_bounds(&[pos2(1.0, 2.0), pos2(4.0, -1.0)], 0.5);
        assert_eq!(bounds, Rect::from_min_max(pos2(0.5, -1.5), pos2(4.5, 2.5)));
        assert_eq!(calculate_bounds(&[], 1.0), Rect::NOTHING);
    }
}
