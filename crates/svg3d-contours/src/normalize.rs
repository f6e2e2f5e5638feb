//! Coordinate normalization and duplicate removal.

use svg3d_core::{Contour, Point, ViewBox};

/// Drop every point that coincides with the point kept just before it.
pub fn dedupe_sequential(points: &[Point]) -> Contour {
    let mut out: Contour = Vec::with_capacity(points.len());
    for &p in points {
        if out.last().is_some_and(|last| last.approx_eq(&p)) {
            continue;
        }
        out.push(p);
    }
    out
}

/// Shift a contour by the viewBox origin, then dedupe.
///
/// Only translation is applied; width and height do not scale.
pub fn normalize_contour(points: &[Point], view_box: Option<&ViewBox>) -> Contour {
    match view_box {
        Some(vb) => {
            let shifted: Vec<Point> = points
                .iter()
                .map(|p| p.translated(-vb.min_x, -vb.min_y))
                .collect();
            dedupe_sequential(&shifted)
        }
        None => dedupe_sequential(points),
    }
}
