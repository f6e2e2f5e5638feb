//! Basic shapes to closed point loops.

use crate::flatten::CurveSampler;
use svg3d_core::{Contour, Point};

/// Axis-aligned rectangle as a 5-point loop, `None` unless both sides are positive.
pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Option<Contour> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    Some(vec![
        Point::new(x, y),
        Point::new(x + width, y),
        Point::new(x + width, y + height),
        Point::new(x, y + height),
        Point::new(x, y),
    ])
}

/// Circle sampled as an ellipse with equal radii.
pub fn circle(cx: f64, cy: f64, r: f64, sampler: &CurveSampler) -> Option<Contour> {
    ellipse(cx, cy, r, r, sampler)
}

/// Ellipse sampled at `steps + 1` angles, the last repeating the first.
pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64, sampler: &CurveSampler) -> Option<Contour> {
    if !(rx > 0.0 && ry > 0.0) {
        return None;
    }
    let steps = sampler.ellipse_steps(rx, ry);
    Some(
        (0..=steps)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / steps as f64;
                Point::new(cx + rx * angle.cos(), cy + ry * angle.sin())
            })
            .collect(),
    )
}

/// Parse a `points` attribute.
///
/// Tokens that are not numbers are dropped, as is an unpaired trailing value.
pub fn parse_point_list(raw: &str) -> Vec<Point> {
    let values: Vec<f64> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect();
    values
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

/// Polygon loop, closed by repeating the first point when needed.
pub fn polygon(raw_points: &str) -> Option<Contour> {
    let mut points = parse_point_list(raw_points);
    if points.len() < 3 {
        return None;
    }
    let first = points[0];
    if points.last().is_some_and(|last| !last.approx_eq(&first)) {
        points.push(first);
    }
    Some(points)
}
