//! Geometry primitives
//!
//! Points, contours, bounding boxes and the two polygon measures every later
//! stage relies on: coincidence within [`EPSILON`] and the shoelace signed area.

use crate::constants::{
    BASE_DEPTH, CURVE_STEP, DEFAULT_MAX_CONTOUR_VERTICES, EPSILON, POCKET_DEPTH,
};
use serde::{Deserialize, Serialize};

/// A 2D point in document units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// True when both coordinates differ by less than [`EPSILON`].
    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// An ordered point sequence describing one outline.
pub type Contour = Vec<Point>;

/// True when the contour has at least four points and its ends coincide.
pub fn is_closed(points: &[Point]) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => points.len() >= 4 && first.approx_eq(last),
        _ => false,
    }
}

/// Shoelace signed area over consecutive pairs of the stored sequence.
///
/// The closing edge is not implied: pass a closed contour (last == first) to
/// get the area of the polygon. Positive means counter-clockwise in a y-up
/// frame, which is clockwise on screen for y-down SVG coordinates.
pub fn signed_area(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
        .sum::<f64>()
        / 2.0
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    /// Bounding box of a point set, `None` when empty.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = BBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points.iter().skip(1).fold(init, |b, p| BBox {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }
}

/// The document-level coordinate rectangle from the root `viewBox`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parse `minX minY width height`, separated by whitespace and/or commas.
    ///
    /// Anything other than exactly four numbers yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<f64> = raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>().ok())
            .collect::<Option<Vec<_>>>()?;

        match parts.as_slice() {
            [min_x, min_y, width, height] => Some(Self {
                min_x: *min_x,
                min_y: *min_y,
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }
}

/// Extrusion depths attached to every successful result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrusionParams {
    pub base_depth: f64,
    pub pocket_depth: f64,
}

impl Default for ExtrusionParams {
    fn default() -> Self {
        Self {
            base_depth: BASE_DEPTH,
            pocket_depth: POCKET_DEPTH,
        }
    }
}

impl ExtrusionParams {
    /// Height of the full-footprint layer below the pocket.
    pub fn floor_depth(&self) -> f64 {
        self.base_depth - self.pocket_depth
    }
}

/// Tunables threaded through the contour pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportOptions {
    /// Curve and ellipse sampling resolution.
    pub curve_step: f64,
    /// Contours above this vertex count are rejected during validation.
    pub max_contour_vertices: usize,
    pub extrusion: ExtrusionParams,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            curve_step: CURVE_STEP,
            max_contour_vertices: DEFAULT_MAX_CONTOUR_VERTICES,
            extrusion: ExtrusionParams::default(),
        }
    }
}
