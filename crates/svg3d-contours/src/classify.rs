//! # Contour Classifier & Validator
//!
//! Picks the outer boundary among the extracted contours, validates every
//! contour and normalises winding.
//!
//! ## Pipeline
//!
//! 1. Dedupe each contour and keep the closed ones (>= 4 points, ends
//!    coincide). Reported indices refer to this filtered list.
//! 2. Stable-sort by absolute signed area, largest first. The largest is
//!    the outer candidate and must have a non-zero area.
//! 3. Per contour, in sorted order: vertex cap, self-intersection, then
//!    (for non-outer contours) vertex containment in the outer. Each check
//!    returns its own [`ValidationErrors`]; they are merged in that order.
//! 4. Any recorded error fails the whole classification.
//! 5. The outer is wound to positive signed area, holes to non-positive.
//!
//! Containment is vertex-only and holes are not checked against each other.

use crate::contour_builder::RawContour;
use crate::normalize::dedupe_sequential;
use serde::{Deserialize, Serialize};
use svg3d_core::constants::RAY_CAST_GUARD;
use svg3d_core::{
    is_closed, signed_area, BBox, Contour, ExtrusionParams, ImportOptions, Point,
    ValidationError, ValidationErrors,
};
use tracing::debug;

/// A validated outer contour with its holes.
///
/// Point lists do not repeat their first point at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContourGeometry {
    pub outer: Contour,
    pub holes: Vec<Contour>,
    pub bbox: BBox,
    pub outer_area: f64,
    pub extrusion: ExtrusionParams,
}

impl ContourGeometry {
    pub fn holes_count(&self) -> usize {
        self.holes.len()
    }

    /// Sum of absolute hole areas.
    pub fn holes_area(&self) -> f64 {
        self.holes.iter().map(|h| closed_area(h).abs()).sum()
    }
}

#[derive(Debug)]
struct Candidate {
    index: usize,
    /// Empty for an oversized contour.
    points: Contour,
    vertex_count: usize,
    abs_area: f64,
}

impl Candidate {
    /// Dedupe and keep closed contours, numbered in document order.
    fn collect<I>(contours: I) -> Vec<Candidate>
    where
        I: IntoIterator,
        I::Item: Into<RawContour>,
    {
        contours
            .into_iter()
            .filter_map(|contour| match Into::<RawContour>::into(contour) {
                RawContour::Points(points) => {
                    let points = dedupe_sequential(&points);
                    is_closed(&points).then(|| (points.len(), signed_area(&points), points))
                }
                RawContour::Oversized {
                    vertex_count,
                    signed_area: area,
                } => (vertex_count >= 4).then(|| (vertex_count, area, Vec::new())),
            })
            .enumerate()
            .map(|(index, (vertex_count, area, points))| Candidate {
                index,
                points,
                vertex_count,
                abs_area: area.abs(),
            })
            .collect()
    }
}

/// Orientation of `c` relative to the directed line `a -> b`.
pub fn orient(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Proper crossing test. Touching and collinear overlap do not count.
pub fn segments_intersect(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);
    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

/// O(n^2) scan of non-adjacent edge pairs of a closed contour.
///
/// The first and last edges share the closing vertex and are skipped too.
pub fn is_self_intersecting(points: &[Point]) -> bool {
    let segments = points.len().saturating_sub(1);
    for i in 0..segments {
        for j in (i + 2)..segments {
            if i == 0 && j == segments - 1 {
                continue;
            }
            if segments_intersect(&points[i], &points[i + 1], &points[j], &points[j + 1]) {
                return true;
            }
        }
    }
    false
}

/// Even-odd ray cast. Points on an edge may land on either side.
pub fn point_in_polygon(point: &Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    let Some(mut j) = polygon.len().checked_sub(1) else {
        return false;
    };
    for (i, pi) in polygon.iter().enumerate() {
        let pj = &polygon[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let mut dy = pj.y - pi.y;
            if dy == 0.0 || dy.is_nan() {
                dy = RAY_CAST_GUARD;
            }
            if point.x < (pj.x - pi.x) * (point.y - pi.y) / dy + pi.x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn closed_area(open: &[Point]) -> f64 {
    match open.first() {
        Some(first) => {
            let mut closed = open.to_vec();
            closed.push(*first);
            signed_area(&closed)
        }
        None => 0.0,
    }
}

/// Reverse `open` when its closed signed area has the wrong sign.
///
/// `positive` requests area > 0; otherwise area <= 0 is accepted.
pub fn ensure_orientation(open: Vec<Point>, positive: bool) -> Vec<Point> {
    let is_positive = closed_area(&open) > 0.0;
    if is_positive == positive {
        open
    } else {
        let mut reversed = open;
        reversed.reverse();
        reversed
    }
}

fn without_closing_point(points: &[Point]) -> Contour {
    points[..points.len().saturating_sub(1)].to_vec()
}

fn check_vertex_cap(c: &Candidate, limit: usize) -> Option<ValidationErrors> {
    (c.vertex_count > limit).then(|| {
        debug!("Contour {} exceeds the vertex cap", c.index);
        ValidationError::TooManyVertices {
            index: c.index,
            count: c.vertex_count,
            limit,
        }
        .into()
    })
}

fn check_self_intersection(c: &Candidate) -> Option<ValidationErrors> {
    is_self_intersecting(&c.points).then(|| {
        debug!("Contour {} self-intersects", c.index);
        ValidationError::SelfIntersectingContour { index: c.index }.into()
    })
}

/// Every vertex but the closing duplicate must lie inside the outer.
fn check_containment(c: &Candidate, outer: &Candidate) -> Option<ValidationErrors> {
    let vertices = &c.points[..c.points.len().saturating_sub(1)];
    if vertices.iter().all(|p| point_in_polygon(p, &outer.points)) {
        return None;
    }
    debug!("Contour {} has vertices outside the outer contour", c.index);
    Some(ValidationError::ContourOutsideOuter { index: c.index }.into())
}

fn merge(into: &mut Option<ValidationErrors>, more: Option<ValidationErrors>) {
    let Some(more) = more else {
        return;
    };
    match into {
        Some(errors) => errors.merge(more),
        None => *into = Some(more),
    }
}

/// Errors of one contour: the vertex cap alone, or self-intersection then
/// containment. `outer` is `None` for the outer itself and when containment
/// is skipped.
fn check_contour(
    c: &Candidate,
    outer: Option<&Candidate>,
    limit: usize,
) -> Option<ValidationErrors> {
    if let Some(capped) = check_vertex_cap(c, limit) {
        return Some(capped);
    }
    let mut errors = check_self_intersection(c);
    if let Some(outer) = outer {
        merge(&mut errors, check_containment(c, outer));
    }
    errors
}

/// Classify raw contours into one outer contour and its holes.
pub fn classify<I>(
    contours: I,
    options: &ImportOptions,
) -> Result<ContourGeometry, ValidationErrors>
where
    I: IntoIterator,
    I::Item: Into<RawContour>,
{
    let mut candidates = Candidate::collect(contours);
    if candidates.is_empty() {
        return Err(ValidationError::NoClosedContours.into());
    }

    candidates.sort_by(|a, b| b.abs_area.total_cmp(&a.abs_area));

    let (outer, rest) = candidates.split_at(1);
    let outer = &outer[0];
    if outer.abs_area.is_nan() || outer.abs_area <= 0.0 {
        return Err(ValidationError::DegenerateOuterContour.into());
    }
    debug!(
        "Outer candidate is contour {} (area {:.3}, {} points) of {}",
        outer.index,
        outer.abs_area,
        outer.vertex_count,
        candidates.len()
    );

    let limit = options.max_contour_vertices;
    let containment_outer = (outer.vertex_count <= limit).then_some(outer);

    let mut errors = check_contour(outer, None, limit);
    for c in rest {
        merge(&mut errors, check_contour(c, containment_outer, limit));
    }
    if let Some(errors) = errors {
        return Err(errors);
    }

    let bbox = BBox::from_points(&outer.points).ok_or(ValidationError::DegenerateOuterContour)?;

    Ok(ContourGeometry {
        outer: ensure_orientation(without_closing_point(&outer.points), true),
        holes: rest
            .iter()
            .map(|h| ensure_orientation(without_closing_point(&h.points), false))
            .collect(),
        bbox,
        outer_area: outer.abs_area,
        extrusion: options.extrusion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed(coords: &[(f64, f64)]) -> Contour {
        let mut points: Contour = coords.iter().map(|&(x, y)| Point::new(x, y)).collect();
        points.push(points[0]);
        points
    }

    fn square(x: f64, y: f64, size: f64) -> Contour {
        closed(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    fn errors_of(result: Result<ContourGeometry, ValidationErrors>) -> Vec<ValidationError> {
        result.unwrap_err().into_vec()
    }

    #[test]
    fn test_segments_intersect() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 10.0);
        let c = Point::new(0.0, 10.0);
        let d = Point::new(10.0, 0.0);
        assert!(segments_intersect(&a, &b, &c, &d));
        // Touching at an endpoint is not a proper crossing.
        assert!(!segments_intersect(&a, &b, &b, &d));
        // Collinear overlap is not reported.
        assert!(!segments_intersect(
            &a,
            &b,
            &Point::new(5.0, 5.0),
            &Point::new(15.0, 15.0)
        ));
    }

    #[test]
    fn test_convex_polygon_is_simple() {
        assert!(!is_self_intersecting(&square(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_bowtie_is_self_intersecting() {
        let bowtie = closed(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
        assert!(is_self_intersecting(&bowtie));
    }

    #[test]
    fn test_point_in_polygon() {
        let outer = square(0.0, 0.0, 10.0);
        assert!(point_in_polygon(&Point::new(5.0, 5.0), &outer));
        assert!(!point_in_polygon(&Point::new(15.0, 5.0), &outer));
        assert!(!point_in_polygon(&Point::new(-0.1, 5.0), &outer));
        assert!(!point_in_polygon(&Point::new(5.0, 5.0), &[]));
    }

    #[test]
    fn test_ensure_orientation() {
        let ccw = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert_eq!(ensure_orientation(ccw.clone(), true), ccw);
        let cw = ensure_orientation(ccw.clone(), false);
        assert_eq!(cw[0], Point::new(0.0, 1.0));
        assert!(closed_area(&cw) < 0.0);
    }

    #[test]
    fn test_single_square() {
        let geometry = classify(&[square(0.0, 0.0, 10.0)], &ImportOptions::default()).unwrap();
        assert_eq!(geometry.outer.len(), 4);
        assert!(geometry.holes.is_empty());
        assert_eq!(geometry.outer_area, 100.0);
        assert_eq!(geometry.bbox.max_x, 10.0);
        assert!(closed_area(&geometry.outer) > 0.0);
    }

    #[test]
    fn test_outer_is_largest_regardless_of_order() {
        let contours = vec![square(2.0, 2.0, 2.0), square(0.0, 0.0, 10.0)];
        let geometry = classify(&contours, &ImportOptions::default()).unwrap();
        assert_eq!(geometry.outer_area, 100.0);
        assert_eq!(geometry.holes_count(), 1);
        assert!(closed_area(&geometry.holes[0]) <= 0.0);
        assert_eq!(geometry.holes_area(), 4.0);
    }

    #[test]
    fn test_clockwise_outer_is_rewound() {
        let mut cw = square(0.0, 0.0, 10.0);
        cw.reverse();
        let geometry = classify(&[cw], &ImportOptions::default()).unwrap();
        assert!(closed_area(&geometry.outer) > 0.0);
    }

    #[test]
    fn test_no_closed_contours() {
        let open = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(
            errors_of(classify(&[open], &ImportOptions::default())),
            vec![ValidationError::NoClosedContours]
        );
        assert_eq!(
            errors_of(classify(Vec::<Contour>::new(), &ImportOptions::default())),
            vec![ValidationError::NoClosedContours]
        );
    }

    #[test]
    fn test_zero_area_outer_is_degenerate() {
        let flat = closed(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        assert_eq!(
            errors_of(classify(&[flat], &ImportOptions::default())),
            vec![ValidationError::DegenerateOuterContour]
        );

        // A symmetric bowtie cancels to zero area before any crossing test runs.
        let bowtie = closed(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
        assert_eq!(
            errors_of(classify(&[bowtie], &ImportOptions::default())),
            vec![ValidationError::DegenerateOuterContour]
        );
    }

    #[test]
    fn test_outside_contour_reports_filtered_index() {
        let open = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let contours = vec![open, square(0.0, 0.0, 10.0), square(20.0, 20.0, 2.0)];
        assert_eq!(
            errors_of(classify(&contours, &ImportOptions::default())),
            vec![ValidationError::ContourOutsideOuter { index: 1 }]
        );
    }

    #[test]
    fn test_errors_accumulate_in_area_order() {
        let outer = square(0.0, 0.0, 100.0);
        let crossing_hole = closed(&[(10.0, 10.0), (30.0, 20.0), (30.0, 10.0), (10.0, 30.0)]);
        let outside = square(200.0, 200.0, 1.0);
        let contours = vec![outside, crossing_hole, outer];
        assert_eq!(
            errors_of(classify(&contours, &ImportOptions::default())),
            vec![
                ValidationError::SelfIntersectingContour { index: 1 },
                ValidationError::ContourOutsideOuter { index: 0 },
            ]
        );
    }

    #[test]
    fn test_vertex_cap() {
        let options = ImportOptions {
            max_contour_vertices: 5,
            ..ImportOptions::default()
        };
        let outer = square(0.0, 0.0, 10.0);
        let pentagon_hole = closed(&[(2.0, 2.0), (4.0, 2.0), (5.0, 3.0), (4.0, 4.0), (2.0, 4.0)]);
        assert_eq!(
            errors_of(classify(&[outer.clone(), pentagon_hole], &options)),
            vec![ValidationError::TooManyVertices {
                index: 1,
                count: 6,
                limit: 5
            }]
        );

        let capped_outer = ImportOptions {
            max_contour_vertices: 3,
            ..ImportOptions::default()
        };
        let far_away = square(50.0, 50.0, 1.0);
        let errors = errors_of(classify(&[outer, far_away], &capped_outer));
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::TooManyVertices { .. })));
    }

    #[test]
    fn test_ties_keep_document_order() {
        let contours = vec![square(0.0, 0.0, 10.0), square(20.0, 0.0, 10.0)];
        assert_eq!(
            errors_of(classify(&contours, &ImportOptions::default())),
            vec![ValidationError::ContourOutsideOuter { index: 1 }]
        );
    }

    #[test]
    fn test_oversized_outer_skips_containment() {
        let oversized = RawContour::Oversized {
            vertex_count: 30_000,
            signed_area: -1.0e6,
        };
        let far_away = RawContour::from(square(5_000.0, 5_000.0, 1.0));
        assert_eq!(
            errors_of(classify(vec![far_away, oversized], &ImportOptions::default())),
            vec![ValidationError::TooManyVertices {
                index: 1,
                count: 30_000,
                limit: 20_000
            }]
        );
    }

    #[test]
    fn test_oversized_hole_is_ranked_by_its_area() {
        let contours = vec![
            RawContour::from(square(0.0, 0.0, 100.0)),
            RawContour::Oversized {
                vertex_count: 25_000,
                signed_area: 50.0,
            },
            RawContour::from(square(500.0, 500.0, 1.0)),
        ];
        assert_eq!(
            errors_of(classify(contours, &ImportOptions::default())),
            vec![
                ValidationError::TooManyVertices {
                    index: 1,
                    count: 25_000,
                    limit: 20_000
                },
                ValidationError::ContourOutsideOuter { index: 2 },
            ]
        );
    }

    #[test]
    fn test_errors_follow_area_order_then_check_order() {
        let outer = square(0.0, 0.0, 100.0);
        // Crosses itself and pokes out of the outer.
        let crossing_outside =
            closed(&[(90.0, 90.0), (120.0, 95.0), (120.0, 90.0), (90.0, 95.0)]);
        let outside = square(-50.0, -50.0, 2.0);
        let contours = vec![outer, outside, crossing_outside];
        assert_eq!(
            errors_of(classify(&contours, &ImportOptions::default())),
            vec![
                ValidationError::ContourOutsideOuter { index: 1 },
                ValidationError::SelfIntersectingContour { index: 2 },
                ValidationError::ContourOutsideOuter { index: 2 },
            ]
        );
    }
}
