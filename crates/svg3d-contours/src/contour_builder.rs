//! Path command stream to raw contours.
//!
//! [`ContourBuilder`] tracks the current point and the active subpath while
//! it consumes [`PathCommand`]s. Each finished subpath with at least three
//! points becomes a closed contour. Subpaths that never reach three points
//! are dropped.
//!
//! A subpath that grows past the vertex limit stops storing points. It is
//! still counted and its shoelace sum is kept, so it can be ranked and
//! reported as [`RawContour::Oversized`].

use crate::flatten::{ArcSegment, CurveSampler};
use crate::path_data::{CommandKind, PathCommand};
use svg3d_core::{is_closed, signed_area, Contour, Point};
use tracing::{debug, trace};

/// One extracted outline.
#[derive(Debug, Clone, PartialEq)]
pub enum RawContour {
    /// A point loop.
    Points(Contour),
    /// A closed loop that passed the vertex limit while it was drawn.
    Oversized { vertex_count: usize, signed_area: f64 },
}

impl RawContour {
    /// Keep `points` unless it is a closed loop longer than `limit`.
    pub fn capped(points: Contour, limit: usize) -> Self {
        if points.len() > limit && is_closed(&points) {
            RawContour::Oversized {
                vertex_count: points.len(),
                signed_area: signed_area(&points),
            }
        } else {
            RawContour::Points(points)
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            RawContour::Points(points) => points.len(),
            RawContour::Oversized { vertex_count, .. } => *vertex_count,
        }
    }
}

impl From<Contour> for RawContour {
    fn from(points: Contour) -> Self {
        RawContour::Points(points)
    }
}

impl From<&Contour> for RawContour {
    fn from(points: &Contour) -> Self {
        RawContour::Points(points.clone())
    }
}

fn cross(a: &Point, b: &Point) -> f64 {
    a.x * b.y - b.x * a.y
}

/// Points past the limit: only the count, the ends and the shoelace sum.
#[derive(Debug)]
struct Overflow {
    first: Point,
    count: usize,
    twice_area: f64,
}

/// Builds contours from one path's commands.
pub struct ContourBuilder<'s> {
    sampler: &'s CurveSampler,
    vertex_limit: usize,
    current: Point,
    subpath_start: Option<Point>,
    accumulator: Vec<Point>,
    last: Option<Point>,
    overflow: Option<Overflow>,
    contours: Vec<RawContour>,
}

impl<'s> ContourBuilder<'s> {
    pub fn new(sampler: &'s CurveSampler, vertex_limit: usize) -> Self {
        Self {
            sampler,
            vertex_limit,
            current: Point::default(),
            subpath_start: None,
            accumulator: Vec::new(),
            last: None,
            overflow: None,
            contours: Vec::new(),
        }
    }

    fn resolve(&self, relative: bool, x: f64, y: f64) -> Point {
        if relative {
            self.current.translated(x, y)
        } else {
            Point::new(x, y)
        }
    }

    /// Append a point, skipping it when it coincides with the previous one.
    fn push(&mut self, point: Point) {
        self.current = point;
        if let Some(last) = self.last {
            if last.approx_eq(&point) {
                return;
            }
            if let Some(overflow) = self.overflow.as_mut() {
                overflow.count += 1;
                overflow.twice_area += cross(&last, &point);
                self.last = Some(point);
                return;
            }
        }
        self.last = Some(point);
        self.accumulator.push(point);

        if self.accumulator.len() > self.vertex_limit {
            let points = std::mem::take(&mut self.accumulator);
            debug!(
                "Subpath passed {} vertices, keeping only its size",
                self.vertex_limit
            );
            self.overflow = Some(Overflow {
                first: points[0],
                count: points.len(),
                twice_area: signed_area(&points) * 2.0,
            });
        }
    }

    fn flush(&mut self) {
        let last = self.last.take();
        if let Some(mut overflow) = self.overflow.take() {
            if overflow.count < 3 {
                trace!("Dropping open subpath with {} points", overflow.count);
                return;
            }
            if let Some(last) = last {
                if !last.approx_eq(&overflow.first) {
                    overflow.count += 1;
                    overflow.twice_area += cross(&last, &overflow.first);
                }
            }
            self.contours.push(RawContour::Oversized {
                vertex_count: overflow.count,
                signed_area: overflow.twice_area / 2.0,
            });
            return;
        }

        let mut points = std::mem::take(&mut self.accumulator);
        if points.len() < 3 {
            if !points.is_empty() {
                trace!("Dropping open subpath with {} points", points.len());
            }
            return;
        }
        let first = points[0];
        if points.last().is_some_and(|last| !last.approx_eq(&first)) {
            points.push(first);
        }
        self.contours.push(RawContour::capped(points, self.vertex_limit));
    }

    fn move_to(&mut self, target: Point) {
        self.flush();
        self.subpath_start = Some(target);
        self.push(target);
    }

    /// Close back to the subpath start. A later segment without `MoveTo`
    /// begins an unanchored subpath that nothing closes explicitly.
    fn close_path(&mut self) {
        if let Some(start) = self.subpath_start.take() {
            self.push(start);
        }
        self.flush();
    }

    /// Apply one command, including its implicit repetitions.
    pub fn apply(&mut self, command: &PathCommand) {
        let relative = command.relative;
        match command.kind {
            CommandKind::MoveTo => {
                for (i, g) in command.groups().enumerate() {
                    let target = self.resolve(relative, g[0], g[1]);
                    if i == 0 {
                        self.move_to(target);
                    } else {
                        self.push(target);
                    }
                }
            }
            CommandKind::LineTo => {
                for g in command.groups() {
                    let target = self.resolve(relative, g[0], g[1]);
                    self.push(target);
                }
            }
            CommandKind::HorizontalLineTo => {
                for g in command.groups() {
                    let x = if relative { self.current.x + g[0] } else { g[0] };
                    self.push(Point::new(x, self.current.y));
                }
            }
            CommandKind::VerticalLineTo => {
                for g in command.groups() {
                    let y = if relative { self.current.y + g[0] } else { g[0] };
                    self.push(Point::new(self.current.x, y));
                }
            }
            CommandKind::CubicCurveTo => {
                for g in command.groups() {
                    let p0 = self.current;
                    let p1 = self.resolve(relative, g[0], g[1]);
                    let p2 = self.resolve(relative, g[2], g[3]);
                    let p3 = self.resolve(relative, g[4], g[5]);
                    for p in self.sampler.cubic(p0, p1, p2, p3) {
                        self.push(p);
                    }
                }
            }
            CommandKind::QuadraticCurveTo => {
                for g in command.groups() {
                    let p0 = self.current;
                    let p1 = self.resolve(relative, g[0], g[1]);
                    let p2 = self.resolve(relative, g[2], g[3]);
                    for p in self.sampler.quadratic(p0, p1, p2) {
                        self.push(p);
                    }
                }
            }
            CommandKind::ArcTo => {
                for g in command.groups() {
                    let arc = ArcSegment {
                        rx: g[0],
                        ry: g[1],
                        x_rotation: g[2],
                        large_arc: g[3] != 0.0,
                        sweep: g[4] != 0.0,
                        to: self.resolve(relative, g[5], g[6]),
                    };
                    for p in self.sampler.arc(self.current, &arc) {
                        self.push(p);
                    }
                }
            }
            CommandKind::ClosePath => self.close_path(),
        }
    }

    /// Flush the open subpath and return every contour built so far.
    pub fn finish(mut self) -> Vec<RawContour> {
        self.flush();
        self.contours
    }
}

/// Convert a parsed path into closed contours.
///
/// No subpath keeps more than `vertex_limit + 1` points in memory.
pub fn build_contours(
    commands: &[PathCommand],
    sampler: &CurveSampler,
    vertex_limit: usize,
) -> Vec<RawContour> {
    let mut builder = ContourBuilder::new(sampler, vertex_limit);
    for command in commands {
        builder.apply(command);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_data::parse_path_data;

    fn contours(d: &str) -> Vec<Contour> {
        build_contours(&parse_path_data(d), &CurveSampler::default(), usize::MAX)
            .into_iter()
            .map(|c| match c {
                RawContour::Points(points) => points,
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_square_absolute() {
        let result = contours("M0 0 L10 0 L10 10 L0 10 Z");
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0],
            pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)])
        );
    }

    #[test]
    fn test_relative_and_axis_commands() {
        let result = contours("m5 5 h10 v10 h-10 z");
        assert_eq!(
            result[0],
            pts(&[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0), (5.0, 5.0)])
        );
    }

    #[test]
    fn test_moveto_extra_pairs_are_lines() {
        let result = contours("M0 0 10 0 10 10 Z");
        assert_eq!(
            result[0],
            pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)])
        );
    }

    #[test]
    fn test_relative_moveto_extra_pairs_chain_from_current_point() {
        let result = contours("m10 10 5 0 0 5 z");
        assert_eq!(
            result[0],
            pts(&[(10.0, 10.0), (15.0, 10.0), (15.0, 15.0), (10.0, 10.0)])
        );
    }

    #[test]
    fn test_unclosed_subpath_is_closed_on_flush() {
        let result = contours("M0 0 L10 0 L10 10");
        assert_eq!(result.len(), 1);
        assert!(is_closed(&result[0]));
        assert_eq!(result[0].len(), 4);
    }

    #[test]
    fn test_multiple_subpaths() {
        let result = contours("M0 0 H10 V10 H0 Z M2 2 H4 V4 H2 Z");
        assert_eq!(result.len(), 2);
        assert_eq!(result[1][0], Point::new(2.0, 2.0));
    }

    #[test]
    fn test_drawing_after_close_is_not_anchored() {
        // Two points after Z, and the second Z has no start to return to.
        let result = contours("M0 0 H10 V10 Z L-10 0 L-10 -10 Z");
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0],
            pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)])
        );
    }

    #[test]
    fn test_drawing_after_close_starts_from_the_close_point() {
        let result = contours("M0 0 H10 V10 Z l-10 0 l0 -10 l5 -5 Z");
        assert_eq!(result.len(), 2);
        assert_eq!(
            result[1],
            pts(&[(-10.0, 0.0), (-10.0, -10.0), (-5.0, -15.0), (-10.0, 0.0)])
        );
    }

    #[test]
    fn test_short_subpaths_are_dropped() {
        assert!(contours("M0 0 L10 0 Z").is_empty());
        assert!(contours("M0 0 Z").is_empty());
        assert!(contours("M0 0 L0 0 L0 0").is_empty());
    }

    #[test]
    fn test_duplicate_points_are_skipped() {
        let result = contours("M0 0 L10 0 L10 0 L10 10 L0 10 Z");
        assert_eq!(result[0].len(), 5);
    }

    #[test]
    fn test_cubic_ends_on_target() {
        let result = contours("M0 0 C0 10 10 10 10 0 Z");
        assert_eq!(result.len(), 1);
        let outline = &result[0];
        assert!(outline.contains(&Point::new(10.0, 0.0)));
        assert!(outline.len() > 10);
        assert!(signed_area(outline).abs() > 10.0);
    }

    #[test]
    fn test_relative_cubic_controls_use_segment_start() {
        let absolute = contours("M10 10 C10 20 20 20 20 10 Z");
        let relative = contours("M10 10 c0 10 10 10 10 0 z");
        assert_eq!(absolute, relative);
    }

    #[test]
    fn test_quadratic_and_arc() {
        let result = contours("M0 0 Q5 10 10 0 A5 5 0 0 1 0 0 Z");
        assert_eq!(result.len(), 1);
        assert!(is_closed(&result[0]));
    }

    #[test]
    fn test_full_circle_from_two_arcs() {
        let result = contours("M0 0 A5 5 0 1 0 10 0 A5 5 0 1 0 0 0 Z");
        let area = signed_area(&result[0]).abs();
        let expected = std::f64::consts::PI * 25.0;
        assert!((area - expected).abs() / expected < 0.01);
    }

    #[test]
    fn test_zero_radius_arc_contributes_nothing() {
        let result = contours("M0 0 L10 0 A0 0 0 0 1 20 20 L10 10 Z");
        assert_eq!(
            result[0],
            pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)])
        );
    }

    #[test]
    fn test_tiny_radius_arc_draws_a_semicircle() {
        let result = contours("M0 0 A1e-300 1e-300 0 0 1 10 0 Z");
        assert_eq!(result.len(), 1);
        let half_disc = std::f64::consts::PI * 25.0 / 2.0;
        let area = signed_area(&result[0]).abs();
        assert!((area - half_disc).abs() / half_disc < 0.01);
    }

    #[test]
    fn test_oversized_subpath_keeps_only_its_size() {
        let sampler = CurveSampler::new(0.5, 1_000);
        let mut d = String::from("M0 0");
        for _ in 0..50 {
            d.push_str(" C0 500 500 500 500 0 C500 -500 0 -500 0 0");
        }
        let mut builder = ContourBuilder::new(&sampler, 100);
        for command in &parse_path_data(&d) {
            builder.apply(command);
            assert!(builder.accumulator.len() <= 101);
        }
        let result = builder.finish();
        assert_eq!(result.len(), 1);
        match &result[0] {
            RawContour::Oversized { vertex_count, .. } => assert!(*vertex_count > 50_000),
            other => panic!("expected an oversized contour, got {other:?}"),
        }
    }

    #[test]
    fn test_oversized_area_matches_full_contour() {
        let d = "M0 0 C0 40 40 40 40 0 L40 -20 L0 -20 Z";
        let full = contours(d);
        let capped = build_contours(&parse_path_data(d), &CurveSampler::default(), 10);
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].vertex_count(), full[0].len());
        match capped[0] {
            RawContour::Oversized { signed_area: area, .. } => {
                assert!((area - signed_area(&full[0])).abs() < 1e-6);
            }
            ref other => panic!("expected an oversized contour, got {other:?}"),
        }
    }

    #[test]
    fn test_contour_at_the_limit_is_kept() {
        let square = parse_path_data("M0 0 H10 V10 H0 Z");
        let sampler = CurveSampler::default();

        let kept = build_contours(&square, &sampler, 5);
        assert!(matches!(&kept[0], RawContour::Points(points) if points.len() == 5));

        let capped = build_contours(&square, &sampler, 4);
        assert!(matches!(capped[0], RawContour::Oversized { .. }));
        assert_eq!(capped[0].vertex_count(), 5);
    }
}
