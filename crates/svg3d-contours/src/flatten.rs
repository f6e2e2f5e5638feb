//! Curve flattening.
//!
//! Bezier segments are sampled uniformly in `t`; the sample count follows
//! the control-polygon length so longer curves get proportionally more
//! points. Elliptical arcs are first converted to cubic segments with
//! `lyon`, then each cubic is sampled the same way.

use lyon::geom::{point as lpoint, vector, Angle, ArcFlags, SvgArc};
use svg3d_core::constants::{MIN_CURVE_STEPS, MIN_ELLIPSE_STEPS};
use svg3d_core::{ImportOptions, Point};

/// Parameters of an SVG `A` segment, with the end point already resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse x axis, degrees.
    pub x_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: Point,
}

/// Sampling policy for curves and ellipses.
///
/// `max_steps` bounds a single segment. A segment that reaches it already
/// passes the contour vertex cap, which the contour builder enforces across
/// segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSampler {
    pub step: f64,
    pub max_steps: usize,
}

impl CurveSampler {
    pub fn new(step: f64, max_steps: usize) -> Self {
        Self { step, max_steps }
    }

    pub fn from_options(options: &ImportOptions) -> Self {
        Self::new(options.curve_step, options.max_contour_vertices)
    }

    fn steps_for(&self, length: f64, minimum: usize) -> usize {
        let wanted = (length / self.step).ceil();
        // NaN and negative values cast to 0, +inf saturates.
        let wanted = wanted as usize;
        wanted.min(self.max_steps).max(minimum)
    }

    /// Sample count for a cubic with the given control points.
    pub fn cubic_steps(&self, p0: Point, p1: Point, p2: Point, p3: Point) -> usize {
        let length = p0.distance_to(&p1) + p1.distance_to(&p2) + p2.distance_to(&p3);
        self.steps_for(length, MIN_CURVE_STEPS)
    }

    /// Sample count for a quadratic with the given control points.
    pub fn quadratic_steps(&self, p0: Point, p1: Point, p2: Point) -> usize {
        let length = p0.distance_to(&p1) + p1.distance_to(&p2);
        self.steps_for(length, MIN_CURVE_STEPS)
    }

    /// Sample count for a full ellipse.
    pub fn ellipse_steps(&self, rx: f64, ry: f64) -> usize {
        let circumference = std::f64::consts::TAU * rx.max(ry);
        self.steps_for(circumference, MIN_ELLIPSE_STEPS)
    }

    /// Points at `t = i / steps` for `i = 1..=steps`; `p0` itself is excluded.
    pub fn cubic(&self, p0: Point, p1: Point, p2: Point, p3: Point) -> Vec<Point> {
        let steps = self.cubic_steps(p0, p1, p2, p3);
        (1..=steps)
            .map(|i| cubic_at(p0, p1, p2, p3, i as f64 / steps as f64))
            .collect()
    }

    /// Points at `t = i / steps` for `i = 1..=steps`; `p0` itself is excluded.
    pub fn quadratic(&self, p0: Point, p1: Point, p2: Point) -> Vec<Point> {
        let steps = self.quadratic_steps(p0, p1, p2);
        (1..=steps)
            .map(|i| quadratic_at(p0, p1, p2, i as f64 / steps as f64))
            .collect()
    }

    /// Flatten an arc starting at `from`.
    ///
    /// Each cubic of the conversion starts where the previous sampled one
    /// ended. A zero radius or `from == to` yields nothing.
    pub fn arc(&self, from: Point, arc: &ArcSegment) -> Vec<Point> {
        let mut points = Vec::new();
        let mut current = from;
        for [_, ctrl1, ctrl2, to] in arc_to_cubics(from, arc) {
            points.extend(self.cubic(current, ctrl1, ctrl2, to));
            current = to;
        }
        points
    }
}

impl Default for CurveSampler {
    fn default() -> Self {
        Self::from_options(&ImportOptions::default())
    }
}

fn cubic_at(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

fn quadratic_at(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let c = t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}

/// Convert an SVG arc into cubic segments `[from, ctrl1, ctrl2, to]`.
///
/// Radii are taken by absolute value and scaled up when too small to reach
/// the end point, following SVG arc implementation notes. Only an exactly
/// zero radius or a closed arc (`from == to`) is dropped.
pub fn arc_to_cubics(from: Point, arc: &ArcSegment) -> Vec<[Point; 4]> {
    let (mut rx, mut ry) = (arc.rx.abs(), arc.ry.abs());
    if rx == 0.0 || ry == 0.0 || from == arc.to {
        return Vec::new();
    }

    // Scale here rather than in lyon: squaring a tiny radius underflows.
    let (sin, cos) = arc.x_rotation.to_radians().sin_cos();
    let hx = (from.x - arc.to.x) / 2.0;
    let hy = (from.y - arc.to.y) / 2.0;
    let scale = ((cos * hx + sin * hy) / rx).hypot((cos * hy - sin * hx) / ry);
    if scale > 1.0 {
        rx *= scale;
        ry *= scale;
    }

    let svg_arc = SvgArc {
        from: lpoint(from.x, from.y),
        to: lpoint(arc.to.x, arc.to.y),
        radii: vector(rx, ry),
        x_rotation: Angle::degrees(arc.x_rotation),
        flags: ArcFlags {
            large_arc: arc.large_arc,
            sweep: arc.sweep,
        },
    };

    // Still below lyon's tolerance: the arc is its own chord.
    if svg_arc.is_straight_line() {
        let along = |t: f64| {
            Point::new(
                from.x + (arc.to.x - from.x) * t,
                from.y + (arc.to.y - from.y) * t,
            )
        };
        return vec![[from, along(1.0 / 3.0), along(2.0 / 3.0), arc.to]];
    }

    let mut cubics = Vec::new();
    svg_arc.to_arc().for_each_cubic_bezier(&mut |seg| {
        cubics.push([
            Point::new(seg.from.x, seg.from.y),
            Point::new(seg.ctrl1.x, seg.ctrl1.y),
            Point::new(seg.ctrl2.x, seg.ctrl2.y),
            Point::new(seg.to.x, seg.to.y),
        ]);
    });
    cubics
}
