//! Numeric constants shared across the pipeline.

/// Tolerance for treating two points as coincident, per axis.
pub const EPSILON: f64 = 1e-6;

/// Default sampling resolution for curves and ellipses, in document units.
pub const CURVE_STEP: f64 = 0.5;

/// Minimum number of samples for a Bezier segment.
pub const MIN_CURVE_STEPS: usize = 4;

/// Minimum number of samples for a circle or ellipse.
pub const MIN_ELLIPSE_STEPS: usize = 24;

/// Full extrusion depth of the outer footprint.
pub const BASE_DEPTH: f64 = 35.0;

/// Depth of the hole-bearing top layer.
pub const POCKET_DEPTH: f64 = 20.0;

/// Default cap on vertices per contour before validation refuses it.
pub const DEFAULT_MAX_CONTOUR_VERTICES: usize = 20_000;

/// Denominator substituted for a zero-height edge in ray casting.
pub const RAY_CAST_GUARD: f64 = 1e-12;

