//! # svg3d Core
//!
//! Core types, constants, and error types for svg3d.
//! Provides the geometry data model shared by the contour engine, the
//! settings crate and the command-line front end.

pub mod constants;
pub mod error;
pub mod geometry;

pub use error::{Error, ImportError, Result, ValidationError, ValidationErrors};

pub use geometry::{
    is_closed, signed_area, BBox, Contour, ExtrusionParams, ImportOptions, Point, ViewBox,
};
