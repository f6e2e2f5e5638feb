//! # svg3d Contours
//!
//! Turns SVG markup into one validated outer contour plus holes, ready to
//! be extruded into a two-layer solid.
//!
//! ## Pipeline
//!
//! ```text
//! SVG text
//!   └── XmlDocument (roxmltree)
//!         ├── <path d>        -> path_data -> contour_builder (+ flatten)
//!         └── <polygon|rect|circle|ellipse> -> primitives
//!               └── normalize (viewBox translation, dedup)
//!                     └── classify (outer/holes, validation, winding)
//!                           └── ImportResponse / ExtrusionPlan
//! ```
//!
//! Every stage is a pure function of its input; importers are `Send + Sync`
//! and can be shared across threads.
//!
//! ## Usage
//!
//! ```rust
//! use svg3d_contours::{ContourImporter, ImportResponse};
//!
//! let importer = ContourImporter::default();
//! let result = importer.import_str(r#"<svg><rect width="100" height="50"/></svg>"#);
//! let response = ImportResponse::from_result(&result);
//! assert!(response.ok);
//! assert_eq!(response.meta.unwrap().outer_area, 5000.0);
//! ```

pub mod classify;
pub mod contour_builder;
pub mod document;
pub mod extrusion;
pub mod flatten;
pub mod import;
pub mod normalize;
pub mod path_data;
pub mod primitives;
pub mod response;

pub use classify::{classify, ContourGeometry};
pub use contour_builder::{build_contours, ContourBuilder, RawContour};
pub use document::{ShapeDocument, ShapeElement, ShapeKind, XmlDocument, XmlElement};
pub use extrusion::{ExtrusionLayer, ExtrusionPlan};
pub use flatten::{ArcSegment, CurveSampler};
pub use import::ContourImporter;
pub use normalize::{dedupe_sequential, normalize_contour};
pub use path_data::{parse_path_data, CommandKind, PathCommand};
pub use response::{ImportResponse, ResponseGeometry, ResponseMeta};

pub use svg3d_core::{
    is_closed, signed_area, BBox, Contour, Error, ExtrusionParams, ImportError, ImportOptions,
    Point, Result, ValidationError, ValidationErrors, ViewBox,
};
