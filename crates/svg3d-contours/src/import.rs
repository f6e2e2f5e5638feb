//! Import pipeline.
//!
//! Text is checked, parsed, and every shape element is turned into raw
//! contours. Those are normalised against the root `viewBox` and handed to
//! the classifier. Structural failures stop at the first error; geometric
//! failures are collected by [`classify`].

use crate::classify::{classify, ContourGeometry};
use crate::contour_builder::{build_contours, RawContour};
use crate::document::{ShapeDocument, ShapeElement, ShapeKind, XmlDocument};
use crate::flatten::CurveSampler;
use crate::normalize::normalize_contour;
use crate::path_data::parse_path_data;
use crate::primitives;
use svg3d_core::{Contour, ImportError, ImportOptions, Result, ViewBox};
use tracing::{debug, info, warn};

/// Numeric attribute, 0 when missing, unparsable or non-finite.
fn number_attr<E: ShapeElement>(element: &E, name: &str) -> f64 {
    element
        .attribute(name)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn non_empty_attr<'e, E: ShapeElement>(element: &'e E, name: &str) -> Option<&'e str> {
    element.attribute(name).filter(|v| !v.is_empty())
}

/// Converts SVG documents into validated contour geometry.
#[derive(Debug, Clone, Default)]
pub struct ContourImporter {
    options: ImportOptions,
    sampler: CurveSampler,
}

impl ContourImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self {
            sampler: CurveSampler::from_options(&options),
            options,
        }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Import uploaded bytes. `None` means nothing was uploaded.
    pub fn import_upload(&self, file: Option<&[u8]>) -> Result<ContourGeometry> {
        let bytes = file.ok_or(ImportError::MissingFile)?;
        let text = String::from_utf8_lossy(bytes);
        self.import_str(&text)
    }

    /// Import SVG text.
    pub fn import_str(&self, text: &str) -> Result<ContourGeometry> {
        if !text.contains("<svg") {
            return Err(ImportError::NotSvgLike.into());
        }
        let doc = XmlDocument::parse(text)?;
        self.import_document(&doc)
    }

    /// Extract, normalise and classify contours from any document source.
    pub fn import_document<D: ShapeDocument>(&self, doc: &D) -> Result<ContourGeometry> {
        let contours = self.extract_contours(doc);
        if contours.is_empty() {
            return Err(ImportError::NoContoursFound.into());
        }

        match classify(contours, &self.options) {
            Ok(geometry) => {
                info!(
                    "Imported outer contour with {} points, {} holes, area {:.3}",
                    geometry.outer.len(),
                    geometry.holes_count(),
                    geometry.outer_area
                );
                Ok(geometry)
            }
            Err(errors) => {
                info!("Contour validation failed with {} errors", errors.len());
                Err(errors.into())
            }
        }
    }

    /// Raw contours of every shape element, viewBox-normalised, in document order.
    ///
    /// Closed loops over the vertex cap come back as [`RawContour::Oversized`].
    pub fn extract_contours<D: ShapeDocument>(&self, doc: &D) -> Vec<RawContour> {
        let view_box = match doc.root_attribute("viewBox") {
            Some(raw) => {
                let parsed = ViewBox::parse(raw);
                if parsed.is_none() {
                    warn!("Ignoring malformed viewBox '{}'", raw);
                }
                parsed
            }
            None => None,
        };

        let elements = doc.shape_elements();
        let limit = self.options.max_contour_vertices;
        let contours: Vec<RawContour> = elements
            .iter()
            .flat_map(|element| self.element_contours(element))
            .map(|contour| match contour {
                RawContour::Points(points) => {
                    RawContour::capped(normalize_contour(&points, view_box.as_ref()), limit)
                }
                oversized => oversized,
            })
            .collect();

        debug!(
            "Extracted {} contours ({} vertices) from {} shape elements",
            contours.len(),
            contours.iter().map(RawContour::vertex_count).sum::<usize>(),
            elements.len()
        );
        contours
    }

    fn element_contours<E: ShapeElement>(&self, element: &E) -> Vec<RawContour> {
        let contours: Vec<RawContour> = match element.kind() {
            ShapeKind::Path => match non_empty_attr(element, "d") {
                Some(d) => build_contours(
                    &parse_path_data(d),
                    &self.sampler,
                    self.options.max_contour_vertices,
                ),
                None => Vec::new(),
            },
            _ => self
                .primitive(element)
                .into_iter()
                .map(RawContour::Points)
                .collect(),
        };

        if contours.is_empty() {
            debug!("<{}> produced no contour", element.kind().tag());
        }
        contours
    }

    fn primitive<E: ShapeElement>(&self, element: &E) -> Option<Contour> {
        match element.kind() {
            ShapeKind::Path => None,
            ShapeKind::Polygon => non_empty_attr(element, "points").and_then(primitives::polygon),
            ShapeKind::Rect => primitives::rect(
                number_attr(element, "x"),
                number_attr(element, "y"),
                number_attr(element, "width"),
                number_attr(element, "height"),
            ),
            ShapeKind::Circle => primitives::circle(
                number_attr(element, "cx"),
                number_attr(element, "cy"),
                number_attr(element, "r"),
                &self.sampler,
            ),
            ShapeKind::Ellipse => primitives::ellipse(
                number_attr(element, "cx"),
                number_attr(element, "cy"),
                number_attr(element, "rx"),
                number_attr(element, "ry"),
                &self.sampler,
            ),
        }
    }
}
