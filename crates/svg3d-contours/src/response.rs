//! JSON response envelope.
//!
//! Success carries `meta` and `geometry`; failure carries only `errors`.

use crate::classify::ContourGeometry;
use serde::{Deserialize, Serialize};
use svg3d_core::{BBox, Contour, Error, ExtrusionParams};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub bbox: BBox,
    pub outer_area: f64,
    pub holes_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseGeometry {
    pub outer: Contour,
    pub holes: Vec<Contour>,
    pub extrusion: ExtrusionParams,
}

/// Result of one import request as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub ok: bool,
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<ResponseGeometry>,
}

impl ImportResponse {
    pub fn success(geometry: &ContourGeometry) -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            meta: Some(ResponseMeta {
                bbox: geometry.bbox,
                outer_area: geometry.outer_area,
                holes_count: geometry.holes_count(),
            }),
            geometry: Some(ResponseGeometry {
                outer: geometry.outer.clone(),
                holes: geometry.holes.clone(),
                extrusion: geometry.extrusion,
            }),
        }
    }

    /// One message per failure; validation failures list every error.
    pub fn failure(error: &Error) -> Self {
        Self {
            ok: false,
            errors: error.messages(),
            meta: None,
            geometry: None,
        }
    }

    pub fn from_result(result: &svg3d_core::Result<ContourGeometry>) -> Self {
        match result {
            Ok(geometry) => Self::success(geometry),
            Err(error) => Self::failure(error),
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
