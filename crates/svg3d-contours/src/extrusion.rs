//! Two-layer extrusion plan.
//!
//! The solid is the outer footprint extruded over the full base depth. Its
//! top `pocket_depth` is replaced by a layer carrying the holes, so holes
//! become blind pockets rather than through-holes.

use crate::classify::ContourGeometry;
use serde::{Deserialize, Serialize};
use svg3d_core::Contour;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrusionLayer {
    pub z_bottom: f64,
    pub z_top: f64,
    pub outer: Contour,
    pub holes: Vec<Contour>,
}

impl ExtrusionLayer {
    pub fn depth(&self) -> f64 {
        self.z_top - self.z_bottom
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrusionPlan {
    pub solid: ExtrusionLayer,
    pub pocket: ExtrusionLayer,
    outer_area: f64,
    holes_area: f64,
}

impl ExtrusionPlan {
    pub fn new(geometry: &ContourGeometry) -> Self {
        let base = geometry.extrusion.base_depth;
        let pocket = geometry.extrusion.pocket_depth;
        Self {
            solid: ExtrusionLayer {
                z_bottom: 0.0,
                z_top: base,
                outer: geometry.outer.clone(),
                holes: Vec::new(),
            },
            pocket: ExtrusionLayer {
                z_bottom: base - pocket,
                z_top: base,
                outer: geometry.outer.clone(),
                holes: geometry.holes.clone(),
            },
            outer_area: geometry.outer_area,
            holes_area: geometry.holes_area(),
        }
    }

    /// Volume of the finished part: full footprint below the pocket layer,
    /// footprint minus holes within it.
    pub fn material_volume(&self) -> f64 {
        let floor = self.pocket.z_bottom - self.solid.z_bottom;
        self.outer_area * floor + (self.outer_area - self.holes_area) * self.pocket.depth()
    }
}
