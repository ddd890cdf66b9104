use serde::{Deserialize, Serialize};

/// Spatial reference of an extent, identified by its well-known id (e.g. 102100 or 4326).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpatialReference {
    pub wkid: u32,
}

impl SpatialReference {
    pub const WEB_MERCATOR: SpatialReference = SpatialReference { wkid: 102100 };
    pub const WGS84: SpatialReference = SpatialReference { wkid: 4326 };

    pub fn new(wkid: u32) -> Self {
        Self { wkid }
    }
}

/// Bounding rectangle of the current view in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub spatial_reference: SpatialReference,
}

impl Extent {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64, spatial_reference: SpatialReference) -> Self {
        Self { xmin, ymin, xmax, ymax, spatial_reference }
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// `xmin,ymin,xmax,ymax` as used by export requests.
    pub fn to_bbox(&self) -> String {
        format!("{},{},{},{}", self.xmin, self.ymin, self.xmax, self.ymax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_keeps_coordinate_order() {
        let extent = Extent::new(-10.5, 20.0, 30.25, 40.0, SpatialReference::WGS84);
        assert_eq!(extent.to_bbox(), "-10.5,20,30.25,40");
        assert_eq!(extent.width(), 40.75);
        assert_eq!(extent.height(), 20.0);
    }
}
