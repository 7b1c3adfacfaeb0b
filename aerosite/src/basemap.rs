//! Background tile maps available for site planning.

use serde::{Deserialize, Serialize};

/// Credit for the data of a basemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribution {
    /// Attribution text.
    pub text: &'static str,
    /// Link to the data source.
    pub url: Option<&'static str>,
}

impl Attribution {
    /// Creates a new attribution.
    pub const fn new(text: &'static str, url: Option<&'static str>) -> Self {
        Self { text, url }
    }
}

/// Background tile map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basemap {
    /// OpenStreetMap street map.
    #[default]
    Streets,
    /// Aerial imagery.
    Satellite,
    /// Aerial imagery with labels.
    Hybrid,
    /// Topographic map.
    Terrain,
}

/// All basemaps.
pub const MAP_BASEMAPS: [Basemap; 4] = [
    Basemap::Streets,
    Basemap::Satellite,
    Basemap::Hybrid,
    Basemap::Terrain,
];

const ESRI_IMAGERY: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";

impl Basemap {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Basemap::Streets => "Streets",
            Basemap::Satellite => "Satellite",
            Basemap::Hybrid => "Hybrid",
            Basemap::Terrain => "Terrain",
        }
    }

    /// Tile url template with `{z}`, `{x}` and `{y}` placeholders.
    pub fn url_template(&self) -> &'static str {
        match self {
            Basemap::Streets => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            Basemap::Satellite | Basemap::Hybrid => ESRI_IMAGERY,
            Basemap::Terrain => "https://tile.opentopomap.org/{z}/{x}/{y}.png",
        }
    }

    /// Url of a single tile.
    pub fn tile_url(&self, z: u32, x: u32, y: u32) -> String {
        self.url_template()
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }

    /// Data attribution.
    pub fn attribution(&self) -> Attribution {
        match self {
            Basemap::Streets => Attribution::new(
                "© OpenStreetMap contributors",
                Some("https://www.openstreetmap.org/copyright"),
            ),
            Basemap::Satellite | Basemap::Hybrid => {
                Attribution::new("© Esri", Some("https://www.esri.com"))
            }
            Basemap::Terrain => Attribution::new(
                "© OpenTopoMap (CC-BY-SA)",
                Some("https://opentopomap.org"),
            ),
        }
    }

    /// Maximum zoom level with available tiles.
    pub fn max_zoom(&self) -> u8 {
        match self {
            Basemap::Streets => 19,
            Basemap::Satellite | Basemap::Hybrid => 19,
            Basemap::Terrain => 17,
        }
    }

    /// Returns true if a label overlay is drawn on top of the imagery.
    pub fn has_labels(&self) -> bool {
        !matches!(self, Basemap::Satellite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_url() {
        assert_eq!(
            Basemap::Streets.tile_url(3, 4, 2),
            "https://tile.openstreetmap.org/3/4/2.png"
        );
        let satellite = Basemap::Satellite.tile_url(3, 4, 2);
        assert!(satellite.ends_with("/tile/3/2/4"));
    }

    #[test]
    fn every_basemap_is_attributed() {
        for basemap in MAP_BASEMAPS {
            assert!(!basemap.attribution().text.is_empty());
            assert!(basemap.max_zoom() > 0);
        }
    }
}
