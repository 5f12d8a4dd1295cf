//! Overpass HTTP adapter for nearby amenity discovery.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Anchor, Point};
use crate::traits::PoiDiscovery;

/// Search radius used when the caller has no preference.
pub const DEFAULT_RADIUS_M: u32 = 1200;

/// At most this many places are returned per search.
pub const MAX_RESULTS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityKind {
    #[default]
    Cafe,
    /// Bars and pubs.
    Bar,
    /// Nightclubs.
    Club,
}

impl AmenityKind {
    /// Overpass QL tag filter.
    pub fn tag_filter(&self) -> &'static str {
        match self {
            AmenityKind::Cafe => r#"["amenity"="cafe"]"#,
            AmenityKind::Bar => r#"["amenity"~"bar|pub"]"#,
            AmenityKind::Club => r#"["amenity"="nightclub"]"#,
        }
    }

    /// Name given to places that carry no `name` tag.
    pub fn fallback_name(&self) -> &'static str {
        match self {
            AmenityKind::Cafe => "Cafe",
            AmenityKind::Bar => "Bar",
            AmenityKind::Club => "Club",
        }
    }

    pub fn plural_label(&self) -> &'static str {
        match self {
            AmenityKind::Cafe => "Cafés",
            AmenityKind::Bar => "Bars",
            AmenityKind::Club => "Clubs",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverpassConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Server-side query timeout, also used for the HTTP client.
    pub timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: "https://overpass-api.de/api/interpreter".to_string(),
            user_agent: concat!("sidequest-router/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 25,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    config: OverpassConfig,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs + 5))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }
}

impl PoiDiscovery for OverpassClient {
    type Kind = AmenityKind;

    fn nearby(&self, around: Anchor, kind: AmenityKind, radius_m: u32) -> Result<Vec<Point>> {
        let query = build_query(around, kind, radius_m, self.config.timeout_secs);
        tracing::debug!(url = %self.config.base_url, ?kind, radius_m, "overpass query");

        let body = self
            .client
            .post(&self.config.base_url)
            .form(&[("data", query)])
            .send()
            .and_then(|resp| resp.error_for_status())?
            .json::<OverpassResponse>()?;

        Ok(points_from_response(body, kind))
    }
}

/// Nodes, ways and relations matching `kind` within `radius_m` of `around`.
pub fn build_query(around: Anchor, kind: AmenityKind, radius_m: u32, timeout_secs: u64) -> String {
    let filter = kind.tag_filter();
    let area = format!("(around:{},{},{})", radius_m, around.lat, around.lon);
    format!(
        "[out:json][timeout:{timeout_secs}];\n(\n  node{filter}{area};\n  way{filter}{area};\n  relation{filter}{area};\n);\nout center tags;\n"
    )
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<Center>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Center {
    lat: f64,
    lon: f64,
}

/// Ways and relations only carry a center; nodes carry their own position.
fn points_from_response(response: OverpassResponse, kind: AmenityKind) -> Vec<Point> {
    let total = response.elements.len();
    let points: Vec<Point> = response
        .elements
        .into_iter()
        .filter_map(|element| {
            let lat = element.lat.or(element.center.as_ref().map(|c| c.lat))?;
            let lon = element.lon.or(element.center.as_ref().map(|c| c.lon))?;
            if !lat.is_finite() || !lon.is_finite() {
                return None;
            }
            let name = element
                .tags
                .get("name")
                .filter(|name| !name.is_empty())
                .map_or(kind.fallback_name(), String::as_str);
            Some(Point::new(name, lat, lon))
        })
        .take(MAX_RESULTS)
        .collect();

    if points.len() < total.min(MAX_RESULTS) {
        tracing::warn!(total, kept = points.len(), "dropped overpass elements without coordinates");
    }
    points
}
