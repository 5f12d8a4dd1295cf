//! Nominatim HTTP adapter for address search.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::Point;
use crate::traits::Geocoder;

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("sidequest-router/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }
}

impl Geocoder for NominatimClient {
    fn search(&self, query: &str) -> Result<Option<Point>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::invalid_input("search query is empty"));
        }

        let url = self.search_url();
        tracing::debug!(%url, query, "nominatim search");

        let hits = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("format", "json"), ("limit", "1"), ("q", query)])
            .send()
            .and_then(|resp| resp.error_for_status())?
            .json::<Vec<SearchHit>>()?;

        first_hit(hits)
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    display_name: String,
    lat: String,
    lon: String,
}

/// Turns the first hit into a point named after the first two parts of its
/// display name.
fn first_hit(hits: Vec<SearchHit>) -> Result<Option<Point>> {
    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };

    let lat = hit.lat.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    let lon = hit.lon.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    let (Some(lat), Some(lon)) = (lat, lon) else {
        tracing::warn!(lat = %hit.lat, lon = %hit.lon, "nominatim returned unusable coordinates");
        return Err(Error::service(format!(
            "bad search result coordinates ({}, {})",
            hit.lat, hit.lon
        )));
    };

    let name = hit
        .display_name
        .split(',')
        .take(2)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Some(Point::new(name, lat, lon)))
}
