//! POI lists from comma-separated text.
//!
//! The header must name a `name` column, a `lat` or `latitude` column, and a
//! `lon`, `lng` or `longitude` column, in any case and any order. Fields are
//! split on bare commas; quoting is not supported.

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Point;

const LAT_COLUMNS: &[&str] = &["lat", "latitude"];
const LON_COLUMNS: &[&str] = &["lon", "lng", "longitude"];

/// Parses POIs, skipping rows that are short, unnamed, or not finite numbers.
///
/// Text with fewer than two lines yields no points.
pub fn parse_pois(text: &str) -> Result<Vec<Point>> {
    let lines: Vec<&str> = text.trim().lines().collect();
    let [header, rows @ ..] = lines.as_slice() else {
        return Ok(Vec::new());
    };
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let columns: Vec<String> = header
        .split(',')
        .map(|column| column.trim().to_lowercase())
        .collect();
    let find = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| columns.iter().position(|column| column == name))
    };

    let (Some(name_col), Some(lat_col), Some(lon_col)) =
        (find(&["name"]), find(LAT_COLUMNS), find(LON_COLUMNS))
    else {
        return Err(Error::invalid_input(format!(
            "CSV header must include name, lat/latitude, lon/longitude (got: {})",
            header
        )));
    };
    let width = name_col.max(lat_col).max(lon_col) + 1;

    let mut points = Vec::new();
    for (line_no, line) in rows.iter().enumerate() {
        let row: Vec<&str> = line.split(',').collect();
        if row.len() < width {
            tracing::trace!(line = line_no + 2, "skipping short CSV row");
            continue;
        }

        let name = row[name_col].trim();
        let lat = parse_coordinate(row[lat_col]);
        let lon = parse_coordinate(row[lon_col]);

        match (lat, lon) {
            (Some(lat), Some(lon)) if !name.is_empty() => points.push(Point::new(name, lat, lon)),
            _ => tracing::trace!(line = line_no + 2, "skipping CSV row without name or coordinates"),
        }
    }

    Ok(points)
}

/// Reads and parses a POI file.
pub fn load_pois(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let points = parse_pois(&text)?;
    tracing::debug!(path = %path.display(), count = points.len(), "loaded POIs");
    Ok(points)
}

fn parse_coordinate(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
