//! Street network from OpenStreetMap via the Overpass API.
//!
//! One blocking request per bounding box asks Overpass for every drivable
//! `highway` way inside the box together with its node geometry
//! (`out geom`). Each pair of consecutive nodes of a way becomes one
//! [`SegmentRecord`], so a curved street contributes one segment per bend.

use serde::Deserialize;
use std::time::Duration;

use super::{SegmentId, SegmentRecord, StreetGraphProvider};
use crate::constants::{DEFAULT_OVERPASS_URL, DEFAULT_REQUEST_TIMEOUT, DRIVABLE_HIGHWAY_TYPES};
use crate::error::ProviderError;
use crate::geo::BoundingBox;

/// Longest error body kept in [`ProviderError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for an Overpass endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassConfig {
    pub url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OVERPASS_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT),
            user_agent: format!("streethenge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// [`StreetGraphProvider`] backed by an Overpass API endpoint.
pub struct OverpassProvider {
    client: reqwest::blocking::Client,
    config: OverpassConfig,
}

impl OverpassProvider {
    pub fn new(config: OverpassConfig) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OverpassConfig {
        &self.config
    }
}

impl StreetGraphProvider for OverpassProvider {
    fn fetch_segments(&self, bbox: &BoundingBox) -> Result<Vec<SegmentRecord>, ProviderError> {
        let query = build_query(bbox, self.config.timeout.as_secs());
        log_debug!("Overpass query: {query}");

        let response = self
            .client
            .post(&self.config.url)
            .form(&[("data", query.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text()?;
        parse_response(&body)
    }
}

/// Overpass QL for all drivable ways in `bbox`, with inline geometry.
pub fn build_query(bbox: &BoundingBox, timeout_secs: u64) -> String {
    format!(
        "[out:json][timeout:{timeout_secs}];way[\"highway\"~\"^({})$\"]({},{},{},{});out geom;",
        DRIVABLE_HIGHWAY_TYPES.join("|"),
        bbox.min_lat(),
        bbox.min_lon(),
        bbox.max_lat(),
        bbox.max_lon(),
    )
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OverpassElement {
    Way(OverpassWay),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct OverpassWay {
    id: u64,
    #[serde(default)]
    nodes: Vec<u64>,
    // Overpass emits `null` for nodes it could not place
    #[serde(default)]
    geometry: Vec<Option<GeometryPoint>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct GeometryPoint {
    lat: f64,
    lon: f64,
}

impl OverpassWay {
    fn point(&self, index: usize) -> Option<(f64, f64)> {
        self.geometry
            .get(index)
            .copied()
            .flatten()
            .map(|p| (p.lat, p.lon))
    }

    fn segments(&self) -> impl Iterator<Item = SegmentRecord> + '_ {
        self.nodes
            .windows(2)
            .enumerate()
            .map(move |(i, pair)| SegmentRecord {
                id: SegmentId {
                    way: self.id,
                    from: pair[0],
                    to: pair[1],
                },
                start: self.point(i),
                end: self.point(i + 1),
            })
    }
}

/// Decode an Overpass JSON response into segment records, in document order.
pub fn parse_response(body: &str) -> Result<Vec<SegmentRecord>, ProviderError> {
    let response: OverpassResponse = serde_json::from_str(body)?;
    Ok(response
        .elements
        .iter()
        .filter_map(|element| match element {
            OverpassElement::Way(way) => Some(way),
            OverpassElement::Other => None,
        })
        .flat_map(OverpassWay::segments)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "version": 0.6,
        "generator": "Overpass API",
        "elements": [
            {
                "type": "way",
                "id": 5670391,
                "bounds": {"minlat": 40.5648, "minlon": -74.5961, "maxlat": 40.5660, "maxlon": -74.5930},
                "nodes": [101, 102, 103],
                "geometry": [
                    {"lat": 40.5648, "lon": -74.5961},
                    {"lat": 40.5654, "lon": -74.5946},
                    {"lat": 40.5660, "lon": -74.5930}
                ],
                "tags": {"highway": "residential", "name": "Main Street"}
            },
            {"type": "node", "id": 999, "lat": 40.0, "lon": -74.0},
            {
                "type": "way",
                "id": 5670392,
                "nodes": [201, 202],
                "geometry": [null, {"lat": 40.5651, "lon": -74.5950}]
            }
        ]
    }"#;

    #[test]
    fn test_parse_response_splits_ways_into_segments() {
        let records = parse_response(RESPONSE).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0].id,
            SegmentId {
                way: 5670391,
                from: 101,
                to: 102
            }
        );
        assert_eq!(records[0].start, Some((40.5648, -74.5961)));
        assert_eq!(records[0].end, Some((40.5654, -74.5946)));
        assert_eq!(records[1].id.from, 102);
        assert_eq!(records[1].end, Some((40.5660, -74.5930)));
    }

    #[test]
    fn test_null_geometry_becomes_missing_coordinate() {
        let records = parse_response(RESPONSE).unwrap();
        assert_eq!(records[2].id.way, 5670392);
        assert_eq!(records[2].start, None);
        assert_eq!(records[2].end, Some((40.5651, -74.5950)));
    }

    #[test]
    fn test_empty_and_malformed_responses() {
        assert!(parse_response(r#"{"elements": []}"#).unwrap().is_empty());
        assert!(parse_response(r#"{"remark": "runtime error"}"#).unwrap().is_empty());
        assert!(matches!(
            parse_response("<html>rate limited</html>"),
            Err(ProviderError::Decode(_))
        ));
    }

    #[test]
    fn test_build_query() {
        let bbox = BoundingBox::new(40.55, -74.61, 40.58, -74.58).unwrap();
        let query = build_query(&bbox, 60);

        assert!(query.starts_with("[out:json][timeout:60];"));
        assert!(query.contains("(40.55,-74.61,40.58,-74.58)"));
        assert!(query.contains("residential|living_street"));
        assert!(query.ends_with("out geom;"));
    }
}
