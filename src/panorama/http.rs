use std::time::Duration;

use anyhow::Context;

use crate::{
    foundation::error::{PlanetError, PlanetResult},
    panorama::details::{PanoramaDetails, TileKey},
    panorama::fetch::{MetadataSource, TileSource},
};

/// Default panorama host.
pub const DEFAULT_HOST: &str = "http://cbk0.google.com";

/// Blocking HTTP client for the panorama metadata and tile endpoints.
#[derive(Clone, Debug)]
pub struct StreetViewClient {
    host: String,
    endpoint: reqwest::Url,
    client: reqwest::blocking::Client,
}

impl StreetViewClient {
    /// Client for `host` with a per-request `timeout`.
    pub fn new(host: impl Into<String>, timeout: Duration) -> PlanetResult<Self> {
        let host = host.into().trim_end_matches('/').to_string();
        if host.is_empty() {
            return Err(PlanetError::validation("panorama host must not be empty"));
        }
        let endpoint = reqwest::Url::parse(&format!("{host}/cbk"))
            .map_err(|e| PlanetError::validation(format!("panorama host {host:?}: {e}")))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            host,
            endpoint,
            client,
        })
    }

    /// Host the client talks to, without a trailing slash.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Metadata URL for `pano_id`.
    pub fn details_url(&self, pano_id: &str) -> reqwest::Url {
        self.endpoint_with(&[("output", "json"), ("panoid", pano_id)])
    }

    /// Tile URL for one grid cell.
    pub fn tile_url(&self, pano_id: &str, zoom: u32, key: TileKey) -> reqwest::Url {
        let (zoom, x, y) = (zoom.to_string(), key.x.to_string(), key.y.to_string());
        self.endpoint_with(&[
            ("output", "tile"),
            ("panoid", pano_id),
            ("zoom", &zoom),
            ("x", &x),
            ("y", &y),
        ])
    }

    fn endpoint_with(&self, params: &[(&str, &str)]) -> reqwest::Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().clear().extend_pairs(params);
        url
    }

    fn get_bytes(&self, url: reqwest::Url) -> anyhow::Result<Vec<u8>> {
        let resp = self
            .client
            .get(url.as_str())
            .send()
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;
        let body = resp.bytes().with_context(|| format!("read body of {url}"))?;
        Ok(body.to_vec())
    }
}

impl MetadataSource for StreetViewClient {
    #[tracing::instrument(skip(self))]
    fn details(&self, pano_id: &str) -> PlanetResult<PanoramaDetails> {
        let body = self
            .get_bytes(self.details_url(pano_id))
            .map_err(|e| PlanetError::metadata(format!("{e:#}")))?;
        PanoramaDetails::from_json(body.as_slice())
    }
}

impl TileSource for StreetViewClient {
    fn tile_bytes(&self, pano_id: &str, zoom: u32, key: TileKey) -> anyhow::Result<Vec<u8>> {
        self.get_bytes(self.tile_url(pano_id, zoom, key))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/panorama/http.rs"]
mod tests;
