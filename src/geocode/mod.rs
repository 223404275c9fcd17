//! Best-effort mapping from a free-text place name to coordinates.
//!
//! Backed by a Nominatim-style HTTP service. Nothing in here ever errors
//! past the module boundary: a blank name, a dead network, a confused
//! service, and an unknown place all come back as "no coordinates".

use std::{collections::HashMap, time::Duration};

use tokio::sync::RwLock;

use crate::config::DEFAULT_GEOCODER_ENDPOINT;

pub const USER_AGENT: &str = concat!("ladle/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A resolved latitude/longitude pair.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One entry of a Nominatim `/search` response. The service hands
/// coordinates back as strings.
#[derive(Debug, serde::Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// The lookup client.
///
/// Results are cached by normalized place name for the life of the process,
/// misses included, since the map rebuilds on every page cycle and would
/// otherwise re-ask the service for every row still missing coordinates.
#[derive(Debug)]
pub struct Geocoder {
    client: reqwest::Client,
    endpoint: String,
    cache: RwLock<HashMap<String, Option<Coordinates>>>,
}

impl Geocoder {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_GEOCODER_ENDPOINT)
    }

    /// A geocoder against a specific service, e.g. a self-hosted mirror.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("the http client should always build");

        Self {
            client,
            endpoint: endpoint.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves a place name into coordinates, if the service knows it.
    #[tracing::instrument(skip(self))]
    pub async fn lookup(&self, place: &str) -> Option<Coordinates> {
        let key = normalize(place);
        if key.is_empty() {
            return None;
        }

        if let Some(cached) = self.cache.read().await.get(&key) {
            return *cached;
        }

        let resolved = self.fetch(&key).await;
        self.cache.write().await.insert(key, resolved);
        resolved
    }

    /// One outbound call. All failure modes collapse to `None`.
    async fn fetch(&self, place: &str) -> Option<Coordinates> {
        let url = format!("{}/search", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .get(url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .inspect_err(|e| tracing::debug!("Geocoding request for `{place}` failed. err: {e}"))
            .ok()?;

        let places: Vec<Place> = response
            .json()
            .await
            .inspect_err(|e| {
                tracing::debug!("Geocoding response for `{place}` didn't parse. err: {e}")
            })
            .ok()?;

        let hit = places.into_iter().next()?;
        let latitude = hit.lat.parse().ok()?;
        let longitude = hit.lon.parse().ok()?;

        tracing::debug!("Resolved `{place}` to ({latitude}, {longitude}).");
        Some(Coordinates {
            latitude,
            longitude,
        })
    }

    /// Seeds the cache directly. Lets tests exercise lookups without a
    /// network.
    #[cfg(test)]
    pub(crate) async fn prime(&self, place: &str, coords: Option<Coordinates>) {
        self.cache.write().await.insert(normalize(place), coords);
    }
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(place: &str) -> String {
    place.trim().to_lowercase()
}
