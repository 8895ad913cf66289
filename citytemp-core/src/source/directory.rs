use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{error::FetchError, model::City};

use super::{CityDirectory, fetch_body};

const ENDPOINT: &str = "city directory";

#[derive(Debug, Clone)]
pub struct CityDirectoryClient {
    url: String,
    http: Client,
}

impl CityDirectoryClient {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CitiesResponse {
    cities: Vec<City>,
}

/// Decode a directory response body.
pub fn parse_cities(body: &str) -> Result<Vec<City>, serde_json::Error> {
    serde_json::from_str::<CitiesResponse>(body).map(|parsed| parsed.cities)
}

#[async_trait]
impl CityDirectory for CityDirectoryClient {
    async fn fetch_cities(&self) -> Result<Vec<City>, FetchError> {
        let body = fetch_body(self.http.get(&self.url), ENDPOINT).await?;

        let cities = parse_cities(&body).map_err(|source| FetchError::decode(ENDPOINT, source))?;

        debug!(count = cities.len(), "fetched city directory");
        Ok(cities)
    }
}
