use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{WeatherReport, WeatherSample},
};

use super::{WeatherSource, fetch_body};

const ENDPOINT: &str = "weather";

#[derive(Debug, Clone)]
pub struct WeatherClient {
    url: String,
    theme: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(http: Client, url: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            theme: theme.into(),
            http,
        }
    }

    fn query(&self, lat: f64, lng: f64) -> [(&'static str, String); 3] {
        [
            ("lat", format!("{lat:.6}")),
            ("lng", format!("{lng:.6}")),
            ("theme", self.theme.clone()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct WeatherEntry {
    current: f64,
    max: f64,
    min: f64,
}

/// Decode a weather response body. Only the first entry is used.
pub fn parse_weather(body: &str) -> Result<WeatherReport, serde_json::Error> {
    let entries: Vec<WeatherEntry> = serde_json::from_str(body)?;

    Ok(match entries.first() {
        Some(entry) => {
            WeatherReport::Observed(WeatherSample::rounded(entry.current, entry.max, entry.min))
        }
        None => WeatherReport::NoData,
    })
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn fetch_weather(&self, lat: f64, lng: f64) -> Result<WeatherReport, FetchError> {
        let request = self.http.get(&self.url).query(&self.query(lat, lng));
        let body = fetch_body(request, ENDPOINT).await?;

        let report = parse_weather(&body).map_err(|source| FetchError::decode(ENDPOINT, source))?;

        debug!(lat, lng, ?report, "fetched weather");
        Ok(report)
    }
}
