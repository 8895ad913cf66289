use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::{fmt::Debug, time::Duration};

use crate::{
    error::FetchError,
    model::{City, WeatherReport},
};

pub mod directory;
pub mod weather;

pub use directory::CityDirectoryClient;
pub use weather::WeatherClient;

/// Lists the cities known to the upstream service.
#[async_trait]
pub trait CityDirectory: Send + Sync + Debug {
    async fn fetch_cities(&self) -> Result<Vec<City>, FetchError>;
}

/// Looks up current weather for a coordinate pair.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_weather(&self, lat: f64, lng: f64) -> Result<WeatherReport, FetchError>;
}

/// Build the HTTP client shared by both endpoints.
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

/// Send a prepared request and return the body of a successful response.
async fn fetch_body(request: RequestBuilder, endpoint: &'static str) -> Result<String, FetchError> {
    let res = request
        .send()
        .await
        .map_err(|source| FetchError::Transport { endpoint, source })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| FetchError::Transport { endpoint, source })?;

    if !status.is_success() {
        return Err(FetchError::Status {
            endpoint,
            status,
            body: truncate_body(&body),
        });
    }

    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("bad gateway"), "bad gateway");
    }

    #[test]
    fn long_body_is_cut_on_char_boundary() {
        let body = "°".repeat(300);
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn client_builds_with_timeout() {
        assert!(http_client(Duration::from_secs(5)).is_ok());
    }
}
