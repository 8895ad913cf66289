use async_trait::async_trait;
use citytemp_core::source::{directory::parse_cities, weather::parse_weather};
use citytemp_core::{
    City, CityDirectory, FetchError, TableRenderer, TargetCities, WeatherPipeline, WeatherReport,
    WeatherSource,
};
use std::collections::HashMap;

/// Serves a canned directory body through the real decoder.
#[derive(Debug)]
struct CannedDirectory(&'static str);

#[async_trait]
impl CityDirectory for CannedDirectory {
    async fn fetch_cities(&self) -> Result<Vec<City>, FetchError> {
        parse_cities(self.0).map_err(|source| FetchError::decode("city directory", source))
    }
}

/// Weather bodies keyed by the `lat` query value the real client would send.
#[derive(Debug)]
struct CannedWeather(HashMap<String, &'static str>);

#[async_trait]
impl WeatherSource for CannedWeather {
    async fn fetch_weather(&self, lat: f64, _lng: f64) -> Result<WeatherReport, FetchError> {
        let body = self.0.get(&format!("{lat:.6}")).copied().unwrap_or("<html>502</html>");
        parse_weather(body).map_err(|source| FetchError::decode("weather", source))
    }
}

fn weather(entries: &[(&str, &'static str)]) -> CannedWeather {
    CannedWeather(entries.iter().map(|(lat, body)| (lat.to_string(), *body)).collect())
}

fn pipeline(directory: CannedDirectory, weather: CannedWeather) -> WeatherPipeline {
    WeatherPipeline::new(Box::new(directory), Box::new(weather), TargetCities::default())
}

#[tokio::test]
async fn tehran_shown_paris_dropped() {
    let directory = CannedDirectory(
        r#"{"cities":[
            {"value":"Tehran","lat":"35.7","lng":"51.4"},
            {"value":"Paris","lat":"48.8","lng":"2.3"}
        ]}"#,
    );
    let weather = weather(&[
        ("35.700000", r#"[{"current":31.6,"max":34.2,"min":22.1}]"#),
        ("48.800000", r#"[{"current":18.0,"max":20.0,"min":11.0}]"#),
    ]);

    let pipeline = pipeline(directory, weather);
    let rows = pipeline.run().await;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].city, "Tehran");
    assert_eq!(rows[0].current_display, "32°C");
    assert_eq!(rows[0].max_display, "34°C");
    assert_eq!(rows[0].min_display, "22°C");

    let table = TableRenderer::default().render(&rows);
    assert!(table.contains("Tehran") && table.contains("32°C"));
    assert!(!table.contains("Paris"));
}

#[tokio::test]
async fn one_broken_city_does_not_sink_the_batch() {
    let directory = CannedDirectory(
        r#"{"cities":[
            {"value":"shiraz","lat":29.6,"lng":52.5},
            {"value":"Tabriz","lat":"38.1","lng":"46.3"},
            {"value":"bandar abbas","lat":"27.2","lng":"56.3"},
            {"value":"Mashhad","lat":36.3,"lng":59.6}
        ]}"#,
    );
    let weather = weather(&[
        ("29.600000", r#"[{"current":27.2,"max":30,"min":15}]"#),
        // Tabriz has no entry and gets an HTML error page.
        ("27.200000", "[]"),
        ("36.300000", r#"[{"current":19.5,"max":24,"min":9.4}]"#),
    ]);

    let pipeline = pipeline(directory, weather);
    let rows = pipeline.run().await;

    let cities: Vec<_> = rows.iter().map(|r| r.city.as_str()).collect();
    assert_eq!(cities, ["shiraz", "Mashhad", "bandar abbas"]);
    assert_eq!(rows[2].current_display, "No data");
    assert_eq!(rows[2].current_value, 0.0);
    assert!(rows.windows(2).all(|w| w[0].current_value >= w[1].current_value));
}

#[tokio::test]
async fn malformed_directory_gives_header_only_table() {
    let directory = CannedDirectory(r#"{"cities":[{"value":"Qom","lat":true,"lng":"50.9"}]}"#);
    let pipeline = pipeline(directory, weather(&[]));

    let rows = pipeline.run().await;
    assert!(rows.is_empty());

    let table = TableRenderer::default().render(&rows);
    assert!(table.contains("Current Weather"));
    assert!(!table.contains("Qom"));
}
