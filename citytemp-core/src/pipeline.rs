use std::collections::HashSet;
use tracing::{error, info, warn};

use crate::{
    model::{City, CityWeatherRow, TargetCities},
    source::{CityDirectory, WeatherSource},
};

/// Counters for one pipeline run, logged once the run finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub listed: usize,
    pub matched: usize,
    pub rows: usize,
    pub failed: usize,
}

/// Fetch, filter, look up and sort the temperatures of the target cities.
#[derive(Debug)]
pub struct WeatherPipeline {
    directory: Box<dyn CityDirectory>,
    weather: Box<dyn WeatherSource>,
    targets: TargetCities,
}

impl WeatherPipeline {
    pub fn new(
        directory: Box<dyn CityDirectory>,
        weather: Box<dyn WeatherSource>,
        targets: TargetCities,
    ) -> Self {
        Self {
            directory,
            weather,
            targets,
        }
    }

    pub fn targets(&self) -> &TargetCities {
        &self.targets
    }

    /// Run one cycle. Never fails: a directory error yields no rows and a
    /// per-city error drops only that city.
    pub async fn run(&self) -> Vec<CityWeatherRow> {
        let cities = match self.directory.fetch_cities().await {
            Ok(cities) => cities,
            Err(err) => {
                error!(error = %err, kind = %err.kind(), "failed to get cities");
                return Vec::new();
            }
        };

        let (rows, summary) = self.collect_rows(&cities).await;
        info!(
            listed = summary.listed,
            matched = summary.matched,
            rows = summary.rows,
            failed = summary.failed,
            "weather cycle finished"
        );
        rows
    }

    async fn collect_rows(&self, cities: &[City]) -> (Vec<CityWeatherRow>, CycleSummary) {
        let mut summary = CycleSummary {
            listed: cities.len(),
            ..CycleSummary::default()
        };
        let mut rows = Vec::new();

        for city in select_targets(cities, &self.targets) {
            summary.matched += 1;

            match self.weather.fetch_weather(city.latitude, city.longitude).await {
                Ok(report) => rows.push(CityWeatherRow::new(city.name.as_str(), report)),
                Err(err) => {
                    summary.failed += 1;
                    warn!(
                        city = %city.name,
                        error = %err,
                        kind = %err.kind(),
                        "failed to get weather"
                    );
                }
            }
        }

        sort_rows(&mut rows);
        summary.rows = rows.len();
        (rows, summary)
    }
}

/// Cities whose title-cased name is a target, in directory order. Only the
/// first entry for each title-cased name is kept.
pub fn select_targets<'a>(
    cities: &'a [City],
    targets: &'a TargetCities,
) -> impl Iterator<Item = &'a City> + 'a {
    let mut seen = HashSet::new();
    cities.iter().filter(move |city| {
        let name = title_case(&city.name);
        targets.contains(&name) && seen.insert(name)
    })
}

/// Uppercase the first character of every whitespace-separated word, leaving
/// the remaining characters and the whitespace as they are.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut word_start = true;

    for ch in name.chars() {
        if ch.is_whitespace() {
            word_start = true;
            out.push(ch);
        } else if word_start {
            word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }

    out
}

/// Stable sort, warmest first.
pub fn sort_rows(rows: &mut [CityWeatherRow]) {
    rows.sort_by(|a, b| b.current_value.total_cmp(&a.current_value));
}
