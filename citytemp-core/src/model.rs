use serde::Deserialize;
use std::collections::BTreeSet;

use crate::numeric::deserialize_lenient_f64;

/// Placeholder shown in every temperature column when the weather API has no
/// entry for a city.
pub const NO_DATA: &str = "No data";

/// Cities shown by default. Names are matched after title-casing.
pub const DEFAULT_TARGET_CITIES: [&str; 10] = [
    "Ahvaz",
    "Arak",
    "Bandar Abbas",
    "Mashhad",
    "Qom",
    "Rasht",
    "Shiraz",
    "Tabriz",
    "Tehran",
    "Yazd",
];

/// A city as listed by the directory endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct City {
    #[serde(rename = "value")]
    pub name: String,
    #[serde(rename = "lat", deserialize_with = "deserialize_lenient_f64")]
    pub latitude: f64,
    #[serde(rename = "lng", deserialize_with = "deserialize_lenient_f64")]
    pub longitude: f64,
}

/// Temperatures in whole degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherSample {
    pub current: f64,
    pub max: f64,
    pub min: f64,
}

impl WeatherSample {
    /// Build a sample, rounding each reading half away from zero.
    pub fn rounded(current: f64, max: f64, min: f64) -> Self {
        Self {
            current: current.round(),
            max: max.round(),
            min: min.round(),
        }
    }
}

/// Outcome of a successful weather lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeatherReport {
    Observed(WeatherSample),
    /// The API answered with an empty list for these coordinates.
    NoData,
}

/// One line of the rendered table.
#[derive(Debug, Clone, PartialEq)]
pub struct CityWeatherRow {
    pub city: String,
    pub current_display: String,
    pub max_display: String,
    pub min_display: String,
    pub current_value: f64,
}

impl CityWeatherRow {
    pub fn new(city: impl Into<String>, report: WeatherReport) -> Self {
        let city = city.into();
        match report {
            WeatherReport::Observed(sample) => Self {
                city,
                current_display: format_celsius(sample.current),
                max_display: format_celsius(sample.max),
                min_display: format_celsius(sample.min),
                current_value: sample.current,
            },
            WeatherReport::NoData => Self {
                city,
                current_display: NO_DATA.to_string(),
                max_display: NO_DATA.to_string(),
                min_display: NO_DATA.to_string(),
                current_value: 0.0,
            },
        }
    }

    /// Cells in column order.
    pub fn cells(&self) -> [&str; 4] {
        [
            self.city.as_str(),
            self.current_display.as_str(),
            self.max_display.as_str(),
            self.min_display.as_str(),
        ]
    }
}

/// Formats an already-rounded temperature. Going through `i64` keeps `-0.0`
/// from showing up as "-0°C".
pub fn format_celsius(value: f64) -> String {
    format!("{}°C", value.round() as i64)
}

/// Immutable set of city names eligible for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCities(BTreeSet<String>);

impl TargetCities {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for TargetCities {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_CITIES)
    }
}
