//! Core library for the `citytemp` board.
//!
//! This crate defines:
//! - Lenient numeric decoding for upstream JSON
//! - Clients for the city directory and weather endpoints
//! - The fetch/filter/sort pipeline and the table renderer
//! - The refresh scheduler and startup configuration
//!
//! It is used by the `citytemp` binary, but the pipeline can be driven by any
//! other front end through the [`CityDirectory`] and [`WeatherSource`] traits.

pub mod config;
pub mod error;
pub mod model;
pub mod numeric;
pub mod pipeline;
pub mod schedule;
pub mod source;
pub mod table;

pub use config::Config;
pub use error::{FetchError, FetchErrorKind};
pub use model::{City, CityWeatherRow, TargetCities, WeatherReport, WeatherSample};
pub use pipeline::WeatherPipeline;
pub use schedule::{Scheduler, next_update_message};
pub use source::{CityDirectory, CityDirectoryClient, WeatherClient, WeatherSource};
pub use table::{TableRenderer, TableStyle};
