use anyhow::Context;
use chrono::Local;
use clap::Parser;
use std::{io, path::PathBuf};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use citytemp_core::{
    CityDirectoryClient, Config, Scheduler, TableRenderer, TargetCities, WeatherClient,
    WeatherPipeline, next_update_message, source::http_client,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "citytemp",
    version,
    about = "Periodically prints a table of current temperatures for selected cities"
)]
pub struct Cli {
    /// Read settings from this TOML file instead of the platform config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print a single table and exit.
    #[arg(long)]
    pub once: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        init_tracing(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        let http = http_client(config.request_timeout()).context("Failed to build HTTP client")?;
        let pipeline = WeatherPipeline::new(
            Box::new(CityDirectoryClient::new(http.clone(), config.cities_url.as_str())),
            Box::new(WeatherClient::new(http, config.weather_url.as_str(), config.theme.as_str())),
            TargetCities::default(),
        );
        let renderer = TableRenderer::default();
        let scheduler = Scheduler::new(config.refresh_interval());

        info!(
            targets = pipeline.targets().len(),
            interval_secs = config.refresh_interval_secs,
            "starting weather board"
        );

        let max_cycles = self.once.then_some(1);
        let (pipeline, renderer) = (&pipeline, &renderer);
        let period = scheduler.period();
        scheduler
            .run(max_cycles, move || run_cycle(pipeline, renderer, period, max_cycles.is_none()))
            .await;

        Ok(())
    }
}

/// One fetch and render pass. Render errors are logged and do not stop the loop.
async fn run_cycle(
    pipeline: &WeatherPipeline,
    renderer: &TableRenderer,
    period: std::time::Duration,
    announce_next: bool,
) {
    let rows = pipeline.run().await;

    if let Err(err) = renderer.write_to(&rows, io::stdout().lock()) {
        error!(error = %err, "failed to render table");
        return;
    }

    if announce_next {
        println!("{}", next_update_message(period, Local::now()));
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "citytemp=debug,citytemp_core=debug,warn"
    } else {
        "citytemp=info,citytemp_core=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();
}
