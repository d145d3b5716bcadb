mod abort;
mod config;
mod coords;
mod elements;
mod predict;
mod propagation;
mod render;
mod time;
mod tracker;
mod web;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;

use crate::abort::AbortFlag;
use crate::config::{Config, ConfigError};
use crate::coords::{GeodeticPosition, SiteError};
use crate::predict::TrailingWindow;
use crate::propagation::{GmstRotation, Sgp4Propagator};
use crate::tracker::{Tracker, TrackerError};

#[derive(Parser)]
#[command(name = "sat-lookout")]
#[command(about = "Satellite look angles and visibility windows from a ground site")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SiteArgs {
    /// Site as "lat, lon" in degrees, overrides the configured station
    #[arg(long, allow_hyphen_values = true)]
    site: Option<String>,
    /// Site altitude in meters
    #[arg(long, allow_hyphen_values = true)]
    alt: Option<f64>,
    /// Offset used for times given without one, e.g. +03:00
    #[arg(long, default_value = "+00:00", allow_hyphen_values = true)]
    utc_offset: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Azimuth and elevation at one instant
    Look {
        /// NORAD catalog number
        norad: u32,
        /// Instant to look at, now if omitted
        #[arg(long)]
        time: Option<String>,
        #[command(flatten)]
        site: SiteArgs,
        #[arg(long)]
        json: bool,
    },
    /// Visibility windows over a time range
    Passes {
        /// NORAD catalog number
        norad: u32,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// Sampling step, e.g. 1s or 1m
        #[arg(long)]
        step: Option<String>,
        /// Trailing window policy: close or drop
        #[arg(long)]
        trailing: Option<TrailingWindow>,
        /// Leave out windows peaking below this elevation
        #[arg(long)]
        min_peak: Option<f64>,
        #[command(flatten)]
        site: SiteArgs,
        #[arg(long)]
        json: bool,
    },
    /// Serve look angles and windows over HTTP
    Serve {
        /// NORAD catalog number
        norad: u32,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("station: {0}")]
    Site(#[from] SiteError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scan task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Look {
            norad,
            time,
            site,
            json,
        } => {
            let position = resolve_site(&config, &site)?;
            let offset = time::parse_utc_offset(&site.utc_offset)?;
            let at = match time {
                Some(s) => time::parse_instant(&s, offset)?,
                None => Utc::now(),
            };

            let tracker = connect(&config, norad).await?;
            let sample = tracker.look_angle(&position, at)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sample)?);
            } else {
                let below = tracker.sub_satellite_point(at)?;
                let elements = tracker.elements();
                println!("{} ({})", elements.display_name(), elements.catalog_id);
                println!("{}", render::sample_line(&sample));
                println!("{}", render::sub_point_line(&below));
            }
        }
        Commands::Passes {
            norad,
            start,
            end,
            step,
            trailing,
            min_peak,
            site,
            json,
        } => {
            let position = resolve_site(&config, &site)?;
            let offset = time::parse_utc_offset(&site.utc_offset)?;
            let start = time::parse_instant(&start, offset)?;
            let end = time::parse_instant(&end, offset)?;
            let step = time::parse_step(step.as_deref().unwrap_or(&config.scan.step))?;

            let mut scanner = config.scan.scanner();
            if let Some(trailing) = trailing {
                scanner.trailing = trailing;
            }
            if let Some(min_peak) = min_peak {
                scanner.min_peak_elevation_deg = min_peak;
            }

            let tracker = Arc::new(connect(&config, norad).await?);
            let abort = AbortFlag::new();
            let ctrl_c = {
                let abort = abort.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        abort.raise();
                    }
                })
            };

            let report = tokio::task::spawn_blocking(move || {
                tracker.visibility_windows(&scanner, position, start, end, step, Some(&abort))
            })
            .await??;
            ctrl_c.abort();

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::report_table(&report));
            }
        }
        Commands::Serve { norad } => {
            let station = config
                .station
                .as_ref()
                .map(|s| s.position())
                .transpose()?;
            let step = time::parse_step(&config.scan.step)?;
            let tracker = connect(&config, norad).await?;
            web::run_server(&config.web.bind, tracker, station, config.scan.scanner(), step)
                .await?;
        }
    }

    Ok(())
}

async fn connect(config: &Config, norad: u32) -> Result<Tracker, TrackerError> {
    let provider = config.elements.provider();
    Tracker::connect(provider.as_ref(), norad, Sgp4Propagator, GmstRotation).await
}

fn resolve_site(config: &Config, args: &SiteArgs) -> Result<GeodeticPosition, TrackerError> {
    if let Some(site) = &args.site {
        return Ok(GeodeticPosition::from_coordinates(site, args.alt.unwrap_or(0.0))?);
    }

    let station = config.station.as_ref().ok_or_else(|| {
        TrackerError::InvalidInput("no site: pass --site or configure a station".into())
    })?;
    let mut position = station.position()?;
    if let Some(alt) = args.alt {
        position.altitude_m = alt;
    }
    if let Some(name) = &station.name {
        log::info!("Observing from {}", name);
    }
    Ok(position)
}
