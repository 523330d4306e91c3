//! sokocast - commodity price forecasts with decision rules.
//!
//! Loads the trained artifact set once at startup and exposes the
//! prediction-to-decision pipeline as subcommands, printing each result as
//! pretty JSON.
//!
//! # Usage
//! ```sh
//! sokocast predict --date 2025-12-05 --admin1 Nairobi --market Gikomba \
//!     --commodity cabbage --previous-price 100
//! ```
//!
//! # Environment Variables
//! - `SOKOCAST_ENSEMBLE` - Path to the serialized tree ensemble
//! - `SOKOCAST_SCHEMA` - Path to the feature-column schema
//! - `SOKOCAST_VOCAB` - Path to the categorical vocabularies
//! - `SOKOCAST_DEFAULT_RADIUS_KM` - Micro-market search radius default

use anyhow::Result;
use clap::{Parser, Subcommand};
use sokocast::application::encoder::CategoricalEncoder;
use sokocast::application::estimator::EnsembleEstimator;
use sokocast::application::features::FeatureVectorBuilder;
use sokocast::application::forecast_service::ForecastService;
use sokocast::application::formatting::{Channel, format_forecast};
use sokocast::application::micro_market::MicroMarketAggregator;
use sokocast::application::rules::{RecommendationRule, ThresholdRule};
use sokocast::config::{ArtifactConfig, ForecastEnvConfig};
use sokocast::domain::commodity::{CommodityCatalog, CommodityThresholds};
use sokocast::domain::types::{PredictionRequest, PriceType};
use sokocast::infrastructure::ArtifactSet;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "sokocast", version, about = "Commodity price forecasts with decision rules")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full prediction pipeline against the loaded artifacts
    Predict {
        #[arg(long)]
        date: String,
        #[arg(long)]
        admin1: String,
        #[arg(long)]
        market: String,
        #[arg(long)]
        commodity: String,
        #[arg(long, default_value = "retail")]
        price_type: String,
        #[arg(long)]
        previous_price: f64,
        /// Render the forecast for a delivery channel instead of raw JSON
        #[arg(long)]
        format: Option<String>,
    },
    /// Sell/hold advice from a predicted vs previous price
    Recommend {
        #[arg(long)]
        commodity: String,
        #[arg(long)]
        market: String,
        #[arg(long)]
        predicted_price: f64,
        #[arg(long)]
        previous_price: f64,
        #[arg(long, default_value = "retail")]
        price_type: String,
    },
    /// Synthetic nearby-market comparison for a region
    MicroMarket {
        #[arg(long)]
        commodity: String,
        #[arg(long)]
        region: String,
        #[arg(long)]
        radius_km: Option<f64>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Predict {
            date,
            admin1,
            market,
            commodity,
            price_type,
            previous_price,
            format,
        } => {
            let service = build_forecast_service()?;
            let request = PredictionRequest {
                date,
                admin1,
                market,
                commodity,
                price_type: price_type.parse::<PriceType>()?,
                previous_price,
            };
            let forecast = service.forecast(&request)?;
            match format {
                Some(channel) => {
                    let rendered = format_forecast(&forecast, channel.parse::<Channel>()?);
                    print_json(&rendered)
                }
                None => print_json(&forecast),
            }
        }
        Command::Recommend {
            commodity,
            market,
            predicted_price,
            previous_price,
            price_type,
        } => {
            let rule = RecommendationRule::new(
                CommodityCatalog::default(),
                CommodityThresholds::default(),
            );
            let recommendation = rule.recommend(
                &commodity,
                &market,
                predicted_price,
                previous_price,
                price_type.parse::<PriceType>()?,
            )?;
            print_json(&recommendation)
        }
        Command::MicroMarket {
            commodity,
            region,
            radius_km,
        } => {
            let radius =
                radius_km.unwrap_or_else(|| ForecastEnvConfig::from_env().default_radius_km);
            let aggregator = MicroMarketAggregator::new(
                CommodityCatalog::default(),
                CommodityThresholds::default(),
            );
            let snapshot = aggregator.localize(&commodity, &region, radius)?;
            print_json(&snapshot)
        }
    }
}

fn build_forecast_service() -> Result<ForecastService> {
    let artifacts = ArtifactSet::load(&ArtifactConfig::from_env())?;
    let estimator = Arc::new(EnsembleEstimator::new(artifacts.members)?);
    info!(members = estimator.member_count(), "forecast service ready");

    Ok(ForecastService::new(
        CommodityCatalog::default(),
        CategoricalEncoder::new(artifacts.vocabularies),
        FeatureVectorBuilder::new(artifacts.schema),
        estimator,
        ThresholdRule::new(CommodityThresholds::default()),
    ))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
