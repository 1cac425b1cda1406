use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::domain::PredictionRequest;

#[derive(Parser, Debug)]
#[command(name = "fault-predictor")]
#[command(version)]
#[command(about = "Equipment fault prediction HTTP service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config directory (default.toml plus the FAULT_ENV overlay)
    #[arg(short, long, default_value = "config", global = true)]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the HTTP API (default)
    Serve(ServeArgs),
    /// Load the model artifact, print its summary and exit
    Check {
        /// Model artifact path (overrides config)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },
    /// Score a single reading from the command line
    Predict(PredictArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Bind host (overrides config)
    #[arg(long)]
    pub host: Option<String>,
    /// Bind port (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Model artifact path (overrides config)
    #[arg(short, long)]
    pub model: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    #[arg(long)]
    pub equipment_name: String,
    #[arg(long)]
    pub location_name: String,
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub pressure: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub vibration: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub humidity: f64,
    /// Model artifact path (overrides config)
    #[arg(short, long)]
    pub model: Option<PathBuf>,
}

impl Cli {
    /// Subcommand to run; bare invocation serves.
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Serve(ServeArgs::default()))
    }
}

impl ServeArgs {
    /// Apply flag overrides on top of the loaded config.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(model) = &self.model {
            config.model.path = model.clone();
        }
    }
}

impl PredictArgs {
    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            equipment_name: self.equipment_name.clone(),
            location_name: self.location_name.clone(),
            temperature: self.temperature,
            pressure: self.pressure,
            vibration: self.vibration,
            humidity: self.humidity,
        }
    }
}
