use anyhow::Context;
use clap::Parser;
use fault_predictor::api::start_api_server;
use fault_predictor::cli::{Cli, Commands};
use fault_predictor::config::{AppConfig, LoggingConfig};
use fault_predictor::domain::{FeatureRow, PredictionResponse};
use fault_predictor::ml::{Classifier, FaultModel};
use fault_predictor::services::predict_row;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    let command = cli.command();
    match &command {
        Commands::Serve(args) => args.apply(&mut config),
        Commands::Check { model } => override_model(&mut config, model),
        Commands::Predict(args) => override_model(&mut config, &args.model),
    }

    if let Err(errors) = config.validate() {
        anyhow::bail!("invalid configuration: {}", errors.join("; "));
    }

    init_logging(&config.logging);

    // The model is loaded exactly once; nothing is served without it.
    let model = match FaultModel::load(&config.model.path) {
        Ok(model) => model,
        Err(e) => {
            error!(path = %config.model.path.display(), "{}", e);
            return Err(e.into());
        }
    };

    match command {
        Commands::Serve(_) => {
            let model_info = model.info();
            info!(
                estimator = %model_info.estimator,
                source = %model_info.source,
                encoded_width = model_info.encoded_width,
                classes = ?model_info.classes,
                "Model loaded"
            );
            start_api_server(&config.server, Arc::new(model)).await?;
        }
        Commands::Check { .. } => {
            println!("{}", serde_json::to_string_pretty(&model.info())?);
        }
        Commands::Predict(args) => {
            let row = FeatureRow::from(args.to_request());
            let faulty = predict_row(&model, &row)
                .map_err(|e| anyhow::anyhow!("Prediction failed: {e}"))?;
            println!("{}", serde_json::to_string(&PredictionResponse { faulty })?);
        }
    }

    Ok(())
}

fn override_model(config: &mut AppConfig, model: &Option<PathBuf>) {
    if let Some(path) = model {
        config.model.path = path.clone();
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},fault_predictor={level},tower_http=warn",
            level = logging.level.to_ascii_lowercase()
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
