mod config;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use jetapi_client::session::ERROR_MESSAGE;
use jetapi_client::session::DisplayState;
use jetapi_client::{FetchOutcome, JetApiClient, QuerySession};
use jetapi_core::config::JetApiConfig;
use jetapi_core::query::is_valid_registration;
use jetapi_core::{Error, QueryView};

use crate::config::{Command, Config, QueryArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::parse();
    init_tracing(config.verbose);

    let jet_config = config
        .jetapi_config()
        .context("Invalid JetAPI configuration")?;

    match config.command {
        Command::Url { query } => {
            let view = query_view(&jet_config, &query);
            println!("{}", view.query_url);
        }
        Command::Get { query, download } => {
            if !get(&jet_config, &query, download.as_deref()).await? {
                eprintln!("{ERROR_MESSAGE}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = if verbose > 0 { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

/// Build the view for the given fields, warning about any rewritten count.
fn query_view(jet_config: &JetApiConfig, query: &QueryArgs) -> QueryView {
    let view = query.to_form().on_input(&jet_config.api_url);
    warn_if_rewritten("photos", &query.photos, &view.photos_field);
    warn_if_rewritten("flights", &query.flights, &view.flights_field);
    view
}

fn warn_if_rewritten(field: &str, given: &str, used: &str) {
    if count_rewritten(given, used) {
        warn!(field, given, used, "Count rewritten to a whole number in 0..=20");
    }
}

/// True when `used` is not just another spelling of `given`.
fn count_rewritten(given: &str, used: &str) -> bool {
    given.trim().parse::<f64>().ok() != used.parse::<f64>().ok()
}

/// Run one lookup. Returns false when the request failed.
async fn get(
    jet_config: &JetApiConfig,
    query: &QueryArgs,
    download: Option<&Path>,
) -> anyhow::Result<bool> {
    if !is_valid_registration(&query.reg) {
        return Err(Error::InvalidRegistration(format!(
            "`{}` must be non-empty and contain only letters, digits and '-'",
            query.reg
        ))
        .into());
    }

    let view = query_view(jet_config, query);
    let params = query.to_form().to_parameters(&jet_config.api_url);

    let client = JetApiClient::from_config(jet_config)?;
    let session = QuerySession::new(client);

    info!(url = %view.query_url, "Fetching aircraft data");
    match session.get(&params).await {
        FetchOutcome::Loaded => {
            println!("{}", session.render());

            if let DisplayState::Loaded(record) = session.state() {
                match record.scrape_result() {
                    Ok(result) => info!(
                        registration = result.registration().unwrap_or(query.reg.as_str()),
                        images = result.image_count(),
                        flights = result.flight_count(),
                        "Lookup complete"
                    ),
                    Err(err) => warn!(error = %err, "Response did not match the lookup model"),
                }
            }

            if let (Some(dir), Some(export)) = (download, session.export()) {
                let path = export
                    .write_to(dir)
                    .with_context(|| format!("Failed to save {}", export.file_name()))?;
                info!("Saved {}", path.display());
            }
            Ok(true)
        }
        FetchOutcome::Failed | FetchOutcome::Superseded => Ok(false),
    }
}
