use clap::{ArgAction, Args, Parser, Subcommand};
use jetapi_core::config::JetApiConfig;
use jetapi_core::query::DEFAULT_BASE_URL;
use jetapi_core::FormState;
use std::path::PathBuf;
use validator::Validate;

/// CLI configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug)]
#[command(name = "jetapi")]
#[command(
    author,
    version,
    about = "Build JetAPI query URLs and fetch aircraft photos and flight history"
)]
#[command(after_help = "Examples:
  jetapi url --reg G-ABCD --photos 5
  jetapi get --reg N12345 --only-fr
  jetapi get --reg G-ABCD --flights 0 --download ./exports

Counts are clamped to 0..=20; text that is not a number counts as 0.")]
pub struct Config {
    /// JetAPI query endpoint, ending where the registration is appended
    #[arg(long, env = "JETAPI_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "JETAPI_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout: u64,

    /// Increase log verbosity (-v for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Client configuration for the selected endpoint and timeout.
    pub fn jetapi_config(&self) -> Result<JetApiConfig, jetapi_core::Error> {
        let config = JetApiConfig::new(self.api_url.as_str())?.with_timeout(self.timeout);
        config.validate()?;
        Ok(config)
    }
}

/// Query builder fields, taken as raw text like the form inputs they replace
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Aircraft registration (letters, digits and '-')
    #[arg(short, long, default_value = "")]
    pub reg: String,

    /// Number of JetPhotos images (0-20)
    #[arg(short, long, default_value = "3", allow_hyphen_values = true)]
    pub photos: String,

    /// Number of FlightRadar24 flights (0-20)
    #[arg(short, long, default_value = "20", allow_hyphen_values = true)]
    pub flights: String,

    /// Only scrape JetPhotos
    #[arg(long)]
    pub only_jp: bool,

    /// Only scrape FlightRadar24
    #[arg(long)]
    pub only_fr: bool,
}

impl QueryArgs {
    pub fn to_form(&self) -> FormState {
        FormState {
            registration: self.reg.clone(),
            photos: self.photos.clone(),
            flights: self.flights.clone(),
            only_jp: self.only_jp,
            only_fr: self.only_fr,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the query URL for the given fields
    #[command(after_help = "Example: jetapi url --reg G-ABCD --photos 25 --only-jp")]
    Url {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Fetch the lookup and print it as indented JSON
    #[command(after_help = "Example: jetapi get --reg G-ABCD --download ./exports")]
    Get {
        #[command(flatten)]
        query: QueryArgs,

        /// Also save the response as <reg>.json in this directory
        #[arg(short, long, value_name = "DIR")]
        download: Option<PathBuf>,
    },
}
