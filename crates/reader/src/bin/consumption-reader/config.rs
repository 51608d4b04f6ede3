use clap::Parser;
use consumption_reader::{Config, ConfigError};

#[derive(Parser)]
#[command(name = "consumption-reader")]
#[command(version)]
#[command(
    about = "Reads one energy consumption record from the energy oracle on Polygon Mumbai.",
    long_about = "Reads one energy consumption record from the energy oracle on Polygon Mumbai.

Asks for a user address, a supplier ID and a record ID, then prints the recorded consumption. \
Keys that were never recorded print 0."
)]
struct Cli {
    #[arg(
        long = "alchemy-api-key",
        long_help = "API key of the Alchemy Polygon Mumbai endpoint. Also read from a .env file in the working directory.",
        value_name = "KEY",
        env = "ALCHEMY_API_KEY",
        hide_env_values = true
    )]
    alchemy_api_key: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<Config, ConfigError> {
        match self.alchemy_api_key {
            Some(key) => Config::new(key),
            // clap treats an empty variable as unset.
            None => Config::from_env(),
        }
    }
}

/// Parses the command line, falling back to the environment, into a validated [Config].
///
/// Exits the process on `--help`, `--version` and clap usage errors.
pub fn parse_cmd_line() -> Result<Config, ConfigError> {
    Cli::parse().into_config()
}
