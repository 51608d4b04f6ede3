//! Looks up a single energy consumption record in the on-chain oracle.
//!
//! The binary wires [run] to the terminal. Everything here takes its I/O as
//! parameters so it can be driven by tests.
use std::io::{BufRead, Write};

use consumption_ethereum::{CallError, ConsumptionSource};
use tracing::debug;

pub mod config;
pub mod lookup;
pub mod prompt;

pub use config::{Config, ConfigError};
pub use prompt::InputError;

#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("reading the lookup key")]
    Input(#[from] InputError),
    #[error("querying the energy oracle")]
    Lookup(#[from] CallError),
    #[error("writing the result")]
    Output(#[source] std::io::Error),
}

/// Prompts for a lookup key, queries `source` once and writes the consumption
/// to `output` as a single line.
///
/// Prompts go to `prompts`, never to `output`.
pub async fn run<S>(
    source: &S,
    input: impl BufRead,
    prompts: impl Write,
    mut output: impl Write,
) -> Result<(), ReaderError>
where
    S: ConsumptionSource + ?Sized,
{
    let key = prompt::read_lookup_key(input, prompts)?;
    debug!(?key, "Lookup key read");

    let consumption = lookup::consumption(source, &key).await?;

    writeln!(output, "{}", lookup::render(consumption)).map_err(ReaderError::Output)?;
    output.flush().map_err(ReaderError::Output)?;

    Ok(())
}
