//! The lookup itself, independent of where the key came from.
use alloy::primitives::U256;
use consumption_common::LookupKey;
use consumption_ethereum::{CallError, ConsumptionSource};

/// The consumption stored under `key`, zero if nothing was ever recorded there.
pub async fn consumption<S>(source: &S, key: &LookupKey) -> Result<U256, CallError>
where
    S: ConsumptionSource + ?Sized,
{
    let record = source.energy_consumption(key).await?;
    Ok(record.consumption)
}

/// Formats a consumption the way it is printed: base 10, nothing else.
pub fn render(consumption: U256) -> String {
    consumption.to_string()
}
