//! Contains the value types shared by the consumption reader crates.
//!
//! This is mostly thin wrappers around [U256] and [Address] which add type
//! safety to the arguments of the oracle's `energyConsumptions` lookup.
use alloy::primitives::U256;

mod key;
mod macros;
mod network;

pub use key::{parse_address, KeyError, LookupKey};
pub use network::Network;

macros::u256_newtypes!(SupplierId => "supplier ID", RecordId => "record ID");

/// A single energy consumption entry as stored by the oracle contract.
///
/// The oracle keeps its entries in a plain mapping, so a lookup of a key that
/// was never recorded yields the zero-valued record rather than an error.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsumptionRecord {
    pub timestamp: U256,
    pub consumption: U256,
}

impl ConsumptionRecord {
    pub const fn new(timestamp: U256, consumption: U256) -> Self {
        Self {
            timestamp,
            consumption,
        }
    }

    /// True for the all-zero record the oracle reports for unknown keys.
    pub fn is_absent(&self) -> bool {
        self == &Self::default()
    }
}
