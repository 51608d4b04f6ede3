use std::str::FromStr;

use alloy::primitives::{Address, U256};

use crate::{RecordId, SupplierId};

/// Rejected lookup arguments. Raised before anything is sent to the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("invalid address {0:?}: expected 0x followed by 40 hexadecimal digits")]
    InvalidAddress(String),
    #[error("address {0} does not match its EIP-55 checksum")]
    BadChecksum(String),
    #[error("invalid {field} {value:?}: expected a non-negative decimal integer")]
    InvalidInteger { field: &'static str, value: String },
}

/// Identifies one entry of the oracle's `energyConsumptions` mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub user: Address,
    pub supplier_id: SupplierId,
    pub record_id: RecordId,
}

impl LookupKey {
    pub fn new(user: Address, supplier_id: SupplierId, record_id: RecordId) -> Self {
        Self {
            user,
            supplier_id,
            record_id,
        }
    }
}

/// Parses a user address as typed in.
///
/// The `0x` prefix is optional. Mixed-case addresses must carry a valid EIP-55
/// checksum, all-lowercase and all-uppercase ones are taken as is.
pub fn parse_address(raw: &str) -> Result<Address, KeyError> {
    let raw = raw.trim();
    let address =
        Address::from_str(raw).map_err(|_| KeyError::InvalidAddress(raw.to_owned()))?;

    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());

    if has_lower && has_upper && address.to_checksum(None)[2..] != *digits {
        return Err(KeyError::BadChecksum(raw.to_owned()));
    }

    Ok(address)
}

pub(crate) fn parse_decimal(field: &'static str, raw: &str) -> Result<U256, KeyError> {
    let invalid = || KeyError::InvalidInteger {
        field,
        value: raw.to_owned(),
    };

    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    // Only fails on values wider than 256 bits at this point.
    U256::from_str_radix(digits, 10).map_err(|_| invalid())
}
