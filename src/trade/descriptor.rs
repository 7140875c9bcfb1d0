//! The record a transaction attempt fills in.

use alloy::primitives::{Address, Bytes, U256};
use std::fmt;

use crate::blockchain::transaction::TransferFields;
use crate::blockchain::types::ChainId;
use crate::config::TradeConfig;
use crate::trade::error::{InputError, TradeError, TradeResult};
use crate::units::Denominations;

/// All fields of one transaction attempt.
///
/// Created from the raw config, mutated only by the resolution stages, then
/// handed to signing. `chain_id` and `from_address` are always derived.
#[derive(Clone)]
pub struct TradeDescriptor {
    pub network: String,
    pub chain_id: Option<ChainId>,
    pub from_address: Option<Address>,
    private_key: String,
    /// Recipient as configured, before validation.
    pub to_input: String,
    pub to_address: Option<Address>,
    /// Base-unit decimal once the amount stage ran, raw input before.
    pub amount: String,
    pub amount_unit: Option<String>,
    /// Conversion table for a non-wei amount unit.
    pub amount_table: Option<Denominations>,
    /// `0` = unset.
    pub nonce: u64,
    /// `None` = unset.
    pub gas_price: Option<u128>,
    /// `0` = unset.
    pub gas_limit: u64,
    /// Data as configured, before decoding.
    pub data_input: String,
    pub data: Bytes,
}

impl TradeDescriptor {
    /// Intake of the raw config. Numeric fields are parsed here so a
    /// malformed value fails before any network activity.
    pub fn from_config(config: &TradeConfig) -> Result<Self, InputError> {
        let amount = config.amount.trim();
        let amount_unit = Some(config.amount_unit.trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        Ok(Self {
            network: config.network.trim().to_string(),
            chain_id: None,
            from_address: None,
            private_key: config.private_key.trim().to_string(),
            to_input: config.to.trim().to_string(),
            to_address: None,
            amount: if amount.is_empty() { "0".to_string() } else { amount.to_string() },
            amount_unit,
            amount_table: None,
            nonce: parse_optional("nonce", &config.nonce)?.unwrap_or(0),
            gas_price: parse_optional("gasprice", &config.gas_price)?,
            gas_limit: parse_optional("gaslimit", &config.gas_limit)?.unwrap_or(0),
            data_input: config.data.clone(),
            data: Bytes::new(),
        })
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// The amount in wei. Only meaningful after the amount stage.
    pub fn value(&self) -> Result<U256, InputError> {
        self.amount
            .parse::<U256>()
            .map_err(|_| InputError::AmountOutOfRange(self.amount.clone()))
    }

    /// Every field signing needs. Fails on anything unresolved.
    pub fn transfer_fields(&self) -> TradeResult<TransferFields> {
        Ok(TransferFields {
            chain_id: self.chain_id.ok_or(TradeError::Incomplete("chain id"))?,
            nonce: self.nonce,
            to: self.to_address.ok_or(TradeError::Incomplete("to address"))?,
            value: self.value()?,
            gas_limit: match self.gas_limit {
                0 => return Err(TradeError::Incomplete("gas limit")),
                limit => limit,
            },
            gas_price: self.gas_price.ok_or(TradeError::Incomplete("gas price"))?,
            data: self.data.clone(),
        })
    }
}

fn parse_optional<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<Option<T>, InputError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| InputError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn or_unset<T: fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "<unset>".to_string())
}

impl fmt::Display for TradeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  network   : {}", self.network)?;
        writeln!(f, "  chain id  : {}", or_unset(self.chain_id))?;
        writeln!(f, "  from      : {}", or_unset(self.from_address))?;
        writeln!(f, "  to        : {}", or_unset(self.to_address))?;
        writeln!(f, "  value     : {} wei", self.amount)?;
        writeln!(f, "  nonce     : {}", self.nonce)?;
        writeln!(f, "  gas price : {} wei", or_unset(self.gas_price))?;
        writeln!(f, "  gas limit : {}", self.gas_limit)?;
        if self.data.is_empty() {
            write!(f, "  data      : <none>")
        } else {
            write!(f, "  data      : {} ({} bytes)", self.data, self.data.len())
        }
    }
}

impl fmt::Debug for TradeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TradeDescriptor")
            .field("network", &self.network)
            .field("chain_id", &self.chain_id)
            .field("from_address", &self.from_address)
            .field("private_key", &"<redacted>")
            .field("to_address", &self.to_address)
            .field("amount", &self.amount)
            .field("amount_unit", &self.amount_unit)
            .field("nonce", &self.nonce)
            .field("gas_price", &self.gas_price)
            .field("gas_limit", &self.gas_limit)
            .field("data", &self.data)
            .finish()
    }
}
