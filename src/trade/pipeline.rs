//! Ordered resolution of a [`TradeDescriptor`].
//!
//! # Data Flow
//! ```text
//! TradeConfig
//!     → intake (numeric fields parsed, no network)
//!     → Network → Key → Recipient → Amount
//!     → Nonce → Data → GasPrice → GasLimit
//!     → confirmation gate
//!     → Resolved { descriptor, client }
//! ```
//!
//! Each stage either fills its fields or ends the attempt with an error.
//! Nothing is retried. Gas resolution comes last because estimation needs
//! the final sender, recipient, value and payload.

use alloy::hex;
use alloy::primitives::aliases::U512;
use alloy::primitives::{Address, Bytes};

use crate::blockchain::client::{ChainClient, Connector};
use crate::blockchain::types::CallParams;
use crate::blockchain::wallet::Wallet;
use crate::config::TradeConfig;
use crate::display::{boxed, color_address, unit_rows};
use crate::trade::descriptor::TradeDescriptor;
use crate::trade::error::{InputError, TradeError, TradeResult};
use crate::trade::operator::Operator;
use crate::units::{convert_rational, ConversionError, Rational, Unit};

/// Prompt shown by the first confirmation gate.
pub const START_PROMPT: &str = "Start transaction? (Y/y/N/n)";

/// Hex digits in an address, without the `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// Resolution stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Network,
    Key,
    Recipient,
    Amount,
    Nonce,
    Data,
    GasPrice,
    GasLimit,
}

impl Stage {
    pub const ORDER: [Stage; 8] = [
        Stage::Network,
        Stage::Key,
        Stage::Recipient,
        Stage::Amount,
        Stage::Nonce,
        Stage::Data,
        Stage::GasPrice,
        Stage::GasLimit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Network => "network",
            Stage::Key => "key",
            Stage::Recipient => "recipient",
            Stage::Amount => "amount",
            Stage::Nonce => "nonce",
            Stage::Data => "data",
            Stage::GasPrice => "gas_price",
            Stage::GasLimit => "gas_limit",
        }
    }

    /// Run a stage that works against an open client. Returns the lines to
    /// show the operator.
    ///
    /// [`Stage::Network`] opens the client itself and is driven by
    /// [`Pipeline::resolve`] through [`check_network`]; here it fails with
    /// [`TradeError::Incomplete`].
    pub async fn run<C: ChainClient + ?Sized>(
        &self,
        desc: &mut TradeDescriptor,
        client: &C,
    ) -> TradeResult<Vec<String>> {
        match self {
            Stage::Network => Err(TradeError::Incomplete("network")),
            Stage::Key => check_key(desc),
            Stage::Recipient => check_recipient(desc),
            Stage::Amount => resolve_amount(desc),
            Stage::Nonce => resolve_nonce(desc, client).await,
            Stage::Data => resolve_data(desc),
            Stage::GasPrice => resolve_gas_price(desc, client).await,
            Stage::GasLimit => resolve_gas_limit(desc, client).await,
        }
    }
}

/// Whether the operator let the attempt continue.
#[derive(Debug)]
pub enum Gate<T> {
    Proceed(T),
    Declined,
}

/// A fully resolved attempt and the client it was resolved against.
#[derive(Debug)]
pub struct Resolved<C> {
    pub descriptor: TradeDescriptor,
    pub client: C,
}

/// Drives the stages in order over one descriptor.
pub struct Pipeline<'a, K> {
    connector: &'a K,
}

impl<'a, K: Connector> Pipeline<'a, K> {
    pub fn new(connector: &'a K) -> Self {
        Self { connector }
    }

    /// Resolve every field of `config`, then ask the operator to start.
    pub async fn resolve(
        &self,
        config: &TradeConfig,
        operator: &mut dyn Operator,
    ) -> TradeResult<Gate<Resolved<K::Client>>> {
        let mut desc = TradeDescriptor::from_config(config)?;

        let (client, lines) = check_network(&mut desc, self.connector).await?;
        report(operator, Stage::Network, &lines)?;

        for stage in Stage::ORDER.into_iter().skip(1) {
            let lines = stage.run(&mut desc, &client).await?;
            report(operator, stage, &lines)?;
        }

        operator.show(&format!("╔══[ Transaction ]══╗\n{}", desc))?;
        if !operator.confirm(START_PROMPT)? {
            tracing::info!("Operator declined before signing");
            return Ok(Gate::Declined);
        }

        Ok(Gate::Proceed(Resolved {
            descriptor: desc,
            client,
        }))
    }
}

fn report(operator: &mut dyn Operator, stage: Stage, lines: &[String]) -> TradeResult<()> {
    tracing::debug!(stage = stage.name(), "Stage resolved");
    for line in lines {
        operator.show(line)?;
    }
    Ok(())
}

/// Stage 1: open the client and learn the chain id.
pub async fn check_network<K: Connector>(
    desc: &mut TradeDescriptor,
    connector: &K,
) -> TradeResult<(K::Client, Vec<String>)> {
    if desc.network.is_empty() {
        return Err(InputError::EmptyNetwork.into());
    }

    let client = connector.connect(&desc.network).await?;
    let chain_id = client.chain_id().await?;
    desc.chain_id = Some(chain_id);

    tracing::info!(chain_id = chain_id.0, "Network connection successful");
    Ok((
        client,
        vec![format!("<-- Network connection successful, chainID: {} -->", chain_id)],
    ))
}

/// Stage 2: parse the key and derive the sender.
pub fn check_key(desc: &mut TradeDescriptor) -> TradeResult<Vec<String>> {
    if desc.private_key().is_empty() {
        return Err(InputError::EmptyPrivateKey.into());
    }
    let wallet = Wallet::from_private_key(desc.private_key())?;
    let from = wallet.address();
    desc.from_address = Some(from);

    tracing::info!(from = %from, "Private key configuration successful");
    Ok(vec![format!(
        "<-- Private key configuration successful: {} -->",
        colored(from)
    )])
}

/// Stage 3: the recipient must be 20 non-zero bytes.
pub fn check_recipient(desc: &mut TradeDescriptor) -> TradeResult<Vec<String>> {
    let raw = desc.to_input.as_str();
    if raw.is_empty() {
        return Err(InputError::EmptyRecipient.into());
    }

    let hex_part = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")).unwrap_or(raw);
    if hex_part.len() != ADDRESS_HEX_LEN {
        return Err(InputError::MalformedRecipient(raw.to_string()).into());
    }
    let to: Address = hex_part
        .parse()
        .map_err(|_| InputError::MalformedRecipient(raw.to_string()))?;
    if to.is_zero() {
        return Err(InputError::ZeroRecipient.into());
    }
    desc.to_address = Some(to);

    tracing::info!(to = %to, "To address configuration successful");
    Ok(vec![format!(
        "<-- To Address configuration successful: {} -->",
        colored(to)
    )])
}

/// Stage 4: fix the amount in wei.
///
/// Without a unit, or with `wei`, the amount must be written as a whole
/// number. A recognised unit is converted exactly and the result must be a
/// whole number of wei. An unknown unit is ignored and the amount read as wei.
pub fn resolve_amount(desc: &mut TradeDescriptor) -> TradeResult<Vec<String>> {
    let raw = desc.amount.clone();
    let quantity: Rational = raw.parse().map_err(|e| match e {
        ConversionError::Overflow => InputError::AmountOutOfRange(raw.clone()),
        _ => InputError::InvalidAmount(raw.clone()),
    })?;

    let unit = match desc.amount_unit.as_deref() {
        None => Unit::Wei,
        Some(name) => name.parse::<Unit>().unwrap_or_else(|_| {
            tracing::warn!(unit = name, "Unknown amount unit, reading amount as wei");
            Unit::Wei
        }),
    };

    let mut lines = Vec::new();
    if unit.is_base() {
        if raw.contains('.') || !quantity.is_integer() {
            return Err(InputError::FractionalBaseAmount(raw).into());
        }
        desc.amount = quantity.to_string();
        if !quantity.is_zero() {
            lines.push(format!("<-- Amount Configuration Successful: {} -->", desc.amount));
        }
    } else {
        let table = convert_rational(&quantity, unit)
            .map_err(|_| InputError::AmountOutOfRange(raw.clone()))?;
        let base = *table.base_units();
        if !base.is_integer() {
            return Err(InputError::SubWeiAmount {
                amount: raw,
                unit: unit.to_string(),
            }
            .into());
        }
        desc.amount = base.to_string();
        if !base.is_zero() {
            lines = boxed(
                "Amount Configuration Successful",
                &unit_rows(&table, &[Unit::Wei, unit]),
            );
        }
        desc.amount_table = Some(table);
    }
    desc.value()?;

    tracing::info!(amount_wei = %desc.amount, unit = %unit, "Amount resolved");
    Ok(lines)
}

/// Stage 5: take the pending nonce when none was configured.
pub async fn resolve_nonce<C: ChainClient + ?Sized>(
    desc: &mut TradeDescriptor,
    client: &C,
) -> TradeResult<Vec<String>> {
    if desc.nonce == 0 {
        let from = desc.from_address.ok_or(TradeError::Incomplete("from address"))?;
        desc.nonce = client.pending_nonce(from).await?;
    }

    tracing::info!(nonce = desc.nonce, "Nonce resolved");
    Ok(vec![format!("<-- Nonce configuration successful: {} -->", desc.nonce)])
}

/// Stage 6: `0x…` is hex, anything else is sent as its UTF-8 bytes.
pub fn resolve_data(desc: &mut TradeDescriptor) -> TradeResult<Vec<String>> {
    let raw = desc.data_input.as_str();
    desc.data = match raw.strip_prefix("0x") {
        Some(hex_part) => {
            Bytes::from(hex::decode(hex_part).map_err(|e| InputError::InvalidData(e.to_string()))?)
        }
        None => Bytes::copy_from_slice(raw.as_bytes()),
    };

    if desc.data.is_empty() {
        return Ok(Vec::new());
    }
    tracing::info!(data_len = desc.data.len(), "Data resolved");
    Ok(vec![format!("<-- Data configuration successful: {} -->", raw)])
}

/// Stage 7: ask the node for a gas price when none was configured.
pub async fn resolve_gas_price<C: ChainClient + ?Sized>(
    desc: &mut TradeDescriptor,
    client: &C,
) -> TradeResult<Vec<String>> {
    let gas_price = match desc.gas_price {
        Some(price) => price,
        None => client.suggest_gas_price().await?,
    };
    desc.gas_price = Some(gas_price);

    tracing::info!(gas_price_wei = gas_price, "Gas price resolved");
    let table = convert_rational(&Rational::from_integer(U512::from(gas_price)), Unit::Wei)
        .map_err(|_| InputError::InvalidNumber {
            field: "gasprice",
            value: gas_price.to_string(),
        })?;
    Ok(boxed(
        "GasPrice configuration successful",
        &unit_rows(&table, &[Unit::Wei, Unit::Gwei]),
    ))
}

/// Stage 8: estimate gas when no limit was configured.
pub async fn resolve_gas_limit<C: ChainClient + ?Sized>(
    desc: &mut TradeDescriptor,
    client: &C,
) -> TradeResult<Vec<String>> {
    let gas_price = desc.gas_price.ok_or(TradeError::Incomplete("gas price"))?;
    if desc.gas_limit == 0 {
        let call = CallParams {
            from: desc.from_address.ok_or(TradeError::Incomplete("from address"))?,
            to: desc.to_address.ok_or(TradeError::Incomplete("to address"))?,
            gas_price,
            value: desc.value()?,
            data: desc.data.clone(),
        };
        desc.gas_limit = client.estimate_gas(&call).await?;
    }

    tracing::info!(gas_limit = desc.gas_limit, "Gas limit resolved");
    let max_fee = U512::from(desc.gas_limit) * U512::from(gas_price);
    let table = convert_rational(&Rational::from_integer(max_fee), Unit::Wei)
        .map_err(|_| InputError::InvalidNumber {
            field: "gaslimit",
            value: desc.gas_limit.to_string(),
        })?;
    Ok(boxed(
        "GasLimit configuration successful",
        &[
            ("gas".to_string(), desc.gas_limit.to_string()),
            ("max fee".to_string(), format!("{} ether", table.get(Unit::Ether))),
        ],
    ))
}

fn colored(address: Address) -> String {
    let text = address.to_checksum(None);
    color_address(&text).unwrap_or(text)
}
