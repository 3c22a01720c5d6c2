//! Unit and encoding conversions between Ethereum and Qtum conventions.
//!
//! Ethereum quantities are hex-encoded wei (18 decimals). Qtum amounts are
//! decimal QTUM with 8 decimals. A wei value maps to a QTUM amount by a
//! 10^10 shift, rounded half-to-even at the 8th decimal.

use num_bigint::{BigInt, BigUint, Sign};
use std::str::FromStr;

use num_traits::{One, ToPrimitive};
use rust_decimal::Decimal;

use super::error::{Result, TransformError};
use crate::eth::TransactionReq;

/// Decimal places of a QTUM amount.
pub const QTUM_DECIMALS: u32 = 8;

/// Power of ten between a wei quantity and its QTUM amount.
pub const WEI_TO_QTUM_EXPONENT: u32 = 10;

/// Gas limit used when the transaction carries none.
pub const DEFAULT_GAS_LIMIT: u64 = 250_000;

/// Gas price used when the transaction carries none: 0.0000004 QTUM, the
/// node's minimum.
pub fn default_gas_price() -> Decimal {
    Decimal::new(40, QTUM_DECIMALS)
}

/// Remove any leading `0x`/`0X`. Applying it twice yields the same result.
pub fn strip_hex_prefix(s: &str) -> &str {
    let mut rest = s;
    while let Some(stripped) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        rest = stripped;
    }
    rest
}

/// Strip the prefix and lowercase, for hex strings sent to the node.
pub fn normalize_hex(s: &str) -> String {
    strip_hex_prefix(s).to_ascii_lowercase()
}

/// True iff `s` without its prefix is exactly 40 hex characters.
pub fn is_ethereum_hex_address(s: &str) -> bool {
    let stripped = strip_hex_prefix(s);
    stripped.len() == 40 && stripped.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse a hex quantity (`0x1f`, `1f`, `-0x1f`) into an arbitrary-precision
/// integer.
pub fn parse_hex_quantity(s: &str) -> Result<BigInt> {
    let trimmed = s.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, trimmed),
    };

    let digits = strip_hex_prefix(body);
    if digits.is_empty() {
        return Err(TransformError::malformed_hex(s, "no hex digits"));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(TransformError::malformed_hex(
            s,
            format!("invalid hex digit {:?}", bad),
        ));
    }

    let magnitude = BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| TransformError::malformed_hex(s, "unparsable hex quantity"))?;

    Ok(BigInt::from_biguint(sign, magnitude))
}

/// Convert a wei quantity to a QTUM amount with 8 decimals.
///
/// Rounds half-to-even. Fails on negative input, or when the amount cannot be
/// sent to the node as a JSON number without losing digits.
pub fn wei_to_qtum(wei: &BigInt) -> Result<Decimal> {
    if wei.sign() == Sign::Minus {
        return Err(TransformError::ConversionOverflow(format!(
            "negative value {}",
            wei
        )));
    }

    // Units of 10^-8 QTUM.
    let divisor = BigInt::from(10u32).pow(WEI_TO_QTUM_EXPONENT - QTUM_DECIMALS);
    let mut units = wei / &divisor;
    let remainder = wei % &divisor;

    let twice = remainder * 2u32;
    if twice > divisor || (twice == divisor && (&units % 2u32).is_one()) {
        units += 1u32;
    }

    let units = units.to_i128().ok_or_else(|| {
        TransformError::ConversionOverflow(format!("{} wei exceeds the amount range", wei))
    })?;

    let amount = Decimal::try_from_i128_with_scale(units, QTUM_DECIMALS).map_err(|_| {
        TransformError::ConversionOverflow(format!("{} wei exceeds the amount range", wei))
    })?;

    if !is_exact_json_number(amount) {
        return Err(TransformError::ConversionOverflow(format!(
            "amount {} exceeds the precision of a JSON number",
            amount
        )));
    }

    Ok(amount)
}

/// True iff `amount` survives the trip through an `f64`, which is how
/// amounts are written to the node.
pub fn is_exact_json_number(amount: Decimal) -> bool {
    amount
        .to_string()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(|f| Decimal::from_str(&f.to_string()).ok())
        == Some(amount)
}

/// Convert a hex wei value to a QTUM amount.
pub fn value_to_amount(hex_wei: &str) -> Result<Decimal> {
    let wei = parse_hex_quantity(hex_wei)?;
    wei_to_qtum(&wei)
}

/// Parse a hex gas limit. Gas is a unit count, so no scaling applies.
pub fn gas_limit_from_hex(hex_gas: &str) -> Result<u64> {
    let gas = parse_hex_quantity(hex_gas)?;
    if gas.sign() == Sign::Minus {
        return Err(TransformError::ConversionOverflow(format!(
            "negative gas limit {}",
            gas
        )));
    }
    gas.to_u64().ok_or_else(|| {
        TransformError::ConversionOverflow(format!("gas limit {} exceeds u64", gas))
    })
}

/// Gas limit and QTUM-denominated gas price of a transaction, defaulted when
/// absent.
pub fn gas_params(tx: &TransactionReq) -> Result<(u64, Decimal)> {
    let gas_limit = match tx.gas() {
        Some(gas) => gas_limit_from_hex(gas)?,
        None => DEFAULT_GAS_LIMIT,
    };

    let gas_price = match tx.gas_price() {
        Some(price) => value_to_amount(price)?,
        None => default_gas_price(),
    };

    Ok((gas_limit, gas_price))
}
