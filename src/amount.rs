// src/amount.rs
use std::str::FromStr;

use cosmwasm_std::Uint256;

use crate::error::ClientError;

/// `None` once the power no longer fits in 256 bits (exp >= 78).
fn ten_pow(exp: u32) -> Option<Uint256> {
    let ten = Uint256::from(10u128);
    (0..exp).try_fold(Uint256::from(1u128), |acc, _| acc.checked_mul(ten).ok())
}

/// `value / step` rounded half up, without overflowing near the top of the range.
fn div_half_up(value: Uint256, step: Uint256) -> Uint256 {
    let quotient = value / step;
    let remainder = value - quotient * step;
    if remainder >= step - remainder {
        quotient + Uint256::from(1u128)
    } else {
        quotient
    }
}

/// Parses a decimal string such as "0.25" into integer units of a token with
/// `decimals` decimals.
pub fn parse_amount(input: &str, decimals: u32) -> Result<Uint256, ClientError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClientError::EmptyAmount);
    }
    let invalid = || ClientError::InvalidAmount(input.to_string());

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if fraction.len() > decimals as usize {
        return Err(invalid());
    }
    let unit = ten_pow(decimals).ok_or_else(invalid)?;

    let whole = if whole.is_empty() {
        Uint256::zero()
    } else {
        Uint256::from_str(whole).map_err(|_| invalid())?
    };
    let padded = format!("{:0<width$}", fraction, width = decimals as usize);
    let fraction = if padded.is_empty() {
        Uint256::zero()
    } else {
        Uint256::from_str(&padded).map_err(|_| invalid())?
    };

    whole
        .checked_mul(unit)
        .and_then(|scaled| scaled.checked_add(fraction))
        .map_err(|_| invalid())
}

/// Renders integer token units with exactly `places` decimals, rounding half
/// up. A missing amount renders as zero. Scales past 10^77 are exact too: every
/// `Uint256` is below one whole unit there.
pub fn format_amount(value: Option<Uint256>, decimals: u32, places: u32) -> String {
    let value = value.unwrap_or_default();
    let places = places.min(decimals);

    let (mut whole, remainder) = match ten_pow(decimals) {
        Some(unit) => {
            let whole = value / unit;
            (whole, value - whole * unit)
        }
        None => (Uint256::zero(), value),
    };
    // a step past 10^77 is more than twice any value, so it rounds to zero
    let mut scaled = match ten_pow(decimals - places) {
        Some(step) => div_half_up(remainder, step),
        None => Uint256::zero(),
    };
    if let Some(limit) = ten_pow(places) {
        if scaled >= limit {
            whole += Uint256::from(1u128);
            scaled -= limit;
        }
    }

    if places == 0 {
        return whole.to_string();
    }
    format!("{}.{:0>width$}", whole, scaled.to_string(), width = places as usize)
}
