use alloy::primitives::U256;
use efiat_error::{EfiatError, Result};
use std::fmt;

/// Decimals used by the native currency and every token the app displays
pub const BASE_DECIMALS: u8 = 18;

/// A token balance in base units together with its decimal scale.
///
/// Display formatting is exact: the value is rounded half-up at the requested
/// number of places instead of going through a float.
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct TokenAmount {
    raw: U256,
    decimals: u8,
}

impl TokenAmount {
    /// Creates an amount with the default 18 decimals
    pub fn from_raw(raw: U256) -> Self {
        Self {
            raw,
            decimals: BASE_DECIMALS,
        }
    }

    /// Creates an amount with an explicit decimal scale
    pub fn with_decimals(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Returns the value in base units
    pub fn raw(&self) -> U256 {
        self.raw
    }

    /// Returns the decimal scale
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Formats `raw / 10^decimals` with exactly `places` fractional digits
    pub fn format_fixed(&self, places: u8) -> String {
        let scaled = if places >= self.decimals {
            self.raw * pow10(places - self.decimals)
        } else {
            let divisor = pow10(self.decimals - places);
            let quotient = self.raw / divisor;
            let remainder = self.raw % divisor;
            // remainder >= divisor / 2, without overflowing on doubling
            if remainder >= divisor - remainder {
                quotient + U256::from(1u8)
            } else {
                quotient
            }
        };

        if places == 0 {
            return scaled.to_string();
        }
        let unit = pow10(places);
        let whole = scaled / unit;
        let fraction = (scaled % unit).to_string();
        format!("{whole}.{fraction:0>width$}", width = places as usize)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fixed(self.decimals))
    }
}

impl From<U256> for TokenAmount {
    fn from(raw: U256) -> Self {
        Self::from_raw(raw)
    }
}

/// Parses a user-entered amount of base units.
///
/// Surrounding whitespace is ignored, otherwise the rules of
/// [`parse_uint_literal`] apply. Empty or malformed input is a
/// [`EfiatError::Validation`] carrying `message`.
pub fn parse_base_units(input: &str, message: &str) -> Result<U256> {
    parse_uint_literal(input.trim())
        .ok_or_else(|| EfiatError::Validation(message.to_string()))
}

/// Parses an unsigned integer literal: decimal digits, or hex digits after a
/// `0x` prefix. Signs, digit separators, fractions and unit suffixes are
/// rejected, as is anything above `U256::MAX`.
pub fn parse_uint_literal(text: &str) -> Option<U256> {
    let hex = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"));
    let (digits, radix) = match hex {
        Some(hex) => (hex, 16u32),
        None => (text, 10u32),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    U256::from_str_radix(digits, u64::from(radix)).ok()
}

fn pow10(exp: u8) -> U256 {
    (0..exp).fold(U256::from(1u8), |acc, _| acc * U256::from(10u8))
}
