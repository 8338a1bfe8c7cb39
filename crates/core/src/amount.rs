//! Amount - Non-negative base-unit token quantity
//!
//! Balances are whole numbers of base units (like wei). All arithmetic is
//! checked: an overflow is reported, never wrapped.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default number of decimals used to display base units
pub const DEFAULT_DECIMALS: u32 = 18;

/// Largest scale `rust_decimal` can represent
const MAX_DECIMALS: u32 = 28;

/// Errors that can occur when working with amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Invalid amount: {0}")]
    InvalidFormat(String),

    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    #[error("Amount {value} has more than {decimals} fractional digits")]
    TooPrecise { value: Decimal, decimals: u32 },

    #[error("Unsupported decimals: {0} (max 28)")]
    UnsupportedDecimals(u32),

    #[error("Amount out of range: {0}")]
    OutOfRange(String),
}

/// A non-negative token quantity in base units.
///
/// # Example
/// ```
/// use ctoken_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::from_units(Decimal::new(1000, 0), 18).unwrap();
/// assert_eq!(amount.value(), 1_000_000_000_000_000_000_000);
/// assert_eq!(amount.to_units(18).unwrap(), Decimal::new(1000, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u128);

impl Amount {
    /// Zero amount constant
    pub const ZERO: Self = Self(0);

    /// Create an amount from raw base units
    #[inline]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw base-unit value
    #[inline]
    pub const fn value(&self) -> u128 {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition - returns None on overflow
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction - returns None if result would be negative
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Convert a human-readable quantity (e.g. `1000.5` tokens) into base units
    pub fn from_units(units: Decimal, decimals: u32) -> Result<Self, AmountError> {
        if units.is_sign_negative() && !units.is_zero() {
            return Err(AmountError::NegativeAmount(units));
        }
        let scaled = units
            .checked_mul(scale_factor(decimals)?)
            .ok_or_else(|| AmountError::OutOfRange(units.to_string()))?;
        if !scaled.fract().is_zero() {
            return Err(AmountError::TooPrecise {
                value: units,
                decimals,
            });
        }
        let mut whole = scaled;
        whole.rescale(0);
        u128::try_from(whole.mantissa())
            .map(Amount)
            .map_err(|_| AmountError::OutOfRange(units.to_string()))
    }

    /// Convert base units into a human-readable quantity
    pub fn to_units(&self, decimals: u32) -> Result<Decimal, AmountError> {
        if decimals > MAX_DECIMALS {
            return Err(AmountError::UnsupportedDecimals(decimals));
        }
        let raw = i128::try_from(self.0).map_err(|_| AmountError::OutOfRange(self.to_string()))?;
        Decimal::try_from_i128_with_scale(raw, decimals)
            .map(|d| d.normalize())
            .map_err(|_| AmountError::OutOfRange(self.to_string()))
    }
}

fn scale_factor(decimals: u32) -> Result<Decimal, AmountError> {
    if decimals > MAX_DECIMALS {
        return Err(AmountError::UnsupportedDecimals(decimals));
    }
    Decimal::TEN
        .checked_powu(u64::from(decimals))
        .ok_or(AmountError::UnsupportedDecimals(decimals))
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u128>()
            .map(Amount)
            .map_err(|_| AmountError::InvalidFormat(s.to_string()))
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}
