use crate::error::{GrantError, Result};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use std::sync::LazyLock;

/// Accepted grammar for raw amount strings: optional sign, optional integer
/// part followed by a dot, at least one digit. No exponents, no separators.
static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d*\.)?\d+$").expect("amount pattern compiles"));

/// Number of fractional digits every amount is normalized to.
pub const AMOUNT_SCALE: u32 = 2;

/// A signed fixed-point amount, normalized to exactly two fractional digits.
///
/// Normalization truncates toward zero on the absolute magnitude, so
/// `12.567` becomes `12.56` and `-12.567` becomes `-12.56`; the sign of the
/// result always matches the sign of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    /// Parses and normalizes a raw user-supplied amount string.
    ///
    /// Anything outside the accepted grammar (including values too large
    /// for the decimal representation) is rejected with
    /// [`GrantError::InvalidAmount`].
    pub fn parse(raw: &str) -> Result<Self> {
        if !AMOUNT_PATTERN.is_match(raw) {
            return Err(GrantError::InvalidAmount(raw.to_string()));
        }
        let value =
            Decimal::from_str(raw).map_err(|_| GrantError::InvalidAmount(raw.to_string()))?;
        let mut value = value.trunc_with_scale(AMOUNT_SCALE);
        value.rescale(AMOUNT_SCALE);
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

/// A ledger-side balance value object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Balance(pub Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}
