use crate::error::{CalculatorError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A coin or note value recognized within a currency.
///
/// Wraps `rust_decimal::Decimal` and guarantees the value is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Denomination(Decimal);

impl Denomination {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(CalculatorError::InvalidDenomination(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Denomination {
    type Error = CalculatorError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Denomination> for Decimal {
    fn from(denomination: Denomination) -> Self {
        denomination.0
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Expresses `value` as a whole number of minor units at `scale`.
///
/// Digits finer than the minor unit are truncated toward zero. Works in `u128`
/// so a fine minor unit does not run into the 96-bit `Decimal` mantissa.
pub(crate) fn to_minor_units(value: Decimal, scale: u32) -> Result<u128> {
    let mantissa =
        u128::try_from(value.mantissa()).map_err(|_| CalculatorError::AmountOutOfRange)?;
    let own = value.scale();
    if own <= scale {
        10u128
            .checked_pow(scale - own)
            .and_then(|factor| mantissa.checked_mul(factor))
            .ok_or(CalculatorError::AmountOutOfRange)
    } else {
        Ok(mantissa / 10u128.pow(own - scale))
    }
}

pub(crate) fn from_minor_units(units: u128, scale: u32) -> Result<Decimal> {
    let factor = 10u128.pow(scale);
    let whole = i128::try_from(units / factor).map_err(|_| CalculatorError::AmountOutOfRange)?;
    let fraction =
        i128::try_from(units % factor).map_err(|_| CalculatorError::AmountOutOfRange)?;
    let whole = Decimal::try_from_i128_with_scale(whole, 0)
        .map_err(|_| CalculatorError::AmountOutOfRange)?;
    let fraction = Decimal::try_from_i128_with_scale(fraction, scale)
        .map_err(|_| CalculatorError::AmountOutOfRange)?;
    whole
        .checked_add(fraction)
        .ok_or(CalculatorError::AmountOutOfRange)
}

/// The denominations configured for one currency, in configured order.
///
/// Alongside the decimal values the set keeps each denomination as an integer
/// count of minor units, so change can be made without any rounding drift.
/// The minor unit is the finest fractional digit used by any denomination.
#[derive(Debug, Clone, PartialEq)]
pub struct DenominationSet {
    denominations: Vec<Denomination>,
    minor_units: Vec<u128>,
    scale: u32,
    descending: Vec<usize>,
}

impl DenominationSet {
    pub fn new<I>(currency: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = Decimal>,
    {
        let denominations = values
            .into_iter()
            .map(Denomination::new)
            .collect::<Result<Vec<_>>>()?;
        if denominations.is_empty() {
            return Err(CalculatorError::EmptyDenominationSet(currency.to_string()));
        }

        let scale = denominations
            .iter()
            .map(|d| d.value().normalize().scale())
            .max()
            .unwrap_or(0);

        let minor_units = denominations
            .iter()
            .map(|d| {
                to_minor_units(d.value(), scale)
                    .map_err(|_| CalculatorError::InvalidDenomination(d.value()))
            })
            .collect::<Result<Vec<_>>>()?;

        // Stable sort: among duplicates the first configured one comes first.
        let mut descending: Vec<usize> = (0..denominations.len()).collect();
        descending.sort_by(|&a, &b| minor_units[b].cmp(&minor_units[a]));

        Ok(Self {
            denominations,
            minor_units,
            scale,
            descending,
        })
    }

    /// Number of fractional digits in the currency's minor unit.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }

    pub fn contains(&self, value: Decimal) -> bool {
        self.denominations.iter().any(|d| d.value() == value)
    }

    /// Denominations in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &Denomination> {
        self.denominations.iter()
    }

    /// Positions of the denominations from largest to smallest value.
    pub(crate) fn descending_indices(&self) -> &[usize] {
        &self.descending
    }

    pub(crate) fn minor_units(&self, index: usize) -> u128 {
        self.minor_units[index]
    }

    pub(crate) fn get(&self, index: usize) -> Denomination {
        self.denominations[index]
    }
}

/// Read-only mapping from currency identifier to its denominations.
///
/// Currencies iterate in insertion order. Once handed to a calculator the
/// table is shared behind an `Arc` and never mutated again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenominationTable {
    currencies: Vec<(String, DenominationSet)>,
}

impl DenominationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a currency, replacing any denominations previously configured for it.
    pub fn insert<I>(&mut self, currency: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = Decimal>,
    {
        let set = DenominationSet::new(currency, values)?;
        match self.currencies.iter_mut().find(|(code, _)| code == currency) {
            Some((_, existing)) => *existing = set,
            None => self.currencies.push((currency.to_string(), set)),
        }
        Ok(())
    }

    pub fn get(&self, currency: &str) -> Option<&DenominationSet> {
        self.currencies
            .iter()
            .find(|(code, _)| code == currency)
            .map(|(_, set)| set)
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.position(currency).is_some()
    }

    pub(crate) fn position(&self, currency: &str) -> Option<usize> {
        self.currencies.iter().position(|(code, _)| code == currency)
    }

    pub(crate) fn set_at(&self, position: usize) -> &DenominationSet {
        &self.currencies[position].1
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.currencies.iter().map(|(code, _)| code.as_str())
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}
