use crate::domain::change::{ChangeBreakdown, ChangeEntry};
use crate::domain::denomination::{
    DenominationSet, DenominationTable, from_minor_units, to_minor_units,
};
use crate::domain::ports::DenominationSource;
use crate::error::{CalculatorError, Result};
use crate::infrastructure::builtin::BuiltinDenominations;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;
use tracing::debug;

/// Works out the change owed for a cash transaction in one currency.
///
/// The calculator is bound to a single currency for its whole life. The
/// currency is checked against the denomination table once, at construction.
/// Change is made greedily, largest denomination first, on integer minor units.
#[derive(Debug, Clone)]
pub struct ChangeCalculator {
    table: Arc<DenominationTable>,
    current_currency: String,
    position: usize,
}

impl ChangeCalculator {
    /// Creates a calculator for `country` using the built-in denominations.
    pub fn new(country: &str) -> Result<Self> {
        let table = BuiltinDenominations::new().load()?;
        Self::with_table(Arc::new(table), country)
    }

    /// Creates a calculator for `country` backed by a caller-supplied table.
    ///
    /// The table may be shared by any number of calculators.
    pub fn with_table(table: Arc<DenominationTable>, country: &str) -> Result<Self> {
        let position = table
            .position(country)
            .ok_or_else(|| CalculatorError::InvalidCurrency(country.to_string()))?;
        Ok(Self {
            table,
            current_currency: country.to_string(),
            position,
        })
    }

    pub fn current_currency(&self) -> &str {
        &self.current_currency
    }

    pub fn denominations(&self) -> &DenominationSet {
        self.table.set_at(self.position)
    }

    /// Breaks `sum(payment) - price` down into coins and notes.
    ///
    /// Fails with `InsufficientPayment` when the payment does not cover the
    /// price. Change finer than the currency's smallest denomination is not
    /// handed out; it is reported as the breakdown's remainder.
    pub fn calculate_change(&self, price: Decimal, payment: &[Decimal]) -> Result<ChangeBreakdown> {
        let paid = payment
            .iter()
            .try_fold(Decimal::ZERO, |acc, tender| acc.checked_add(*tender))
            .ok_or(CalculatorError::AmountOutOfRange)?;

        if paid < price {
            return Err(CalculatorError::InsufficientPayment { price, paid });
        }

        let change = paid
            .checked_sub(price)
            .ok_or(CalculatorError::AmountOutOfRange)?;
        let set = self.denominations();
        let mut remaining = to_minor_units(change, set.scale())?;

        let mut counts = vec![0u64; set.len()];
        for &index in set.descending_indices() {
            let unit = set.minor_units(index);
            let count = remaining / unit;
            if count > 0 {
                counts[index] =
                    u64::try_from(count).map_err(|_| CalculatorError::AmountOutOfRange)?;
                remaining -= count * unit;
            }
        }

        let entries: Vec<ChangeEntry> = counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(index, &count)| ChangeEntry {
                denomination: set.get(index),
                count,
            })
            .collect();

        // Undispensed minor units plus whatever was finer than one minor unit.
        let truncated =
            change - change.round_dp_with_strategy(set.scale(), RoundingStrategy::ToZero);
        let remainder = from_minor_units(remaining, set.scale())?
            .checked_add(truncated)
            .ok_or(CalculatorError::AmountOutOfRange)?
            .normalize();
        if !remainder.is_zero() {
            debug!(
                currency = %self.current_currency,
                %change,
                %remainder,
                "change not fully expressible in denominations"
            );
        }
        debug!(
            currency = %self.current_currency,
            %price,
            %paid,
            %change,
            entries = entries.len(),
            "calculated change"
        );

        Ok(ChangeBreakdown::new(&self.current_currency, entries, remainder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unknown_currency_is_rejected() {
        let result = ChangeCalculator::new("Atlantis");
        assert!(matches!(
            result,
            Err(CalculatorError::InvalidCurrency(code)) if code == "Atlantis"
        ));
    }

    #[test]
    fn test_current_currency() {
        let calculator = ChangeCalculator::new("Mexico").unwrap();
        assert_eq!(calculator.current_currency(), "Mexico");
    }

    #[test]
    fn test_insufficient_payment() {
        let calculator = ChangeCalculator::new("US").unwrap();
        let result = calculator.calculate_change(dec!(10.50), &[dec!(5.00), dec!(1.00)]);
        assert!(matches!(
            result,
            Err(CalculatorError::InsufficientPayment { price, paid })
                if price == dec!(10.50) && paid == dec!(6.00)
        ));
    }

    #[test]
    fn test_us_change_is_greedy_largest_first() {
        let calculator = ChangeCalculator::new("US").unwrap();
        let change = calculator
            .calculate_change(dec!(10.50), &[dec!(20.00)])
            .unwrap();

        assert_eq!(change.len(), 3);
        assert_eq!(change.get(dec!(5.00)), Some(1));
        assert_eq!(change.get(dec!(2.00)), Some(2));
        assert_eq!(change.get(dec!(0.50)), Some(1));
        assert_eq!(change.total(), dec!(9.50));
        assert_eq!(change.remainder(), Decimal::ZERO);
    }

    #[test]
    fn test_entries_follow_configured_order() {
        let calculator = ChangeCalculator::new("US").unwrap();
        let change = calculator
            .calculate_change(dec!(10.50), &[dec!(20.00)])
            .unwrap();
        let order: Vec<Decimal> = change.iter().map(|e| e.denomination.value()).collect();
        assert_eq!(order, vec![dec!(0.50), dec!(2.00), dec!(5.00)]);
    }

    #[test]
    fn test_mexico_change() {
        let calculator = ChangeCalculator::new("Mexico").unwrap();
        let change = calculator
            .calculate_change(dec!(37.00), &[dec!(50.00)])
            .unwrap();

        assert_eq!(change.len(), 3);
        assert_eq!(change.get(dec!(10.00)), Some(1));
        assert_eq!(change.get(dec!(2.00)), Some(1));
        assert_eq!(change.get(dec!(1.00)), Some(1));
    }

    #[test]
    fn test_exact_payment_gives_no_change() {
        let calculator = ChangeCalculator::new("US").unwrap();
        let change = calculator
            .calculate_change(dec!(10.50), &[dec!(10.00), dec!(0.50)])
            .unwrap();
        assert!(change.is_empty());
        assert_eq!(change.remainder(), Decimal::ZERO);
    }

    #[test]
    fn test_empty_payment_for_free_item() {
        let calculator = ChangeCalculator::new("US").unwrap();
        let change = calculator.calculate_change(dec!(0), &[]).unwrap();
        assert!(change.is_empty());
    }

    #[test]
    fn test_unexpressible_residual_is_reported() {
        // Mexico has no one-cent coin.
        let calculator = ChangeCalculator::new("Mexico").unwrap();
        let change = calculator
            .calculate_change(dec!(36.97), &[dec!(50.00)])
            .unwrap();

        assert_eq!(change.get(dec!(10.00)), Some(1));
        assert_eq!(change.get(dec!(2.00)), Some(1));
        assert_eq!(change.get(dec!(1.00)), Some(1));
        assert_eq!(change.len(), 3);
        assert_eq!(change.total(), dec!(13.00));
        assert_eq!(change.remainder(), dec!(0.03));
    }

    #[test]
    fn test_sub_minor_unit_change_is_dropped() {
        let calculator = ChangeCalculator::new("US").unwrap();
        let change = calculator
            .calculate_change(dec!(0.995), &[dec!(1.00)])
            .unwrap();
        assert!(change.is_empty());
        assert_eq!(change.remainder(), dec!(0.005));
    }

    #[test]
    fn test_injected_table_in_descending_configuration() {
        let mut table = DenominationTable::new();
        table
            .insert("Tokens", [dec!(25), dec!(10), dec!(1)])
            .unwrap();
        let calculator = ChangeCalculator::with_table(Arc::new(table), "Tokens").unwrap();

        let change = calculator.calculate_change(dec!(0), &[dec!(30)]).unwrap();
        // Greedy is not optimal here (10 + 10 + 10 would use three).
        assert_eq!(change.get(dec!(25)), Some(1));
        assert_eq!(change.get(dec!(1)), Some(5));
        assert_eq!(change.get(dec!(10)), None);
    }

    #[test]
    fn test_duplicate_denominations_counted_once() {
        let mut table = DenominationTable::new();
        table.insert("Dup", [dec!(1), dec!(5), dec!(5)]).unwrap();
        let calculator = ChangeCalculator::with_table(Arc::new(table), "Dup").unwrap();

        let change = calculator.calculate_change(dec!(3), &[dec!(15)]).unwrap();
        assert_eq!(change.len(), 2);
        assert_eq!(change.get(dec!(5)), Some(2));
        assert_eq!(change.get(dec!(1)), Some(2));
    }

    fn fine_table(currency: &str, values: &[Decimal]) -> ChangeCalculator {
        let mut table = DenominationTable::new();
        table.insert(currency, values.iter().copied()).unwrap();
        ChangeCalculator::with_table(Arc::new(table), currency).unwrap()
    }

    #[test]
    fn test_payment_sum_overflow() {
        let calculator = ChangeCalculator::new("US").unwrap();
        let result = calculator.calculate_change(dec!(0), &[Decimal::MAX, dec!(1)]);
        assert!(matches!(result, Err(CalculatorError::AmountOutOfRange)));
    }

    #[test]
    fn test_change_too_large_for_minor_units() {
        let calculator = fine_table("Dust", &[Decimal::new(1, 28), dec!(1)]);
        let result = calculator.calculate_change(dec!(0), &[Decimal::MAX]);
        assert!(matches!(result, Err(CalculatorError::AmountOutOfRange)));
    }

    #[test]
    fn test_count_too_large() {
        let calculator = fine_table("Dust", &[Decimal::new(1, 28)]);
        let result = calculator.calculate_change(dec!(0), &[dec!(0.01)]);
        assert!(matches!(result, Err(CalculatorError::AmountOutOfRange)));

        let us = ChangeCalculator::new("US").unwrap();
        let result = us.calculate_change(dec!(0), &[Decimal::MAX]);
        assert!(matches!(result, Err(CalculatorError::AmountOutOfRange)));
    }

    #[test]
    fn test_fine_denomination_handles_everyday_amounts() {
        let calculator = fine_table("Dust", &[Decimal::new(1, 28), dec!(1)]);
        let change = calculator.calculate_change(dec!(0), &[dec!(10)]).unwrap();

        assert_eq!(change.len(), 1);
        assert_eq!(change.get(dec!(1)), Some(10));
        assert!(change.remainder().is_zero());
    }
}
