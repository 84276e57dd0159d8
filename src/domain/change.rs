use super::denomination::Denomination;
use rust_decimal::Decimal;
use serde::Serialize;

/// One line of a change breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeEntry {
    pub denomination: Denomination,
    pub count: u64,
}

/// The coins and notes to hand back for one transaction.
///
/// Only denominations with a positive count are present, in the order the
/// currency configures them. Whatever part of the change no denomination can
/// express is kept in `remainder` instead of being handed out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeBreakdown {
    currency: String,
    entries: Vec<ChangeEntry>,
    remainder: Decimal,
}

impl ChangeBreakdown {
    pub(crate) fn new(currency: &str, entries: Vec<ChangeEntry>, remainder: Decimal) -> Self {
        Self {
            currency: currency.to_string(),
            entries,
            remainder,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeEntry> {
        self.entries.iter()
    }

    /// Count handed out for `denomination`, if any.
    pub fn get(&self, denomination: Decimal) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.denomination.value() == denomination)
            .map(|e| e.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of denomination times count over all entries.
    pub fn total(&self) -> Decimal {
        self.entries
            .iter()
            .map(|e| e.denomination.value() * Decimal::from(e.count))
            .sum()
    }

    /// Change owed that could not be expressed with the currency's denominations.
    pub fn remainder(&self) -> Decimal {
        self.remainder
    }
}

impl<'a> IntoIterator for &'a ChangeBreakdown {
    type Item = &'a ChangeEntry;
    type IntoIter = std::slice::Iter<'a, ChangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
