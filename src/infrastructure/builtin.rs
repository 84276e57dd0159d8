use crate::domain::denomination::DenominationTable;
use crate::domain::ports::DenominationSource;
use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const US: [Decimal; 12] = [
    dec!(0.01),
    dec!(0.05),
    dec!(0.10),
    dec!(0.25),
    dec!(0.50),
    dec!(1.00),
    dec!(2.00),
    dec!(5.00),
    dec!(10.00),
    dec!(20.00),
    dec!(50.00),
    dec!(100.00),
];

const MEXICO: [Decimal; 11] = [
    dec!(0.05),
    dec!(0.10),
    dec!(0.20),
    dec!(0.50),
    dec!(1.00),
    dec!(2.00),
    dec!(5.00),
    dec!(10.00),
    dec!(20.00),
    dec!(50.00),
    dec!(100.00),
];

/// The denomination table compiled into the crate: `US` and `Mexico`.
///
/// Both currencies are listed smallest to largest.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinDenominations;

impl BuiltinDenominations {
    pub fn new() -> Self {
        Self
    }
}

impl DenominationSource for BuiltinDenominations {
    fn load(&self) -> Result<DenominationTable> {
        let mut table = DenominationTable::new();
        table.insert("US", US)?;
        table.insert("Mexico", MEXICO)?;
        Ok(table)
    }
}
