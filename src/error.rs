use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Invalid currency '{0}': no denominations configured")]
    InvalidCurrency(String),
    #[error("Insufficient payment: paid {paid}, price is {price}")]
    InsufficientPayment { price: Decimal, paid: Decimal },
    #[error("Invalid denomination {0}: must be positive")]
    InvalidDenomination(Decimal),
    #[error("Currency '{0}' has no denominations")]
    EmptyDenominationSet(String),
    #[error("Amount out of range")]
    AmountOutOfRange,
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
