//! Application layer containing the change-making logic.
//!
//! This module defines the `ChangeCalculator`, the entry point for turning a
//! price and a payment into a breakdown of coins and notes.

pub mod calculator;
