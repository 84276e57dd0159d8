pub mod change;
pub mod denomination;
pub mod ports;
