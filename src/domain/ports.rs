use super::denomination::DenominationTable;
use crate::error::Result;

/// Somewhere a denomination table can be loaded from.
pub trait DenominationSource: Send + Sync {
    fn load(&self) -> Result<DenominationTable>;
}

pub type DenominationSourceBox = Box<dyn DenominationSource>;
