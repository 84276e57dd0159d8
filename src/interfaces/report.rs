use crate::domain::change::ChangeBreakdown;
use crate::error::Result;
use std::io::Write;

/// Writes one `Denomination: <d> - Count: <n>` line per entry.
pub fn write_lines<W: Write>(mut writer: W, breakdown: &ChangeBreakdown) -> Result<()> {
    for entry in breakdown {
        writeln!(
            writer,
            "Denomination: {} - Count: {}",
            entry.denomination, entry.count
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the breakdown as a single JSON document.
pub fn write_json<W: Write>(mut writer: W, breakdown: &ChangeBreakdown) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, breakdown).map_err(std::io::Error::from)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
