use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// Writes a `currency,denomination` CSV with the given rows to a temp file.
pub fn denomination_csv(rows: &[(&str, &str)]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "currency,denomination")?;
    for (currency, denomination) in rows {
        writeln!(file, "{},{}", currency, denomination)?;
    }
    file.flush()?;
    Ok(file)
}
