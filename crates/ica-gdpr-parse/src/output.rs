use std::io::Write;

use receipts_core::models::Totals;

/// Write `totals` as a single newline-terminated JSON line.
pub fn write_totals<W: Write>(mut writer: W, totals: &Totals) -> anyhow::Result<()> {
    serde_json::to_writer(&mut writer, totals)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
