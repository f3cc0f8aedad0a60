use std::io::Write;

use anyhow::Result;

use crate::measurement::Measurement;

/// One measurement per line, the same shape the import side reads back.
pub fn write(mut writer: impl Write, measurements: &[Measurement]) -> Result<()> {
    for m in measurements {
        serde_json::to_writer(&mut writer, m)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
