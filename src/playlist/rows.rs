use std::path::Path;

use crate::{Res, types::TrackRow};

/// Reads track rows from a CSV file with a header line.
///
/// # Errors
///
/// Fails when the file cannot be read or a row lacks the `Track Name` or
/// `Artist Name(s)` column.
pub fn read_track_rows(path: &Path) -> Res<Vec<TrackRow>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    parse_track_rows(&content).map_err(|e| format!("{}: {}", path.display(), e).into())
}

/// Parses CSV text into track rows. A leading UTF-8 byte order mark is ignored.
///
/// Rows may have more fields than the header; fields without a header are dropped.
pub fn parse_track_rows(content: &str) -> Res<Vec<TrackRow>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for row in reader.deserialize::<TrackRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Writes rows with the header `Playlist Name,Track Name,Artist Name(s),Album`.
pub fn write_track_rows(path: &Path, rows: &[TrackRow]) -> Res<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| format!("cannot create {}: {}", path.display(), e))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
