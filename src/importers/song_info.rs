/// Song information sheet extraction
use calamine::{Data, Range};
use std::collections::BTreeMap;

use crate::diagnostics::Diagnostics;
use crate::importers::header_map::HeaderMap;
use crate::importers::sheet::is_row_empty;
use crate::models::{CellValue, SongInfo};

/// Extract the rows of the song sheet (`楽曲情報`)
///
/// Every named column is copied verbatim. Empty rows are dropped, as are rows
/// whose `日付` cell does not hold a valid date; a sheet without a `日付`
/// column therefore yields nothing.
pub fn extract_song_info(range: &Range<Data>, diag: &dyn Diagnostics) -> Vec<SongInfo> {
    if range.height() <= 1 {
        return Vec::new();
    }

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(row) => HeaderMap::from_row(row),
        None => return Vec::new(),
    };

    let mut skipped = 0;
    let songs: Vec<SongInfo> = rows
        .filter(|row| !is_row_empty(row))
        .map(|row| {
            let fields: BTreeMap<String, CellValue> = headers
                .project(row)
                .into_iter()
                .filter_map(|(name, cell)| {
                    CellValue::from_cell(cell).map(|value| (name.to_string(), value))
                })
                .collect();
            SongInfo { fields }
        })
        .filter(|song| {
            let dated = song.date().is_some();
            if !dated {
                skipped += 1;
            }
            dated
        })
        .collect();

    if skipped > 0 {
        diag.warn(&format!("Skipped {skipped} song rows without a valid date"));
    }
    diag.info(&format!("Extracted {} song info rows", songs.len()));
    songs
}
