/// Post sheet extraction
///
/// A reporting-date sheet (named `YYYYMMDD`) holds one post per row. Two
/// columns are required: `投稿ID` and `アカウント名`. Everything else is
/// optional and copied by header name.
use calamine::{Data, Range};

use crate::dates::{excel_serial_to_date, is_valid_date, parse_post_date};
use crate::diagnostics::Diagnostics;
use crate::extract_error::ExtractError;
use crate::importers::header_map::HeaderMap;
use crate::importers::icon_map::IconMap;
use crate::importers::sheet::cell_text;
use crate::models::{columns, CellValue, PostRecord};
use crate::utils::parse_count;

/// Column the scraper appends icon paths to when no icon sheet exists (column M)
pub const DEFAULT_ICON_COLUMN: usize = 12;

/// Records logged individually during icon enrichment
const LOGGED_ICON_LOOKUPS: usize = 3;

/// Headers accepted at the fixed icon column
const ICON_LABELS: [&str; 2] = [columns::ICON, columns::ICON_PATH];

/// Where a post's icon path comes from
#[derive(Debug, Clone, Copy)]
pub enum IconSource<'a> {
    /// Look the account up in the user icon sheet
    LookupMap(&'a IconMap),
    /// Read the icon path straight from a column of the post sheet
    FixedColumn(usize),
}

impl IconSource<'_> {
    pub fn fixed_column() -> Self {
        IconSource::FixedColumn(DEFAULT_ICON_COLUMN)
    }
}

/// Extract post records from a reporting-date sheet
///
/// * rows with a blank post ID are skipped silently
/// * rows with a blank account name are skipped with a warning
/// * `MM/DD` post dates are completed with `reference_year`
///
/// Fails without partial output when a required header is missing.
pub fn extract_post_records(
    range: &Range<Data>,
    reference_year: i32,
    icons: IconSource<'_>,
    diag: &dyn Diagnostics,
) -> Result<Vec<PostRecord>, ExtractError> {
    let mut rows = range.rows();
    let headers = rows.next().map(HeaderMap::from_row).unwrap_or_default();

    headers.index_of(columns::POST_ID).ok_or(ExtractError::MissingColumn {
        column: columns::POST_ID,
    })?;
    headers
        .index_of(columns::ACCOUNT_NAME)
        .ok_or(ExtractError::MissingColumn {
            column: columns::ACCOUNT_NAME,
        })?;

    if let IconSource::FixedColumn(index) = icons {
        check_icon_column(&headers, index, diag);
    }

    let mut posts = Vec::new();

    // Row 1 is the header, so data row N sits at sheet row N + 2
    for (row_offset, row) in rows.enumerate() {
        let mut post = match build_record(&headers, row, reference_year, icons, diag) {
            Ok(post) => post,
            Err(SkipReason::BlankPostId) => continue,
            Err(SkipReason::BlankAccountName) => {
                diag.warn(&format!(
                    "Row {} has no account name, skipping",
                    row_offset + 2
                ));
                continue;
            }
        };

        match icons {
            IconSource::LookupMap(map) => {
                let found = map.enrich(&mut post);
                if posts.len() < LOGGED_ICON_LOOKUPS {
                    if found {
                        diag.info(&format!(
                            "Icon path set: {} => {}",
                            post.account_name,
                            post.icon_path.as_deref().unwrap_or_default()
                        ));
                    } else {
                        diag.warn(&format!(
                            "No icon path found for account \"{}\"",
                            post.account_name
                        ));
                    }
                }
            }
            IconSource::FixedColumn(index) => {
                post.icon_path = cell_text(row.get(index));
            }
        }

        posts.push(post);
    }

    diag.info(&format!("Extracted {} posts", posts.len()));
    Ok(posts)
}

fn check_icon_column(headers: &HeaderMap, index: usize, diag: &dyn Diagnostics) {
    match headers.name_at(index) {
        Some(name) if ICON_LABELS.contains(&name.trim()) => {}
        Some(name) => diag.warn(&format!(
            "Icon column {index} is labelled \"{name}\", expected \"{}\"",
            columns::ICON
        )),
        None => diag.warn(&format!("Icon column {index} has no header")),
    }
}

/// Why a data row produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    BlankPostId,
    BlankAccountName,
}

/// Map one data row onto a record
///
/// Key columns are read from the same projection as every other field, so with
/// duplicate headers the right-most `投稿ID`/`アカウント名` decides the skip.
fn build_record(
    headers: &HeaderMap,
    row: &[Data],
    reference_year: i32,
    icons: IconSource<'_>,
    diag: &dyn Diagnostics,
) -> Result<PostRecord, SkipReason> {
    let fields = headers.project(row);

    let post_id =
        cell_text(fields.get(columns::POST_ID).copied()).ok_or(SkipReason::BlankPostId)?;
    let account_name = cell_text(fields.get(columns::ACCOUNT_NAME).copied())
        .ok_or(SkipReason::BlankAccountName)?;
    let mut post = PostRecord::new(post_id, account_name);

    for (name, cell) in fields {
        match name {
            columns::POST_ID | columns::ACCOUNT_NAME => {}
            columns::NICKNAME => post.nickname = cell_text(Some(cell)),
            columns::LIKES => post.likes = count_cell(cell, name, diag),
            columns::COMMENTS => post.comments = count_cell(cell, name, diag),
            columns::SAVES => post.saves = count_cell(cell, name, diag),
            columns::SHARES => post.shares = count_cell(cell, name, diag),
            columns::VIEWS => post.views = count_cell(cell, name, diag),
            columns::FOLLOWERS => post.follower_count = count_cell(cell, name, diag),
            columns::VIDEO_URL | columns::VIDEO_URL_ALT => post.video_url = cell_text(Some(cell)),
            columns::POST_DATE => {
                post.post_date = post_date_cell(cell, reference_year);
                if let Some(date) = &post.post_date {
                    if !is_valid_date(date) {
                        diag.warn(&format!(
                            "Post {} has an unrecognized post date: {}",
                            post.post_id, date
                        ));
                    }
                }
            }
            columns::UPDATED_DATE => post.updated_date = cell_text(Some(cell)),
            // The lookup map is authoritative for icons when one is supplied
            columns::ICON => {
                if let IconSource::FixedColumn(_) = icons {
                    post.icon_path = cell_text(Some(cell));
                }
            }
            columns::SONG_TITLE => post.song_title = cell_text(Some(cell)),
            other => {
                if let Some(value) = CellValue::from_cell(cell) {
                    post.extra.insert(other.to_string(), value);
                }
            }
        }
    }

    Ok(post)
}

fn post_date_cell(cell: &Data, reference_year: i32) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(parse_post_date(trimmed, reference_year))
            }
        }
        Data::Float(f) => excel_serial_to_date(*f).map(|d| d.format("%Y/%m/%d").to_string()),
        Data::Int(i) => excel_serial_to_date(*i as f64).map(|d| d.format("%Y/%m/%d").to_string()),
        other => cell_text(Some(other)),
    }
}

fn count_cell(cell: &Data, column: &str, diag: &dyn Diagnostics) -> Option<u64> {
    let count = match cell {
        Data::Empty => return None,
        Data::String(s) if s.trim().is_empty() => return None,
        Data::Int(i) => u64::try_from(*i).ok(),
        Data::Float(f) if f.is_finite() && *f >= 0.0 => Some(f.round() as u64),
        Data::String(s) => parse_count(s),
        _ => None,
    };

    if count.is_none() {
        diag.warn(&format!("Could not parse {column} value: {cell:?}"));
    }
    count
}
