use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use chrono::{Datelike, NaiveDate};
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info};

use crate::dates::{parse_sheet_date, sheet_name_for};
use crate::diagnostics::Diagnostics;
use crate::extract_error::ExtractError;
use crate::importers::icon_map::IconMap;
use crate::importers::post_extractor::{extract_post_records, IconSource};
use crate::importers::song_info::extract_song_info;
use crate::models::{PostRecord, SongInfo};

/// Reader for UGC chart workbooks (`.xlsx`, `.xls`, `.ods`)
///
/// # Expected Workbook Structure:
/// ```text
/// 楽曲情報          : 楽曲名 | 楽曲URL | 日付 | 総UGC数
/// ユーザーアイコン   : アカウント名 | アイコンパス           (optional)
/// YYYYMMDD (n)     : 投稿ID | 投稿日 | アカウント名 | ... | 更新日 | アイコン
/// ```
///
/// Every call opens the workbook afresh; extraction itself never touches the file.
pub struct WorkbookLoader {
    workbook_path: String,
}

impl WorkbookLoader {
    pub fn new(workbook_path: impl Into<String>) -> Self {
        Self {
            workbook_path: workbook_path.into(),
        }
    }

    pub fn workbook_path(&self) -> &str {
        &self.workbook_path
    }

    fn open(&self) -> Result<Sheets<BufReader<File>>, ExtractError> {
        open_workbook_auto(&self.workbook_path)
            .map_err(|e| ExtractError::WorkbookOpen(e.to_string()))
    }

    fn read_range(
        workbook: &mut Sheets<BufReader<File>>,
        sheet_name: &str,
    ) -> Result<Range<Data>, ExtractError> {
        workbook
            .worksheet_range(sheet_name)
            .map_err(|_| ExtractError::SheetNotFound(sheet_name.to_string()))
    }

    pub fn sheet_names(&self) -> Result<Vec<String>, ExtractError> {
        Ok(self.open()?.sheet_names())
    }

    /// Load the song sheet; `None` reads the first sheet in the workbook
    pub fn load_song_info(
        &self,
        sheet_name: Option<&str>,
        diag: &dyn Diagnostics,
    ) -> Result<Vec<SongInfo>, ExtractError> {
        let mut workbook = self.open()?;
        let sheet_name = match sheet_name {
            Some(name) => name.to_string(),
            None => workbook
                .sheet_names()
                .into_iter()
                .next()
                .ok_or(ExtractError::EmptyWorkbook)?,
        };

        info!("Loading song info from sheet: {}", sheet_name);
        let range = Self::read_range(&mut workbook, &sheet_name)?;
        Ok(extract_song_info(&range, diag))
    }

    /// Load the icon lookup sheet; a workbook without that sheet gives `None`
    pub fn load_icon_map(
        &self,
        sheet_name: &str,
        diag: &dyn Diagnostics,
    ) -> Result<Option<IconMap>, ExtractError> {
        let mut workbook = self.open()?;
        if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
            debug!("No icon sheet named {} in {}", sheet_name, self.workbook_path);
            return Ok(None);
        }

        let range = Self::read_range(&mut workbook, sheet_name)?;
        IconMap::from_range(&range, diag).map(Some)
    }

    /// Load the posts collected on `report_date`
    ///
    /// The report date's year completes `MM/DD` post dates.
    pub fn load_posts(
        &self,
        report_date: NaiveDate,
        icons: IconSource<'_>,
        diag: &dyn Diagnostics,
    ) -> Result<Vec<PostRecord>, ExtractError> {
        let sheet_name = sheet_name_for(report_date);
        info!("Loading posts from sheet: {}", sheet_name);

        let mut workbook = self.open()?;
        let range = Self::read_range(&mut workbook, &sheet_name)?;
        extract_post_records(&range, report_date.year(), icons, diag)
    }

    /// Load posts, enriching icons from `icon_sheet` when the workbook has it and
    /// falling back to `icon_column` otherwise
    pub fn load_posts_with_icons(
        &self,
        report_date: NaiveDate,
        icon_sheet: &str,
        icon_column: usize,
        diag: &dyn Diagnostics,
    ) -> Result<Vec<PostRecord>, ExtractError> {
        match self.load_icon_map(icon_sheet, diag)? {
            Some(map) => self.load_posts(report_date, IconSource::LookupMap(&map), diag),
            None => self.load_posts(report_date, IconSource::FixedColumn(icon_column), diag),
        }
    }

    /// Dates of all `YYYYMMDD` sheets, most recent first
    pub fn available_report_dates(&self) -> Result<Vec<NaiveDate>, ExtractError> {
        let mut dates: Vec<NaiveDate> = self
            .sheet_names()?
            .iter()
            .filter_map(|name| parse_sheet_date(name))
            .collect();

        dates.sort_unstable();
        dates.reverse();
        debug!("Found {} reporting-date sheets", dates.len());
        Ok(dates)
    }

    /// Most recent reporting date in the workbook
    pub fn latest_report_date(&self) -> Result<NaiveDate, ExtractError> {
        self.available_report_dates()?
            .into_iter()
            .next()
            .ok_or(ExtractError::NoReportSheets)
    }
}
