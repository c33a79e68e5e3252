/// Record types produced by workbook extraction
///
/// Known spreadsheet columns map onto named fields; anything else is carried in
/// `extra` keyed by its header so schema drift in the source workbook survives a
/// round trip through the chart layer.
use calamine::Data;
use chrono::{NaiveDate, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::dates::parse_date;
use crate::utils::generate_unique_id;

/// Header vocabulary of the post, song and icon sheets
pub mod columns {
    pub const POST_ID: &str = "投稿ID";
    pub const POST_DATE: &str = "投稿日";
    pub const ACCOUNT_NAME: &str = "アカウント名";
    pub const NICKNAME: &str = "ニックネーム";
    pub const LIKES: &str = "いいね数";
    pub const COMMENTS: &str = "コメント数";
    pub const SAVES: &str = "保存数";
    pub const SHARES: &str = "シェア数";
    pub const VIEWS: &str = "再生回数";
    pub const FOLLOWERS: &str = "フォロワー数";
    pub const VIDEO_URL: &str = "動画リンク(URL)";
    pub const VIDEO_URL_ALT: &str = "動画リンク_URL";
    pub const UPDATED_DATE: &str = "更新日";
    pub const ICON: &str = "アイコン";
    pub const ICON_PATH: &str = "アイコンパス";
    pub const SONG_TITLE: &str = "楽曲名";
    pub const SONG_DATE: &str = "日付";
}

/// A single non-empty cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Convert a calamine cell; empty, blank-string and error cells yield `None`
    pub fn from_cell(data: &Data) -> Option<Self> {
        match data {
            Data::String(s) if s.trim().is_empty() => None,
            Data::String(s) => Some(CellValue::Text(s.clone())),
            Data::Int(i) => Some(CellValue::Number(*i as f64)),
            Data::Float(f) => Some(CellValue::Number(*f)),
            Data::Bool(b) => Some(CellValue::Bool(*b)),
            Data::DateTime(dt) => dt.as_datetime().map(|dt| {
                if dt.time().num_seconds_from_midnight() == 0 {
                    CellValue::Text(dt.format("%Y/%m/%d").to_string())
                } else {
                    CellValue::Text(dt.format("%Y/%m/%d %H:%M:%S").to_string())
                }
            }),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
            Data::Error(_) | Data::Empty => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Calendar date held by a text value, if it parses as one
    pub fn as_date(&self) -> Option<NaiveDate> {
        self.as_text().and_then(parse_date)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{n:.0}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// One post row from a reporting-date sheet
///
/// Serializes with the sheet's own header names so the chart front end can keep
/// addressing fields the way the workbook labels them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    #[serde(rename = "uniqueId")]
    pub unique_id: String,
    #[serde(rename = "投稿ID")]
    pub post_id: String,
    #[serde(rename = "アカウント名")]
    pub account_name: String,
    #[serde(rename = "ニックネーム", skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(rename = "いいね数", skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(rename = "コメント数", skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(rename = "保存数", skip_serializing_if = "Option::is_none")]
    pub saves: Option<u64>,
    #[serde(rename = "シェア数", skip_serializing_if = "Option::is_none")]
    pub shares: Option<u64>,
    #[serde(rename = "再生回数", skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(rename = "フォロワー数", skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
    #[serde(rename = "動画リンク_URL", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Normalized to `YYYY/MM/DD` when the sheet held `MM/DD` or a full date
    #[serde(rename = "投稿日", skip_serializing_if = "Option::is_none")]
    pub post_date: Option<String>,
    #[serde(rename = "更新日", skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
    #[serde(rename = "アイコン", skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(rename = "楽曲名", skip_serializing_if = "Option::is_none")]
    pub song_title: Option<String>,
    #[serde(rename = "isVisible")]
    pub is_visible: bool,
    #[serde(rename = "isOrangeBorder")]
    pub is_orange_border: bool,
    #[serde(rename = "isShowFollowers")]
    pub is_show_followers: bool,
    /// Columns outside the known vocabulary
    #[serde(flatten)]
    pub extra: BTreeMap<String, CellValue>,
}

impl PostRecord {
    /// New record with a fresh unique id and the initial UI state
    /// (hidden, no highlight, follower count shown)
    pub fn new(post_id: impl Into<String>, account_name: impl Into<String>) -> Self {
        Self {
            unique_id: generate_unique_id(),
            post_id: post_id.into(),
            account_name: account_name.into(),
            nickname: None,
            likes: None,
            comments: None,
            saves: None,
            shares: None,
            views: None,
            follower_count: None,
            video_url: None,
            post_date: None,
            updated_date: None,
            icon_path: None,
            song_title: None,
            is_visible: false,
            is_orange_border: false,
            is_show_followers: true,
            extra: BTreeMap::new(),
        }
    }

    /// Post date as a calendar date; `None` when absent or unparseable
    pub fn post_date_value(&self) -> Option<NaiveDate> {
        self.post_date.as_deref().and_then(parse_date)
    }

    /// Look a field up by its sheet header name
    pub fn get(&self, header: &str) -> Option<CellValue> {
        let text = |v: &Option<String>| v.clone().map(CellValue::Text);
        let count = |v: &Option<u64>| v.map(|n| CellValue::Number(n as f64));

        match header {
            columns::POST_ID => Some(CellValue::Text(self.post_id.clone())),
            columns::ACCOUNT_NAME => Some(CellValue::Text(self.account_name.clone())),
            columns::NICKNAME => text(&self.nickname),
            columns::LIKES => count(&self.likes),
            columns::COMMENTS => count(&self.comments),
            columns::SAVES => count(&self.saves),
            columns::SHARES => count(&self.shares),
            columns::VIEWS => count(&self.views),
            columns::FOLLOWERS => count(&self.follower_count),
            columns::VIDEO_URL | columns::VIDEO_URL_ALT => text(&self.video_url),
            columns::POST_DATE => text(&self.post_date),
            columns::UPDATED_DATE => text(&self.updated_date),
            columns::ICON => text(&self.icon_path),
            columns::SONG_TITLE => text(&self.song_title),
            other => self.extra.get(other).cloned(),
        }
    }
}

/// One row of the song information sheet, keyed by header
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SongInfo {
    pub fields: BTreeMap<String, CellValue>,
}

impl SongInfo {
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.fields.get(header)
    }

    /// Value of the `日付` column as a date
    pub fn date(&self) -> Option<NaiveDate> {
        self.get(columns::SONG_DATE).and_then(CellValue::as_date)
    }

    pub fn title(&self) -> Option<&str> {
        self.get(columns::SONG_TITLE).and_then(CellValue::as_text)
    }
}
