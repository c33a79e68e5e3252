#![allow(dead_code)]

use calamine::{Data, Range};
use ugc_chart_data::importers::range_from_rows;

/// String cell
pub fn s(value: &str) -> Data {
    Data::String(value.to_string())
}

/// Sheet built from string cells, blank strings included
pub fn text_sheet(rows: &[&[&str]]) -> Range<Data> {
    range_from_rows(
        rows.iter()
            .map(|row| row.iter().map(|cell| s(cell)).collect())
            .collect(),
    )
}

/// Header row of a scraper-written post sheet: columns A-L plus the icon in M
pub fn post_sheet_header() -> Vec<Data> {
    [
        "投稿ID",
        "投稿日",
        "アカウント名",
        "ニックネーム",
        "いいね数",
        "コメント数",
        "保存数",
        "シェア数",
        "再生回数",
        "フォロワー数",
        "動画リンク(URL)",
        "更新日",
        "アイコン",
    ]
    .iter()
    .map(|h| s(h))
    .collect()
}
