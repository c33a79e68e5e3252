// End-to-end tests for post, song and icon sheet extraction
// Sheets are built in memory in the shape the scraper writes them

mod common;

use calamine::Data;
use common::{post_sheet_header, s, text_sheet};
use tracing::Level;
use ugc_chart_data::diagnostics::CollectingDiagnostics;
use ugc_chart_data::extract_error::ExtractError;
use ugc_chart_data::importers::{
    extract_post_records, extract_song_info, range_from_rows, IconMap, IconSource,
};
use ugc_chart_data::models::CellValue;

#[test]
fn test_three_row_sheet_end_to_end() {
    let range = text_sheet(&[
        &["投稿ID", "アカウント名", "投稿日"],
        &["p1", "alice", "03/01"],
        &["p2", "bob", "03/02"],
        &["", "carol", "03/03"],
    ]);
    let diag = CollectingDiagnostics::new();

    let posts = extract_post_records(&range, 2024, IconSource::FixedColumn(3), &diag)
        .expect("extraction should succeed");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].post_id, "p1");
    assert_eq!(posts[0].post_date.as_deref(), Some("2024/03/01"));
    assert_eq!(posts[1].post_id, "p2");
    assert_eq!(posts[1].post_date.as_deref(), Some("2024/03/02"));
    for post in &posts {
        assert!(!post.is_visible);
        assert!(!post.is_orange_border);
        assert!(post.is_show_followers);
        assert!(!post.unique_id.is_empty());
    }
    assert_ne!(posts[0].unique_id, posts[1].unique_id);
}

#[test]
fn test_blank_key_rows_never_reach_output() {
    let range = text_sheet(&[
        &["投稿ID", "アカウント名"],
        &["", "a"],
        &["p2", "b"],
        &["   ", "c"],
        &["", ""],
        &["p5", "e"],
    ]);
    let diag = CollectingDiagnostics::new();
    let posts = extract_post_records(&range, 2024, IconSource::FixedColumn(9), &diag).unwrap();

    let ids: Vec<_> = posts.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(ids, vec!["p2", "p5"]);
}

#[test]
fn test_scraper_sheet_with_fixed_icon_column() {
    let row: Vec<Data> = vec![
        s("7301234567890123456"),
        s("02/28"),
        s("alice"),
        s("Alice"),
        Data::Int(1500),
        Data::Int(30),
        Data::Int(12),
        Data::Int(4),
        s("1.2M"),
        Data::Float(25000.0),
        s("https://www.tiktok.com/@alice/video/7301234567890123456"),
        s("2024/03/01 09:00"),
        s("icons/alice.jpg"),
    ];
    let range = range_from_rows(vec![post_sheet_header(), row]);
    let diag = CollectingDiagnostics::new();

    let posts = extract_post_records(&range, 2024, IconSource::fixed_column(), &diag).unwrap();
    let post = &posts[0];

    assert_eq!(post.post_id, "7301234567890123456");
    assert_eq!(post.post_date.as_deref(), Some("2024/02/28"));
    assert_eq!(post.nickname.as_deref(), Some("Alice"));
    assert_eq!(post.likes, Some(1500));
    assert_eq!(post.comments, Some(30));
    assert_eq!(post.saves, Some(12));
    assert_eq!(post.shares, Some(4));
    assert_eq!(post.views, Some(1_200_000));
    assert_eq!(post.follower_count, Some(25_000));
    assert_eq!(
        post.video_url.as_deref(),
        Some("https://www.tiktok.com/@alice/video/7301234567890123456")
    );
    assert_eq!(post.updated_date.as_deref(), Some("2024/03/01 09:00"));
    assert_eq!(post.icon_path.as_deref(), Some("icons/alice.jpg"));
    assert!(post.extra.is_empty());
    assert!(diag.messages(Level::WARN).is_empty());
}

#[test]
fn test_icon_sheet_feeds_lookup_enrichment() {
    let icon_range = text_sheet(&[
        &["アカウント名", "アイコンパス"],
        &["alice", "icon1.png"],
    ]);
    let diag = CollectingDiagnostics::new();
    let icons = IconMap::from_range(&icon_range, &diag).unwrap();

    let post_range = text_sheet(&[
        &["投稿ID", "アカウント名"],
        &["p1", "alice"],
        &["p2", "bob"],
    ]);
    let posts =
        extract_post_records(&post_range, 2024, IconSource::LookupMap(&icons), &diag).unwrap();

    assert_eq!(posts[0].icon_path.as_deref(), Some("icon1.png"));
    assert_eq!(posts[1].icon_path, None);

    let json = serde_json::to_value(&posts[1]).unwrap();
    assert!(json.get("アイコン").is_none());
}

#[test]
fn test_missing_required_header_aborts_whole_sheet() {
    let range = text_sheet(&[&["ID", "アカウント名"], &["p1", "alice"]]);
    let diag = CollectingDiagnostics::new();

    match extract_post_records(&range, 2024, IconSource::fixed_column(), &diag) {
        Err(ExtractError::MissingColumn { column }) => assert_eq!(column, "投稿ID"),
        other => panic!("Expected MissingColumn error, got {other:?}"),
    }
}

#[test]
fn test_song_info_sheet() {
    let range = range_from_rows(vec![
        vec![s("楽曲名"), s("楽曲URL"), s("日付"), s("総UGC数")],
        vec![s("Song A"), s("https://example.com/a"), s("2024-03-01"), Data::Int(10)],
        vec![s("Song A"), s("https://example.com/a"), s(""), Data::Int(12)],
        vec![Data::Empty, Data::Empty, Data::Empty, Data::Empty],
    ]);
    let diag = CollectingDiagnostics::new();
    let songs = extract_song_info(&range, &diag);

    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].get("総UGC数"), Some(&CellValue::Number(10.0)));
}
