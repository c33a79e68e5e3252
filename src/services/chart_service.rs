use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::aggregate::{filter_posts_by_date_range, top_follower_posts, unique_accounts_map};
use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::extract_error::ExtractError;
use crate::importers::WorkbookLoader;
use crate::models::{PostRecord, SongInfo};

/// What to put on the chart
#[derive(Debug, Clone, Default)]
pub struct ChartQuery {
    /// Reporting-date sheet to read; the latest one when `None`
    pub report_date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Overrides the configured top-N size
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub report_date: NaiveDate,
    pub songs: Vec<SongInfo>,
    pub total_posts: usize,
    pub unique_accounts: usize,
    pub top_posts: Vec<PostRecord>,
}

pub struct ChartService {
    loader: WorkbookLoader,
    config: Config,
}

impl ChartService {
    pub fn new(loader: WorkbookLoader, config: Config) -> Self {
        Self { loader, config }
    }

    /// Load one reporting date and rank its accounts by followers
    pub fn load_chart(
        &self,
        query: &ChartQuery,
        diag: &dyn Diagnostics,
    ) -> Result<ChartData, ExtractError> {
        let report_date = match query.report_date {
            Some(date) => date,
            None => self.loader.latest_report_date()?,
        };

        let songs = self
            .loader
            .load_song_info(self.config.song_info_sheet.as_deref(), diag)?;

        let posts = self.loader.load_posts_with_icons(
            report_date,
            &self.config.user_icon_sheet,
            self.config.icon_column_index,
            diag,
        )?;

        let limit = query.limit.unwrap_or(self.config.top_posts_limit);
        let (unique_accounts, top_posts) = Self::rank_posts(&posts, query.from, query.to, limit);

        info!(
            "Chart for {}: {} posts, {} accounts, {} ranked",
            report_date,
            posts.len(),
            unique_accounts,
            top_posts.len()
        );

        Ok(ChartData {
            report_date,
            songs,
            total_posts: posts.len(),
            unique_accounts,
            top_posts,
        })
    }

    /// Date-range filter → earliest post per account → top `limit` by followers
    ///
    /// The range is open on any side left as `None`; with no bounds at all the
    /// filter is skipped so undated posts still take part. Returns the number of
    /// distinct accounts alongside the ranking.
    pub fn rank_posts(
        posts: &[PostRecord],
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: usize,
    ) -> (usize, Vec<PostRecord>) {
        let in_range = if from.is_none() && to.is_none() {
            posts.to_vec()
        } else {
            filter_posts_by_date_range(
                posts,
                from.unwrap_or(NaiveDate::MIN),
                to.unwrap_or(NaiveDate::MAX),
            )
        };

        let accounts: Vec<PostRecord> = unique_accounts_map(&in_range).into_values().collect();
        (accounts.len(), top_follower_posts(&accounts, limit))
    }
}
