/// Pure aggregations over extracted post records
use chrono::NaiveDate;
use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::models::PostRecord;

/// Number of accounts shown on the follower chart
pub const DEFAULT_TOP_LIMIT: usize = 30;

/// Posts whose post date falls within `[from, to]`; undated posts are dropped
pub fn filter_posts_by_date_range(
    posts: &[PostRecord],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<PostRecord> {
    posts
        .iter()
        .filter(|post| {
            post.post_date_value()
                .is_some_and(|date| date >= from && date <= to)
        })
        .cloned()
        .collect()
}

/// Earliest post per account, in order of each account's first appearance
///
/// A later post only replaces the current one when its date is strictly
/// earlier, so same-day posts keep the first one seen. Posts without a usable
/// date never displace, and are never displaced by, another post.
pub fn unique_accounts_map(posts: &[PostRecord]) -> IndexMap<String, PostRecord> {
    let mut accounts: IndexMap<String, PostRecord> = IndexMap::new();

    for post in posts {
        match accounts.entry(post.account_name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(post.clone());
            }
            Entry::Occupied(mut slot) => {
                let earlier = match (post.post_date_value(), slot.get().post_date_value()) {
                    (Some(candidate), Some(current)) => candidate < current,
                    _ => false,
                };
                if earlier {
                    slot.insert(post.clone());
                }
            }
        }
    }

    accounts
}

/// The `limit` posts with the most followers, highest first
///
/// The sort is stable, so equal follower counts keep their input order. Posts
/// without a follower count rank below every counted post.
pub fn top_follower_posts(posts: &[PostRecord], limit: usize) -> Vec<PostRecord> {
    let mut ranked = posts.to_vec();
    ranked.sort_by(|a, b| b.follower_count.cmp(&a.follower_count));
    ranked.truncate(limit);
    ranked
}
