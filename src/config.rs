use std::env;

use crate::aggregate::DEFAULT_TOP_LIMIT;
use crate::importers::DEFAULT_ICON_COLUMN;

pub const DEFAULT_USER_ICON_SHEET: &str = "ユーザーアイコン";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Song sheet name; `None` reads the first sheet
    pub song_info_sheet: Option<String>,
    pub user_icon_sheet: String,
    pub top_posts_limit: usize,
    pub icon_column_index: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            song_info_sheet: None,
            user_icon_sheet: DEFAULT_USER_ICON_SHEET.to_string(),
            top_posts_limit: DEFAULT_TOP_LIMIT,
            icon_column_index: DEFAULT_ICON_COLUMN,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            song_info_sheet: env::var("SONG_INFO_SHEET")
                .ok()
                .filter(|name| !name.trim().is_empty()),
            user_icon_sheet: env::var("USER_ICON_SHEET")
                .unwrap_or_else(|_| DEFAULT_USER_ICON_SHEET.to_string()),
            top_posts_limit: env::var("TOP_POSTS_LIMIT")
                .unwrap_or_else(|_| DEFAULT_TOP_LIMIT.to_string())
                .parse()
                .unwrap_or(DEFAULT_TOP_LIMIT),
            icon_column_index: env::var("ICON_COLUMN_INDEX")
                .unwrap_or_else(|_| DEFAULT_ICON_COLUMN.to_string())
                .parse()
                .unwrap_or(DEFAULT_ICON_COLUMN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "SONG_INFO_SHEET",
            "USER_ICON_SHEET",
            "TOP_POSTS_LIMIT",
            "ICON_COLUMN_INDEX",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(Config::from_env(), Config::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var("SONG_INFO_SHEET", "楽曲情報");
        env::set_var("TOP_POSTS_LIMIT", "10");
        env::set_var("ICON_COLUMN_INDEX", "not-a-number");

        let config = Config::from_env();
        assert_eq!(config.song_info_sheet.as_deref(), Some("楽曲情報"));
        assert_eq!(config.top_posts_limit, 10);
        assert_eq!(config.icon_column_index, DEFAULT_ICON_COLUMN);

        clear_env();
    }
}
