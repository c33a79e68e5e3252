/// Account → icon path lookup built from the user icon sheet
use calamine::{Data, Range};
use std::collections::HashMap;

use crate::diagnostics::Diagnostics;
use crate::extract_error::ExtractError;
use crate::importers::header_map::HeaderMap;
use crate::importers::sheet::{cell_text, is_row_empty};
use crate::models::{columns, PostRecord};

/// Mapping rows logged individually before the log goes quiet
const LOGGED_MAPPINGS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IconMap {
    icons: HashMap<String, String>,
}

impl IconMap {
    /// Build the map from the `ユーザーアイコン` sheet
    ///
    /// # Expected Sheet Structure:
    /// ```text
    /// Row 1: Header (アカウント名 | アイコンパス)
    /// Row 2+: account name | icon path
    /// ```
    ///
    /// Both keys and values are trimmed; rows missing either are skipped. A
    /// sheet without a data row gives an empty map, a sheet without the two
    /// header columns is an error.
    pub fn from_range(range: &Range<Data>, diag: &dyn Diagnostics) -> Result<Self, ExtractError> {
        diag.info("Extracting user icon map");
        diag.info(&format!("User icon sheet has {} rows", range.height()));

        if range.height() <= 1 {
            diag.warn("User icon sheet has no data");
            return Ok(Self::default());
        }

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(Self::default());
        };

        let headers = HeaderMap::from_row(header_row);
        let account_idx = headers.index_of(columns::ACCOUNT_NAME);
        let icon_idx = headers.index_of(columns::ICON_PATH);
        diag.info(&format!(
            "Account name column: {account_idx:?}, icon path column: {icon_idx:?}"
        ));

        let (account_idx, icon_idx) = match (account_idx, icon_idx) {
            (Some(a), Some(i)) => (a, i),
            (None, _) => {
                diag.error("User icon sheet is missing required headers");
                return Err(ExtractError::MissingColumn {
                    column: columns::ACCOUNT_NAME,
                });
            }
            (_, None) => {
                diag.error("User icon sheet is missing required headers");
                return Err(ExtractError::MissingColumn {
                    column: columns::ICON_PATH,
                });
            }
        };

        let mut icons = HashMap::new();
        for row in rows.filter(|row| !is_row_empty(row)) {
            let account = cell_text(row.get(account_idx));
            let icon = cell_text(row.get(icon_idx));
            if let (Some(account), Some(icon)) = (account, icon) {
                if icons.len() < LOGGED_MAPPINGS {
                    diag.info(&format!("Icon mapping: {account} => {icon}"));
                }
                icons.insert(account, icon);
            }
        }

        diag.info(&format!("Built {} icon mappings", icons.len()));
        Ok(Self { icons })
    }

    pub fn get(&self, account_name: &str) -> Option<&str> {
        self.icons.get(account_name.trim()).map(String::as_str)
    }

    pub fn insert(&mut self, account_name: &str, icon_path: &str) {
        self.icons
            .insert(account_name.trim().to_string(), icon_path.trim().to_string());
    }

    /// Set the record's icon from the map; an unknown account leaves it untouched
    ///
    /// Returns whether a mapping was found.
    pub fn enrich(&self, record: &mut PostRecord) -> bool {
        match self.get(&record.account_name) {
            Some(icon) => {
                record.icon_path = Some(icon.to_string());
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl FromIterator<(String, String)> for IconMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut map = IconMap::default();
        for (account, icon) in iter {
            map.insert(&account, &icon);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use crate::importers::sheet::range_from_rows;
    use tracing::Level;

    fn s(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn test_from_range_trims_and_skips_incomplete_rows() {
        let range = range_from_rows(vec![
            vec![s("アカウント名"), s("アイコンパス")],
            vec![s(" alice "), s(" icons/alice.png ")],
            vec![s("bob"), s("")],
            vec![Data::Empty, Data::Empty],
            vec![s(""), s("icons/orphan.png")],
        ]);
        let diag = CollectingDiagnostics::new();
        let map = IconMap::from_range(&range, &diag).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("alice"), Some("icons/alice.png"));
        assert_eq!(map.get("bob"), None);
    }

    #[test]
    fn test_from_range_missing_header_is_error() {
        let range = range_from_rows(vec![
            vec![s("アカウント名"), s("パス")],
            vec![s("alice"), s("a.png")],
        ]);
        let diag = CollectingDiagnostics::new();
        let err = IconMap::from_range(&range, &diag).unwrap_err();

        assert!(matches!(
            err,
            ExtractError::MissingColumn {
                column: columns::ICON_PATH
            }
        ));
        assert_eq!(diag.messages(Level::ERROR).len(), 1);
    }

    #[test]
    fn test_header_only_sheet_gives_empty_map() {
        let range = range_from_rows(vec![vec![s("アカウント名"), s("アイコンパス")]]);
        let diag = CollectingDiagnostics::new();
        let map = IconMap::from_range(&range, &diag).unwrap();

        assert!(map.is_empty());
        assert_eq!(diag.messages(Level::WARN).len(), 1);
    }

    #[test]
    fn test_enrich_sets_icon_only_for_known_accounts() {
        let map: IconMap = [("alice".to_string(), "icon1.png".to_string())]
            .into_iter()
            .collect();

        let mut alice = PostRecord::new("p1", "alice");
        let mut bob = PostRecord::new("p2", "bob");

        assert!(map.enrich(&mut alice));
        assert!(!map.enrich(&mut bob));
        assert_eq!(alice.icon_path.as_deref(), Some("icon1.png"));
        assert_eq!(bob.icon_path, None);
    }
}
