// ! Workbook extraction: header mapping, post/song/icon sheets and the file loader

pub mod header_map;
pub mod icon_map;
pub mod post_extractor;
pub mod sheet;
pub mod song_info;
pub mod workbook_loader;

// Re-export commonly used items
pub use header_map::HeaderMap;
pub use icon_map::IconMap;
pub use post_extractor::{extract_post_records, IconSource, DEFAULT_ICON_COLUMN};
pub use sheet::range_from_rows;
pub use song_info::extract_song_info;
pub use workbook_loader::WorkbookLoader;
